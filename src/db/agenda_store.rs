// src/db/agenda_store.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AppointmentRepository, CollaboratorRepository, ScheduleRepository},
    models::{
        appointments::{Appointment, AppointmentFilter},
        schedule::WorkSchedule,
    },
};

/// Tudo o que o cálculo de disponibilidade lê do mundo externo.
///
/// É o único ponto variável do núcleo de agenda: em produção o `AppState`
/// injeta o `PgAgendaStore`; nos testes, uma implementação em memória.
#[async_trait]
pub trait AgendaStore: Send + Sync {
    async fn collaborator_exists(&self, collaborator_id: Uuid) -> Result<bool, AppError>;

    /// Horário persistido do colaborador para o dia (0 = domingo), se houver.
    async fn find_work_schedule(
        &self,
        collaborator_id: Uuid,
        day_of_week: i16,
    ) -> Result<Option<WorkSchedule>, AppError>;

    /// Agendamentos pelo filtro, ordenados pelo início.
    async fn find_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>, AppError>;
}

#[derive(Clone)]
pub struct PgAgendaStore {
    appointments: AppointmentRepository,
    collaborators: CollaboratorRepository,
    schedules: ScheduleRepository,
    pool: sqlx::PgPool,
}

impl PgAgendaStore {
    pub fn new(
        appointments: AppointmentRepository,
        collaborators: CollaboratorRepository,
        schedules: ScheduleRepository,
        pool: sqlx::PgPool,
    ) -> Self {
        Self { appointments, collaborators, schedules, pool }
    }
}

#[async_trait]
impl AgendaStore for PgAgendaStore {
    async fn collaborator_exists(&self, collaborator_id: Uuid) -> Result<bool, AppError> {
        let found = self.collaborators.find_by_id(&self.pool, collaborator_id).await?;
        Ok(found.is_some())
    }

    async fn find_work_schedule(
        &self,
        collaborator_id: Uuid,
        day_of_week: i16,
    ) -> Result<Option<WorkSchedule>, AppError> {
        self.schedules.find_for_day(&self.pool, collaborator_id, day_of_week).await
    }

    async fn find_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>, AppError> {
        self.appointments.find_appointments(&self.pool, filter).await
    }
}
