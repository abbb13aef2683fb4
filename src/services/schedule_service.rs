// src/services/schedule_service.rs

use chrono::NaiveTime;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CollaboratorRepository, ScheduleRepository},
    models::schedule::WorkSchedule,
};

#[derive(Clone)]
pub struct ScheduleService {
    repo: ScheduleRepository,
    collaborator_repo: CollaboratorRepository,
    pool: PgPool,
}

/// Dia entre 0 (domingo) e 6 (sábado), início antes do fim.
pub fn validate_schedule(day_of_week: i16, start_time: NaiveTime, end_time: NaiveTime) -> Result<(), AppError> {
    if !(0..=6).contains(&day_of_week) {
        return Err(AppError::InvalidInput(
            "O dia da semana deve estar entre 0 (domingo) e 6 (sábado).".into(),
        ));
    }
    if start_time >= end_time {
        return Err(AppError::InvalidInput(
            "O horário de início deve ser anterior ao horário de término.".into(),
        ));
    }
    Ok(())
}

impl ScheduleService {
    pub fn new(repo: ScheduleRepository, collaborator_repo: CollaboratorRepository, pool: PgPool) -> Self {
        Self { repo, collaborator_repo, pool }
    }

    /// Cria ou substitui o horário do colaborador naquele dia.
    pub async fn upsert_schedule(
        &self,
        collaborator_id: Uuid,
        day_of_week: i16,
        start_time: NaiveTime,
        end_time: NaiveTime,
        is_available: bool,
    ) -> Result<WorkSchedule, AppError> {
        validate_schedule(day_of_week, start_time, end_time)?;

        self.collaborator_repo
            .find_by_id(&self.pool, collaborator_id)
            .await?
            .ok_or(AppError::CollaboratorNotFound)?;

        self.repo
            .upsert_schedule(&self.pool, collaborator_id, day_of_week, start_time, end_time, is_available)
            .await
    }

    pub async fn list_schedules(
        &self,
        collaborator_id: Option<Uuid>,
        day_of_week: Option<i16>,
    ) -> Result<Vec<WorkSchedule>, AppError> {
        self.repo.list_schedules(collaborator_id, day_of_week).await
    }

    pub async fn delete_schedule(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_schedule(&self.pool, id).await? {
            return Err(AppError::ResourceNotFound("Horário de trabalho".into()));
        }
        Ok(())
    }
}
