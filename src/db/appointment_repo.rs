// src/db/appointment_repo.rs

use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::{map_constraint_violation, AppError},
    models::appointments::{Appointment, AppointmentFilter, NewAppointment},
};

const APPOINTMENT_COLUMNS: &str = "id, client_id, client_name, service_id, collaborator_id, user_id, \
     datetime, duration_minutes, price, status, notes, created_at, updated_at";

#[derive(Clone)]
pub struct AppointmentRepository {
    pool: PgPool,
}

impl AppointmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CONSULTAS
    // =========================================================================

    /// Lista agendamentos pelos filtros informados, do mais cedo ao mais tarde.
    pub async fn find_appointments<'e, E>(
        &self,
        executor: E,
        filter: &AppointmentFilter,
    ) -> Result<Vec<Appointment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE TRUE"));

        if let Some(collaborator_id) = filter.collaborator_id {
            query.push(" AND collaborator_id = ").push_bind(collaborator_id);
        }
        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status);
        }
        if let Some(from) = filter.from {
            query.push(" AND datetime >= ").push_bind(from);
        }
        if let Some(until) = filter.until {
            query.push(" AND datetime < ").push_bind(until);
        }
        query.push(" ORDER BY datetime ASC, created_at ASC");

        let appointments = query
            .build_query_as::<Appointment>()
            .fetch_all(executor)
            .await?;

        Ok(appointments)
    }

    pub async fn list(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>, AppError> {
        self.find_appointments(&self.pool, filter).await
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Appointment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let appointment = sqlx::query_as::<_, Appointment>(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = $1"
        ))
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(appointment)
    }

    // =========================================================================
    //  ESCRITA
    // =========================================================================

    // A constraint de exclusão (23P01) é a última barreira contra sobreposição
    pub async fn insert<'e, E>(&self, executor: E, new: &NewAppointment) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Appointment>(&format!(
            r#"
            INSERT INTO appointments (
                client_id, client_name, service_id, collaborator_id, user_id,
                datetime, duration_minutes, price, status, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        ))
            .bind(new.client_id)
            .bind(&new.client_name)
            .bind(new.service_id)
            .bind(new.collaborator_id)
            .bind(new.user_id)
            .bind(new.datetime)
            .bind(new.duration_minutes)
            .bind(new.price)
            .bind(new.status)
            .bind(new.notes.as_deref())
            .fetch_one(executor)
            .await
            .map_err(|e| map_constraint_violation(e, AppError::InvalidInput("Agendamento duplicado.".into())))
    }

    /// Grava o estado completo já resolvido pelo service.
    pub async fn update<'e, E>(&self, executor: E, next: &Appointment) -> Result<Appointment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Appointment>(&format!(
            r#"
            UPDATE appointments
            SET client_id = $2,
                client_name = $3,
                service_id = $4,
                collaborator_id = $5,
                datetime = $6,
                duration_minutes = $7,
                price = $8,
                status = $9,
                notes = $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {APPOINTMENT_COLUMNS}
            "#
        ))
            .bind(next.id)
            .bind(next.client_id)
            .bind(&next.client_name)
            .bind(next.service_id)
            .bind(next.collaborator_id)
            .bind(next.datetime)
            .bind(next.duration_minutes)
            .bind(next.price)
            .bind(next.status)
            .bind(next.notes.as_deref())
            .fetch_one(executor)
            .await
            .map_err(|e| map_constraint_violation(e, AppError::InvalidInput("Agendamento duplicado.".into())))
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
