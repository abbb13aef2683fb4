// src/db/schedule_repo.rs

use chrono::NaiveTime;
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{common::error::AppError, models::schedule::WorkSchedule};

const SCHEDULE_COLUMNS: &str =
    "id, collaborator_id, day_of_week, start_time, end_time, is_available, created_at";

// Tabela 'work_schedules': um registro por colaborador e dia da semana
#[derive(Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // UPSERT (Insert or Update) por (colaborador, dia)
    pub async fn upsert_schedule<'e, E>(
        &self,
        executor: E,
        collaborator_id: Uuid,
        day_of_week: i16,
        start_time: NaiveTime,
        end_time: NaiveTime,
        is_available: bool,
    ) -> Result<WorkSchedule, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let schedule = sqlx::query_as::<_, WorkSchedule>(&format!(
            r#"
            INSERT INTO work_schedules (collaborator_id, day_of_week, start_time, end_time, is_available)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (collaborator_id, day_of_week)
            DO UPDATE SET
                start_time = EXCLUDED.start_time,
                end_time = EXCLUDED.end_time,
                is_available = EXCLUDED.is_available
            RETURNING {SCHEDULE_COLUMNS}
            "#
        ))
            .bind(collaborator_id)
            .bind(day_of_week)
            .bind(start_time)
            .bind(end_time)
            .bind(is_available)
            .fetch_one(executor)
            .await?;
        Ok(schedule)
    }

    pub async fn list_schedules(
        &self,
        collaborator_id: Option<Uuid>,
        day_of_week: Option<i16>,
    ) -> Result<Vec<WorkSchedule>, AppError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {SCHEDULE_COLUMNS} FROM work_schedules WHERE TRUE"));

        if let Some(collaborator_id) = collaborator_id {
            query.push(" AND collaborator_id = ").push_bind(collaborator_id);
        }
        if let Some(day) = day_of_week {
            query.push(" AND day_of_week = ").push_bind(day);
        }
        query.push(" ORDER BY day_of_week ASC");

        let schedules = query
            .build_query_as::<WorkSchedule>()
            .fetch_all(&self.pool)
            .await?;
        Ok(schedules)
    }

    pub async fn find_for_day<'e, E>(
        &self,
        executor: E,
        collaborator_id: Uuid,
        day_of_week: i16,
    ) -> Result<Option<WorkSchedule>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let schedule = sqlx::query_as::<_, WorkSchedule>(&format!(
            "SELECT {SCHEDULE_COLUMNS} FROM work_schedules WHERE collaborator_id = $1 AND day_of_week = $2"
        ))
            .bind(collaborator_id)
            .bind(day_of_week)
            .fetch_optional(executor)
            .await?;
        Ok(schedule)
    }

    pub async fn delete_schedule<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM work_schedules WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
