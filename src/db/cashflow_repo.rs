// src/db/cashflow_repo.rs

use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::cashflow::{CashflowChanges, CashflowEntry, CashflowFilter, NewCashflowEntry},
};

const CASHFLOW_COLUMNS: &str = "id, type, description, amount, date, category, appointment_id, created_at";

#[derive(Clone)]
pub struct CashflowRepository {
    pool: PgPool,
}

impl CashflowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_entry<'e, E>(&self, executor: E, entry: &NewCashflowEntry) -> Result<CashflowEntry, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let created = sqlx::query_as::<_, CashflowEntry>(&format!(
            r#"
            INSERT INTO cashflow (type, description, amount, date, category, appointment_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {CASHFLOW_COLUMNS}
            "#
        ))
            .bind(entry.kind)
            .bind(&entry.description)
            .bind(entry.amount)
            .bind(entry.date)
            .bind(&entry.category)
            .bind(entry.appointment_id)
            .fetch_one(executor)
            .await?;
        Ok(created)
    }

    /// Lançamentos pelos filtros informados, do mais recente ao mais antigo.
    pub async fn list_entries(&self, filter: &CashflowFilter) -> Result<Vec<CashflowEntry>, AppError> {
        let mut query: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {CASHFLOW_COLUMNS} FROM cashflow WHERE TRUE"));

        if let Some(kind) = filter.kind {
            query.push(" AND type = ").push_bind(kind);
        }
        if let Some(category) = &filter.category {
            query.push(" AND category = ").push_bind(category.clone());
        }
        if let Some(from) = filter.from {
            query.push(" AND date >= ").push_bind(from);
        }
        if let Some(until) = filter.until {
            query.push(" AND date < ").push_bind(until);
        }
        query.push(" ORDER BY date DESC, created_at DESC");

        let entries = query
            .build_query_as::<CashflowEntry>()
            .fetch_all(&self.pool)
            .await?;
        Ok(entries)
    }

    pub async fn update_entry<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        changes: &CashflowChanges,
    ) -> Result<Option<CashflowEntry>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entry = sqlx::query_as::<_, CashflowEntry>(&format!(
            r#"
            UPDATE cashflow
            SET type = COALESCE($2, type),
                description = COALESCE($3, description),
                amount = COALESCE($4, amount),
                date = COALESCE($5, date),
                category = COALESCE($6, category),
                appointment_id = COALESCE($7, appointment_id)
            WHERE id = $1
            RETURNING {CASHFLOW_COLUMNS}
            "#
        ))
            .bind(id)
            .bind(changes.kind)
            .bind(changes.description.as_deref())
            .bind(changes.amount)
            .bind(changes.date)
            .bind(changes.category.as_deref())
            .bind(changes.appointment_id)
            .fetch_optional(executor)
            .await?;
        Ok(entry)
    }

    pub async fn delete_entry<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM cashflow WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
