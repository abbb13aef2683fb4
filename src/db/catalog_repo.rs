// src/db/catalog_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{map_in_use, AppError},
    models::catalog::SalonService,
};

// Tabela 'services' (catálogo de serviços do salão)
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_service<'e, E>(
        &self,
        executor: E,
        name: &str,
        description: &str,
        duration_minutes: i32,
        price: Decimal,
    ) -> Result<SalonService, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let service = sqlx::query_as::<_, SalonService>(
            r#"
            INSERT INTO services (name, description, duration_minutes, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, duration_minutes, price, created_at
            "#,
        )
            .bind(name)
            .bind(description)
            .bind(duration_minutes)
            .bind(price)
            .fetch_one(executor)
            .await?;
        Ok(service)
    }

    pub async fn list_services(&self) -> Result<Vec<SalonService>, AppError> {
        let services = sqlx::query_as::<_, SalonService>(
            "SELECT id, name, description, duration_minutes, price, created_at FROM services ORDER BY name ASC",
        )
            .fetch_all(&self.pool)
            .await?;
        Ok(services)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<SalonService>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let service = sqlx::query_as::<_, SalonService>(
            "SELECT id, name, description, duration_minutes, price, created_at FROM services WHERE id = $1",
        )
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(service)
    }

    pub async fn update_service<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        duration_minutes: Option<i32>,
        price: Option<Decimal>,
    ) -> Result<Option<SalonService>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let service = sqlx::query_as::<_, SalonService>(
            r#"
            UPDATE services
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                duration_minutes = COALESCE($4, duration_minutes),
                price = COALESCE($5, price)
            WHERE id = $1
            RETURNING id, name, description, duration_minutes, price, created_at
            "#,
        )
            .bind(id)
            .bind(name)
            .bind(description)
            .bind(duration_minutes)
            .bind(price)
            .fetch_optional(executor)
            .await?;
        Ok(service)
    }

    pub async fn delete_service<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| map_in_use(e, "Serviço"))?;
        Ok(result.rows_affected() > 0)
    }
}
