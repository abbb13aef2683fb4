// src/db/client_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{map_constraint_violation, AppError},
    models::clients::Client,
};

#[derive(Clone)]
pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_client<'e, E>(
        &self,
        executor: E,
        client_name: &str,
        client_phone: &str,
    ) -> Result<Client, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (client_name, client_phone)
            VALUES ($1, $2)
            RETURNING id, client_name, client_phone, created_at
            "#,
        )
            .bind(client_name)
            .bind(client_phone)
            .fetch_one(executor)
            .await
            .map_err(|e| map_constraint_violation(e, AppError::PhoneAlreadyExists))
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        let clients = sqlx::query_as::<_, Client>(
            "SELECT id, client_name, client_phone, created_at FROM clients ORDER BY client_name",
        )
            .fetch_all(&self.pool)
            .await?;
        Ok(clients)
    }

    // Genérico para ser lido dentro da transação de agendamento
    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, client_name, client_phone, created_at FROM clients WHERE id = $1",
        )
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(client)
    }

    pub async fn find_by_phone(&self, client_phone: &str) -> Result<Option<Client>, AppError> {
        let client = sqlx::query_as::<_, Client>(
            "SELECT id, client_name, client_phone, created_at FROM clients WHERE client_phone = $1",
        )
            .bind(client_phone)
            .fetch_optional(&self.pool)
            .await?;
        Ok(client)
    }

    // Campos ausentes mantêm o valor atual (COALESCE)
    pub async fn update_client<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        client_name: Option<&str>,
        client_phone: Option<&str>,
    ) -> Result<Option<Client>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET client_name = COALESCE($2, client_name),
                client_phone = COALESCE($3, client_phone)
            WHERE id = $1
            RETURNING id, client_name, client_phone, created_at
            "#,
        )
            .bind(id)
            .bind(client_name)
            .bind(client_phone)
            .fetch_optional(executor)
            .await
            .map_err(|e| map_constraint_violation(e, AppError::PhoneAlreadyExists))
    }

    pub async fn delete_client<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
