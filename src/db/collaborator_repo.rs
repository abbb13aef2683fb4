// src/db/collaborator_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{map_constraint_violation, map_in_use, AppError},
    models::collaborators::Collaborator,
};

#[derive(Clone)]
pub struct CollaboratorRepository {
    pool: PgPool,
}

impl CollaboratorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_collaborator<'e, E>(
        &self,
        executor: E,
        name: &str,
        role: &str,
        email: &str,
    ) -> Result<Collaborator, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Collaborator>(
            r#"
            INSERT INTO collaborators (name, role, email)
            VALUES ($1, $2, $3)
            RETURNING id, name, role, email, created_at
            "#,
        )
            .bind(name)
            .bind(role)
            .bind(email)
            .fetch_one(executor)
            .await
            .map_err(|e| map_constraint_violation(e, AppError::EmailAlreadyExists))
    }

    pub async fn list_collaborators(&self) -> Result<Vec<Collaborator>, AppError> {
        let collaborators = sqlx::query_as::<_, Collaborator>(
            "SELECT id, name, role, email, created_at FROM collaborators ORDER BY name",
        )
            .fetch_all(&self.pool)
            .await?;
        Ok(collaborators)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Collaborator>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let collaborator = sqlx::query_as::<_, Collaborator>(
            "SELECT id, name, role, email, created_at FROM collaborators WHERE id = $1",
        )
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(collaborator)
    }

    /// Trava a linha do colaborador até o fim da transação.
    ///
    /// Serializa reservas concorrentes para o mesmo colaborador. Retorna
    /// `false` quando o colaborador não existe.
    pub async fn lock_for_booking<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let locked: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM collaborators WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(locked.is_some())
    }

    pub async fn update_collaborator<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: Option<&str>,
        role: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<Collaborator>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Collaborator>(
            r#"
            UPDATE collaborators
            SET name = COALESCE($2, name),
                role = COALESCE($3, role),
                email = COALESCE($4, email)
            WHERE id = $1
            RETURNING id, name, role, email, created_at
            "#,
        )
            .bind(id)
            .bind(name)
            .bind(role)
            .bind(email)
            .fetch_optional(executor)
            .await
            .map_err(|e| map_constraint_violation(e, AppError::EmailAlreadyExists))
    }

    pub async fn delete_collaborator<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM collaborators WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map_err(|e| map_in_use(e, "Colaborador"))?;
        Ok(result.rows_affected() > 0)
    }
}
