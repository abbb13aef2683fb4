// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::{map_constraint_violation, AppError},
    models::auth::{Permission, User, UserRole},
};

const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, is_active, created_at, updated_at";

// O repositório de usuários, responsável pelas tabelas 'users' e 'user_permissions'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Busca um usuário pelo seu e-mail
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    // Busca um usuário pelo seu ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY name"
        ))
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    pub async fn count_users<'e, E>(&self, executor: E) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(executor)
            .await?;
        Ok(count)
    }

    // Cria um novo usuário no banco de dados.
    // E-mail duplicado vira `EmailAlreadyExists`.
    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
            .bind(name)
            .bind(email)
            .bind(password_hash)
            .bind(role)
            .fetch_one(executor)
            .await
            .map_err(|e| map_constraint_violation(e, AppError::EmailAlreadyExists))
    }

    pub async fn grant_permission<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        permission: Permission,
        granted_by: Uuid,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO user_permissions (user_id, permission, granted_by)
            VALUES ($1, $2, $3)
            ON CONFLICT DO NOTHING
            "#,
        )
            .bind(user_id)
            .bind(permission)
            .bind(granted_by)
            .execute(executor)
            .await?;
        Ok(())
    }

    pub async fn list_permissions(&self, user_id: Uuid) -> Result<Vec<Permission>, AppError> {
        let permissions = sqlx::query_scalar::<_, Permission>(
            "SELECT permission FROM user_permissions WHERE user_id = $1 ORDER BY permission",
        )
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(permissions)
    }

    pub async fn user_has_permission(
        &self,
        user_id: Uuid,
        permission: Permission,
    ) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM user_permissions up
                JOIN users u ON u.id = up.user_id
                WHERE up.user_id = $1
                  AND up.permission = $2
                  AND u.is_active = true
            )
            "#,
        )
            .bind(user_id)
            .bind(permission)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}
