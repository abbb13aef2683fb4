// src/services/collaborator_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, db::CollaboratorRepository, models::collaborators::Collaborator};

#[derive(Clone)]
pub struct CollaboratorService {
    repo: CollaboratorRepository,
    pool: PgPool,
}

impl CollaboratorService {
    pub fn new(repo: CollaboratorRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn create_collaborator(&self, name: &str, role: &str, email: &str) -> Result<Collaborator, AppError> {
        let collaborator = self
            .repo
            .create_collaborator(&self.pool, name.trim(), role.trim(), &email.trim().to_lowercase())
            .await?;
        tracing::info!(collaborator_id = %collaborator.id, "Colaborador cadastrado");
        Ok(collaborator)
    }

    pub async fn list_collaborators(&self) -> Result<Vec<Collaborator>, AppError> {
        self.repo.list_collaborators().await
    }

    pub async fn get_collaborator(&self, id: Uuid) -> Result<Collaborator, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::CollaboratorNotFound)
    }

    pub async fn update_collaborator(
        &self,
        id: Uuid,
        name: Option<&str>,
        role: Option<&str>,
        email: Option<&str>,
    ) -> Result<Collaborator, AppError> {
        let email = email.map(|e| e.trim().to_lowercase());
        self.repo
            .update_collaborator(&self.pool, id, name.map(str::trim), role.map(str::trim), email.as_deref())
            .await?
            .ok_or(AppError::CollaboratorNotFound)
    }

    // Colaborador com agendamentos não pode ser removido (FK)
    pub async fn delete_collaborator(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_collaborator(&self.pool, id).await? {
            return Err(AppError::CollaboratorNotFound);
        }
        tracing::info!(collaborator_id = %id, "Colaborador removido");
        Ok(())
    }
}
