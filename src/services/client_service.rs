// src/services/client_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, db::ClientRepository, models::clients::Client};

#[derive(Clone)]
pub struct ClientService {
    repo: ClientRepository,
    pool: PgPool,
}

impl ClientService {
    pub fn new(repo: ClientRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn create_client(&self, client_name: &str, client_phone: &str) -> Result<Client, AppError> {
        let client = self
            .repo
            .create_client(&self.pool, client_name.trim(), client_phone.trim())
            .await?;
        tracing::info!(client_id = %client.id, "Cliente cadastrado");
        Ok(client)
    }

    pub async fn list_clients(&self) -> Result<Vec<Client>, AppError> {
        self.repo.list_clients().await
    }

    pub async fn get_client(&self, id: Uuid) -> Result<Client, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Cliente".into()))
    }

    pub async fn find_by_phone(&self, phone: &str) -> Result<Client, AppError> {
        let phone = phone.trim();
        if phone.is_empty() {
            return Err(AppError::InvalidInput("Telefone é obrigatório".into()));
        }

        self.repo
            .find_by_phone(phone)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Cliente".into()))
    }

    pub async fn update_client(
        &self,
        id: Uuid,
        client_name: Option<&str>,
        client_phone: Option<&str>,
    ) -> Result<Client, AppError> {
        self.repo
            .update_client(&self.pool, id, client_name.map(str::trim), client_phone.map(str::trim))
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Cliente".into()))
    }

    pub async fn delete_client(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_client(&self.pool, id).await? {
            return Err(AppError::ResourceNotFound("Cliente".into()));
        }
        Ok(())
    }
}
