// src/services/catalog_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::SalonService,
    services::availability_service::validate_duration,
};

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
    pool: PgPool,
}

pub fn validate_price(price: Decimal) -> Result<(), AppError> {
    if price.is_sign_negative() {
        return Err(AppError::InvalidInput("O preço não pode ser negativo.".into()));
    }
    Ok(())
}

impl CatalogService {
    pub fn new(repo: CatalogRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn create_service(
        &self,
        name: &str,
        description: &str,
        duration_minutes: i32,
        price: Decimal,
    ) -> Result<SalonService, AppError> {
        validate_duration(duration_minutes)?;
        validate_price(price)?;

        self.repo
            .create_service(&self.pool, name.trim(), description, duration_minutes, price)
            .await
    }

    pub async fn list_services(&self) -> Result<Vec<SalonService>, AppError> {
        self.repo.list_services().await
    }

    pub async fn get_service(&self, id: Uuid) -> Result<SalonService, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Serviço".into()))
    }

    pub async fn update_service(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        duration_minutes: Option<i32>,
        price: Option<Decimal>,
    ) -> Result<SalonService, AppError> {
        if let Some(minutes) = duration_minutes {
            validate_duration(minutes)?;
        }
        if let Some(price) = price {
            validate_price(price)?;
        }

        self.repo
            .update_service(&self.pool, id, name.map(str::trim), description, duration_minutes, price)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Serviço".into()))
    }

    pub async fn delete_service(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_service(&self.pool, id).await? {
            return Err(AppError::ResourceNotFound("Serviço".into()));
        }
        Ok(())
    }
}
