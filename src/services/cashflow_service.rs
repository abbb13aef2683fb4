// src/services/cashflow_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AppointmentRepository, CashflowRepository},
    models::cashflow::{CashflowChanges, CashflowEntry, CashflowFilter, NewCashflowEntry},
};

#[derive(Clone)]
pub struct CashflowService {
    repo: CashflowRepository,
    appointment_repo: AppointmentRepository,
    pool: PgPool,
}

/// Valor do lançamento: estritamente positivo, o sentido vem do tipo.
pub fn validate_amount(amount: Decimal) -> Result<(), AppError> {
    if amount <= Decimal::ZERO {
        return Err(AppError::InvalidInput("O valor do lançamento deve ser maior que zero.".into()));
    }
    Ok(())
}

fn require_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("O campo '{}' é obrigatório.", field)));
    }
    Ok(())
}

pub fn validate_new_entry(entry: &NewCashflowEntry) -> Result<(), AppError> {
    require_text(&entry.description, "description")?;
    require_text(&entry.category, "category")?;
    validate_amount(entry.amount)
}

pub fn validate_changes(changes: &CashflowChanges) -> Result<(), AppError> {
    if let Some(description) = changes.description.as_deref() {
        require_text(description, "description")?;
    }
    if let Some(category) = changes.category.as_deref() {
        require_text(category, "category")?;
    }
    if let Some(amount) = changes.amount {
        validate_amount(amount)?;
    }
    Ok(())
}

impl CashflowService {
    pub fn new(repo: CashflowRepository, appointment_repo: AppointmentRepository, pool: PgPool) -> Self {
        Self { repo, appointment_repo, pool }
    }

    async fn ensure_appointment(&self, appointment_id: Option<Uuid>) -> Result<(), AppError> {
        if let Some(id) = appointment_id {
            self.appointment_repo
                .find_by_id(&self.pool, id)
                .await?
                .ok_or_else(|| AppError::ResourceNotFound("Agendamento".into()))?;
        }
        Ok(())
    }

    pub async fn create_entry(&self, entry: NewCashflowEntry) -> Result<CashflowEntry, AppError> {
        validate_new_entry(&entry)?;
        self.ensure_appointment(entry.appointment_id).await?;

        let created = self.repo.create_entry(&self.pool, &entry).await?;
        tracing::info!(
            entry_id = %created.id,
            kind = ?created.kind,
            amount = %created.amount,
            "Lançamento registrado no caixa"
        );
        Ok(created)
    }

    pub async fn list_entries(&self, filter: &CashflowFilter) -> Result<Vec<CashflowEntry>, AppError> {
        self.repo.list_entries(filter).await
    }

    pub async fn update_entry(&self, id: Uuid, changes: CashflowChanges) -> Result<CashflowEntry, AppError> {
        validate_changes(&changes)?;
        self.ensure_appointment(changes.appointment_id).await?;

        self.repo
            .update_entry(&self.pool, id, &changes)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Lançamento".into()))
    }

    pub async fn delete_entry(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_entry(&self.pool, id).await? {
            return Err(AppError::ResourceNotFound("Lançamento".into()));
        }
        Ok(())
    }
}
