// src/services/inventory_service.rs

use chrono::{Local, NaiveDateTime};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    models::inventory::{InventoryChanges, InventoryItem, NewInventoryItem},
    services::catalog_service::validate_price,
};

#[derive(Clone)]
pub struct InventoryService {
    repo: InventoryRepository,
    pool: PgPool,
}

pub fn validate_quantity(quantity: i32) -> Result<(), AppError> {
    if quantity < 0 {
        return Err(AppError::InvalidInput("A quantidade em estoque não pode ser negativa.".into()));
    }
    Ok(())
}

fn validate_product_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::InvalidInput("O nome do produto é obrigatório.".into()));
    }
    Ok(())
}

/// Normaliza a edição: valida o que veio e marca a atualização agora se o
/// chamador não informou `lastUpdated`.
pub fn prepare_changes(mut changes: InventoryChanges, now: NaiveDateTime) -> Result<InventoryChanges, AppError> {
    if let Some(name) = changes.product_name.as_deref() {
        validate_product_name(name)?;
    }
    if let Some(quantity) = changes.quantity {
        validate_quantity(quantity)?;
    }
    if let Some(price) = changes.unit_price {
        validate_price(price)?;
    }

    changes.product_name = changes.product_name.map(|name| name.trim().to_string());
    changes.last_updated.get_or_insert(now);
    Ok(changes)
}

impl InventoryService {
    pub fn new(repo: InventoryRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn create_item(
        &self,
        product_name: &str,
        quantity: i32,
        unit_price: Decimal,
        last_updated: Option<NaiveDateTime>,
    ) -> Result<InventoryItem, AppError> {
        validate_product_name(product_name)?;
        validate_quantity(quantity)?;
        validate_price(unit_price)?;

        let new = NewInventoryItem {
            product_name: product_name.trim().to_string(),
            quantity,
            unit_price,
            last_updated: last_updated.unwrap_or_else(|| Local::now().naive_local()),
        };

        let item = self.repo.create_item(&self.pool, &new).await?;
        tracing::info!(item_id = %item.id, quantity = item.quantity, "Produto cadastrado no estoque");
        Ok(item)
    }

    pub async fn list_items(&self) -> Result<Vec<InventoryItem>, AppError> {
        self.repo.list_items().await
    }

    pub async fn update_item(&self, id: Uuid, changes: InventoryChanges) -> Result<InventoryItem, AppError> {
        let changes = prepare_changes(changes, Local::now().naive_local())?;

        self.repo
            .update_item(&self.pool, id, &changes)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Produto".into()))
    }

    pub async fn delete_item(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete_item(&self.pool, id).await? {
            return Err(AppError::ResourceNotFound("Produto".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::appointments::fixtures::at;

    #[test]
    fn negative_quantity_is_rejected() {
        assert!(validate_quantity(0).is_ok());
        assert!(matches!(validate_quantity(-1), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn edit_is_stamped_with_current_time() {
        let now = at(2024, 6, 10, 9, 0);
        let changes = InventoryChanges { quantity: Some(3), ..Default::default() };

        let prepared = prepare_changes(changes, now).unwrap();
        assert_eq!(prepared.last_updated, Some(now));
        assert_eq!(prepared.quantity, Some(3));

        // Data enviada pelo chamador é mantida
        let explicit = InventoryChanges { last_updated: Some(at(2024, 6, 1, 8, 0)), ..Default::default() };
        assert_eq!(prepare_changes(explicit, now).unwrap().last_updated, Some(at(2024, 6, 1, 8, 0)));
    }

    #[test]
    fn invalid_edits_are_rejected() {
        let now = at(2024, 6, 10, 9, 0);
        for changes in [
            InventoryChanges { quantity: Some(-5), ..Default::default() },
            InventoryChanges { unit_price: Some(Decimal::new(-1, 0)), ..Default::default() },
            InventoryChanges { product_name: Some("  ".into()), ..Default::default() },
        ] {
            assert!(matches!(prepare_changes(changes, now), Err(AppError::InvalidInput(_))));
        }
    }
}
