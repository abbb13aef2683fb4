// src/db/inventory_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{InventoryChanges, InventoryItem, NewInventoryItem},
};

const INVENTORY_COLUMNS: &str = "id, product_name, quantity, unit_price, last_updated, created_at";

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_item<'e, E>(&self, executor: E, item: &NewInventoryItem) -> Result<InventoryItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let created = sqlx::query_as::<_, InventoryItem>(&format!(
            r#"
            INSERT INTO inventory (product_name, quantity, unit_price, last_updated)
            VALUES ($1, $2, $3, $4)
            RETURNING {INVENTORY_COLUMNS}
            "#
        ))
            .bind(&item.product_name)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.last_updated)
            .fetch_one(executor)
            .await?;
        Ok(created)
    }

    pub async fn list_items(&self) -> Result<Vec<InventoryItem>, AppError> {
        let items = sqlx::query_as::<_, InventoryItem>(&format!(
            "SELECT {INVENTORY_COLUMNS} FROM inventory ORDER BY product_name ASC"
        ))
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    // Campos ausentes mantêm o valor atual (COALESCE)
    pub async fn update_item<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        changes: &InventoryChanges,
    ) -> Result<Option<InventoryItem>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, InventoryItem>(&format!(
            r#"
            UPDATE inventory
            SET product_name = COALESCE($2, product_name),
                quantity = COALESCE($3, quantity),
                unit_price = COALESCE($4, unit_price),
                last_updated = COALESCE($5, last_updated)
            WHERE id = $1
            RETURNING {INVENTORY_COLUMNS}
            "#
        ))
            .bind(id)
            .bind(changes.product_name.as_deref())
            .bind(changes.quantity)
            .bind(changes.unit_price)
            .bind(changes.last_updated)
            .fetch_optional(executor)
            .await?;
        Ok(item)
    }

    pub async fn delete_item<'e, E>(&self, executor: E, id: Uuid) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM inventory WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
