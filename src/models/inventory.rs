// src/models/inventory.rs

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Produto em estoque (shampoo, tintura, esmalte...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,
    #[schema(example = "Shampoo neutro 1L")]
    pub product_name: String,
    #[schema(example = 12)]
    pub quantity: i32,
    #[schema(example = "34.90")]
    pub unit_price: Decimal,
    #[schema(value_type = String, example = "2024-06-10T09:00:00")]
    pub last_updated: NaiveDateTime,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewInventoryItem {
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub last_updated: NaiveDateTime,
}

// Campos ausentes mantêm o valor atual
#[derive(Debug, Clone, Default)]
pub struct InventoryChanges {
    pub product_name: Option<String>,
    pub quantity: Option<i32>,
    pub unit_price: Option<Decimal>,
    pub last_updated: Option<NaiveDateTime>,
}
