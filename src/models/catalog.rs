// src/models/catalog.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Serviço vendido pelo salão (corte, escova, manicure...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalonService {
    pub id: Uuid,
    #[schema(example = "Corte feminino")]
    pub name: String,
    #[schema(example = "Corte com lavagem e finalização")]
    pub description: String,
    #[schema(example = 60)]
    pub duration_minutes: i32,
    #[schema(example = "80.00")]
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}
