// src/models/cashflow.rs

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "cashflow_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CashflowType {
    Entrada,
    Saida,
}

/// Lançamento do caixa. `amount` é sempre positivo; o sentido vem de `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashflowEntry {
    pub id: Uuid,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: CashflowType,
    #[schema(example = "Corte feminino - Ana Paula")]
    pub description: String,
    #[schema(example = "80.00")]
    pub amount: Decimal,
    #[schema(value_type = String, example = "2024-06-10T14:00:00")]
    pub date: NaiveDateTime,
    #[schema(example = "Serviços")]
    pub category: String,
    /// Atendimento que originou o lançamento, se houver
    pub appointment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewCashflowEntry {
    pub kind: CashflowType,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDateTime,
    pub category: String,
    pub appointment_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct CashflowChanges {
    pub kind: Option<CashflowType>,
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub date: Option<NaiveDateTime>,
    pub category: Option<String>,
    pub appointment_id: Option<Uuid>,
}

// Filtros de listagem (todos opcionais)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CashflowFilter {
    pub kind: Option<CashflowType>,
    pub category: Option<String>,
    /// Início (inclusive) sobre `date`
    pub from: Option<NaiveDateTime>,
    /// Fim (exclusivo) sobre `date`
    pub until: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::appointments::fixtures::at;

    #[test]
    fn type_is_serialized_as_portuguese_label() {
        let entry = CashflowEntry {
            id: Uuid::new_v4(),
            kind: CashflowType::Saida,
            description: "Aluguel de junho".into(),
            amount: Decimal::new(150000, 2),
            date: at(2024, 6, 5, 9, 0),
            category: "Aluguel".into(),
            appointment_id: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "SAIDA");
        assert!(json.get("kind").is_none());
        assert_eq!(json["amount"], 1500.0);
    }
}
