// src/handlers/inventory.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, time::parse_datetime},
    config::AppState,
    middleware::rbac::{PermManageInventory, RequirePermission},
    models::inventory::{InventoryChanges, InventoryItem},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryPayload {
    #[validate(length(min = 1, message = "O nome do produto é obrigatório"))]
    #[schema(example = "Shampoo neutro 1L")]
    pub product_name: String,

    #[validate(range(min = 0, message = "A quantidade não pode ser negativa"))]
    #[schema(example = 12)]
    pub quantity: i32,

    #[schema(value_type = f64, example = 34.9)]
    pub unit_price: Decimal,

    /// Quando omitido, usa o horário atual
    #[schema(example = "2024-06-10T09:00")]
    pub last_updated: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInventoryPayload {
    #[validate(length(min = 1, message = "O nome do produto não pode ser vazio"))]
    pub product_name: Option<String>,

    #[validate(range(min = 0, message = "A quantidade não pode ser negativa"))]
    pub quantity: Option<i32>,

    #[schema(value_type = Option<f64>)]
    pub unit_price: Option<Decimal>,

    pub last_updated: Option<String>,
}

// GET /api/inventory
#[utoipa::path(
    get,
    path = "/api/inventory",
    tag = "Inventory",
    responses(
        (status = 200, description = "Produtos em estoque por nome", body = Vec<InventoryItem>),
        (status = 403, description = "Sem permissão MANAGE_INVENTORY")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_inventory(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManageInventory>,
) -> Result<impl IntoResponse, AppError> {
    let items = app_state.inventory_service.list_items().await?;
    Ok(Json(items))
}

// POST /api/inventory
#[utoipa::path(
    post,
    path = "/api/inventory",
    tag = "Inventory",
    request_body = CreateInventoryPayload,
    responses(
        (status = 201, description = "Produto cadastrado", body = InventoryItem),
        (status = 400, description = "Dados inválidos"),
        (status = 403, description = "Sem permissão MANAGE_INVENTORY")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_inventory_item(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManageInventory>,
    Json(payload): Json<CreateInventoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let last_updated = payload.last_updated.as_deref().map(parse_datetime).transpose()?;

    let item = app_state
        .inventory_service
        .create_item(&payload.product_name, payload.quantity, payload.unit_price, last_updated)
        .await?;

    Ok((StatusCode::CREATED, Json(item)))
}

// PUT /api/inventory/{id}
#[utoipa::path(
    put,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    request_body = UpdateInventoryPayload,
    params(("id" = Uuid, Path, description = "ID do Produto")),
    responses(
        (status = 200, description = "Produto atualizado", body = InventoryItem),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_inventory_item(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManageInventory>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateInventoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let changes = InventoryChanges {
        product_name: payload.product_name,
        quantity: payload.quantity,
        unit_price: payload.unit_price,
        last_updated: payload.last_updated.as_deref().map(parse_datetime).transpose()?,
    };

    let item = app_state.inventory_service.update_item(id, changes).await?;
    Ok(Json(item))
}

// DELETE /api/inventory/{id}
#[utoipa::path(
    delete,
    path = "/api/inventory/{id}",
    tag = "Inventory",
    params(("id" = Uuid, Path, description = "ID do Produto")),
    responses(
        (status = 204, description = "Produto removido"),
        (status = 404, description = "Produto não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_inventory_item(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManageInventory>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.inventory_service.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_rejects_negative_quantity_and_blank_name() {
        let payload: CreateInventoryPayload = serde_json::from_str(
            r#"{"productName":"","quantity":-2,"unitPrice":10.5}"#,
        )
        .unwrap();

        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("product_name"));
        assert!(fields.contains_key("quantity"));
    }

    #[test]
    fn payload_accepts_camel_case_fields() {
        let payload: CreateInventoryPayload = serde_json::from_str(
            r#"{"productName":"Tintura 7.0","quantity":4,"unitPrice":29.9,"lastUpdated":"2024-06-10T09:00"}"#,
        )
        .unwrap();

        assert!(payload.validate().is_ok());
        assert_eq!(payload.unit_price, Decimal::new(299, 1));
        assert_eq!(payload.last_updated.as_deref(), Some("2024-06-10T09:00"));
    }
}
