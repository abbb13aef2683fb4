// src/handlers/catalog.rs

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
    common::error::AppError,
    config::AppState,
    middleware::rbac::{PermManageServices, RequirePermission},
    models::catalog::SalonService,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServicePayload {
    #[validate(length(min = 1, message = "O nome do serviço é obrigatório"))]
    #[schema(example = "Escova")]
    pub name: String,

    #[serde(default)]
    #[schema(example = "Escova modeladora")]
    pub description: String,

    #[validate(range(min = 1, max = 1440, message = "A duração deve estar entre 1 e 1440 minutos"))]
    #[schema(example = 45)]
    pub duration_minutes: i32,

    #[schema(value_type = f64, example = 55.0)]
    pub price: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServicePayload {
    #[validate(length(min = 1, message = "O nome do serviço não pode ser vazio"))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(range(min = 1, max = 1440, message = "A duração deve estar entre 1 e 1440 minutos"))]
    pub duration_minutes: Option<i32>,

    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
}

// POST /api/services
#[utoipa::path(
    post,
    path = "/api/services",
    tag = "Services",
    request_body = CreateServicePayload,
    responses(
        (status = 201, description = "Serviço criado", body = SalonService),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_service(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManageServices>,
    Json(payload): Json<CreateServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let service = app_state
        .catalog_service
        .create_service(&payload.name, &payload.description, payload.duration_minutes, payload.price)
        .await?;

    Ok((StatusCode::CREATED, Json(service)))
}

// GET /api/services
#[utoipa::path(
    get,
    path = "/api/services",
    tag = "Services",
    responses(
        (status = 200, description = "Serviços do salão por nome", body = Vec<SalonService>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_services(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let services = app_state.catalog_service.list_services().await?;
    Ok(Json(services))
}

// GET /api/services/{id}
#[utoipa::path(
    get,
    path = "/api/services/{id}",
    tag = "Services",
    params(("id" = Uuid, Path, description = "ID do Serviço")),
    responses(
        (status = 200, description = "Serviço", body = SalonService),
        (status = 404, description = "Serviço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_service(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let service = app_state.catalog_service.get_service(id).await?;
    Ok(Json(service))
}

// PUT /api/services/{id}
#[utoipa::path(
    put,
    path = "/api/services/{id}",
    tag = "Services",
    request_body = UpdateServicePayload,
    params(("id" = Uuid, Path, description = "ID do Serviço")),
    responses(
        (status = 200, description = "Serviço atualizado", body = SalonService),
        (status = 404, description = "Serviço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_service(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManageServices>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateServicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let service = app_state
        .catalog_service
        .update_service(
            id,
            payload.name.as_deref(),
            payload.description.as_deref(),
            payload.duration_minutes,
            payload.price,
        )
        .await?;

    Ok(Json(service))
}

// DELETE /api/services/{id}
#[utoipa::path(
    delete,
    path = "/api/services/{id}",
    tag = "Services",
    params(("id" = Uuid, Path, description = "ID do Serviço")),
    responses(
        (status = 204, description = "Serviço removido"),
        (status = 400, description = "Serviço usado em agendamentos"),
        (status = 404, description = "Serviço não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_service(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManageServices>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.catalog_service.delete_service(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
