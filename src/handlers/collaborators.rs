// src/handlers/collaborators.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{PermManageCollaborators, RequirePermission},
    models::collaborators::Collaborator,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollaboratorPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório"))]
    #[schema(example = "Carla Mendes")]
    pub name: String,

    #[validate(length(min = 1, message = "A função é obrigatória"))]
    #[schema(example = "Cabeleireira")]
    pub role: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "carla@salon.com")]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCollaboratorPayload {
    #[validate(length(min = 1, message = "O nome não pode ser vazio"))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "A função não pode ser vazia"))]
    pub role: Option<String>,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
}

// POST /api/collaborators
#[utoipa::path(
    post,
    path = "/api/collaborators",
    tag = "Collaborators",
    request_body = CreateCollaboratorPayload,
    responses(
        (status = 201, description = "Colaborador criado", body = Collaborator),
        (status = 409, description = "E-mail já cadastrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_collaborator(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManageCollaborators>,
    Json(payload): Json<CreateCollaboratorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let collaborator = app_state
        .collaborator_service
        .create_collaborator(&payload.name, &payload.role, &payload.email)
        .await?;

    Ok((StatusCode::CREATED, Json(collaborator)))
}

// GET /api/collaborators
#[utoipa::path(
    get,
    path = "/api/collaborators",
    tag = "Collaborators",
    responses(
        (status = 200, description = "Colaboradores em ordem alfabética", body = Vec<Collaborator>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_collaborators(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let collaborators = app_state.collaborator_service.list_collaborators().await?;
    Ok(Json(collaborators))
}

// GET /api/collaborators/{id}
#[utoipa::path(
    get,
    path = "/api/collaborators/{id}",
    tag = "Collaborators",
    params(("id" = Uuid, Path, description = "ID do Colaborador")),
    responses(
        (status = 200, description = "Colaborador", body = Collaborator),
        (status = 404, description = "Colaborador não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_collaborator(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let collaborator = app_state.collaborator_service.get_collaborator(id).await?;
    Ok(Json(collaborator))
}

// PUT /api/collaborators/{id}
#[utoipa::path(
    put,
    path = "/api/collaborators/{id}",
    tag = "Collaborators",
    request_body = UpdateCollaboratorPayload,
    params(("id" = Uuid, Path, description = "ID do Colaborador")),
    responses(
        (status = 200, description = "Colaborador atualizado", body = Collaborator),
        (status = 404, description = "Colaborador não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_collaborator(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManageCollaborators>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCollaboratorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let collaborator = app_state
        .collaborator_service
        .update_collaborator(id, payload.name.as_deref(), payload.role.as_deref(), payload.email.as_deref())
        .await?;

    Ok(Json(collaborator))
}

// DELETE /api/collaborators/{id}
#[utoipa::path(
    delete,
    path = "/api/collaborators/{id}",
    tag = "Collaborators",
    params(("id" = Uuid, Path, description = "ID do Colaborador")),
    responses(
        (status = 204, description = "Colaborador removido"),
        (status = 400, description = "Colaborador possui agendamentos"),
        (status = 404, description = "Colaborador não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_collaborator(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManageCollaborators>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.collaborator_service.delete_collaborator(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
