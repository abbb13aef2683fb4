// src/handlers/schedules.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveTime;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, time::parse_time_of_day},
    config::AppState,
    middleware::rbac::{PermManageCollaborators, RequirePermission},
    models::schedule::WorkSchedule,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertSchedulePayload {
    pub collaborator_id: Uuid,

    /// 0 = domingo ... 6 = sábado
    #[validate(range(min = 0, max = 6, message = "O dia da semana deve estar entre 0 e 6"))]
    #[schema(example = 1)]
    pub day_of_week: i16,

    #[schema(example = "09:00")]
    pub start_time: String,

    #[schema(example = "17:00")]
    pub end_time: String,

    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ScheduleFilter {
    pub collaborator_id: Option<Uuid>,
    pub day_of_week: Option<i16>,
}

fn time_field(value: &str, field: &str) -> Result<NaiveTime, AppError> {
    parse_time_of_day(value)
        .ok_or_else(|| AppError::InvalidInput(format!("{} inválido: '{}'. Use HH:MM.", field, value)))
}

// POST /api/schedules
#[utoipa::path(
    post,
    path = "/api/schedules",
    tag = "Schedules",
    request_body = UpsertSchedulePayload,
    responses(
        (status = 200, description = "Horário criado ou substituído", body = WorkSchedule),
        (status = 400, description = "Dia ou horários inválidos"),
        (status = 404, description = "Colaborador não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn upsert_schedule(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManageCollaborators>,
    Json(payload): Json<UpsertSchedulePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let start_time = time_field(&payload.start_time, "Horário de início")?;
    let end_time = time_field(&payload.end_time, "Horário de término")?;

    let schedule = app_state
        .schedule_service
        .upsert_schedule(
            payload.collaborator_id,
            payload.day_of_week,
            start_time,
            end_time,
            payload.is_available,
        )
        .await?;

    Ok(Json(schedule))
}

// GET /api/schedules
#[utoipa::path(
    get,
    path = "/api/schedules",
    tag = "Schedules",
    params(ScheduleFilter),
    responses(
        (status = 200, description = "Horários ordenados por dia da semana", body = Vec<WorkSchedule>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_schedules(
    State(app_state): State<AppState>,
    Query(filter): Query<ScheduleFilter>,
) -> Result<impl IntoResponse, AppError> {
    let schedules = app_state
        .schedule_service
        .list_schedules(filter.collaborator_id, filter.day_of_week)
        .await?;
    Ok(Json(schedules))
}

// DELETE /api/schedules/{id}
#[utoipa::path(
    delete,
    path = "/api/schedules/{id}",
    tag = "Schedules",
    params(("id" = Uuid, Path, description = "ID do Horário")),
    responses(
        (status = 204, description = "Horário removido"),
        (status = 404, description = "Horário não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_schedule(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManageCollaborators>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.schedule_service.delete_schedule(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
