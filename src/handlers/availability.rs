// src/handlers/availability.rs

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        time::{parse_date, parse_datetime},
    },
    config::AppState,
    models::schedule::{AvailabilityCheck, TimeSlot, WorkWindow},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AvailabilityQuery {
    pub collaborator_id: Uuid,
    /// Início proposto (AAAA-MM-DDTHH:MM ou RFC 3339)
    pub start: String,
    pub duration_minutes: i32,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WorkWindowQuery {
    /// AAAA-MM-DD
    pub date: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DayScheduleQuery {
    /// AAAA-MM-DD
    pub date: String,
    /// Tamanho do slot em minutos (padrão da configuração)
    pub slot_minutes: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkWindowResponse {
    #[schema(value_type = String, example = "2024-06-10")]
    pub date: NaiveDate,
    /// `null` quando o colaborador não atende no dia
    pub work_window: Option<WorkWindow>,
}

// GET /api/availability/check
#[utoipa::path(
    get,
    path = "/api/availability/check",
    tag = "Availability",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Resultado da verificação com sugestões", body = AvailabilityCheck),
        (status = 400, description = "Parâmetros inválidos"),
        (status = 404, description = "Colaborador não encontrado"),
        (status = 503, description = "Agenda indisponível no momento")
    ),
    security(("api_jwt" = []))
)]
pub async fn check_availability(
    State(app_state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let start = parse_datetime(&query.start)?;

    let check = app_state
        .availability_service
        .check_availability(query.collaborator_id, start, query.duration_minutes)
        .await?;

    Ok(Json(check))
}

// GET /api/collaborators/{id}/work-window
#[utoipa::path(
    get,
    path = "/api/collaborators/{id}/work-window",
    tag = "Availability",
    params(
        ("id" = Uuid, Path, description = "ID do Colaborador"),
        WorkWindowQuery
    ),
    responses(
        (status = 200, description = "Expediente do dia", body = WorkWindowResponse),
        (status = 404, description = "Colaborador não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_work_window(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<WorkWindowQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&query.date)?;
    let work_window = app_state.availability_service.resolve_work_window(id, date).await?;

    Ok(Json(WorkWindowResponse { date, work_window }))
}

// GET /api/collaborators/{id}/schedule
#[utoipa::path(
    get,
    path = "/api/collaborators/{id}/schedule",
    tag = "Availability",
    params(
        ("id" = Uuid, Path, description = "ID do Colaborador"),
        DayScheduleQuery
    ),
    responses(
        (status = 200, description = "Slots do dia, livres e ocupados", body = Vec<TimeSlot>),
        (status = 400, description = "Data ou tamanho de slot inválido"),
        (status = 404, description = "Colaborador não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_day_schedule(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<DayScheduleQuery>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&query.date)?;

    let slots = app_state
        .availability_service
        .generate_schedule(id, date, query.slot_minutes)
        .await?;

    Ok(Json(slots))
}
