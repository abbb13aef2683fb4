// src/handlers/appointments.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Duration, NaiveTime};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        time::{parse_date, parse_datetime},
    },
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{PermManageAppointments, RequirePermission},
    },
    models::appointments::{
        Appointment, AppointmentChanges, AppointmentFilter, AppointmentStatus, BookingRequest,
    },
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentPayload {
    /// Cliente cadastrado (opcional). Sem ele, `clientName` é obrigatório.
    pub client_id: Option<Uuid>,

    #[schema(example = "Ana Paula")]
    pub client_name: Option<String>,

    pub service_id: Uuid,
    pub collaborator_id: Uuid,

    #[schema(example = "2024-06-10T14:00")]
    pub datetime: String,

    /// Quando omitido, vem do serviço
    #[validate(range(min = 1, max = 1440, message = "A duração deve estar entre 1 e 1440 minutos"))]
    pub duration_minutes: Option<i32>,

    /// Quando omitido, vem do serviço
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,

    pub status: Option<AppointmentStatus>,

    #[validate(length(max = 1000, message = "Observação muito longa"))]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentPayload {
    pub client_id: Option<Uuid>,

    #[validate(length(min = 1, message = "Nome do cliente não pode ser vazio"))]
    pub client_name: Option<String>,

    pub service_id: Option<Uuid>,
    pub collaborator_id: Option<Uuid>,

    #[schema(example = "2024-06-10T15:00")]
    pub datetime: Option<String>,

    #[validate(range(min = 1, max = 1440, message = "A duração deve estar entre 1 e 1440 minutos"))]
    pub duration_minutes: Option<i32>,

    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,

    pub status: Option<AppointmentStatus>,

    #[validate(length(max = 1000, message = "Observação muito longa"))]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AppointmentQuery {
    pub status: Option<AppointmentStatus>,
    pub collaborator_id: Option<Uuid>,
    /// Dia (AAAA-MM-DD) em que o atendimento começa
    pub date: Option<String>,
}

impl AppointmentQuery {
    fn into_filter(self) -> Result<AppointmentFilter, AppError> {
        let mut filter = AppointmentFilter {
            collaborator_id: self.collaborator_id,
            status: self.status,
            ..Default::default()
        };

        if let Some(date) = self.date.as_deref() {
            let day_start = parse_date(date)?.and_time(NaiveTime::MIN);
            filter = filter.between(day_start, day_start + Duration::days(1));
        }
        Ok(filter)
    }
}

// POST /api/appointments
#[utoipa::path(
    post,
    path = "/api/appointments",
    tag = "Appointments",
    request_body = CreateAppointmentPayload,
    responses(
        (status = 201, description = "Agendamento criado", body = Appointment),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Colaborador, serviço ou cliente não encontrado"),
        (status = 409, description = "Horário ocupado (lista os conflitos)")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_appointment(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManageAppointments>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateAppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let request = BookingRequest {
        client_id: payload.client_id,
        client_name: payload.client_name,
        service_id: payload.service_id,
        collaborator_id: payload.collaborator_id,
        user_id: Some(user.id),
        datetime: parse_datetime(&payload.datetime)?,
        duration_minutes: payload.duration_minutes,
        price: payload.price,
        status: payload.status,
        notes: payload.notes,
    };

    let appointment = app_state.appointment_service.create_appointment(request).await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

// GET /api/appointments
#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = "Appointments",
    params(AppointmentQuery),
    responses(
        (status = 200, description = "Agendamentos do mais cedo ao mais tarde", body = Vec<Appointment>),
        (status = 400, description = "Data inválida")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_appointments(
    State(app_state): State<AppState>,
    Query(query): Query<AppointmentQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = query.into_filter()?;
    let appointments = app_state.appointment_service.list_appointments(&filter).await?;
    Ok(Json(appointments))
}

// GET /api/appointments/{id}
#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    tag = "Appointments",
    params(("id" = Uuid, Path, description = "ID do Agendamento")),
    responses(
        (status = 200, description = "Agendamento", body = Appointment),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_appointment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let appointment = app_state.appointment_service.get_appointment(id).await?;
    Ok(Json(appointment))
}

// PUT /api/appointments/{id}
#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    tag = "Appointments",
    request_body = UpdateAppointmentPayload,
    params(("id" = Uuid, Path, description = "ID do Agendamento")),
    responses(
        (status = 200, description = "Agendamento atualizado", body = Appointment),
        (status = 404, description = "Agendamento não encontrado"),
        (status = 409, description = "Novo horário ocupado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_appointment(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManageAppointments>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let datetime = payload.datetime.as_deref().map(parse_datetime).transpose()?;

    let changes = AppointmentChanges {
        client_id: payload.client_id,
        client_name: payload.client_name,
        service_id: payload.service_id,
        collaborator_id: payload.collaborator_id,
        datetime,
        duration_minutes: payload.duration_minutes,
        price: payload.price,
        status: payload.status,
        notes: payload.notes,
    };

    let appointment = app_state.appointment_service.update_appointment(id, changes).await?;
    Ok(Json(appointment))
}

// DELETE /api/appointments/{id}
#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    tag = "Appointments",
    params(("id" = Uuid, Path, description = "ID do Agendamento")),
    responses(
        (status = 204, description = "Agendamento removido"),
        (status = 404, description = "Agendamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_appointment(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManageAppointments>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.appointment_service.delete_appointment(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::appointments::fixtures::at;

    #[test]
    fn date_query_becomes_half_open_day() {
        let query = AppointmentQuery {
            status: Some(AppointmentStatus::Agendado),
            collaborator_id: None,
            date: Some("2024-06-10".into()),
        };

        let filter = query.into_filter().unwrap();
        assert_eq!(filter.from, Some(at(2024, 6, 10, 0, 0)));
        assert_eq!(filter.until, Some(at(2024, 6, 11, 0, 0)));
        assert_eq!(filter.status, Some(AppointmentStatus::Agendado));
    }

    #[test]
    fn malformed_date_is_bad_request() {
        let query = AppointmentQuery { status: None, collaborator_id: None, date: Some("10/06/2024".into()) };
        assert!(matches!(query.into_filter(), Err(AppError::InvalidInput(_))));
    }
}
