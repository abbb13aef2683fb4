// src/handlers/cashflow.rs

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
    middleware::rbac::{PermManageFinancial, RequirePermission},
    models::cashflow::{CashflowChanges, CashflowEntry, CashflowFilter, CashflowType, NewCashflowEntry},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCashflowPayload {
    #[serde(rename = "type")]
    pub kind: CashflowType,

    #[validate(length(min = 1, message = "A descrição é obrigatória"))]
    #[schema(example = "Corte feminino - Ana Paula")]
    pub description: String,

    #[schema(value_type = f64, example = 80.0)]
    pub amount: Decimal,

    #[schema(example = "2024-06-10T14:00")]
    pub date: String,

    #[validate(length(min = 1, message = "A categoria é obrigatória"))]
    #[schema(example = "Serviços")]
    pub category: String,

    pub appointment_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCashflowPayload {
    #[serde(rename = "type")]
    pub kind: Option<CashflowType>,

    #[validate(length(min = 1, message = "A descrição não pode ser vazia"))]
    pub description: Option<String>,

    #[schema(value_type = Option<f64>)]
    pub amount: Option<Decimal>,

    pub date: Option<String>,

    #[validate(length(min = 1, message = "A categoria não pode ser vazia"))]
    pub category: Option<String>,

    pub appointment_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CashflowQuery {
    #[serde(rename = "type")]
    pub kind: Option<CashflowType>,
    pub category: Option<String>,
    /// Primeiro dia (AAAA-MM-DD), inclusive
    pub start_date: Option<String>,
    /// Último dia (AAAA-MM-DD), inclusive
    pub end_date: Option<String>,
}

impl CashflowQuery {
    fn into_filter(self) -> Result<CashflowFilter, AppError> {
        let from = self
            .start_date
            .as_deref()
            .map(|d| parse_date(d).map(|date| date.and_time(NaiveTime::MIN)))
            .transpose()?;

        // O último dia entra inteiro: o fim exclusivo é a meia-noite seguinte
        let until = self
            .end_date
            .as_deref()
            .map(|d| parse_date(d).map(|date| date.and_time(NaiveTime::MIN) + Duration::days(1)))
            .transpose()?;

        if let (Some(from), Some(until)) = (from, until) {
            if from >= until {
                return Err(AppError::InvalidInput(
                    "startDate deve ser anterior ou igual a endDate.".into(),
                ));
            }
        }

        Ok(CashflowFilter {
            kind: self.kind,
            category: self.category.filter(|c| !c.trim().is_empty()),
            from,
            until,
        })
    }
}

// GET /api/cashflow
#[utoipa::path(
    get,
    path = "/api/cashflow",
    tag = "Cashflow",
    params(CashflowQuery),
    responses(
        (status = 200, description = "Lançamentos do mais recente ao mais antigo", body = Vec<CashflowEntry>),
        (status = 400, description = "Filtro inválido"),
        (status = 403, description = "Sem permissão MANAGE_FINANCIAL")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_cashflow(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManageFinancial>,
    Query(query): Query<CashflowQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = query.into_filter()?;
    let entries = app_state.cashflow_service.list_entries(&filter).await?;
    Ok(Json(entries))
}

// POST /api/cashflow
#[utoipa::path(
    post,
    path = "/api/cashflow",
    tag = "Cashflow",
    request_body = CreateCashflowPayload,
    responses(
        (status = 201, description = "Lançamento registrado", body = CashflowEntry),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Agendamento vinculado não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_cashflow_entry(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManageFinancial>,
    Json(payload): Json<CreateCashflowPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let entry = NewCashflowEntry {
        kind: payload.kind,
        description: payload.description.trim().to_string(),
        amount: payload.amount,
        date: parse_datetime(&payload.date)?,
        category: payload.category.trim().to_string(),
        appointment_id: payload.appointment_id,
    };

    let created = app_state.cashflow_service.create_entry(entry).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// PUT /api/cashflow/{id}
#[utoipa::path(
    put,
    path = "/api/cashflow/{id}",
    tag = "Cashflow",
    request_body = UpdateCashflowPayload,
    params(("id" = Uuid, Path, description = "ID do Lançamento")),
    responses(
        (status = 200, description = "Lançamento atualizado", body = CashflowEntry),
        (status = 404, description = "Lançamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_cashflow_entry(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManageFinancial>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCashflowPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let changes = CashflowChanges {
        kind: payload.kind,
        description: payload.description,
        amount: payload.amount,
        date: payload.date.as_deref().map(parse_datetime).transpose()?,
        category: payload.category,
        appointment_id: payload.appointment_id,
    };

    let entry = app_state.cashflow_service.update_entry(id, changes).await?;
    Ok(Json(entry))
}

// DELETE /api/cashflow/{id}
#[utoipa::path(
    delete,
    path = "/api/cashflow/{id}",
    tag = "Cashflow",
    params(("id" = Uuid, Path, description = "ID do Lançamento")),
    responses(
        (status = 204, description = "Lançamento removido"),
        (status = 404, description = "Lançamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_cashflow_entry(
    State(app_state): State<AppState>,
    _perm: RequirePermission<PermManageFinancial>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.cashflow_service.delete_entry(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::appointments::fixtures::at;

    #[test]
    fn date_range_covers_whole_last_day() {
        let query = CashflowQuery {
            kind: Some(CashflowType::Saida),
            category: Some("Aluguel".into()),
            start_date: Some("2024-06-01".into()),
            end_date: Some("2024-06-30".into()),
        };

        let filter = query.into_filter().unwrap();
        assert_eq!(filter.kind, Some(CashflowType::Saida));
        assert_eq!(filter.category.as_deref(), Some("Aluguel"));
        assert_eq!(filter.from, Some(at(2024, 6, 1, 0, 0)));
        assert_eq!(filter.until, Some(at(2024, 7, 1, 0, 0)));
    }

    #[test]
    fn same_day_range_is_valid_and_inverted_is_not() {
        let same_day = CashflowQuery {
            start_date: Some("2024-06-10".into()),
            end_date: Some("2024-06-10".into()),
            ..Default::default()
        };
        assert!(same_day.into_filter().is_ok());

        let inverted = CashflowQuery {
            start_date: Some("2024-06-11".into()),
            end_date: Some("2024-06-10".into()),
            ..Default::default()
        };
        assert!(matches!(inverted.into_filter(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn empty_query_lists_everything() {
        assert_eq!(CashflowQuery::default().into_filter().unwrap(), CashflowFilter::default());
    }

    #[test]
    fn type_field_uses_wire_name() {
        let payload: CreateCashflowPayload = serde_json::from_str(
            r#"{"type":"ENTRADA","description":"Manicure","amount":35.0,"date":"2024-06-10T10:00","category":"Serviços"}"#,
        )
        .unwrap();
        assert_eq!(payload.kind, CashflowType::Entrada);
        assert!(payload.validate().is_ok());
    }
}
