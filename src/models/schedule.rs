// src/models/schedule.rs

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::appointments::Appointment;

// --- Persistido ---

/// Horário de trabalho de um colaborador em um dia da semana.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkSchedule {
    pub id: Uuid,
    pub collaborator_id: Uuid,
    /// 0 = domingo ... 6 = sábado
    #[schema(example = 1)]
    pub day_of_week: i16,
    #[schema(value_type = String, example = "09:00:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "17:00:00")]
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

// Dia da semana no mesmo padrão da tabela (domingo = 0)
pub fn day_of_week(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

// --- Derivados (nunca persistidos) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkWindow {
    #[schema(value_type = String, example = "2024-06-10T08:00:00")]
    pub start: NaiveDateTime,
    #[schema(value_type = String, example = "2024-06-10T18:00:00")]
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    #[schema(value_type = String, example = "2024-06-10T14:00:00")]
    pub start: NaiveDateTime,
    #[schema(value_type = String, example = "2024-06-10T14:30:00")]
    pub end: NaiveDateTime,
    pub is_available: bool,
    /// Agendamento que ocupa o slot, quando houver
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment: Option<Appointment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityCheck {
    pub is_available: bool,
    pub conflicts: Vec<Appointment>,
    pub suggestions: Vec<TimeSlot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sunday_is_zero_and_saturday_is_six() {
        // 2024-06-09 foi um domingo
        assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2024, 6, 9).unwrap()), 0);
        assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()), 1);
        assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()), 6);
    }
}
