// src/common/time.rs

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::common::error::AppError;

/// Faixa de anos aceita na entrada. Fora dela a aritmética de agenda estoura.
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 9999;

fn check_year(year: i32, value: &str) -> Result<(), AppError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(AppError::InvalidInput(format!(
            "Data fora do intervalo aceito ({}-{}): '{}'.",
            MIN_YEAR, MAX_YEAR, value
        )));
    }
    Ok(())
}

/// Converte o texto recebido da API em horário de parede do salão.
///
/// Aceita `2024-06-10T14:30`, `2024-06-10T14:30:00(.fff)` e RFC 3339. No caso
/// RFC 3339 o offset é descartado e o relógio de quem enviou é mantido.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, AppError> {
    let value = value.trim();

    let parsed = DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_local())
        .ok()
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
                .into_iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        });

    let Some(dt) = parsed else {
        return Err(AppError::InvalidInput(format!(
            "Data/hora inválida: '{}'. Use o formato AAAA-MM-DDTHH:MM.",
            value
        )));
    };

    check_year(dt.year(), value)?;
    Ok(dt)
}

pub fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::InvalidInput(format!("Data inválida: '{}'. Use o formato AAAA-MM-DD.", value))
    })?;
    check_year(date.year(), value)?;
    Ok(date)
}

/// `start + minutes`, com estouro virando erro de entrada.
pub fn add_minutes(start: NaiveDateTime, minutes: i64) -> Result<NaiveDateTime, AppError> {
    Duration::try_minutes(minutes)
        .and_then(|delta| start.checked_add_signed(delta))
        .ok_or_else(|| AppError::InvalidInput("Data/hora fora do intervalo suportado.".into()))
}

// "08:00" ou "08:00:00"
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}
