// src/models/appointments.rs

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Maior duração aceita para um agendamento (um dia inteiro).
pub const MAX_APPOINTMENT_MINUTES: i32 = 24 * 60;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "appointment_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    /// Marcado e ainda não resolvido. Único status que ocupa a agenda.
    Agendado,
    Concluido,
    Cancelado,
    NoShow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub client_id: Option<Uuid>,
    #[schema(example = "Ana Paula")]
    pub client_name: String,
    pub service_id: Uuid,
    pub collaborator_id: Uuid,
    pub user_id: Option<Uuid>,
    #[schema(value_type = String, example = "2024-06-10T14:00:00")]
    pub datetime: NaiveDateTime,
    #[schema(example = 60)]
    pub duration_minutes: i32,
    #[schema(example = "80.00")]
    pub price: Decimal,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Fim do intervalo `[datetime, datetime + duração)`. Satura no limite do calendário.
    pub fn ends_at(&self) -> NaiveDateTime {
        self.datetime
            .checked_add_signed(Duration::minutes(i64::from(self.duration_minutes)))
            .unwrap_or(NaiveDateTime::MAX)
    }
}

// Filtros de listagem (todos opcionais)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentFilter {
    pub collaborator_id: Option<Uuid>,
    pub status: Option<AppointmentStatus>,
    /// Início (inclusive) da janela sobre `datetime`
    pub from: Option<NaiveDateTime>,
    /// Fim (exclusivo) da janela sobre `datetime`
    pub until: Option<NaiveDateTime>,
}

impl AppointmentFilter {
    pub fn active_for(collaborator_id: Uuid) -> Self {
        Self {
            collaborator_id: Some(collaborator_id),
            status: Some(AppointmentStatus::Agendado),
            ..Default::default()
        }
    }

    pub fn between(mut self, from: NaiveDateTime, until: NaiveDateTime) -> Self {
        self.from = Some(from);
        self.until = Some(until);
        self
    }

    /// Mesma regra da consulta SQL, para stores em memória.
    pub fn matches(&self, appointment: &Appointment) -> bool {
        self.collaborator_id.is_none_or(|id| appointment.collaborator_id == id)
            && self.status.is_none_or(|s| appointment.status == s)
            && self.from.is_none_or(|from| appointment.datetime >= from)
            && self.until.is_none_or(|until| appointment.datetime < until)
    }
}

// Pedido de agendamento como chega da API: preço e duração podem vir do serviço
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub client_id: Option<Uuid>,
    pub client_name: Option<String>,
    pub service_id: Uuid,
    pub collaborator_id: Uuid,
    pub user_id: Option<Uuid>,
    pub datetime: NaiveDateTime,
    pub duration_minutes: Option<i32>,
    pub price: Option<Decimal>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}

// Dados já resolvidos (preço/duração preenchidos) para inserção
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub client_id: Option<Uuid>,
    pub client_name: String,
    pub service_id: Uuid,
    pub collaborator_id: Uuid,
    pub user_id: Option<Uuid>,
    pub datetime: NaiveDateTime,
    pub duration_minutes: i32,
    pub price: Decimal,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentChanges {
    pub client_id: Option<Uuid>,
    pub client_name: Option<String>,
    pub service_id: Option<Uuid>,
    pub collaborator_id: Option<Uuid>,
    pub datetime: Option<NaiveDateTime>,
    pub duration_minutes: Option<i32>,
    pub price: Option<Decimal>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}

impl AppointmentChanges {
    /// Aplica as mudanças sobre o registro atual, sem tocar no banco.
    pub fn apply_to(&self, current: &Appointment) -> Appointment {
        let mut next = current.clone();
        if let Some(v) = self.client_id {
            next.client_id = Some(v);
        }
        if let Some(v) = &self.client_name {
            next.client_name = v.clone();
        }
        if let Some(v) = self.service_id {
            next.service_id = v;
        }
        if let Some(v) = self.collaborator_id {
            next.collaborator_id = v;
        }
        if let Some(v) = self.datetime {
            next.datetime = v;
        }
        if let Some(v) = self.duration_minutes {
            next.duration_minutes = v;
        }
        if let Some(v) = self.price {
            next.price = v;
        }
        if let Some(v) = self.status {
            next.status = v;
        }
        if let Some(v) = &self.notes {
            next.notes = Some(v.clone());
        }
        next
    }

    // Só precisamos revalidar a agenda quando o intervalo ou o dono mudam
    pub fn touches_agenda(&self) -> bool {
        self.collaborator_id.is_some()
            || self.datetime.is_some()
            || self.duration_minutes.is_some()
            || self.status.is_some()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn ends_at_adds_duration() {
        let a = appointment(Uuid::new_v4(), at(2024, 6, 10, 23, 30), 60);
        assert_eq!(a.ends_at(), at(2024, 6, 11, 0, 30));
    }

    #[test]
    fn ends_at_saturates_at_calendar_limit() {
        let mut a = appointment(Uuid::new_v4(), at(2024, 6, 10, 9, 0), 60);
        a.datetime = NaiveDateTime::MAX;
        assert_eq!(a.ends_at(), NaiveDateTime::MAX);
    }

    #[test]
    fn filter_matches_half_open_range_and_status() {
        let collaborator = Uuid::new_v4();
        let filter = AppointmentFilter::active_for(collaborator)
            .between(at(2024, 6, 10, 0, 0), at(2024, 6, 11, 0, 0));

        let inside = appointment(collaborator, at(2024, 6, 10, 9, 0), 30);
        let next_day = appointment(collaborator, at(2024, 6, 11, 0, 0), 30);
        let mut cancelled = inside.clone();
        cancelled.status = AppointmentStatus::Cancelado;
        let other = appointment(Uuid::new_v4(), at(2024, 6, 10, 9, 0), 30);

        assert!(filter.matches(&inside));
        assert!(!filter.matches(&next_day));
        assert!(!filter.matches(&cancelled));
        assert!(!filter.matches(&other));
    }

    #[test]
    fn changes_apply_and_detect_agenda_impact() {
        let current = appointment(Uuid::new_v4(), at(2024, 6, 10, 9, 0), 30);

        let notes_only = AppointmentChanges { notes: Some("trazer toalha".into()), ..Default::default() };
        assert!(!notes_only.touches_agenda());
        assert_eq!(notes_only.apply_to(&current).notes.as_deref(), Some("trazer toalha"));

        let moved = AppointmentChanges { datetime: Some(at(2024, 6, 10, 11, 0)), ..Default::default() };
        assert!(moved.touches_agenda());
        assert_eq!(moved.apply_to(&current).datetime, at(2024, 6, 10, 11, 0));
    }

    #[test]
    fn every_change_field_is_applied() {
        let current = appointment(Uuid::new_v4(), at(2024, 6, 10, 9, 0), 30);
        let changes = AppointmentChanges {
            client_id: Some(Uuid::new_v4()),
            client_name: Some("Bia".into()),
            service_id: Some(Uuid::new_v4()),
            collaborator_id: Some(Uuid::new_v4()),
            datetime: Some(at(2024, 6, 11, 10, 0)),
            duration_minutes: Some(45),
            price: Some(Decimal::new(9000, 2)),
            status: Some(AppointmentStatus::Concluido),
            notes: Some("retoque".into()),
        };

        let next = changes.apply_to(&current);
        assert_eq!(next.id, current.id);
        assert_eq!(next.client_id, changes.client_id);
        assert_eq!(next.client_name, "Bia");
        assert_eq!(Some(next.service_id), changes.service_id);
        assert_eq!(Some(next.collaborator_id), changes.collaborator_id);
        assert_eq!(next.datetime, at(2024, 6, 11, 10, 0));
        assert_eq!(next.duration_minutes, 45);
        assert_eq!(next.price, Decimal::new(9000, 2));
        assert_eq!(next.status, AppointmentStatus::Concluido);
        assert_eq!(next.notes.as_deref(), Some("retoque"));

        // Sem mudanças, o registro volta igual
        assert_eq!(AppointmentChanges::default().apply_to(&current), current);
    }

    #[test]
    fn status_uses_portuguese_labels() {
        assert_eq!(serde_json::to_string(&AppointmentStatus::Agendado).unwrap(), "\"AGENDADO\"");
        assert_eq!(serde_json::to_string(&AppointmentStatus::NoShow).unwrap(), "\"NO_SHOW\"");
    }
}
