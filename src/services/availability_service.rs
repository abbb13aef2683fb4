// src/services/availability_service.rs

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use crate::{
    common::{error::AppError, time::add_minutes},
    db::AgendaStore,
    models::{
        appointments::{Appointment, AppointmentFilter, MAX_APPOINTMENT_MINUTES},
        schedule::{day_of_week, AvailabilityCheck, TimeSlot, WorkSchedule, WorkWindow},
    },
};

pub const MIN_SLOT_MINUTES: i64 = 5;
pub const MAX_SLOT_MINUTES: i64 = 240;

/// Parâmetros da agenda, lidos da configuração.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgendaSettings {
    /// Expediente padrão de segunda a sexta, quando não há horário cadastrado
    pub workday_start: NaiveTime,
    pub workday_end: NaiveTime,
    pub slot_minutes: i64,
    pub max_suggestions: usize,
}

impl Default for AgendaSettings {
    fn default() -> Self {
        Self {
            workday_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
            workday_end: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN),
            slot_minutes: 30,
            max_suggestions: 5,
        }
    }
}

// =============================================================================
//  FUNÇÕES PURAS
// =============================================================================

/// Sobreposição de intervalos semiabertos `[início, fim)`.
///
/// Encostar não conflita: 10:00–10:30 e 10:30–11:00 não se sobrepõem.
pub fn intervals_overlap(
    start_a: NaiveDateTime,
    end_a: NaiveDateTime,
    start_b: NaiveDateTime,
    end_b: NaiveDateTime,
) -> bool {
    start_a < end_b && start_b < end_a
}

/// Agendamentos que ocupam algum instante de `[start, end)`, na ordem recebida.
pub fn find_conflicts(
    appointments: &[Appointment],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|a| intervals_overlap(start, end, a.datetime, a.ends_at()))
        .cloned()
        .collect()
}

/// Janela de trabalho de um colaborador em `date`.
///
/// Um horário cadastrado para o dia da semana manda: disponível vira janela,
/// indisponível vira `None`. Sem cadastro, segunda a sexta usam o expediente
/// padrão e o fim de semana fica fechado.
pub fn resolve_work_window(
    date: NaiveDate,
    schedule: Option<&WorkSchedule>,
    settings: &AgendaSettings,
) -> Option<WorkWindow> {
    let (start, end) = match schedule {
        Some(s) if s.is_available => (s.start_time, s.end_time),
        Some(_) => return None,
        None => match day_of_week(date) {
            1..=5 => (settings.workday_start, settings.workday_end),
            _ => return None,
        },
    };

    if start >= end {
        return None;
    }

    Some(WorkWindow {
        start: date.and_time(start),
        end: date.and_time(end),
    })
}

/// Fatia a janela em slots consecutivos de `slot_minutes`.
///
/// O último slot que passaria do fim da janela é descartado. Cada slot é
/// marcado ocupado pelo primeiro agendamento (na ordem recebida) que o
/// sobrepõe.
pub fn build_slots(window: &WorkWindow, slot_minutes: i64, appointments: &[Appointment]) -> Vec<TimeSlot> {
    let step = Duration::minutes(slot_minutes);
    let mut slots = Vec::new();
    let mut current = window.start;

    while current + step <= window.end {
        let slot_end = current + step;
        let occupant = appointments
            .iter()
            .find(|a| intervals_overlap(current, slot_end, a.datetime, a.ends_at()))
            .cloned();

        slots.push(TimeSlot {
            start: current,
            end: slot_end,
            is_available: occupant.is_none(),
            appointment: occupant,
        });

        current = slot_end;
    }

    slots
}

/// Horários livres para um atendimento de `duration_minutes` dentro da janela.
///
/// Os candidatos `[t, t + duração)` começam no início da janela e avançam de
/// `step_minutes` em `step_minutes`, sem passar do fim. Ficam só os que não
/// sobrepõem nenhum agendamento, até `max` itens.
pub fn suggest_slots(
    window: &WorkWindow,
    duration_minutes: i64,
    step_minutes: i64,
    appointments: &[Appointment],
    max: usize,
) -> Vec<TimeSlot> {
    let duration = Duration::minutes(duration_minutes);
    let step = Duration::minutes(step_minutes);
    let mut suggestions = Vec::new();
    let mut current = window.start;

    while suggestions.len() < max && current + duration <= window.end {
        let candidate_end = current + duration;
        let taken = appointments
            .iter()
            .any(|a| intervals_overlap(current, candidate_end, a.datetime, a.ends_at()));

        if !taken {
            suggestions.push(TimeSlot {
                start: current,
                end: candidate_end,
                is_available: true,
                appointment: None,
            });
        }

        current += step;
    }

    suggestions
}

pub fn validate_duration(duration_minutes: i32) -> Result<(), AppError> {
    if duration_minutes <= 0 || duration_minutes > MAX_APPOINTMENT_MINUTES {
        return Err(AppError::InvalidInput(format!(
            "A duração deve estar entre 1 e {} minutos.",
            MAX_APPOINTMENT_MINUTES
        )));
    }
    Ok(())
}

pub fn validate_slot_minutes(slot_minutes: i64) -> Result<(), AppError> {
    if !(MIN_SLOT_MINUTES..=MAX_SLOT_MINUTES).contains(&slot_minutes) {
        return Err(AppError::InvalidInput(format!(
            "O tamanho do slot deve estar entre {} e {} minutos.",
            MIN_SLOT_MINUTES, MAX_SLOT_MINUTES
        )));
    }
    Ok(())
}

// =============================================================================
//  SERVICE
// =============================================================================

#[derive(Clone)]
pub struct AvailabilityService {
    store: Arc<dyn AgendaStore>,
    settings: AgendaSettings,
}

impl AvailabilityService {
    pub fn new(store: Arc<dyn AgendaStore>, settings: AgendaSettings) -> Self {
        Self { store, settings }
    }

    // Colaborador inexistente é erro do chamador, não "sem expediente"
    async fn ensure_collaborator(&self, collaborator_id: Uuid) -> Result<(), AppError> {
        let exists = self
            .store
            .collaborator_exists(collaborator_id)
            .await
            .map_err(AppError::store_unavailable)?;

        if !exists {
            return Err(AppError::CollaboratorNotFound);
        }
        Ok(())
    }

    async fn window_for(&self, collaborator_id: Uuid, date: NaiveDate) -> Result<Option<WorkWindow>, AppError> {
        let schedule = self
            .store
            .find_work_schedule(collaborator_id, day_of_week(date))
            .await
            .map_err(AppError::store_unavailable)?;

        Ok(resolve_work_window(date, schedule.as_ref(), &self.settings))
    }

    // Agendamentos ativos que podem tocar `[from, until)`. Os do dia anterior
    // podem invadir a madrugada, então a busca recua uma duração máxima.
    async fn appointments_touching(
        &self,
        collaborator_id: Uuid,
        from: NaiveDateTime,
        until: NaiveDateTime,
    ) -> Result<Vec<Appointment>, AppError> {
        let lookback_start = add_minutes(from, -i64::from(MAX_APPOINTMENT_MINUTES))?;
        let filter = AppointmentFilter::active_for(collaborator_id).between(lookback_start, until);

        self.store
            .find_appointments(&filter)
            .await
            .map_err(AppError::store_unavailable)
    }

    async fn day_appointments(&self, collaborator_id: Uuid, date: NaiveDate) -> Result<Vec<Appointment>, AppError> {
        let day_start = date.and_time(NaiveTime::MIN);
        let day_end = add_minutes(day_start, 24 * 60)?;
        self.appointments_touching(collaborator_id, day_start, day_end).await
    }

    async fn slots_for(
        &self,
        collaborator_id: Uuid,
        date: NaiveDate,
        slot_minutes: i64,
    ) -> Result<Vec<TimeSlot>, AppError> {
        let Some(window) = self.window_for(collaborator_id, date).await? else {
            return Ok(vec![]);
        };

        let appointments = self.day_appointments(collaborator_id, date).await?;
        Ok(build_slots(&window, slot_minutes, &appointments))
    }

    async fn suggestions_for(
        &self,
        collaborator_id: Uuid,
        date: NaiveDate,
        duration_minutes: i32,
    ) -> Result<Vec<TimeSlot>, AppError> {
        let Some(window) = self.window_for(collaborator_id, date).await? else {
            return Ok(vec![]);
        };

        let appointments = self.day_appointments(collaborator_id, date).await?;
        Ok(suggest_slots(
            &window,
            i64::from(duration_minutes),
            self.settings.slot_minutes,
            &appointments,
            self.settings.max_suggestions,
        ))
    }

    /// Expediente do colaborador no dia, ou `None` se ele não atende.
    pub async fn resolve_work_window(
        &self,
        collaborator_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<WorkWindow>, AppError> {
        self.ensure_collaborator(collaborator_id).await?;
        self.window_for(collaborator_id, date).await
    }

    /// Agenda do dia em slots, livres e ocupados, em ordem de início.
    pub async fn generate_schedule(
        &self,
        collaborator_id: Uuid,
        date: NaiveDate,
        slot_minutes: Option<i64>,
    ) -> Result<Vec<TimeSlot>, AppError> {
        let slot_minutes = slot_minutes.unwrap_or(self.settings.slot_minutes);
        validate_slot_minutes(slot_minutes)?;

        self.ensure_collaborator(collaborator_id).await?;
        self.slots_for(collaborator_id, date, slot_minutes).await
    }

    /// Verifica se `[start, start + duração)` está livre para o colaborador.
    ///
    /// Qualquer falha de leitura sobe como `StoreUnavailable`: sem agenda
    /// confiável não há resposta de disponibilidade.
    pub async fn check_availability(
        &self,
        collaborator_id: Uuid,
        proposed_start: NaiveDateTime,
        duration_minutes: i32,
    ) -> Result<AvailabilityCheck, AppError> {
        validate_duration(duration_minutes)?;
        self.ensure_collaborator(collaborator_id).await?;

        let proposed_end = add_minutes(proposed_start, i64::from(duration_minutes))?;
        let appointments = self
            .appointments_touching(collaborator_id, proposed_start, proposed_end)
            .await?;

        let conflicts = find_conflicts(&appointments, proposed_start, proposed_end);
        let is_available = conflicts.is_empty();

        let suggestions = self
            .suggestions_for(collaborator_id, proposed_start.date(), duration_minutes)
            .await?;

        tracing::debug!(
            %collaborator_id,
            %proposed_start,
            duration_minutes,
            is_available,
            "disponibilidade verificada"
        );

        Ok(AvailabilityCheck {
            is_available,
            conflicts,
            suggestions,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::models::appointments::{fixtures::*, AppointmentStatus};

    // Store em memória com a mesma semântica de filtro/ordenação do Postgres
    #[derive(Default)]
    struct InMemoryAgendaStore {
        pub collaborators: Mutex<HashSet<Uuid>>,
        pub schedules: Mutex<Vec<WorkSchedule>>,
        pub appointments: Mutex<Vec<Appointment>>,
        pub failing: bool,
    }

    impl InMemoryAgendaStore {
        pub fn with_collaborator(id: Uuid) -> Self {
            let store = Self::default();
            store.collaborators.lock().unwrap().insert(id);
            store
        }

        pub fn add(&self, appointment: Appointment) {
            self.appointments.lock().unwrap().push(appointment);
        }

        fn check(&self) -> Result<(), AppError> {
            if self.failing {
                return Err(AppError::DatabaseError(sqlx::Error::PoolTimedOut));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl AgendaStore for InMemoryAgendaStore {
        async fn collaborator_exists(&self, collaborator_id: Uuid) -> Result<bool, AppError> {
            self.check()?;
            Ok(self.collaborators.lock().unwrap().contains(&collaborator_id))
        }

        async fn find_work_schedule(
            &self,
            collaborator_id: Uuid,
            day: i16,
        ) -> Result<Option<WorkSchedule>, AppError> {
            self.check()?;
            Ok(self
                .schedules
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.collaborator_id == collaborator_id && s.day_of_week == day)
                .cloned())
        }

        async fn find_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>, AppError> {
            self.check()?;
            let mut found: Vec<Appointment> = self
                .appointments
                .lock()
                .unwrap()
                .iter()
                .filter(|a| filter.matches(a))
                .cloned()
                .collect();
            found.sort_by_key(|a| a.datetime);
            Ok(found)
        }
    }

    fn service(store: InMemoryAgendaStore) -> AvailabilityService {
        AvailabilityService::new(Arc::new(store), AgendaSettings::default())
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn schedule(collaborator_id: Uuid, day: i16, start: (u32, u32), end: (u32, u32), available: bool) -> WorkSchedule {
        WorkSchedule {
            id: Uuid::new_v4(),
            collaborator_id,
            day_of_week: day,
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            is_available: available,
            created_at: Utc::now(),
        }
    }

    // --- intervals_overlap ---

    #[test]
    fn touching_intervals_do_not_conflict() {
        let a = at(2024, 6, 10, 10, 0);
        let b = at(2024, 6, 10, 10, 30);
        let c = at(2024, 6, 10, 11, 0);
        assert!(!intervals_overlap(a, b, b, c));
        assert!(!intervals_overlap(b, c, a, b));
    }

    #[test]
    fn partial_and_nested_intervals_conflict() {
        let t = |h, m| at(2024, 6, 10, h, m);
        // parcial
        assert!(intervals_overlap(t(10, 0), t(11, 0), t(10, 30), t(11, 30)));
        // contido
        assert!(intervals_overlap(t(10, 0), t(12, 0), t(10, 30), t(11, 0)));
        // contém
        assert!(intervals_overlap(t(10, 30), t(11, 0), t(10, 0), t(12, 0)));
        // idênticos
        assert!(intervals_overlap(t(10, 0), t(11, 0), t(10, 0), t(11, 0)));
        // disjuntos
        assert!(!intervals_overlap(t(8, 0), t(9, 0), t(10, 0), t(11, 0)));
    }

    #[test]
    fn find_conflicts_keeps_only_overlapping_in_order() {
        let c = Uuid::new_v4();
        let early = appointment(c, at(2024, 6, 10, 9, 0), 60);
        let late = appointment(c, at(2024, 6, 10, 10, 30), 30);
        let far = appointment(c, at(2024, 6, 10, 15, 0), 30);

        let conflicts = find_conflicts(
            &[early.clone(), far, late.clone()],
            at(2024, 6, 10, 9, 30),
            at(2024, 6, 10, 11, 0),
        );
        assert_eq!(conflicts, vec![early, late]);
    }

    // --- resolve_work_window ---

    #[test]
    fn weekday_without_schedule_uses_default_hours() {
        let window = resolve_work_window(monday(), None, &AgendaSettings::default()).unwrap();
        assert_eq!(window.start, at(2024, 6, 10, 8, 0));
        assert_eq!(window.end, at(2024, 6, 10, 18, 0));
    }

    #[test]
    fn weekend_without_schedule_is_closed() {
        let saturday = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2024, 6, 16).unwrap();
        assert_eq!(resolve_work_window(saturday, None, &AgendaSettings::default()), None);
        assert_eq!(resolve_work_window(sunday, None, &AgendaSettings::default()), None);
    }

    #[test]
    fn persisted_schedule_overrides_default() {
        let c = Uuid::new_v4();
        let saturday = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        let open = schedule(c, 6, (9, 0), (13, 0), true);
        let window = resolve_work_window(saturday, Some(&open), &AgendaSettings::default()).unwrap();
        assert_eq!(window.start, at(2024, 6, 15, 9, 0));
        assert_eq!(window.end, at(2024, 6, 15, 13, 0));

        let day_off = schedule(c, 1, (8, 0), (18, 0), false);
        assert_eq!(resolve_work_window(monday(), Some(&day_off), &AgendaSettings::default()), None);
    }

    // --- build_slots ---

    #[test]
    fn full_day_partitions_into_twenty_half_hours() {
        let window = resolve_work_window(monday(), None, &AgendaSettings::default()).unwrap();
        let slots = build_slots(&window, 30, &[]);

        assert_eq!(slots.len(), 20);
        assert_eq!(slots.first().unwrap().start, window.start);
        assert_eq!(slots.last().unwrap().end, window.end);
        for pair in slots.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        for slot in &slots {
            assert_eq!(slot.end - slot.start, Duration::minutes(30));
            assert!(slot.is_available);
            assert!(slot.appointment.is_none());
        }
    }

    #[test]
    fn trailing_partial_slot_is_dropped() {
        let window = WorkWindow {
            start: at(2024, 6, 10, 8, 0),
            end: at(2024, 6, 10, 9, 45),
        };
        let slots = build_slots(&window, 30, &[]);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots.last().unwrap().end, at(2024, 6, 10, 9, 30));
    }

    #[test]
    fn slots_are_marked_by_first_overlapping_appointment() {
        let c = Uuid::new_v4();
        let window = WorkWindow {
            start: at(2024, 6, 10, 10, 0),
            end: at(2024, 6, 10, 12, 0),
        };
        let first = appointment(c, at(2024, 6, 10, 10, 0), 45);
        let second = appointment(c, at(2024, 6, 10, 10, 40), 20);

        let slots = build_slots(&window, 30, &[first.clone(), second]);

        assert!(!slots[0].is_available);
        assert_eq!(slots[0].appointment.as_ref().map(|a| a.id), Some(first.id));
        // 10:30–11:00 é tocado pelos dois; vence o primeiro da lista
        assert_eq!(slots[1].appointment.as_ref().map(|a| a.id), Some(first.id));
        assert!(slots[2].is_available);
        assert!(slots[3].is_available);
    }

    #[test]
    fn appointment_ending_at_slot_start_leaves_slot_free() {
        let c = Uuid::new_v4();
        let window = WorkWindow {
            start: at(2024, 6, 10, 10, 0),
            end: at(2024, 6, 10, 11, 0),
        };
        let slots = build_slots(&window, 30, &[appointment(c, at(2024, 6, 10, 10, 0), 30)]);
        assert!(!slots[0].is_available);
        assert!(slots[1].is_available);
    }

    // --- suggest_slots ---

    #[test]
    fn suggestions_fit_the_whole_duration() {
        let c = Uuid::new_v4();
        let window = WorkWindow {
            start: at(2024, 6, 10, 8, 0),
            end: at(2024, 6, 10, 12, 0),
        };
        let booked = appointment(c, at(2024, 6, 10, 9, 0), 60);

        let suggestions = suggest_slots(&window, 90, 30, &[booked], 10);
        let starts: Vec<NaiveDateTime> = suggestions.iter().map(|s| s.start).collect();
        // 10:30–12:00 é o último que cabe antes do fim da janela
        assert_eq!(
            starts,
            vec![at(2024, 6, 10, 10, 0), at(2024, 6, 10, 10, 30)]
        );
        for s in &suggestions {
            assert_eq!(s.end - s.start, Duration::minutes(90));
            assert!(s.is_available);
            assert!(s.appointment.is_none());
        }
    }

    #[test]
    fn suggestions_respect_cap_and_window_size() {
        let window = WorkWindow {
            start: at(2024, 6, 10, 8, 0),
            end: at(2024, 6, 10, 9, 0),
        };
        assert_eq!(suggest_slots(&window, 15, 15, &[], 2).len(), 2);
        assert!(suggest_slots(&window, 90, 30, &[], 5).is_empty());
        assert!(suggest_slots(&window, 30, 30, &[], 0).is_empty());
    }

    // --- AvailabilityService ---

    #[tokio::test]
    async fn end_to_end_conflict_then_free() {
        let c = Uuid::new_v4();
        let store = InMemoryAgendaStore::with_collaborator(c);
        let booked = appointment(c, at(2024, 6, 10, 14, 0), 60);
        store.add(booked.clone());
        let service = service(store);

        let taken = service.check_availability(c, at(2024, 6, 10, 14, 30), 30).await.unwrap();
        assert!(!taken.is_available);
        assert_eq!(taken.conflicts, vec![booked]);

        let free = service.check_availability(c, at(2024, 6, 10, 15, 0), 30).await.unwrap();
        assert!(free.is_available);
        assert!(free.conflicts.is_empty());
    }

    #[tokio::test]
    async fn check_is_idempotent() {
        let c = Uuid::new_v4();
        let store = InMemoryAgendaStore::with_collaborator(c);
        store.add(appointment(c, at(2024, 6, 10, 9, 0), 90));
        let service = service(store);

        let first = service.check_availability(c, at(2024, 6, 10, 9, 30), 60).await.unwrap();
        let second = service.check_availability(c, at(2024, 6, 10, 9, 30), 60).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn suggestions_are_free_and_capped() {
        let c = Uuid::new_v4();
        let store = InMemoryAgendaStore::with_collaborator(c);
        store.add(appointment(c, at(2024, 6, 10, 8, 0), 60));
        let service = service(store);

        let check = service.check_availability(c, at(2024, 6, 10, 8, 30), 30).await.unwrap();
        assert!(!check.is_available);
        assert_eq!(check.suggestions.len(), 5);
        assert!(check.suggestions.iter().all(|s| s.is_available));
        assert_eq!(check.suggestions[0].start, at(2024, 6, 10, 9, 0));
    }

    #[tokio::test]
    async fn every_suggestion_passes_its_own_check() {
        let c = Uuid::new_v4();
        let store = InMemoryAgendaStore::with_collaborator(c);
        store.add(appointment(c, at(2024, 6, 10, 9, 0), 60));
        let service = service(store);

        let check = service.check_availability(c, at(2024, 6, 10, 8, 0), 90).await.unwrap();
        assert!(!check.is_available);
        assert!(!check.suggestions.is_empty());
        // 08:00 e 08:30 não comportam 90 minutos antes das 09:00
        assert_eq!(check.suggestions[0].start, at(2024, 6, 10, 10, 0));

        for suggestion in &check.suggestions {
            assert_eq!(suggestion.end - suggestion.start, Duration::minutes(90));
            let recheck = service.check_availability(c, suggestion.start, 90).await.unwrap();
            assert!(recheck.is_available, "{} deveria estar livre", suggestion.start);
        }
    }

    #[tokio::test]
    async fn extreme_dates_are_rejected_without_panicking() {
        let c = Uuid::new_v4();
        let store = InMemoryAgendaStore::with_collaborator(c);
        // Expediente em todos os dias, para que o último dia do calendário tenha janela
        for day in 0..7 {
            store.schedules.lock().unwrap().push(schedule(c, day, (8, 0), (18, 0), true));
        }
        let service = service(store);

        let err = service.check_availability(c, NaiveDateTime::MAX, 30).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let err = service.check_availability(c, NaiveDateTime::MIN, 30).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));

        let err = service.generate_schedule(c, NaiveDate::MAX, None).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn only_scheduled_appointments_block() {
        let c = Uuid::new_v4();
        let store = InMemoryAgendaStore::with_collaborator(c);
        let mut cancelled = appointment(c, at(2024, 6, 10, 14, 0), 60);
        cancelled.status = AppointmentStatus::Cancelado;
        store.add(cancelled);
        let mut done = appointment(c, at(2024, 6, 10, 14, 0), 60);
        done.status = AppointmentStatus::Concluido;
        store.add(done);
        // Outro colaborador no mesmo horário
        store.add(appointment(Uuid::new_v4(), at(2024, 6, 10, 14, 0), 60));
        let service = service(store);

        let check = service.check_availability(c, at(2024, 6, 10, 14, 0), 60).await.unwrap();
        assert!(check.is_available);
    }

    #[tokio::test]
    async fn overnight_appointment_from_previous_day_conflicts() {
        let c = Uuid::new_v4();
        let store = InMemoryAgendaStore::with_collaborator(c);
        store.add(appointment(c, at(2024, 6, 9, 23, 0), 120));
        let service = service(store);

        let check = service.check_availability(c, at(2024, 6, 10, 0, 30), 30).await.unwrap();
        assert!(!check.is_available);
        assert_eq!(check.conflicts.len(), 1);
    }

    #[tokio::test]
    async fn empty_weekday_has_twenty_free_slots() {
        let c = Uuid::new_v4();
        let service = service(InMemoryAgendaStore::with_collaborator(c));

        let slots = service.generate_schedule(c, monday(), None).await.unwrap();
        assert_eq!(slots.len(), 20);
        assert!(slots.iter().all(|s| s.is_available));
    }

    #[tokio::test]
    async fn saturday_without_schedule_is_empty() {
        let c = Uuid::new_v4();
        let service = service(InMemoryAgendaStore::with_collaborator(c));
        let saturday = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        assert_eq!(service.resolve_work_window(c, saturday).await.unwrap(), None);
        assert!(service.generate_schedule(c, saturday, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn schedule_uses_persisted_hours_and_day_appointments() {
        let c = Uuid::new_v4();
        let store = InMemoryAgendaStore::with_collaborator(c);
        store.schedules.lock().unwrap().push(schedule(c, 1, (9, 0), (12, 0), true));
        store.add(appointment(c, at(2024, 6, 10, 10, 0), 60));
        // Mesmo horário, dia seguinte: não entra na agenda de segunda
        store.add(appointment(c, at(2024, 6, 11, 9, 0), 60));
        let service = service(store);

        let slots = service.generate_schedule(c, monday(), Some(60)).await.unwrap();
        let free: Vec<bool> = slots.iter().map(|s| s.is_available).collect();
        assert_eq!(free, vec![true, false, true]);
    }

    #[tokio::test]
    async fn schedule_shows_overnight_appointment_from_previous_day() {
        let c = Uuid::new_v4();
        let store = InMemoryAgendaStore::with_collaborator(c);
        // Domingo 23:00 + 10h termina segunda às 09:00
        store.add(appointment(c, at(2024, 6, 9, 23, 0), 600));
        let service = service(store);

        let slots = service.generate_schedule(c, monday(), None).await.unwrap();
        assert!(!slots[0].is_available);
        assert!(!slots[1].is_available);
        assert!(slots[2].is_available);
        assert_eq!(slots[2].start, at(2024, 6, 10, 9, 0));
    }

    #[tokio::test]
    async fn store_failure_is_not_reported_as_taken() {
        let c = Uuid::new_v4();
        let store = InMemoryAgendaStore { failing: true, ..InMemoryAgendaStore::with_collaborator(c) };
        let service = service(store);

        let err = service.check_availability(c, at(2024, 6, 10, 9, 0), 30).await.unwrap_err();
        assert!(matches!(err, AppError::StoreUnavailable(_)));

        let err = service.generate_schedule(c, monday(), None).await.unwrap_err();
        assert!(matches!(err, AppError::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn unknown_collaborator_is_rejected() {
        let service = service(InMemoryAgendaStore::default());
        let err = service.resolve_work_window(Uuid::new_v4(), monday()).await.unwrap_err();
        assert!(matches!(err, AppError::CollaboratorNotFound));
    }

    #[tokio::test]
    async fn invalid_durations_and_slot_sizes_are_rejected() {
        let c = Uuid::new_v4();
        let service = service(InMemoryAgendaStore::with_collaborator(c));

        for duration in [0, -30, MAX_APPOINTMENT_MINUTES + 1] {
            let err = service.check_availability(c, at(2024, 6, 10, 9, 0), duration).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidInput(_)));
        }

        let err = service.generate_schedule(c, monday(), Some(0)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
