// src/services/appointment_service.rs

use chrono::NaiveDateTime;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    common::{error::AppError, time::add_minutes},
    db::{AppointmentRepository, CatalogRepository, ClientRepository, CollaboratorRepository},
    models::{
        appointments::{
            Appointment, AppointmentChanges, AppointmentFilter, AppointmentStatus, BookingRequest,
            NewAppointment, MAX_APPOINTMENT_MINUTES,
        },
        catalog::SalonService,
        clients::Client,
    },
    services::{
        availability_service::{find_conflicts, validate_duration},
        catalog_service::validate_price,
    },
};

#[derive(Clone)]
pub struct AppointmentService {
    pool: PgPool,
    repo: AppointmentRepository,
    collaborator_repo: CollaboratorRepository,
    catalog_repo: CatalogRepository,
    client_repo: ClientRepository,
}

/// Preenche preço/duração a partir do serviço e valida o pedido.
///
/// Não toca no banco: recebe o serviço e o cliente já carregados.
pub fn resolve_booking(
    request: BookingRequest,
    service: &SalonService,
    client: Option<&Client>,
) -> Result<NewAppointment, AppError> {
    let duration_minutes = request.duration_minutes.unwrap_or(service.duration_minutes);
    validate_duration(duration_minutes)?;

    let price = request.price.unwrap_or(service.price);
    validate_price(price)?;

    let client_name = request
        .client_name
        .filter(|name| !name.trim().is_empty())
        .or_else(|| client.map(|c| c.client_name.clone()))
        .ok_or_else(|| AppError::InvalidInput("Informe o nome do cliente.".into()))?;

    Ok(NewAppointment {
        client_id: request.client_id,
        client_name,
        service_id: request.service_id,
        collaborator_id: request.collaborator_id,
        user_id: request.user_id,
        datetime: request.datetime,
        duration_minutes,
        price,
        status: request.status.unwrap_or(AppointmentStatus::Agendado),
        notes: request.notes,
    })
}

/// Agendamentos de `existing` que impedem ocupar `[start, end)` com `status`.
///
/// Só `AGENDADO` ocupa a agenda, então qualquer outro status nunca é barrado.
/// `ignore` tira da conta o próprio agendamento numa edição.
pub fn blocking_conflicts(
    existing: &[Appointment],
    status: AppointmentStatus,
    start: NaiveDateTime,
    end: NaiveDateTime,
    ignore: Option<Uuid>,
) -> Vec<Appointment> {
    if status != AppointmentStatus::Agendado {
        return vec![];
    }

    find_conflicts(existing, start, end)
        .into_iter()
        .filter(|a| a.status == AppointmentStatus::Agendado && Some(a.id) != ignore)
        .collect()
}

impl AppointmentService {
    pub fn new(
        pool: PgPool,
        repo: AppointmentRepository,
        collaborator_repo: CollaboratorRepository,
        catalog_repo: CatalogRepository,
        client_repo: ClientRepository,
    ) -> Self {
        Self { pool, repo, collaborator_repo, catalog_repo, client_repo }
    }

    pub async fn list_appointments(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>, AppError> {
        self.repo.list(filter).await
    }

    pub async fn get_appointment(&self, id: Uuid) -> Result<Appointment, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Agendamento".into()))
    }

    // Trava o colaborador e procura conflitos dentro da transação atual.
    // `ignore` exclui o próprio agendamento numa edição.
    async fn reserve(
        &self,
        conn: &mut PgConnection,
        collaborator_id: Uuid,
        status: AppointmentStatus,
        start: NaiveDateTime,
        duration_minutes: i32,
        ignore: Option<Uuid>,
    ) -> Result<(), AppError> {
        if !self.collaborator_repo.lock_for_booking(&mut *conn, collaborator_id).await? {
            return Err(AppError::CollaboratorNotFound);
        }

        if status != AppointmentStatus::Agendado {
            return Ok(());
        }

        let end = add_minutes(start, i64::from(duration_minutes))?;
        let lookback_start = add_minutes(start, -i64::from(MAX_APPOINTMENT_MINUTES))?;
        let filter = AppointmentFilter::active_for(collaborator_id).between(lookback_start, end);
        let existing = self.repo.find_appointments(&mut *conn, &filter).await?;

        let conflicts = blocking_conflicts(&existing, status, start, end, ignore);

        if !conflicts.is_empty() {
            tracing::warn!(
                %collaborator_id,
                datetime = %start,
                conflicts = conflicts.len(),
                "Reserva recusada: horário ocupado"
            );
            return Err(AppError::SlotUnavailable(conflicts));
        }
        Ok(())
    }

    /// Cria o agendamento verificando conflito e inserindo na mesma transação.
    pub async fn create_appointment(&self, request: BookingRequest) -> Result<Appointment, AppError> {
        let mut tx = self.pool.begin().await?;

        let service = self
            .catalog_repo
            .find_by_id(&mut *tx, request.service_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Serviço".into()))?;

        let client = match request.client_id {
            Some(id) => Some(
                self.client_repo
                    .find_by_id(&mut *tx, id)
                    .await?
                    .ok_or_else(|| AppError::ResourceNotFound("Cliente".into()))?,
            ),
            None => None,
        };

        let new = resolve_booking(request, &service, client.as_ref())?;

        self.reserve(&mut tx, new.collaborator_id, new.status, new.datetime, new.duration_minutes, None)
            .await?;

        let appointment = self.repo.insert(&mut *tx, &new).await?;
        tx.commit().await?;

        tracing::info!(
            appointment_id = %appointment.id,
            collaborator_id = %appointment.collaborator_id,
            datetime = %appointment.datetime,
            "Agendamento criado"
        );
        Ok(appointment)
    }

    /// Atualiza o agendamento. Qualquer status pode seguir qualquer outro.
    pub async fn update_appointment(&self, id: Uuid, changes: AppointmentChanges) -> Result<Appointment, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = self
            .repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Agendamento".into()))?;

        let next = changes.apply_to(&current);
        validate_duration(next.duration_minutes)?;
        validate_price(next.price)?;

        if let Some(service_id) = changes.service_id {
            self.catalog_repo
                .find_by_id(&mut *tx, service_id)
                .await?
                .ok_or_else(|| AppError::ResourceNotFound("Serviço".into()))?;
        }

        if changes.touches_agenda() {
            self.reserve(
                &mut tx,
                next.collaborator_id,
                next.status,
                next.datetime,
                next.duration_minutes,
                Some(id),
            )
            .await?;
        }

        let updated = self.repo.update(&mut *tx, &next).await?;
        tx.commit().await?;

        if current.status != updated.status {
            tracing::info!(
                appointment_id = %id,
                from = ?current.status,
                to = ?updated.status,
                "Status do agendamento alterado"
            );
        }
        Ok(updated)
    }

    pub async fn delete_appointment(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repo.delete(&self.pool, id).await? {
            return Err(AppError::ResourceNotFound("Agendamento".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal::Decimal;

    use super::*;
    use crate::models::appointments::fixtures::{appointment, at};

    fn corte() -> SalonService {
        SalonService {
            id: Uuid::new_v4(),
            name: "Corte feminino".into(),
            description: String::new(),
            duration_minutes: 60,
            price: Decimal::new(8000, 2),
            created_at: Utc::now(),
        }
    }

    fn request(service: &SalonService) -> BookingRequest {
        BookingRequest {
            client_id: None,
            client_name: Some("Ana".into()),
            service_id: service.id,
            collaborator_id: Uuid::new_v4(),
            user_id: None,
            datetime: at(2024, 6, 10, 14, 0),
            duration_minutes: None,
            price: None,
            status: None,
            notes: None,
        }
    }

    #[test]
    fn booking_prefills_from_service() {
        let service = corte();
        let new = resolve_booking(request(&service), &service, None).unwrap();
        assert_eq!(new.duration_minutes, 60);
        assert_eq!(new.price, Decimal::new(8000, 2));
        assert_eq!(new.status, AppointmentStatus::Agendado);
    }

    #[test]
    fn explicit_values_win_over_service() {
        let service = corte();
        let mut req = request(&service);
        req.duration_minutes = Some(45);
        req.price = Some(Decimal::new(7000, 2));
        req.status = Some(AppointmentStatus::Concluido);

        let new = resolve_booking(req, &service, None).unwrap();
        assert_eq!(new.duration_minutes, 45);
        assert_eq!(new.price, Decimal::new(7000, 2));
        assert_eq!(new.status, AppointmentStatus::Concluido);
    }

    #[test]
    fn client_name_falls_back_to_registered_client() {
        let service = corte();
        let client = Client {
            id: Uuid::new_v4(),
            client_name: "Beatriz".into(),
            client_phone: "11999990000".into(),
            created_at: Utc::now(),
        };
        let mut req = request(&service);
        req.client_id = Some(client.id);
        req.client_name = Some("   ".into());

        let new = resolve_booking(req, &service, Some(&client)).unwrap();
        assert_eq!(new.client_name, "Beatriz");
    }

    #[test]
    fn booking_rejects_bad_input() {
        let service = corte();

        let mut no_name = request(&service);
        no_name.client_name = None;
        assert!(matches!(resolve_booking(no_name, &service, None), Err(AppError::InvalidInput(_))));

        let mut zero = request(&service);
        zero.duration_minutes = Some(0);
        assert!(matches!(resolve_booking(zero, &service, None), Err(AppError::InvalidInput(_))));

        let mut negative = request(&service);
        negative.price = Some(Decimal::new(-1, 0));
        assert!(matches!(resolve_booking(negative, &service, None), Err(AppError::InvalidInput(_))));
    }

    // Verificado na compilação: as leituras da reserva aceitam a conexão da
    // transação, sem pedir uma segunda conexão ao pool
    #[allow(dead_code)]
    async fn booking_reads_share_the_transaction(
        service: &AppointmentService,
        conn: &mut PgConnection,
        request: &BookingRequest,
    ) -> Result<(), AppError> {
        service.catalog_repo.find_by_id(&mut *conn, request.service_id).await?;
        if let Some(client_id) = request.client_id {
            service.client_repo.find_by_id(&mut *conn, client_id).await?;
        }
        service.collaborator_repo.lock_for_booking(&mut *conn, request.collaborator_id).await?;
        Ok(())
    }

    // --- blocking_conflicts ---

    #[test]
    fn overlapping_scheduled_appointments_block_in_order() {
        let c = Uuid::new_v4();
        let first = appointment(c, at(2024, 6, 10, 9, 0), 60);
        let second = appointment(c, at(2024, 6, 10, 10, 0), 30);
        let apart = appointment(c, at(2024, 6, 10, 12, 0), 30);

        let conflicts = blocking_conflicts(
            &[first.clone(), second.clone(), apart],
            AppointmentStatus::Agendado,
            at(2024, 6, 10, 9, 30),
            at(2024, 6, 10, 10, 15),
            None,
        );
        assert_eq!(conflicts, vec![first, second]);
    }

    #[test]
    fn editing_does_not_conflict_with_itself() {
        let c = Uuid::new_v4();
        let current = appointment(c, at(2024, 6, 10, 9, 0), 60);
        let neighbour = appointment(c, at(2024, 6, 10, 10, 0), 60);
        let existing = [current.clone(), neighbour.clone()];

        // Estender de 60 para 90 minutos esbarra só no vizinho
        let conflicts = blocking_conflicts(
            &existing,
            AppointmentStatus::Agendado,
            at(2024, 6, 10, 9, 0),
            at(2024, 6, 10, 10, 30),
            Some(current.id),
        );
        assert_eq!(conflicts, vec![neighbour]);

        // Encurtar não esbarra em nada
        let conflicts = blocking_conflicts(
            &existing,
            AppointmentStatus::Agendado,
            at(2024, 6, 10, 9, 0),
            at(2024, 6, 10, 9, 30),
            Some(current.id),
        );
        assert!(conflicts.is_empty());
    }

    #[test]
    fn non_scheduled_status_never_blocks() {
        let c = Uuid::new_v4();
        let existing = [appointment(c, at(2024, 6, 10, 9, 0), 60)];

        for status in [AppointmentStatus::Concluido, AppointmentStatus::Cancelado, AppointmentStatus::NoShow] {
            let conflicts =
                blocking_conflicts(&existing, status, at(2024, 6, 10, 9, 0), at(2024, 6, 10, 10, 0), None);
            assert!(conflicts.is_empty(), "{status:?}");
        }
    }

    #[test]
    fn finished_appointments_do_not_occupy_the_slot() {
        let c = Uuid::new_v4();
        let mut cancelled = appointment(c, at(2024, 6, 10, 9, 0), 60);
        cancelled.status = AppointmentStatus::Cancelado;

        let conflicts = blocking_conflicts(
            &[cancelled],
            AppointmentStatus::Agendado,
            at(2024, 6, 10, 9, 0),
            at(2024, 6, 10, 10, 0),
            None,
        );
        assert!(conflicts.is_empty());
    }
}
