// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::seed_users,
        handlers::auth::get_me,
        handlers::auth::list_users,

        // --- Clients ---
        handlers::clients::create_client,
        handlers::clients::list_clients,
        handlers::clients::find_client_by_phone,
        handlers::clients::get_client,
        handlers::clients::update_client,
        handlers::clients::delete_client,

        // --- Collaborators ---
        handlers::collaborators::create_collaborator,
        handlers::collaborators::list_collaborators,
        handlers::collaborators::get_collaborator,
        handlers::collaborators::update_collaborator,
        handlers::collaborators::delete_collaborator,

        // --- Services ---
        handlers::catalog::create_service,
        handlers::catalog::list_services,
        handlers::catalog::get_service,
        handlers::catalog::update_service,
        handlers::catalog::delete_service,

        // --- Schedules ---
        handlers::schedules::upsert_schedule,
        handlers::schedules::list_schedules,
        handlers::schedules::delete_schedule,

        // --- Appointments ---
        handlers::appointments::create_appointment,
        handlers::appointments::list_appointments,
        handlers::appointments::get_appointment,
        handlers::appointments::update_appointment,
        handlers::appointments::delete_appointment,

        // --- Availability ---
        handlers::availability::check_availability,
        handlers::availability::get_work_window,
        handlers::availability::get_day_schedule,

        // --- Inventory ---
        handlers::inventory::list_inventory,
        handlers::inventory::create_inventory_item,
        handlers::inventory::update_inventory_item,
        handlers::inventory::delete_inventory_item,

        // --- Cashflow ---
        handlers::cashflow::list_cashflow,
        handlers::cashflow::create_cashflow_entry,
        handlers::cashflow::update_cashflow_entry,
        handlers::cashflow::delete_cashflow_entry,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::UserRole,
            models::auth::Permission,
            models::auth::User,
            models::auth::UserProfile,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::SeedResponse,

            // --- Cadastros ---
            models::clients::Client,
            models::collaborators::Collaborator,
            models::catalog::SalonService,
            models::schedule::WorkSchedule,

            // --- Agenda ---
            models::appointments::AppointmentStatus,
            models::appointments::Appointment,
            models::schedule::WorkWindow,
            models::schedule::TimeSlot,
            models::schedule::AvailabilityCheck,

            // --- Estoque & Caixa ---
            models::inventory::InventoryItem,
            models::cashflow::CashflowType,
            models::cashflow::CashflowEntry,

            // --- Payloads ---
            handlers::clients::CreateClientPayload,
            handlers::clients::UpdateClientPayload,
            handlers::collaborators::CreateCollaboratorPayload,
            handlers::collaborators::UpdateCollaboratorPayload,
            handlers::catalog::CreateServicePayload,
            handlers::catalog::UpdateServicePayload,
            handlers::schedules::UpsertSchedulePayload,
            handlers::appointments::CreateAppointmentPayload,
            handlers::appointments::UpdateAppointmentPayload,
            handlers::availability::WorkWindowResponse,
            handlers::inventory::CreateInventoryPayload,
            handlers::inventory::UpdateInventoryPayload,
            handlers::cashflow::CreateCashflowPayload,
            handlers::cashflow::UpdateCashflowPayload,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Usuários e Permissões"),
        (name = "Clients", description = "Cadastro de Clientes"),
        (name = "Collaborators", description = "Profissionais do Salão"),
        (name = "Services", description = "Catálogo de Serviços"),
        (name = "Schedules", description = "Horários de Trabalho"),
        (name = "Appointments", description = "Agendamentos"),
        (name = "Availability", description = "Expediente, Slots e Verificação de Disponibilidade"),
        (name = "Inventory", description = "Estoque de Produtos"),
        (name = "Cashflow", description = "Fluxo de Caixa")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
