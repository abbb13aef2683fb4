pub mod user_repo;
pub use user_repo::UserRepository;
pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod collaborator_repo;
pub use collaborator_repo::CollaboratorRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod schedule_repo;
pub use schedule_repo::ScheduleRepository;
pub mod appointment_repo;
pub use appointment_repo::AppointmentRepository;
pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod cashflow_repo;
pub use cashflow_repo::CashflowRepository;

pub mod agenda_store;
pub use agenda_store::{AgendaStore, PgAgendaStore};
