pub mod auth;
pub mod availability_service;
pub use availability_service::{AgendaSettings, AvailabilityService};
pub mod appointment_service;
pub use appointment_service::AppointmentService;
pub mod client_service;
pub use client_service::ClientService;
pub mod collaborator_service;
pub use collaborator_service::CollaboratorService;
pub mod catalog_service;
pub use catalog_service::CatalogService;
pub mod schedule_service;
pub use schedule_service::ScheduleService;
pub mod inventory_service;
pub use inventory_service::InventoryService;
pub mod cashflow_service;
pub use cashflow_service::CashflowService;
