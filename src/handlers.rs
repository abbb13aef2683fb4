pub mod appointments;
pub mod auth;
pub mod availability;
pub mod cashflow;
pub mod catalog;
pub mod clients;
pub mod collaborators;
pub mod inventory;
pub mod schedules;
