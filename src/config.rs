// src/config.rs

use anyhow::{bail, Context};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, sync::Arc, time::Duration};

use crate::{
    common::time::parse_time_of_day,
    db::{
        AppointmentRepository, CashflowRepository, CatalogRepository, ClientRepository,
        CollaboratorRepository, InventoryRepository, PgAgendaStore, ScheduleRepository, UserRepository,
    },
    services::{
        auth::AuthService,
        availability_service::{MAX_SLOT_MINUTES, MIN_SLOT_MINUTES},
        AgendaSettings, AppointmentService, AvailabilityService, CashflowService, CatalogService,
        ClientService, CollaboratorService, InventoryService, ScheduleService,
    },
};

/// Configuração lida do ambiente (`.env` incluso).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_addr: String,
    pub db_max_connections: u32,
    pub agenda: AgendaSettings,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // Separado de `from_env` para testar sem mexer no ambiente do processo
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = lookup("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        let server_addr = lookup("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => v.trim().parse().context("DB_MAX_CONNECTIONS inválido")?,
            None => 5,
        };

        let defaults = AgendaSettings::default();

        let workday_start = match lookup("WORKDAY_START") {
            Some(v) => parse_time_of_day(&v).with_context(|| format!("WORKDAY_START inválido: '{}'", v))?,
            None => defaults.workday_start,
        };
        let workday_end = match lookup("WORKDAY_END") {
            Some(v) => parse_time_of_day(&v).with_context(|| format!("WORKDAY_END inválido: '{}'", v))?,
            None => defaults.workday_end,
        };
        if workday_start >= workday_end {
            bail!("WORKDAY_START deve ser anterior a WORKDAY_END");
        }

        let slot_minutes: i64 = match lookup("SLOT_MINUTES") {
            Some(v) => v.trim().parse().context("SLOT_MINUTES inválido")?,
            None => defaults.slot_minutes,
        };
        if !(MIN_SLOT_MINUTES..=MAX_SLOT_MINUTES).contains(&slot_minutes) {
            bail!("SLOT_MINUTES deve estar entre {} e {}", MIN_SLOT_MINUTES, MAX_SLOT_MINUTES);
        }

        let max_suggestions = match lookup("MAX_SUGGESTIONS") {
            Some(v) => v.trim().parse().context("MAX_SUGGESTIONS inválido")?,
            None => defaults.max_suggestions,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            server_addr,
            db_max_connections,
            agenda: AgendaSettings {
                workday_start,
                workday_end,
                slot_minutes,
                max_suggestions,
            },
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub user_repo: UserRepository,
    pub auth_service: AuthService,
    pub client_service: ClientService,
    pub collaborator_service: CollaboratorService,
    pub catalog_service: CatalogService,
    pub schedule_service: ScheduleService,
    pub appointment_service: AppointmentService,
    pub availability_service: AvailabilityService,
    pub inventory_service: InventoryService,
    pub cashflow_service: CashflowService,
}

impl AppState {
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, config))
    }

    /// Monta o gráfico de dependências sobre um pool já criado.
    pub fn from_pool(db_pool: PgPool, config: &AppConfig) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let client_repo = ClientRepository::new(db_pool.clone());
        let collaborator_repo = CollaboratorRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let schedule_repo = ScheduleRepository::new(db_pool.clone());
        let appointment_repo = AppointmentRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let cashflow_repo = CashflowRepository::new(db_pool.clone());

        let agenda_store = PgAgendaStore::new(
            appointment_repo.clone(),
            collaborator_repo.clone(),
            schedule_repo.clone(),
            db_pool.clone(),
        );

        Self {
            auth_service: AuthService::new(user_repo.clone(), config.jwt_secret.clone(), db_pool.clone()),
            client_service: ClientService::new(client_repo.clone(), db_pool.clone()),
            collaborator_service: CollaboratorService::new(collaborator_repo.clone(), db_pool.clone()),
            catalog_service: CatalogService::new(catalog_repo.clone(), db_pool.clone()),
            schedule_service: ScheduleService::new(schedule_repo, collaborator_repo.clone(), db_pool.clone()),
            inventory_service: InventoryService::new(inventory_repo, db_pool.clone()),
            cashflow_service: CashflowService::new(cashflow_repo, appointment_repo.clone(), db_pool.clone()),
            appointment_service: AppointmentService::new(
                db_pool.clone(),
                appointment_repo,
                collaborator_repo,
                catalog_repo,
                client_repo,
            ),
            availability_service: AvailabilityService::new(Arc::new(agenda_store), config.agenda),
            user_repo,
            db_pool,
        }
    }
}
