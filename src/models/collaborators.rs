// src/models/collaborators.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Profissional que executa os serviços
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Collaborator {
    pub id: Uuid,
    #[schema(example = "Carla Mendes")]
    pub name: String,
    #[schema(example = "Cabeleireira")]
    pub role: String,
    #[schema(example = "carla@salon.com")]
    pub email: String,
    pub created_at: DateTime<Utc>,
}
