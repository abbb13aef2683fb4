// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;
use utoipa::ToSchema;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Owner,
    Admin,
    Collaborator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_permission", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    ViewOwnData,
    ViewAllData,
    ManageCollaborators,
    ManageServices,
    ManageAppointments,
    ManageInventory,
    ViewReports,
    ManageFinancial,
    ManageSubscriptions,
    ManageGiftCards,
}

impl Permission {
    // Mesmo texto do enum no banco, usado nas mensagens de 403
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewOwnData => "VIEW_OWN_DATA",
            Permission::ViewAllData => "VIEW_ALL_DATA",
            Permission::ManageCollaborators => "MANAGE_COLLABORATORS",
            Permission::ManageServices => "MANAGE_SERVICES",
            Permission::ManageAppointments => "MANAGE_APPOINTMENTS",
            Permission::ManageInventory => "MANAGE_INVENTORY",
            Permission::ViewReports => "VIEW_REPORTS",
            Permission::ManageFinancial => "MANAGE_FINANCIAL",
            Permission::ManageSubscriptions => "MANAGE_SUBSCRIPTIONS",
            Permission::ManageGiftCards => "MANAGE_GIFT_CARDS",
        }
    }
}

impl UserRole {
    /// Permissões concedidas na criação do usuário, por cargo.
    pub fn default_permissions(&self) -> Vec<Permission> {
        match self {
            UserRole::Owner => vec![
                Permission::ViewOwnData,
                Permission::ViewAllData,
                Permission::ManageCollaborators,
                Permission::ManageServices,
                Permission::ManageAppointments,
                Permission::ManageInventory,
                Permission::ViewReports,
                Permission::ManageFinancial,
                Permission::ManageSubscriptions,
                Permission::ManageGiftCards,
            ],
            UserRole::Admin => vec![
                Permission::ViewOwnData,
                Permission::ViewAllData,
                Permission::ManageCollaborators,
                Permission::ManageServices,
                Permission::ManageAppointments,
                Permission::ManageInventory,
                Permission::ManageSubscriptions,
                Permission::ManageGiftCards,
            ],
            UserRole::Collaborator => vec![Permission::ViewOwnData, Permission::ManageAppointments],
        }
    }
}

// Representa um usuário vindo do banco de dados
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    #[schema(example = "Proprietário")]
    pub name: String,
    #[schema(example = "owner@salon.com")]
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    #[schema(ignore)]
    pub password_hash: String,

    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Usuário + permissões, como o frontend consome
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub permissions: Vec<Permission>,
}

// Dados para registro de um novo usuário
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Maria Souza")]
    pub name: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "maria@salon.com")]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Dados para login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    #[schema(example = "owner@salon.com")]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeedResponse {
    pub message: String,
    pub users: Vec<UserProfile>,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub exp: usize, // Expiration time (quando o token expira)
    pub iat: usize, // Issued At (quando o token foi criado)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collaborator_gets_only_own_data_and_appointments() {
        let perms = UserRole::Collaborator.default_permissions();
        assert_eq!(perms, vec![Permission::ViewOwnData, Permission::ManageAppointments]);
    }

    #[test]
    fn admin_cannot_see_reports_or_financial() {
        let perms = UserRole::Admin.default_permissions();
        assert!(!perms.contains(&Permission::ViewReports));
        assert!(!perms.contains(&Permission::ManageFinancial));
        assert_eq!(UserRole::Owner.default_permissions().len(), 10);
    }

    #[test]
    fn permission_serializes_as_database_label() {
        let json = serde_json::to_string(&Permission::ManageGiftCards).unwrap();
        assert_eq!(json, format!("\"{}\"", Permission::ManageGiftCards.as_str()));
    }
}
