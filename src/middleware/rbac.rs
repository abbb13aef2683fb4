// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{Permission, User},
};

/// Marca um tipo como permissão exigível por rota.
pub trait PermissionDef: Send + Sync + 'static {
    fn permission() -> Permission;
}

/// Guardião: só deixa o handler rodar se o usuário tiver a permissão `T`.
pub struct RequirePermission<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // Colocado pelo auth_guard
        let user = parts.extensions.get::<User>().ok_or(AppError::InvalidToken)?;

        let required = T::permission();
        let has_permission = app_state
            .user_repo
            .user_has_permission(user.id, required)
            .await?;

        if !has_permission {
            tracing::warn!(user_id = %user.id, permission = required.as_str(), "Acesso negado");
            return Err(AppError::Forbidden(required.as_str().to_string()));
        }

        Ok(RequirePermission(PhantomData))
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

pub struct PermViewAllData;
impl PermissionDef for PermViewAllData {
    fn permission() -> Permission { Permission::ViewAllData }
}

pub struct PermManageCollaborators;
impl PermissionDef for PermManageCollaborators {
    fn permission() -> Permission { Permission::ManageCollaborators }
}

pub struct PermManageServices;
impl PermissionDef for PermManageServices {
    fn permission() -> Permission { Permission::ManageServices }
}

pub struct PermManageAppointments;
impl PermissionDef for PermManageAppointments {
    fn permission() -> Permission { Permission::ManageAppointments }
}

pub struct PermManageInventory;
impl PermissionDef for PermManageInventory {
    fn permission() -> Permission { Permission::ManageInventory }
}

pub struct PermManageFinancial;
impl PermissionDef for PermManageFinancial {
    fn permission() -> Permission { Permission::ManageFinancial }
}
