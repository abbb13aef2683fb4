use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::appointments::Appointment;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Entrada que não passa pelo `validator` (datas malformadas, faixas cruzadas...)
    #[error("Entrada inválida: {0}")]
    InvalidInput(String),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Telefone já existe")]
    PhoneAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário inativo")]
    InactiveUser,

    #[error("Permissão negada: {0}")]
    Forbidden(String),

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    #[error("Colaborador não encontrado")]
    CollaboratorNotFound,

    // Conflito real de agenda. Carrega os agendamentos que ocupam o horário.
    #[error("Horário indisponível")]
    SlotUnavailable(Vec<Appointment>),

    // Falha ao consultar a agenda: não dá para afirmar se o horário está livre.
    #[error("Agenda indisponível: {0}")]
    StoreUnavailable(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Converte uma falha de leitura da agenda em `StoreUnavailable`.
    ///
    /// Usado no caminho de disponibilidade: um erro de banco nunca pode
    /// virar "horário ocupado".
    pub fn store_unavailable(err: AppError) -> AppError {
        match err {
            AppError::DatabaseError(e) => AppError::StoreUnavailable(e.to_string()),
            AppError::InternalServerError(e) => AppError::StoreUnavailable(e.to_string()),
            other => other,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyExists
            | AppError::PhoneAlreadyExists
            | AppError::SlotUnavailable(_) => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken | AppError::InactiveUser => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::UserNotFound
            | AppError::ResourceNotFound(_)
            | AppError::CollaboratorNotFound => StatusCode::NOT_FOUND,
            AppError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_message = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (status, body).into_response();
            }
            AppError::SlotUnavailable(conflicts) => {
                let body = Json(json!({
                    "error": "O colaborador já possui agendamento neste horário.",
                    "conflicts": conflicts,
                }));
                return (status, body).into_response();
            }
            AppError::InvalidInput(message) => message,
            AppError::EmailAlreadyExists => "Este e-mail já está em uso.".to_string(),
            AppError::PhoneAlreadyExists => "Já existe um cliente com esse telefone.".to_string(),
            AppError::InvalidCredentials => "E-mail ou senha inválidos.".to_string(),
            AppError::InvalidToken => "Token de autenticação inválido ou ausente.".to_string(),
            AppError::InactiveUser => "Usuário não encontrado ou inativo.".to_string(),
            AppError::Forbidden(permission) => {
                format!("Você precisa da permissão '{}' para realizar esta ação.", permission)
            }
            AppError::UserNotFound => "Usuário não encontrado.".to_string(),
            AppError::ResourceNotFound(what) => format!("{} não encontrado(a).", what),
            AppError::CollaboratorNotFound => "Colaborador não encontrado.".to_string(),
            AppError::StoreUnavailable(cause) => {
                tracing::error!("Agenda indisponível: {}", cause);
                "Não foi possível verificar a agenda. Tente novamente.".to_string()
            }

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                "Ocorreu um erro inesperado.".to_string()
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

/// Mapeia violações de restrição do Postgres para erros de domínio.
///
/// `23505` (unique) vira `on_unique`; `23P01` (exclusion) vira conflito de agenda.
pub fn map_constraint_violation(e: sqlx::Error, on_unique: AppError) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique;
        }
        if db_err.code().as_deref() == Some("23P01") {
            return AppError::SlotUnavailable(vec![]);
        }
    }
    AppError::DatabaseError(e)
}

// Remoção bloqueada por FK: o registro ainda é referenciado por agendamentos
pub fn map_in_use(e: sqlx::Error, what: &str) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return AppError::InvalidInput(format!(
                "{} possui agendamentos vinculados e não pode ser removido(a).",
                what
            ));
        }
    }
    AppError::DatabaseError(e)
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use sqlx::error::{DatabaseError, ErrorKind};

    use super::*;

    // Erro do Postgres fabricado, só com código e tipo
    #[derive(Debug, thiserror::Error)]
    #[error("{message}")]
    struct PgFailure {
        message: &'static str,
        code: &'static str,
        kind: ErrorKind,
    }

    impl DatabaseError for PgFailure {
        fn message(&self) -> &str {
            self.message
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.kind {
                ErrorKind::UniqueViolation => ErrorKind::UniqueViolation,
                ErrorKind::ForeignKeyViolation => ErrorKind::ForeignKeyViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn pg_error(code: &'static str, kind: ErrorKind) -> sqlx::Error {
        sqlx::Error::Database(Box::new(PgFailure { message: "violação", code, kind }))
    }

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(AppError::InvalidInput("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::SlotUnavailable(vec![]).status_code(), StatusCode::CONFLICT);
        assert_eq!(AppError::CollaboratorNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::StoreUnavailable("timeout".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(AppError::Forbidden("VIEW_ALL_DATA".into()).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::InactiveUser.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn database_errors_become_store_unavailable() {
        let err = AppError::store_unavailable(AppError::DatabaseError(sqlx::Error::PoolTimedOut));
        assert!(matches!(err, AppError::StoreUnavailable(_)));

        // Erros de domínio passam intactos
        let err = AppError::store_unavailable(AppError::CollaboratorNotFound);
        assert!(matches!(err, AppError::CollaboratorNotFound));
    }

    #[test]
    fn non_database_errors_are_not_constraint_violations() {
        let err = map_constraint_violation(sqlx::Error::RowNotFound, AppError::EmailAlreadyExists);
        assert!(matches!(err, AppError::DatabaseError(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn slot_unavailable_renders_conflict() {
        let response = AppError::SlotUnavailable(vec![]).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn exclusion_violation_becomes_slot_unavailable() {
        let err = map_constraint_violation(pg_error("23P01", ErrorKind::Other), AppError::EmailAlreadyExists);
        assert!(matches!(err, AppError::SlotUnavailable(ref conflicts) if conflicts.is_empty()));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn unique_violation_uses_caller_error() {
        let err = map_constraint_violation(
            pg_error("23505", ErrorKind::UniqueViolation),
            AppError::PhoneAlreadyExists,
        );
        assert!(matches!(err, AppError::PhoneAlreadyExists));

        // Outros códigos continuam como erro de banco
        let err = map_constraint_violation(pg_error("23502", ErrorKind::Other), AppError::PhoneAlreadyExists);
        assert!(matches!(err, AppError::DatabaseError(_)));
    }

    #[test]
    fn foreign_key_violation_blocks_removal() {
        let err = map_in_use(pg_error("23503", ErrorKind::ForeignKeyViolation), "Serviço");
        assert!(matches!(err, AppError::InvalidInput(ref msg) if msg.starts_with("Serviço")));
    }
}
