// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{AuthResponse, Claims, SeedResponse, User, UserProfile, UserRole},
};

/// Validade do token emitido no login.
const TOKEN_TTL_DAYS: i64 = 7;

// Senha inicial dos usuários de demonstração
const SEED_PASSWORD: &str = "123456";

const SEED_USERS: [(&str, &str, UserRole); 3] = [
    ("Proprietário", "owner@salon.com", UserRole::Owner),
    ("Administrador", "admin@salon.com", UserRole::Admin),
    ("Colaborador", "collaborator@salon.com", UserRole::Collaborator),
];

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    pool: PgPool,
}

pub fn create_token(secret: &str, user_id: Uuid) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = now + chrono::Duration::days(TOKEN_TTL_DAYS);

    let claims = Claims {
        sub: user_id,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?)
}

// Assinatura ou expiração inválida viram sempre `InvalidToken`
pub fn decode_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_ref()), &Validation::default())
        .map(|data| data.claims)
        .map_err(|_| AppError::InvalidToken)
}

async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, pool: PgPool) -> Self {
        Self { user_repo, jwt_secret, pool }
    }

    // Cria o usuário e concede as permissões padrão do cargo.
    // `granted_by` é o próprio usuário, como nas contas iniciais.
    async fn create_with_permissions(
        &self,
        conn: &mut PgConnection,
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<UserProfile, AppError> {
        let user = self
            .user_repo
            .create_user(&mut *conn, name, email, password_hash, role)
            .await?;

        let permissions = role.default_permissions();
        for permission in &permissions {
            self.user_repo
                .grant_permission(&mut *conn, user.id, *permission, user.id)
                .await?;
        }

        Ok(UserProfile { user, permissions })
    }

    /// Auto-cadastro: sempre entra como colaborador.
    pub async fn register_user(&self, name: &str, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let hashed_password = hash_password(password).await?;

        let mut tx = self.pool.begin().await?;
        let profile = self
            .create_with_permissions(&mut tx, name, email, &hashed_password, UserRole::Collaborator)
            .await?;
        tx.commit().await?;

        tracing::info!(user_id = %profile.user.id, "Novo usuário registrado");

        let token = create_token(&self.jwt_secret, profile.user.id)?;
        Ok(AuthResponse { token, user: profile })
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }
        if !user.is_active {
            return Err(AppError::InactiveUser);
        }

        let token = create_token(&self.jwt_secret, user.id)?;
        let profile = self.profile(user).await?;
        Ok(AuthResponse { token, user: profile })
    }

    /// Resolve o usuário dono do token. Usado pelo `auth_guard`.
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let claims = decode_token(&self.jwt_secret, token)?;

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)?;

        if !user.is_active {
            return Err(AppError::InactiveUser);
        }
        Ok(user)
    }

    pub async fn profile(&self, user: User) -> Result<UserProfile, AppError> {
        let permissions = self.user_repo.list_permissions(user.id).await?;
        Ok(UserProfile { user, permissions })
    }

    pub async fn list_users(&self) -> Result<Vec<UserProfile>, AppError> {
        let users = self.user_repo.list_users().await?;

        let mut profiles = Vec::with_capacity(users.len());
        for user in users {
            profiles.push(self.profile(user).await?);
        }
        Ok(profiles)
    }

    /// Cria as três contas iniciais. Só funciona com a tabela de usuários vazia.
    pub async fn seed_users(&self) -> Result<SeedResponse, AppError> {
        let mut tx = self.pool.begin().await?;

        if self.user_repo.count_users(&mut *tx).await? > 0 {
            return Err(AppError::InvalidInput(
                "Usuários já foram criados anteriormente".into(),
            ));
        }

        let hashed_password = hash_password(SEED_PASSWORD).await?;

        let mut users = Vec::with_capacity(SEED_USERS.len());
        for (name, email, role) in SEED_USERS {
            let profile = self
                .create_with_permissions(&mut tx, name, email, &hashed_password, role)
                .await?;
            users.push(profile);
        }
        tx.commit().await?;

        tracing::info!(count = users.len(), "Usuários iniciais criados");

        Ok(SeedResponse {
            message: "Usuários criados com sucesso".into(),
            users,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "segredo-de-teste";

    #[test]
    fn token_round_trips_user_id() {
        let user_id = Uuid::new_v4();
        let token = create_token(SECRET, user_id).unwrap();

        let claims = decode_token(SECRET, &token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = create_token("outro-segredo", Uuid::new_v4()).unwrap();
        assert!(matches!(decode_token(SECRET, &token), Err(AppError::InvalidToken)));
        assert!(matches!(decode_token(SECRET, "nem-um-jwt"), Err(AppError::InvalidToken)));
    }

    #[test]
    fn seed_covers_every_role_once() {
        let roles: Vec<UserRole> = SEED_USERS.iter().map(|(_, _, role)| *role).collect();
        assert_eq!(roles, vec![UserRole::Owner, UserRole::Admin, UserRole::Collaborator]);
    }
}
