// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    models::{
        auth::{Claims, LoginUserPayload, RegisterUserPayload},
        user::{Role, User},
    },
    store::AcademyStore,
};

#[derive(Clone)]
pub struct AuthService {
    store: Arc<AcademyStore>,
    jwt_secret: String,
    bootstrap_admin_email: Option<String>,
    hash_cost: u32,
}

impl AuthService {
    pub fn new(
        store: Arc<AcademyStore>,
        jwt_secret: String,
        bootstrap_admin_email: Option<String>,
        hash_cost: u32,
    ) -> Self {
        Self {
            store,
            jwt_secret,
            bootstrap_admin_email: bootstrap_admin_email.map(|e| e.trim().to_lowercase()),
            hash_cost,
        }
    }

    pub async fn register_user(
        &self,
        payload: RegisterUserPayload,
    ) -> Result<(String, User), AppError> {
        payload.validate()?;

        // 1. Hashing fora do runtime assíncrono
        let password = payload.password.clone();
        let cost = self.hash_cost;
        let password_hash = tokio::task::spawn_blocking(move || hash(&password, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let email = payload.email.trim().to_lowercase();

        // 2. O e-mail de bootstrap vira administrador; o resto entra como aluno
        let role = if self.bootstrap_admin_email.as_deref() == Some(email.as_str()) {
            Role::Admin
        } else {
            Role::User
        };

        let user = self
            .store
            .register_user(User {
                id: Uuid::new_v4(),
                email,
                name: payload.name.trim().to_string(),
                role,
                belt: None,
                payment_due_date: None,
                password_hash,
                created_at: self.store.timestamp(),
            })
            .await?;

        tracing::info!(user = %user.id, role = ?user.role, "Novo usuário registrado");

        // 3. Token
        let token = self.create_token(user.id)?;
        Ok((token, user))
    }

    pub async fn login_user(&self, payload: LoginUserPayload) -> Result<(String, User), AppError> {
        payload.validate()?;

        let user = self
            .store
            .find_user_by_email(&payload.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password = payload.password;
        let password_hash = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            tracing::warn!(user = %user.id, "Senha incorreta");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(user.id)?;
        Ok((token, user))
    }

    /// Sessão: decodifica o token e busca o usuário atual no estado.
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.store
            .find_user(token_data.claims.sub)
            .await
            .ok_or(AppError::UserNotFound)
    }

    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(7);

        let claims = Claims {
            sub: user_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
