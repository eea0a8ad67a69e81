// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::middleware::i18n::Locale;

/// Por que um agendamento não pode mudar de estado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingTransition {
    DenyConfirmed,
    CancelOthersPending,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Permissão '{0}' necessária")]
    Forbidden(&'static str),

    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    #[error("Violação de unicidade na tabela {0}")]
    UniqueConstraintViolation(String),

    // --- Regras de domínio ---
    #[error("Horário já solicitado")]
    SlotAlreadyRequested,

    #[error("Horário '{0}' não existe neste tatame")]
    UnknownTimeSlot(String),

    #[error("Transição de agendamento inválida: {0:?}")]
    InvalidBookingTransition(BookingTransition),

    #[error("Carrinho vazio")]
    EmptyCart,

    #[error("Categoria financeira não mapeada: {0}")]
    MissingCategoryMapping(&'static str),

    #[error("Gateway de pagamento não configurado")]
    GatewayNotConfigured,

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

/// Rejeição HTTP final: status + mensagem já traduzida.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

impl AppError {
    pub fn to_api_error(&self, locale: &Locale) -> ApiError {
        let t = |pt: &str, en: &str| locale.pick(pt, en).to_string();

        let (status, error) = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                return ApiError {
                    status: StatusCode::BAD_REQUEST,
                    error: t("Um ou mais campos são inválidos.", "One or more fields are invalid."),
                    details: Some(json!(details)),
                };
            }
            AppError::EmailAlreadyExists => (
                StatusCode::CONFLICT,
                t("Este e-mail já está em uso.", "This e-mail is already in use."),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                t("E-mail ou senha inválidos.", "Invalid e-mail or password."),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                t(
                    "Token de autenticação inválido ou ausente.",
                    "Missing or invalid authentication token.",
                ),
            ),
            AppError::UserNotFound => (
                StatusCode::NOT_FOUND,
                t("Usuário não encontrado.", "User not found."),
            ),
            AppError::Forbidden(capability) => (
                StatusCode::FORBIDDEN,
                match locale {
                    Locale::Pt => format!(
                        "Você precisa da permissão '{}' para realizar esta ação.",
                        capability
                    ),
                    Locale::En => format!("The '{}' permission is required.", capability),
                },
            ),
            AppError::ResourceNotFound(what) => (
                StatusCode::NOT_FOUND,
                match locale {
                    Locale::Pt => format!("Não encontrado: {}", what),
                    Locale::En => format!("Not found: {}", what),
                },
            ),
            AppError::UniqueConstraintViolation(_) => (
                StatusCode::CONFLICT,
                t("Registro duplicado.", "Duplicate record."),
            ),
            AppError::SlotAlreadyRequested => (
                StatusCode::CONFLICT,
                t(
                    "Este horário já foi solicitado por outra pessoa.",
                    "This slot has already been requested.",
                ),
            ),
            AppError::UnknownTimeSlot(slot) => (
                StatusCode::BAD_REQUEST,
                match locale {
                    Locale::Pt => format!("O horário '{}' não existe neste tatame.", slot),
                    Locale::En => format!("Time slot '{}' does not exist on this tatame.", slot),
                },
            ),
            AppError::InvalidBookingTransition(reason) => (
                StatusCode::CONFLICT,
                match reason {
                    BookingTransition::DenyConfirmed => t(
                        "Agendamentos confirmados não podem ser negados; cancele-os.",
                        "Confirmed bookings cannot be denied; cancel them instead.",
                    ),
                    BookingTransition::CancelOthersPending => t(
                        "Agendamentos pendentes devem ser negados, não cancelados.",
                        "Pending bookings must be denied, not cancelled.",
                    ),
                },
            ),
            AppError::EmptyCart => (
                StatusCode::BAD_REQUEST,
                t("O carrinho está vazio.", "The cart is empty."),
            ),
            AppError::MissingCategoryMapping(kind) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                match locale {
                    Locale::Pt => format!(
                        "Nenhuma categoria financeira configurada para '{}'.",
                        kind
                    ),
                    Locale::En => format!("No financial category is configured for '{}'.", kind),
                },
            ),
            AppError::GatewayNotConfigured => (
                StatusCode::UNPROCESSABLE_ENTITY,
                t(
                    "O gateway de pagamento não está configurado.",
                    "The payment gateway is not configured.",
                ),
            ),

            // Todos os outros erros (DatabaseError, InternalServerError...) viram 500.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    t("Ocorreu um erro inesperado.", "An unexpected error occurred."),
                )
            }
        };

        ApiError {
            status,
            error,
            details: None,
        }
    }
}

// Usado pelos middlewares, onde não há `Locale` extraído.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_specific_statuses() {
        let locale = Locale::Pt;
        assert_eq!(
            AppError::SlotAlreadyRequested.to_api_error(&locale).status,
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::EmptyCart.to_api_error(&locale).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Forbidden("finance:write").to_api_error(&locale).status,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::MissingCategoryMapping("loja")
                .to_api_error(&locale)
                .status,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn messages_follow_locale() {
        let pt = AppError::EmptyCart.to_api_error(&Locale::Pt);
        let en = AppError::EmptyCart.to_api_error(&Locale::En);
        assert_eq!(pt.error, "O carrinho está vazio.");
        assert_eq!(en.error, "The cart is empty.");
    }

    #[test]
    fn booking_transition_reason_follows_locale() {
        let err = AppError::InvalidBookingTransition(BookingTransition::DenyConfirmed);
        let pt = err.to_api_error(&Locale::Pt);
        let en = err.to_api_error(&Locale::En);
        assert_eq!(pt.status, StatusCode::CONFLICT);
        assert!(pt.error.contains("negados"));
        assert_eq!(en.error, "Confirmed bookings cannot be denied; cancel them instead.");
    }

    #[test]
    fn internal_errors_are_not_leaked() {
        let err = AppError::InternalServerError(anyhow::anyhow!("senha do banco: hunter2"));
        let api = err.to_api_error(&Locale::Pt);
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.error.contains("hunter2"));
    }
}
