// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::middleware::i18n::Locale;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Token de autenticação ausente")]
    MissingToken,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Sessão expirada")]
    SessionExpired,

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Acesso negado: {0}")]
    Forbidden(String),

    #[error("Não encontrado: {0}")]
    NotFound(String),

    // O backend respondeu com um status diferente de sucesso
    #[error("Backend respondeu {status}: {body}")]
    Upstream { status: u16, body: String },

    // Falha de transporte (conexão recusada, timeout, TLS...)
    #[error("Backend indisponível: {0}")]
    UpstreamUnavailable(#[from] reqwest::Error),

    // O corpo da resposta não tem o formato esperado
    #[error("Resposta malformada: {0}")]
    MalformedResponse(String),

    #[error("Limite de transação inválido: {0}")]
    InvalidLimit(String),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

// O erro "renderizado": status HTTP + mensagem já traduzida.
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
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidLimit(_) => StatusCode::BAD_REQUEST,
            AppError::MissingToken
            | AppError::InvalidToken
            | AppError::SessionExpired
            | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream { .. }
            | AppError::UpstreamUnavailable(_)
            | AppError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte o erro na resposta HTTP, com a mensagem no idioma do cliente.
    pub fn to_api_error(&self, locale: &Locale) -> ApiError {
        let pt = locale.is_portuguese();
        let status = self.status();

        let error = match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(m) => m.to_string(),
                            None => e.code.to_string(),
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let message = if pt {
                    "Um ou mais campos são inválidos."
                } else {
                    "One or more fields are invalid."
                };
                return ApiError {
                    status,
                    error: message.into(),
                    details: Some(json!(details)),
                };
            }
            AppError::MissingToken => pick(pt, "Token de autenticação não encontrado.", "Authentication token not found."),
            AppError::InvalidToken => pick(pt, "Token de autenticação inválido ou ausente.", "Invalid or missing authentication token."),
            AppError::SessionExpired => pick(pt, "Sua sessão expirou, faça login novamente.", "Your session has expired, please log in again."),
            AppError::InvalidCredentials => pick(pt, "Usuário ou senha inválidos.", "Invalid email or password."),
            AppError::Forbidden(reason) => {
                tracing::warn!("Acesso negado: {}", reason);
                pick(
                    pt,
                    "Apenas administradores podem realizar esta ação.",
                    "Only administrators can perform this action.",
                )
            }
            AppError::NotFound(what) => {
                if pt {
                    format!("{what} não encontrado.")
                } else {
                    format!("{what} not found.")
                }
            }
            AppError::InvalidLimit(value) => {
                if pt {
                    format!("Limite de transação inválido: {value}.")
                } else {
                    format!("Invalid transaction limit: {value}.")
                }
            }
            // Erros do backend e internos: o detalhe vai para o log, não para o cliente.
            e => {
                tracing::error!("🔥 Erro ao atender requisição: {}", e);
                match status {
                    StatusCode::BAD_GATEWAY => pick(
                        pt,
                        "Erro ao carregar os dados. Tente novamente.",
                        "Failed to load data. Please try again.",
                    ),
                    _ => pick(pt, "Ocorreu um erro inesperado.", "An unexpected error occurred."),
                }
            }
        };

        ApiError {
            status,
            error,
            details: None,
        }
    }
}

fn pick(pt: bool, pt_message: &str, en_message: &str) -> String {
    let message = if pt { pt_message } else { en_message };
    message.to_string()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 6, message = "A senha deve conter ao menos 6 caracteres"))]
        password: String,
    }

    #[test]
    fn validation_errors_carry_field_details() {
        let errors = Form { password: "123".into() }.validate().unwrap_err();
        let api = AppError::ValidationError(errors).to_api_error(&Locale("pt".into()));

        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.error, "Um ou mais campos são inválidos.");
        let details = api.details.unwrap();
        assert_eq!(
            details["password"][0],
            "A senha deve conter ao menos 6 caracteres"
        );
    }

    #[test]
    fn auth_errors_map_to_unauthorized() {
        for err in [
            AppError::MissingToken,
            AppError::InvalidToken,
            AppError::SessionExpired,
            AppError::InvalidCredentials,
        ] {
            assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn upstream_details_are_not_leaked() {
        let err = AppError::Upstream {
            status: 500,
            body: "stack trace".into(),
        };
        let api = err.to_api_error(&Locale::default());
        assert_eq!(api.status, StatusCode::BAD_GATEWAY);
        assert!(!api.error.contains("stack trace"));
    }
}
