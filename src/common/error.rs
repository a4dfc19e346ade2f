// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Erros de domínio. A tradução para HTTP acontece em `to_api_error`,
// onde já conhecemos o idioma do cliente.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Id desconhecido, posição fora do intervalo ou conjunto vazio
    #[error("Lead não encontrado")]
    LeadNotFound,

    #[error("Erro de E/S no arquivo de leads: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Erro de CSV no arquivo de leads: {0}")]
    Csv(#[from] csv::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Converte o erro numa resposta localizada.
    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();

        match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    // Mensagens do validator são códigos ("required", ...)
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            let code = e.message.as_deref().unwrap_or(&*e.code);
                            i18n.translate(lang, code)
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    message: i18n.translate(lang, "validation_error"),
                    details: Some(details),
                }
            }
            AppError::LeadNotFound => {
                tracing::warn!("Edição rejeitada: lead não encontrado");
                ApiError::new(StatusCode::NOT_FOUND, i18n.translate(lang, "lead_not_found"))
            }
            AppError::Storage(_) | AppError::Csv(_) => {
                tracing::error!("Falha de armazenamento: {}", self);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, i18n.translate(lang, "storage_error"))
            }
            AppError::InternalServerError(e) => {
                tracing::error!("Erro Interno do Servidor: {:?}", e);
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, i18n.translate(lang, "internal_error"))
            }
        }
    }
}

// O erro que sai pela API
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<HashMap<String, Vec<String>>>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}
