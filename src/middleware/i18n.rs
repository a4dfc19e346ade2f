// src/middleware/i18n.rs

use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header, request::Parts};

use crate::common::i18n::{I18nStore, SUPPORTED_LOCALES};

// Extrator de idioma: primeiro idioma suportado do Accept-Language,
// senão o padrão configurado no I18nStore.
#[derive(Debug, Clone, PartialEq)]
pub struct Locale(pub String);

impl Locale {
    pub fn from_header(header_str: Option<&str>, default_lang: &str) -> Self {
        let lang = header_str
            .and_then(|header_str| {
                accept_language::parse(header_str)
                    .into_iter()
                    // "el-GR" -> "el"
                    .map(|tag| tag.split('-').next().unwrap_or(&tag).to_lowercase())
                    .find(|primary| SUPPORTED_LOCALES.contains(&primary.as_str()))
            })
            .unwrap_or_else(|| default_lang.to_string());

        Locale(lang)
    }
}

impl<S> FromRequestParts<S> for Locale
where
    I18nStore: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let store = I18nStore::from_ref(state);

        let header_str = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok());

        Ok(Locale::from_header(header_str, store.default_locale()))
    }
}
