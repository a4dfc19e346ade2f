// src/common/i18n.rs

use std::collections::HashMap;
use std::sync::Arc;

// Idiomas com tradução completa. O primeiro é o fallback final.
pub const SUPPORTED_LOCALES: &[&str] = &["en", "el"];

const EN: &[(&str, &str)] = &[
    ("saved", "Saved!"),
    ("lead_not_found", "The selected lead does not exist (it may have been moved or removed)."),
    ("storage_error", "The leads file could not be read or written. Nothing was saved."),
    ("validation_error", "One or more fields are invalid."),
    ("internal_error", "An unexpected error occurred."),
    ("required", "This field is required."),
    ("invalid_date_format", "Expected a date in YYYY-MM-DD format."),
];

const EL: &[(&str, &str)] = &[
    ("saved", "Αποθηκεύτηκε!"),
    ("lead_not_found", "Το lead που επιλέχθηκε δεν υπάρχει (ίσως μετακινήθηκε ή διαγράφηκε)."),
    ("storage_error", "Το αρχείο των leads δεν μπορεί να διαβαστεί ή να γραφτεί. Δεν αποθηκεύτηκε τίποτα."),
    ("validation_error", "Ένα ή περισσότερα πεδία δεν είναι έγκυρα."),
    ("internal_error", "Παρουσιάστηκε απρόσμενο σφάλμα."),
    ("required", "Το πεδίο είναι υποχρεωτικό."),
    ("invalid_date_format", "Αναμένεται ημερομηνία στη μορφή YYYY-MM-DD."),
];

/// Mensagens traduzidas, indexadas por idioma e depois por código.
#[derive(Debug, Clone)]
pub struct I18nStore {
    default_locale: String,
    messages: Arc<HashMap<&'static str, HashMap<&'static str, &'static str>>>,
}

impl I18nStore {
    pub fn new(default_locale: &str) -> Self {
        let mut messages = HashMap::new();
        messages.insert("en", EN.iter().copied().collect());
        messages.insert("el", EL.iter().copied().collect());

        let default_locale = if SUPPORTED_LOCALES.contains(&default_locale) {
            default_locale.to_string()
        } else {
            tracing::warn!("Idioma padrão '{}' não suportado, usando 'en'", default_locale);
            "en".to_string()
        };

        Self {
            default_locale,
            messages: Arc::new(messages),
        }
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Busca a mensagem no idioma pedido, depois no inglês. Se nada for
    /// encontrado o próprio código é devolvido.
    pub fn translate(&self, locale: &str, key: &str) -> String {
        self.messages
            .get(locale)
            .and_then(|table| table.get(key))
            .or_else(|| self.messages.get("en").and_then(|table| table.get(key)))
            .map(|msg| msg.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}

impl Default for I18nStore {
    fn default() -> Self {
        Self::new("en")
    }
}
