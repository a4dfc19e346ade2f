// src/config.rs

use std::{env, path::PathBuf};

use axum::extract::FromRef;

use crate::{common::i18n::I18nStore, db::LeadRepository, services::LeadService};

const DEFAULT_DATA_PATH: &str = "leads.csv";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_LOCALE: &str = "el";

// Configuração lida do ambiente (.env incluído)
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_path: PathBuf,
    pub bind_addr: String,
    pub default_locale: String,
}

impl Settings {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let data_path = env::var("LEADS_DATA_PATH").unwrap_or_else(|_| DEFAULT_DATA_PATH.to_string());
        let bind_addr = env::var("LEADS_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let default_locale = env::var("LEADS_DEFAULT_LOCALE").unwrap_or_else(|_| DEFAULT_LOCALE.to_string());

        Self {
            data_path: PathBuf::from(data_path),
            bind_addr,
            default_locale,
        }
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub lead_service: LeadService,
    pub i18n_store: I18nStore,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        // --- Monta o gráfico de dependências ---
        let repo = LeadRepository::new(&settings.data_path);

        // Leitura de teste: um arquivo ilegível não impede o servidor de subir,
        // o erro aparece em cada requisição até ser corrigido.
        match repo.load() {
            Ok(leads) => tracing::info!(
                "✅ {} leads encontrados em {}",
                leads.len(),
                settings.data_path.display()
            ),
            Err(e) => tracing::error!(
                "🔥 Não foi possível ler {}: {}",
                settings.data_path.display(),
                e
            ),
        }

        Self {
            lead_service: LeadService::new(repo),
            i18n_store: I18nStore::new(&settings.default_locale),
        }
    }
}

impl FromRef<AppState> for I18nStore {
    fn from_ref(state: &AppState) -> Self {
        state.i18n_store.clone()
    }
}
