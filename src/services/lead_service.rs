// src/services/lead_service.rs

use std::sync::Arc;

use chrono::NaiveDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::LeadRepository,
    models::{
        dashboard::{Dashboard, EditOption},
        lead::Lead,
    },
    services::{
        editor::{self, LeadCommand},
        filter::{filter_leads, LeadFilter},
        metrics::compute_metrics,
        summary::build_summary,
    },
};

/// Um "ciclo de renderização": carrega tudo do arquivo, filtra e deriva os
/// indicadores. Nada fica em memória entre chamadas.
pub fn build_dashboard(leads: &[Lead], filter: &LeadFilter, now: NaiveDateTime) -> Dashboard {
    let mut filtered = filter_leads(leads, filter);
    let metrics = compute_metrics(&filtered, now);
    let summary = build_summary(&filtered);

    // Pedido mais recente primeiro (datas ISO ordenam como texto)
    filtered.sort_by(|a, b| b.fields.request_date.cmp(&a.fields.request_date));

    Dashboard {
        metrics,
        leads: filtered,
        summary,
    }
}

#[derive(Clone)]
pub struct LeadService {
    repo: LeadRepository,
    // Serializa os ciclos carregar/alterar/gravar deste processo
    cycle: Arc<Mutex<()>>,
}

impl LeadService {
    pub fn new(repo: LeadRepository) -> Self {
        Self {
            repo,
            cycle: Arc::new(Mutex::new(())),
        }
    }

    pub fn repository(&self) -> &LeadRepository {
        &self.repo
    }

    // Chamado sempre com o `cycle` travado. Ids gerados na leitura (arquivo
    // antigo, sem coluna ID, ou ids repetidos) são gravados na hora para que
    // a próxima requisição encontre os mesmos ids.
    fn load_locked(&self) -> Result<Vec<Lead>, AppError> {
        let loaded = self.repo.read()?;
        if loaded.generated_ids > 0 {
            tracing::info!("Gravando {} ids novos em {}", loaded.generated_ids, self.repo.path().display());
            if let Err(e) = self.repo.save(&loaded.leads) {
                tracing::warn!("Não foi possível gravar os ids novos: {}", e);
            }
        }
        Ok(loaded.leads)
    }

    pub async fn dashboard(&self, filter: &LeadFilter, now: NaiveDateTime) -> Result<Dashboard, AppError> {
        let _guard = self.cycle.lock().await;
        let leads = self.load_locked()?;
        Ok(build_dashboard(&leads, filter, now))
    }

    pub async fn list_leads(&self) -> Result<Vec<Lead>, AppError> {
        let _guard = self.cycle.lock().await;
        self.load_locked()
    }

    pub async fn get_lead(&self, id: Uuid) -> Result<Lead, AppError> {
        let _guard = self.cycle.lock().await;
        self.load_locked()?
            .into_iter()
            .find(|lead| lead.id == id)
            .ok_or(AppError::LeadNotFound)
    }

    /// Entradas do seletor do modo edição, na ordem do arquivo.
    pub async fn edit_options(&self) -> Result<Vec<EditOption>, AppError> {
        let _guard = self.cycle.lock().await;
        let options = self
            .load_locked()?
            .iter()
            .enumerate()
            .map(|(position, lead)| EditOption {
                id: lead.id,
                position,
                label: lead.edit_label(),
            })
            .collect();
        Ok(options)
    }

    /// Aplica o comando, grava o conjunto inteiro e devolve o lead salvo junto
    /// com o painel recalculado a partir do conjunto alterado.
    pub async fn save(&self, command: LeadCommand, now: NaiveDateTime) -> Result<(Lead, Dashboard), AppError> {
        let _guard = self.cycle.lock().await;

        let mut leads = self.load_locked()?;
        let saved = editor::apply(&mut leads, command)?;
        self.repo.save(&leads)?;

        let dashboard = build_dashboard(&leads, &LeadFilter::default(), now);
        Ok((saved, dashboard))
    }
}
