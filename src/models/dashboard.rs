// src/models/dashboard.rs

use serde::Serialize;
use rust_decimal::Decimal;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::lead::{Lead, Source, Stage};

// 1. Indicadores (os cards do topo)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadMetrics {
    #[schema(example = 42)]
    pub total: usize,
    #[schema(example = 12)]
    pub booked: usize,
    // Percentual com uma casa decimal (0 quando não há leads)
    #[schema(value_type = f64, example = 28.6)]
    pub conversion: Decimal,
    #[schema(example = "28.6%")]
    pub conversion_label: String,
    #[schema(example = 3)]
    pub overdue: usize,
}

// 2. Tabela cruzada Origem x Estágio
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub source: Source,
    /// Alinhado com `SourceStageSummary::stages`.
    pub counts: Vec<usize>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SourceStageSummary {
    pub stages: Vec<Stage>,
    pub rows: Vec<SummaryRow>,
    pub grand_total: usize,
}

impl SourceStageSummary {
    pub fn count(&self, source: Source, stage: Stage) -> usize {
        let Some(column) = self.stages.iter().position(|s| *s == stage) else {
            return 0;
        };
        self.rows
            .iter()
            .find(|row| row.source == source)
            .map_or(0, |row| row.counts[column])
    }
}

// 3. O painel completo
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub metrics: LeadMetrics,
    /// Leads filtrados, do pedido mais recente para o mais antigo.
    pub leads: Vec<Lead>,
    /// Omitido quando o filtro não retorna nenhum lead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SourceStageSummary>,
}

// 4. Seletor do modo edição
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditOption {
    pub id: Uuid,
    pub position: usize,
    #[schema(example = "Maria Papadopoulou — 2027-06-12")]
    pub label: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveResponse {
    #[schema(example = "Saved!")]
    pub message: String,
    pub lead: Lead,
    pub dashboard: Dashboard,
}

// 5. Listas do formulário e dos filtros
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormOptions {
    pub stages: Vec<String>,
    pub sources: Vec<String>,
    pub venues: Vec<String>,
    pub reasons_lost: Vec<String>,
    pub budget_ranges: Vec<String>,
    pub priorities: Vec<String>,
    pub booked_filters: Vec<String>,
}
