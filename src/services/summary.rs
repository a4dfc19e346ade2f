// src/services/summary.rs

use std::collections::{BTreeMap, BTreeSet};

use crate::models::{
    dashboard::{SourceStageSummary, SummaryRow},
    lead::Lead,
};

/// Tabela cruzada Origem x Estágio, com total por linha.
///
/// Só aparecem as origens e os estágios presentes, na ordem das listas do
/// formulário. Conjunto vazio não gera tabela.
pub fn build_summary(leads: &[Lead]) -> Option<SourceStageSummary> {
    if leads.is_empty() {
        return None;
    }

    let mut cells = BTreeMap::new();
    let mut sources = BTreeSet::new();
    let mut stages = BTreeSet::new();
    for lead in leads {
        let f = &lead.fields;
        *cells.entry((f.source, f.stage)).or_insert(0usize) += 1;
        sources.insert(f.source);
        stages.insert(f.stage);
    }
    let stages: Vec<_> = stages.into_iter().collect();

    let rows = sources
        .into_iter()
        .map(|source| {
            let counts: Vec<usize> = stages
                .iter()
                .map(|stage| cells.get(&(source, *stage)).copied().unwrap_or(0))
                .collect();
            let total = counts.iter().sum();
            SummaryRow { source, counts, total }
        })
        .collect();

    Some(SourceStageSummary {
        stages,
        rows,
        grand_total: leads.len(),
    })
}
