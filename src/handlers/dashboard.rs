// src/handlers/dashboard.rs

use std::collections::HashSet;
use std::hash::Hash;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::Query;
use chrono::Local;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::{
        dashboard::{Dashboard, FormOptions},
        lead::{BudgetRange, Choice, Priority, ReasonLost, Source, Stage, Venue},
    },
    services::filter::{BookedFilter, LeadFilter},
};

/// Filtros da barra lateral. Parâmetro ausente = todos os valores.
/// Listas aceitam repetição: `?stage=New&stage=Offer`. Um valor vazio
/// (`?venue=`) é uma seleção vazia explícita e esconde todas as linhas.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    #[serde(default)]
    pub stage: Vec<Option<Stage>>,
    #[serde(default)]
    pub source: Vec<Option<Source>>,
    #[serde(default)]
    pub venue: Vec<Option<Venue>>,
    #[serde(default)]
    pub booked: BookedFilter,
}

// Vazios (`None`) só marcam que o parâmetro veio.
fn selected_or_all<T: Choice + Eq + Hash>(selected: Vec<Option<T>>) -> HashSet<T> {
    if selected.is_empty() {
        T::ALL.iter().copied().collect()
    } else {
        selected.into_iter().flatten().collect()
    }
}

impl DashboardQuery {
    pub fn into_filter(self) -> LeadFilter {
        LeadFilter {
            stages: selected_or_all(self.stage),
            sources: selected_or_all(self.source),
            venues: selected_or_all(self.venue),
            booked: self.booked,
        }
    }
}

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Indicadores, tabela filtrada e resumo Origem x Estágio", body = Dashboard),
        (status = 500, description = "Arquivo de leads ilegível")
    )
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<DashboardQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = query.into_filter();
    let now = Local::now().naive_local();

    let dashboard = app_state
        .lead_service
        .dashboard(&filter, now)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(dashboard)))
}

fn names<T: Choice>() -> Vec<String> {
    T::ALL.iter().map(|choice| choice.name().to_string()).collect()
}

// GET /api/options
#[utoipa::path(
    get,
    path = "/api/options",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Listas de escolha do formulário e dos filtros", body = FormOptions)
    )
)]
pub async fn get_form_options() -> Json<FormOptions> {
    Json(FormOptions {
        stages: names::<Stage>(),
        sources: names::<Source>(),
        venues: names::<Venue>(),
        reasons_lost: names::<ReasonLost>(),
        budget_ranges: names::<BudgetRange>(),
        priorities: names::<Priority>(),
        booked_filters: BookedFilter::ALL.iter().map(|b| b.to_string()).collect(),
    })
}
