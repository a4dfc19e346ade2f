// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    info(title = "Muse Leads Tracker", description = "Pedidos de eventos: cadastro, filtros e indicadores"),
    paths(
        // --- Dashboard ---
        handlers::dashboard::get_dashboard,
        handlers::dashboard::get_form_options,

        // --- Leads ---
        handlers::leads::create_lead,
        handlers::leads::list_leads,
        handlers::leads::list_edit_options,
        handlers::leads::get_lead,
        handlers::leads::update_lead,
        handlers::leads::update_lead_at_position,
    ),
    components(
        schemas(
            // --- LEADS ---
            models::lead::Stage,
            models::lead::Source,
            models::lead::Venue,
            models::lead::ReasonLost,
            models::lead::BudgetRange,
            models::lead::Priority,
            models::lead::LeadFields,
            models::lead::Lead,

            // --- DASHBOARD ---
            models::dashboard::LeadMetrics,
            models::dashboard::SummaryRow,
            models::dashboard::SourceStageSummary,
            models::dashboard::Dashboard,
            models::dashboard::EditOption,
            models::dashboard::SaveResponse,
            models::dashboard::FormOptions,
            services::filter::BookedFilter,

            // --- Payloads ---
            handlers::leads::LeadPayload,
        )
    ),
    tags(
        (name = "Leads", description = "Cadastro e edição de pedidos"),
        (name = "Dashboard", description = "Indicadores, filtros e resumo Origem x Estágio")
    )
)]
pub struct ApiDoc;
