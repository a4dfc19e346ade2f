// src/handlers/leads.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::{
        dates,
        error::{ApiError, AppError},
    },
    config::AppState,
    middleware::i18n::Locale,
    models::{
        dashboard::{EditOption, SaveResponse},
        lead::{BudgetRange, Lead, LeadFields, Priority, ReasonLost, Source, Stage, Venue},
    },
    services::editor::{LeadCommand, LeadRef},
};

// =============================================================================
//  PAYLOAD DO FORMULÁRIO
// =============================================================================

// Vazio é aceito: o padrão (hoje) é aplicado em `into_fields`.
fn validate_iso_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || dates::is_iso_date(value) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_date_format"))
    }
}

/// Formulário de criação/edição. Campos omitidos ou vazios recebem os mesmos
/// padrões do formulário original: datas = hoje, `booked` = (stage == Booked).
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    #[validate(custom(function = "validate_iso_date"))]
    #[schema(example = "2026-10-19")]
    #[serde(default)]
    pub request_date: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Maria Papadopoulou")]
    pub name: String,

    // Sem validação de formato de e-mail
    #[serde(default)]
    #[schema(example = "maria@example.com")]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    #[schema(example = "Wedding")]
    pub event_type: String,

    #[validate(custom(function = "validate_iso_date"))]
    #[schema(example = "2027-06-12")]
    #[serde(default)]
    pub event_date: String,

    pub source: Source,
    pub venue: Venue,
    pub stage: Stage,

    pub booked: Option<bool>,

    #[serde(default)]
    #[schema(example = "Send revised offer")]
    pub next_action: String,

    #[validate(custom(function = "validate_iso_date"))]
    #[schema(example = "2026-10-22")]
    #[serde(default)]
    pub next_action_date: String,

    pub reason_lost: Option<ReasonLost>,
    pub budget_range: Option<BudgetRange>,
    pub priority: Option<Priority>,

    #[serde(default)]
    pub notes: String,
}

fn or_today(value: String, today: &str) -> String {
    if value.is_empty() {
        today.to_string()
    } else {
        value
    }
}

impl LeadPayload {
    pub fn into_fields(self, today: NaiveDate) -> LeadFields {
        let today = dates::format_iso(today);
        let booked = self.booked.unwrap_or(self.stage == Stage::Booked);

        LeadFields {
            request_date: or_today(self.request_date, &today),
            name: self.name,
            email: self.email,
            phone: self.phone,
            event_type: self.event_type,
            event_date: or_today(self.event_date, &today),
            source: self.source,
            venue: self.venue,
            stage: self.stage,
            booked,
            next_action: self.next_action,
            next_action_date: or_today(self.next_action_date, &today),
            reason_lost: self.reason_lost,
            budget_range: self.budget_range,
            priority: self.priority,
            notes: self.notes,
        }
    }
}

// Caminho comum de POST/PUT: valida, grava e devolve a confirmação traduzida.
async fn save_lead(
    app_state: &AppState,
    locale: &Locale,
    payload: LeadPayload,
    target: Option<LeadRef>,
) -> Result<SaveResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(locale, &app_state.i18n_store))?;

    let now = Local::now().naive_local();
    let fields = payload.into_fields(now.date());
    let command = match target {
        None => LeadCommand::New(fields),
        Some(target) => LeadCommand::Edit { target, fields },
    };

    let (lead, dashboard) = app_state
        .lead_service
        .save(command, now)
        .await
        .map_err(|app_err| app_err.to_api_error(locale, &app_state.i18n_store))?;

    Ok(SaveResponse {
        message: app_state.i18n_store.translate(&locale.0, "saved"),
        lead,
        dashboard,
    })
}

// =============================================================================
//  ROTAS
// =============================================================================

// POST /api/leads
#[utoipa::path(
    post,
    path = "/api/leads",
    tag = "Leads",
    request_body = LeadPayload,
    responses(
        (status = 201, description = "Lead criado (modo Novo)", body = SaveResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 500, description = "Falha ao gravar o arquivo")
    )
)]
pub async fn create_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<LeadPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let response = save_lead(&app_state, &locale, payload, None).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

// GET /api/leads
#[utoipa::path(
    get,
    path = "/api/leads",
    tag = "Leads",
    responses(
        (status = 200, description = "Todos os leads, na ordem do arquivo", body = Vec<Lead>)
    )
)]
pub async fn list_leads(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let leads = app_state
        .lead_service
        .list_leads()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(leads)))
}

// GET /api/leads/options
#[utoipa::path(
    get,
    path = "/api/leads/options",
    tag = "Leads",
    responses(
        (status = 200, description = "Seletor do modo edição (nome — data do evento)", body = Vec<EditOption>)
    )
)]
pub async fn list_edit_options(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let options = app_state
        .lead_service
        .edit_options()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(options)))
}

// GET /api/leads/{id}
#[utoipa::path(
    get,
    path = "/api/leads/{id}",
    tag = "Leads",
    params(("id" = Uuid, Path, description = "Id do lead")),
    responses(
        (status = 200, description = "Lead", body = Lead),
        (status = 404, description = "Lead não encontrado")
    )
)]
pub async fn get_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let lead = app_state
        .lead_service
        .get_lead(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(lead)))
}

// PUT /api/leads/{id}
#[utoipa::path(
    put,
    path = "/api/leads/{id}",
    tag = "Leads",
    request_body = LeadPayload,
    params(("id" = Uuid, Path, description = "Id do lead")),
    responses(
        (status = 200, description = "Lead substituído (modo Edição)", body = SaveResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Lead não encontrado")
    )
)]
pub async fn update_lead(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<LeadPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let response = save_lead(&app_state, &locale, payload, Some(LeadRef::Id(id))).await?;
    Ok((StatusCode::OK, Json(response)))
}

// PUT /api/leads/position/{index}
#[utoipa::path(
    put,
    path = "/api/leads/position/{index}",
    tag = "Leads",
    request_body = LeadPayload,
    params(("index" = usize, Path, description = "Posição no arquivo (0 = primeira linha)")),
    responses(
        (status = 200, description = "Lead substituído (modo Edição)", body = SaveResponse),
        (status = 404, description = "Posição fora do intervalo")
    )
)]
pub async fn update_lead_at_position(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(index): Path<usize>,
    Json(payload): Json<LeadPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let response = save_lead(&app_state, &locale, payload, Some(LeadRef::Position(index))).await?;
    Ok((StatusCode::OK, Json(response)))
}
