// src/models/lead.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

// --- Escolhas (listas fechadas do formulário) ---

/// Valor de uma lista fechada do formulário.
///
/// `label` é o texto gravado no CSV (compatível com o arquivo original, em grego
/// onde o original estava em grego). `name` é o nome usado na API.
pub trait Choice: Sized + Copy + 'static {
    const ALL: &'static [Self];

    fn label(self) -> &'static str;
    fn name(self) -> &'static str;

    /// Aceita tanto o rótulo do arquivo quanto o nome da API, sem diferenciar caixa.
    fn parse_loose(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let lowered = raw.to_lowercase();
        Self::ALL.iter().copied().find(|choice| {
            choice.label() == raw
                || choice.name().eq_ignore_ascii_case(raw)
                || choice.label().to_lowercase() == lowered
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Stage {
    New,
    Offer,
    Appointment,
    #[serde(rename = "Provisional Agreement")]
    ProvisionalAgreement,
    Booked,
    Lost,
}

impl Choice for Stage {
    const ALL: &'static [Self] = &[
        Stage::New,
        Stage::Offer,
        Stage::Appointment,
        Stage::ProvisionalAgreement,
        Stage::Booked,
        Stage::Lost,
    ];

    fn label(self) -> &'static str {
        match self {
            Stage::New => "Νέο",
            Stage::Offer => "Προσφορά",
            Stage::Appointment => "Ραντεβού",
            Stage::ProvisionalAgreement => "Προφ. Συμφωνία",
            Stage::Booked => "Booked",
            Stage::Lost => "Lost",
        }
    }

    fn name(self) -> &'static str {
        match self {
            Stage::New => "New",
            Stage::Offer => "Offer",
            Stage::Appointment => "Appointment",
            Stage::ProvisionalAgreement => "Provisional Agreement",
            Stage::Booked => "Booked",
            Stage::Lost => "Lost",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Source {
    Direct,
    Instagram,
    Google,
    Referral,
    Planner,
    Other,
}

impl Choice for Source {
    const ALL: &'static [Self] = &[
        Source::Direct,
        Source::Instagram,
        Source::Google,
        Source::Referral,
        Source::Planner,
        Source::Other,
    ];

    fn label(self) -> &'static str {
        self.name()
    }

    fn name(self) -> &'static str {
        match self {
            Source::Direct => "Direct",
            Source::Instagram => "Instagram",
            Source::Google => "Google",
            Source::Referral => "Referral",
            Source::Planner => "Planner",
            Source::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Venue {
    #[serde(rename = "Muse Urban Venue")]
    MuseUrbanVenue,
    #[serde(rename = "Couleur Locale")]
    CouleurLocale,
}

impl Choice for Venue {
    const ALL: &'static [Self] = &[Venue::MuseUrbanVenue, Venue::CouleurLocale];

    fn label(self) -> &'static str {
        self.name()
    }

    fn name(self) -> &'static str {
        match self {
            Venue::MuseUrbanVenue => "Muse Urban Venue",
            Venue::CouleurLocale => "Couleur Locale",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ReasonLost {
    Budget,
    Availability,
    Services,
    OtherVenue,
    NoResponse,
    Other,
}

impl Choice for ReasonLost {
    const ALL: &'static [Self] = &[
        ReasonLost::Budget,
        ReasonLost::Availability,
        ReasonLost::Services,
        ReasonLost::OtherVenue,
        ReasonLost::NoResponse,
        ReasonLost::Other,
    ];

    fn label(self) -> &'static str {
        match self {
            ReasonLost::Budget => "Budget",
            ReasonLost::Availability => "Διαθεσιμότητα",
            ReasonLost::Services => "Υπηρεσίες",
            ReasonLost::OtherVenue => "Άλλος χώρος",
            ReasonLost::NoResponse => "No response",
            ReasonLost::Other => "Other",
        }
    }

    fn name(self) -> &'static str {
        match self {
            ReasonLost::Budget => "Budget",
            ReasonLost::Availability => "Availability",
            ReasonLost::Services => "Services",
            ReasonLost::OtherVenue => "OtherVenue",
            ReasonLost::NoResponse => "NoResponse",
            ReasonLost::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum BudgetRange {
    #[serde(rename = "<2k")]
    Under2k,
    #[serde(rename = "2-4k")]
    From2kTo4k,
    #[serde(rename = "4-6k")]
    From4kTo6k,
    #[serde(rename = "6k+")]
    Over6k,
}

impl Choice for BudgetRange {
    const ALL: &'static [Self] = &[
        BudgetRange::Under2k,
        BudgetRange::From2kTo4k,
        BudgetRange::From4kTo6k,
        BudgetRange::Over6k,
    ];

    fn label(self) -> &'static str {
        self.name()
    }

    fn name(self) -> &'static str {
        match self {
            BudgetRange::Under2k => "<2k",
            BudgetRange::From2kTo4k => "2-4k",
            BudgetRange::From4kTo6k => "4-6k",
            BudgetRange::Over6k => "6k+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Priority {
    A,
    B,
    C,
}

impl Choice for Priority {
    const ALL: &'static [Self] = &[Priority::A, Priority::B, Priority::C];

    fn label(self) -> &'static str {
        self.name()
    }

    fn name(self) -> &'static str {
        match self {
            Priority::A => "A",
            Priority::B => "B",
            Priority::C => "C",
        }
    }
}

// --- O Lead ---

/// Todos os campos editáveis de um lead. Uma edição substitui o conjunto inteiro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadFields {
    #[schema(example = "2026-10-01")]
    pub request_date: String,
    #[schema(example = "Maria Papadopoulou")]
    pub name: String,
    #[schema(example = "maria@example.com")]
    pub email: String,
    #[schema(example = "+30 690 000 0000")]
    pub phone: String,
    #[schema(example = "Wedding")]
    pub event_type: String,
    #[schema(example = "2027-06-12")]
    pub event_date: String,
    pub source: Source,
    pub venue: Venue,
    pub stage: Stage,
    // Não é derivado do stage: os dois podem divergir.
    pub booked: bool,
    #[schema(example = "Send revised offer")]
    pub next_action: String,
    #[schema(example = "2026-10-20")]
    pub next_action_date: String,
    pub reason_lost: Option<ReasonLost>,
    pub budget_range: Option<BudgetRange>,
    pub priority: Option<Priority>,
    pub notes: String,
}

// Campos de lista fechada que podem chegar do arquivo com texto desconhecido.
// As chaves são os nomes dos campos na API.
pub const FIELD_SOURCE: &str = "source";
pub const FIELD_VENUE: &str = "venue";
pub const FIELD_STAGE: &str = "stage";
pub const FIELD_BOOKED: &str = "booked";
pub const FIELD_REASON_LOST: &str = "reasonLost";
pub const FIELD_BUDGET_RANGE: &str = "budgetRange";
pub const FIELD_PRIORITY: &str = "priority";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: LeadFields,
    /// Texto original de campos cujo valor no arquivo não pertence à lista
    /// fechada (editado à mão). O campo tipado fica com um valor provisório e
    /// o texto volta intacto para o arquivo até o lead ser editado.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    #[schema(example = json!({"source": "Facebook"}))]
    pub unrecognized: BTreeMap<String, String>,
}

impl Lead {
    pub fn new(fields: LeadFields) -> Self {
        Self {
            id: Uuid::new_v4(),
            fields,
            unrecognized: BTreeMap::new(),
        }
    }

    /// Substitui todos os campos; o texto desconhecido deixa de valer.
    pub fn replace_fields(&mut self, fields: LeadFields) {
        self.fields = fields;
        self.unrecognized.clear();
    }

    pub fn raw_value(&self, field: &str) -> Option<&str> {
        self.unrecognized.get(field).map(String::as_str)
    }

    pub fn is_unrecognized(&self, field: &str) -> bool {
        self.unrecognized.contains_key(field)
    }

    /// Rótulo do seletor de edição: "nome — data do evento".
    pub fn edit_label(&self) -> String {
        format!("{} — {}", self.fields.name, self.fields.event_date)
    }
}
