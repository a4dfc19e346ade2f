// src/db/lead_repo.rs

use std::collections::{BTreeMap, HashSet};
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::lead::{
        Choice, Lead, LeadFields, FIELD_BOOKED, FIELD_BUDGET_RANGE, FIELD_PRIORITY, FIELD_REASON_LOST,
        FIELD_SOURCE, FIELD_STAGE, FIELD_VENUE,
    },
};

// Cabeçalho canônico. Os nomes em grego são os do arquivo original e
// precisam ser mantidos byte a byte para continuar compatível.
pub const COL_ID: &str = "ID";
pub const COL_REQUEST_DATE: &str = "Ημ_Αιτήματος";
pub const COL_NAME: &str = "Όνομα";
pub const COL_EMAIL: &str = "Email";
pub const COL_PHONE: &str = "Τηλέφωνο";
pub const COL_EVENT_TYPE: &str = "Τύπος";
pub const COL_EVENT_DATE: &str = "Ημ_Εκδήλωσης";
pub const COL_SOURCE: &str = "Πηγή";
pub const COL_VENUE: &str = "Χώρος";
pub const COL_STAGE: &str = "Στάδιο";
pub const COL_BOOKED: &str = "Booked";
pub const COL_NEXT_ACTION: &str = "Next_Action";
pub const COL_NEXT_ACTION_DATE: &str = "Next_Action_Date";
pub const COL_REASON_LOST: &str = "Reason_Lost";
pub const COL_BUDGET_RANGE: &str = "Budget_Range";
pub const COL_PRIORITY: &str = "Priority";
pub const COL_NOTES: &str = "Σχόλια";

pub const COLUMNS: [&str; 17] = [
    COL_ID,
    COL_REQUEST_DATE,
    COL_NAME,
    COL_EMAIL,
    COL_PHONE,
    COL_EVENT_TYPE,
    COL_EVENT_DATE,
    COL_SOURCE,
    COL_VENUE,
    COL_STAGE,
    COL_BOOKED,
    COL_NEXT_ACTION,
    COL_NEXT_ACTION_DATE,
    COL_REASON_LOST,
    COL_BUDGET_RANGE,
    COL_PRIORITY,
    COL_NOTES,
];

/// Resultado de uma leitura. `generated_ids` conta as linhas que vieram sem id
/// válido (ou com id repetido) e receberam um novo nesta leitura; enquanto não
/// forem gravados, esses ids mudam a cada leitura.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedLeads {
    pub leads: Vec<Lead>,
    pub generated_ids: usize,
}

/// Armazenamento dos leads num CSV plano.
///
/// Não há escrita parcial: `save` sempre reescreve o arquivo inteiro, via
/// arquivo temporário no mesmo diretório + rename. Também não há trava entre
/// processos; um segundo escritor sobrescreve o primeiro sem aviso.
#[derive(Debug, Clone)]
pub struct LeadRepository {
    path: PathBuf,
}

impl LeadRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lê todos os leads. Arquivo inexistente = tabela vazia.
    pub fn load(&self) -> Result<Vec<Lead>, AppError> {
        self.read().map(|loaded| loaded.leads)
    }

    /// Como `load`, informando quantos ids precisaram ser gerados.
    pub fn read(&self) -> Result<LoadedLeads, AppError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("Arquivo {} ainda não existe, começando vazio", self.path.display());
                return Ok(LoadedLeads {
                    leads: Vec::new(),
                    generated_ids: 0,
                });
            }
            Err(e) => return Err(e.into()),
        };

        let mut reader = ReaderBuilder::new().flexible(true).from_reader(file);
        let headers = reader.headers()?.clone();
        let columns = ColumnIndex::new(&headers);

        if !columns.has_ids() {
            tracing::info!("Arquivo sem coluna '{}': gerando ids novos", COL_ID);
        }

        let mut seen = HashSet::new();
        let mut leads = Vec::new();
        let mut generated_ids = 0;

        for (i, record) in reader.records().enumerate() {
            let record = record?;
            // Linha 1 é o cabeçalho
            let row = i + 2;
            let (mut lead, has_id) = parse_row(row, &columns, &record);

            if !has_id {
                generated_ids += 1;
            } else if !seen.insert(lead.id) {
                tracing::warn!("Id duplicado na linha {}: gerando um novo", row);
                lead.id = Uuid::new_v4();
                generated_ids += 1;
            }
            seen.insert(lead.id);
            leads.push(lead);
        }

        tracing::debug!("{} leads carregados de {}", leads.len(), self.path.display());
        Ok(LoadedLeads { leads, generated_ids })
    }

    /// Reescreve o arquivo com o conjunto completo.
    pub fn save(&self, leads: &[Lead]) -> Result<(), AppError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let tmp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = WriterBuilder::new().from_writer(tmp.as_file());
            writer.write_record(COLUMNS)?;
            for lead in leads {
                writer.write_record(to_row(lead))?;
            }
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| AppError::Storage(e.error))?;

        tracing::info!("{} leads gravados em {}", leads.len(), self.path.display());
        Ok(())
    }
}

// --- Mapeamento linha <-> Lead ---

// Posição de cada coluna conhecida no cabeçalho do arquivo lido.
// Colunas ausentes são lidas como vazias.
struct ColumnIndex {
    positions: Vec<Option<usize>>,
}

impl ColumnIndex {
    fn new(headers: &StringRecord) -> Self {
        let positions = COLUMNS
            .iter()
            .map(|col| headers.iter().position(|h| h.trim_start_matches('\u{feff}').trim() == *col))
            .collect();
        Self { positions }
    }

    fn has_ids(&self) -> bool {
        self.positions[0].is_some()
    }

    fn get<'r>(&self, record: &'r StringRecord, column: &str) -> &'r str {
        COLUMNS
            .iter()
            .position(|c| *c == column)
            .and_then(|i| self.positions[i])
            .and_then(|pos| record.get(pos))
            .unwrap_or("")
    }
}

// Valores fora das listas fechadas não derrubam a leitura: o texto original
// fica em `unrecognized` e o campo tipado recebe um valor provisório.
struct RowParser<'r> {
    row: usize,
    columns: &'r ColumnIndex,
    record: &'r StringRecord,
    unrecognized: BTreeMap<String, String>,
}

impl<'r> RowParser<'r> {
    fn get(&self, column: &str) -> &'r str {
        self.columns.get(self.record, column)
    }

    fn text(&self, column: &str) -> String {
        self.get(column).to_string()
    }

    fn keep_raw(&mut self, column: &str, field: &str, raw: &str) {
        tracing::warn!("Valor desconhecido na linha {}, coluna '{}': '{}'", self.row, column, raw);
        self.unrecognized.insert(field.to_string(), raw.to_string());
    }

    fn required<C: Choice>(&mut self, column: &str, field: &str) -> C {
        let raw = self.get(column);
        match C::parse_loose(raw) {
            Some(choice) => choice,
            None => {
                self.keep_raw(column, field, raw);
                C::ALL[0]
            }
        }
    }

    fn optional<C: Choice>(&mut self, column: &str, field: &str) -> Option<C> {
        let raw = self.get(column);
        if raw.trim().is_empty() {
            return None;
        }
        let parsed = C::parse_loose(raw);
        if parsed.is_none() {
            self.keep_raw(column, field, raw);
        }
        parsed
    }

    // Vazio conta como "não reservado" (o pandas grava NaN como vazio).
    fn booked(&mut self) -> bool {
        let raw = self.get(COL_BOOKED);
        match raw.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "ναι" => true,
            "false" | "0" | "no" | "όχι" | "" => false,
            _ => {
                self.keep_raw(COL_BOOKED, FIELD_BOOKED, raw);
                false
            }
        }
    }
}

// Devolve o lead e se a linha trazia um id válido.
fn parse_row(row: usize, columns: &ColumnIndex, record: &StringRecord) -> (Lead, bool) {
    let mut p = RowParser {
        row,
        columns,
        record,
        unrecognized: BTreeMap::new(),
    };

    let parsed_id = Uuid::parse_str(p.get(COL_ID).trim()).ok();

    let fields = LeadFields {
        request_date: p.text(COL_REQUEST_DATE),
        name: p.text(COL_NAME),
        email: p.text(COL_EMAIL),
        phone: p.text(COL_PHONE),
        event_type: p.text(COL_EVENT_TYPE),
        event_date: p.text(COL_EVENT_DATE),
        source: p.required(COL_SOURCE, FIELD_SOURCE),
        venue: p.required(COL_VENUE, FIELD_VENUE),
        stage: p.required(COL_STAGE, FIELD_STAGE),
        booked: p.booked(),
        next_action: p.text(COL_NEXT_ACTION),
        next_action_date: p.text(COL_NEXT_ACTION_DATE),
        reason_lost: p.optional(COL_REASON_LOST, FIELD_REASON_LOST),
        budget_range: p.optional(COL_BUDGET_RANGE, FIELD_BUDGET_RANGE),
        priority: p.optional(COL_PRIORITY, FIELD_PRIORITY),
        notes: p.text(COL_NOTES),
    };

    let lead = Lead {
        id: parsed_id.unwrap_or_else(Uuid::new_v4),
        fields,
        unrecognized: p.unrecognized,
    };
    (lead, parsed_id.is_some())
}

fn choice_cell<C: Choice>(lead: &Lead, field: &str, value: Option<C>) -> String {
    match lead.raw_value(field) {
        Some(raw) => raw.to_string(),
        None => value.map(|c| c.label()).unwrap_or("").to_string(),
    }
}

fn to_row(lead: &Lead) -> [String; 17] {
    let f = &lead.fields;
    [
        lead.id.to_string(),
        f.request_date.clone(),
        f.name.clone(),
        f.email.clone(),
        f.phone.clone(),
        f.event_type.clone(),
        f.event_date.clone(),
        choice_cell(lead, FIELD_SOURCE, Some(f.source)),
        choice_cell(lead, FIELD_VENUE, Some(f.venue)),
        choice_cell(lead, FIELD_STAGE, Some(f.stage)),
        match lead.raw_value(FIELD_BOOKED) {
            Some(raw) => raw.to_string(),
            None => (if f.booked { "True" } else { "False" }).to_string(),
        },
        f.next_action.clone(),
        f.next_action_date.clone(),
        choice_cell(lead, FIELD_REASON_LOST, f.reason_lost),
        choice_cell(lead, FIELD_BUDGET_RANGE, f.budget_range),
        choice_cell(lead, FIELD_PRIORITY, f.priority),
        f.notes.clone(),
    ]
}
