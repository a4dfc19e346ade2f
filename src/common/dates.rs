// src/common/dates.rs

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

/// Formato gravado no arquivo e aceito pela API.
pub const ISO_DATE: &str = "%Y-%m-%d";

/// Interpreta uma data "solta" vinda do CSV. Datas sem hora viram meia-noite.
/// Valores vazios ou inválidos retornam `None`, nunca erro.
pub fn parse_loose(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .map(|date| date.and_time(NaiveTime::MIN))
}

pub fn is_iso_date(raw: &str) -> bool {
    NaiveDate::parse_from_str(raw, ISO_DATE).is_ok()
}

pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO_DATE).to_string()
}
