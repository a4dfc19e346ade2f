// src/services/metrics.rs

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::{common::dates, models::dashboard::LeadMetrics, models::lead::Lead};

/// Indicadores do topo do painel, calculados sobre o conjunto já filtrado.
///
/// `overdue` conta leads não reservados cuja próxima ação é anterior a `now`.
/// Datas vazias ou ilegíveis simplesmente não contam.
pub fn compute_metrics(leads: &[Lead], now: NaiveDateTime) -> LeadMetrics {
    let total = leads.len();
    let booked = leads.iter().filter(|lead| lead.fields.booked).count();

    let mut conversion = if total == 0 {
        Decimal::ZERO
    } else {
        (Decimal::from(booked) * Decimal::ONE_HUNDRED / Decimal::from(total)).round_dp(1)
    };
    conversion.rescale(1);

    let overdue = leads
        .iter()
        .filter(|lead| !lead.fields.booked)
        .filter_map(|lead| dates::parse_loose(&lead.fields.next_action_date))
        .filter(|when| *when < now)
        .count();

    LeadMetrics {
        total,
        booked,
        conversion,
        conversion_label: format!("{}%", conversion),
        overdue,
    }
}
