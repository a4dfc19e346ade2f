// src/services/test_support.rs

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::lead::{Lead, LeadFields, Source, Stage, Venue};

// "Agora" fixo para os testes: 19/10/2026 ao meio-dia.
pub fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap()
}

pub fn fields(name: &str) -> LeadFields {
    LeadFields {
        request_date: "2026-10-01".into(),
        name: name.into(),
        email: String::new(),
        phone: String::new(),
        event_type: "Wedding".into(),
        event_date: "2027-05-20".into(),
        source: Source::Direct,
        venue: Venue::MuseUrbanVenue,
        stage: Stage::New,
        booked: false,
        next_action: String::new(),
        next_action_date: String::new(),
        reason_lost: None,
        budget_range: None,
        priority: None,
        notes: String::new(),
    }
}

pub fn lead(stage: Stage, source: Source, venue: Venue, booked: bool) -> Lead {
    let mut f = fields("Test");
    f.stage = stage;
    f.source = source;
    f.venue = venue;
    f.booked = booked;
    Lead::new(f)
}

pub fn with_next_action(booked: bool, date: &str) -> Lead {
    let mut l = lead(Stage::Offer, Source::Google, Venue::MuseUrbanVenue, booked);
    l.fields.next_action = "Call".into();
    l.fields.next_action_date = date.into();
    l
}
