// src/services/filter.rs

use std::collections::HashSet;

use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::lead::{Choice, Lead, Source, Stage, Venue, FIELD_BOOKED, FIELD_SOURCE, FIELD_STAGE, FIELD_VENUE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookedFilter {
    #[default]
    Any,
    Yes,
    No,
}

impl BookedFilter {
    pub const ALL: [&'static str; 3] = ["any", "yes", "no"];

    pub fn matches(self, booked: bool) -> bool {
        match self {
            BookedFilter::Any => true,
            BookedFilter::Yes => booked,
            BookedFilter::No => !booked,
        }
    }
}

/// Os quatro predicados da barra lateral, combinados com AND.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadFilter {
    pub stages: HashSet<Stage>,
    pub sources: HashSet<Source>,
    pub venues: HashSet<Venue>,
    pub booked: BookedFilter,
}

impl Default for LeadFilter {
    // Tudo selecionado
    fn default() -> Self {
        Self {
            stages: Stage::ALL.iter().copied().collect(),
            sources: Source::ALL.iter().copied().collect(),
            venues: Venue::ALL.iter().copied().collect(),
            booked: BookedFilter::Any,
        }
    }
}

impl LeadFilter {
    /// Valores fora das listas fechadas nunca estão entre os selecionados;
    /// um `Booked` ilegível só passa quando o filtro é "any".
    pub fn matches(&self, lead: &Lead) -> bool {
        let f = &lead.fields;
        let booked = if lead.is_unrecognized(FIELD_BOOKED) {
            self.booked == BookedFilter::Any
        } else {
            self.booked.matches(f.booked)
        };

        !lead.is_unrecognized(FIELD_STAGE)
            && !lead.is_unrecognized(FIELD_SOURCE)
            && !lead.is_unrecognized(FIELD_VENUE)
            && self.stages.contains(&f.stage)
            && self.sources.contains(&f.source)
            && self.venues.contains(&f.venue)
            && booked
    }
}

/// Aplica o filtro preservando a ordem original.
pub fn filter_leads(leads: &[Lead], filter: &LeadFilter) -> Vec<Lead> {
    if leads.is_empty() {
        return Vec::new();
    }
    leads.iter().filter(|lead| filter.matches(lead)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::lead;

    fn fixture() -> Vec<Lead> {
        vec![
            lead(Stage::New, Source::Google, Venue::MuseUrbanVenue, false),
            lead(Stage::Booked, Source::Instagram, Venue::CouleurLocale, true),
            lead(Stage::Lost, Source::Referral, Venue::MuseUrbanVenue, false),
            lead(Stage::Offer, Source::Google, Venue::CouleurLocale, true),
        ]
    }

    #[test]
    fn default_filter_keeps_everything() {
        let leads = fixture();
        assert_eq!(filter_leads(&leads, &LeadFilter::default()), leads);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(filter_leads(&[], &LeadFilter::default()).is_empty());
    }

    #[test]
    fn predicates_are_anded() {
        let leads = fixture();
        let filter = LeadFilter {
            sources: [Source::Google].into_iter().collect(),
            booked: BookedFilter::Yes,
            ..LeadFilter::default()
        };

        let out = filter_leads(&leads, &filter);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].fields.stage, Stage::Offer);
    }

    #[test]
    fn booked_no_keeps_unbooked_only() {
        let leads = fixture();
        let filter = LeadFilter {
            booked: BookedFilter::No,
            ..LeadFilter::default()
        };
        assert!(filter_leads(&leads, &filter).iter().all(|l| !l.fields.booked));
        assert_eq!(filter_leads(&leads, &filter).len(), 2);
    }

    #[test]
    fn other_venue_only_excludes_muse() {
        let leads = vec![lead(Stage::New, Source::Direct, Venue::MuseUrbanVenue, false)];
        let filter = LeadFilter {
            venues: [Venue::CouleurLocale].into_iter().collect(),
            ..LeadFilter::default()
        };
        assert!(filter_leads(&leads, &filter).is_empty());
    }

    #[test]
    fn filtering_twice_changes_nothing() {
        let leads = fixture();
        let filter = LeadFilter {
            stages: [Stage::New, Stage::Booked, Stage::Offer].into_iter().collect(),
            venues: [Venue::CouleurLocale].into_iter().collect(),
            ..LeadFilter::default()
        };
        let once = filter_leads(&leads, &filter);
        assert_eq!(filter_leads(&once, &filter), once);
    }

    #[test]
    fn empty_selection_matches_nothing() {
        let filter = LeadFilter {
            stages: HashSet::new(),
            ..LeadFilter::default()
        };
        assert!(filter_leads(&fixture(), &filter).is_empty());
    }

    #[test]
    fn unrecognized_labels_are_never_selected() {
        let mut odd_source = lead(Stage::New, Source::Direct, Venue::MuseUrbanVenue, false);
        odd_source.unrecognized.insert(FIELD_SOURCE.into(), "Facebook".into());
        let mut odd_booked = lead(Stage::New, Source::Direct, Venue::MuseUrbanVenue, false);
        odd_booked.unrecognized.insert(FIELD_BOOKED.into(), "maybe".into());
        let leads = vec![odd_source, odd_booked.clone()];

        assert_eq!(filter_leads(&leads, &LeadFilter::default()), vec![odd_booked]);
        let no = LeadFilter {
            booked: BookedFilter::No,
            ..LeadFilter::default()
        };
        assert!(filter_leads(&leads, &no).is_empty());
    }
}
