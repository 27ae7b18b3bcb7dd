//! Headline figures for the current filter selection.

use std::collections::HashSet;

use serde::Serialize;

use crate::{
    filter::DashboardFilter,
    loader::Dataset,
    view::{Grid, ToGrid},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Kpis {
    /// Team-adjusted medal count.
    pub total_medals: u64,
    pub unique_athletes: usize,
    pub countries: usize,
    pub sports: usize,
}

/// All-zero figures are the well-defined result for an empty selection.
pub fn compute_kpis(dataset: &Dataset, filter: &DashboardFilter) -> Kpis {
    let records = filter.apply(&dataset.records);
    let medals = filter.apply(&dataset.team_medals);

    let total_medals = medals.iter().map(|m| u64::from(m.count)).sum();
    let has_ids = records.iter().any(|r| r.id.is_some());
    let unique_athletes = if has_ids {
        records
            .iter()
            .filter_map(|r| r.id.as_deref())
            .collect::<HashSet<_>>()
            .len()
    } else {
        // Approximate: two athletes sharing a name in the same event and year count once.
        records
            .iter()
            .map(|r| (r.name.as_deref(), r.year, r.event.as_deref()))
            .collect::<HashSet<_>>()
            .len()
    };
    let countries = records
        .iter()
        .filter_map(|r| r.noc.as_deref())
        .collect::<HashSet<_>>()
        .len();
    let sports = records
        .iter()
        .filter_map(|r| r.sport.as_deref())
        .collect::<HashSet<_>>()
        .len();

    Kpis {
        total_medals,
        unique_athletes,
        countries,
        sports,
    }
}

impl ToGrid for Kpis {
    fn to_grid(&self) -> Grid {
        let figures = [
            ("Total medals (team-adjusted)", self.total_medals.to_string()),
            ("Unique athletes", self.unique_athletes.to_string()),
            ("Countries participated", self.countries.to_string()),
            ("Sports", self.sports.to_string()),
        ];
        Grid {
            headers: vec!["metric".to_string(), "value".to_string()],
            rows: figures
                .into_iter()
                .map(|(label, value)| vec![label.to_string(), value])
                .collect(),
        }
    }
}
