//! Participation views. Entries are counted, not medals, so every row of the
//! normalized table counts regardless of its medal.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{
    data::AthleteEvent,
    filter::DashboardFilter,
    frequency::{Tally, distinct_by},
    loader::Dataset,
    view::{Matrix, MatrixRow, TableRow, View},
};

pub const DEFAULT_TOP_SPORTS: usize = 20;
pub const DEFAULT_HEATMAP_SPORTS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenderParticipation {
    pub year: i32,
    pub sex: String,
    pub participants: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryParticipation {
    pub year: i32,
    pub noc: String,
    pub sex: String,
    pub participants: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SportEntries {
    pub sport: String,
    pub entries: u64,
}

/// Athletes per (year, sex), each athlete counted once per Games.
pub fn gender_participation(
    dataset: &Dataset,
    filter: &DashboardFilter,
) -> View<Vec<GenderParticipation>> {
    let rows = filter.apply(&dataset.records);
    let unique = distinct_by(&rows, |r| {
        Some((r.games.as_deref(), r.identity()?, r.sex.as_deref()?))
    });
    let tally = unique
        .iter()
        .filter_map(|r| Some((r.year?, r.sex.as_deref()?)))
        .collect::<Tally<_>>();
    View::from_rows(
        tally
            .into_sorted()
            .into_iter()
            .map(|((year, sex), participants)| GenderParticipation {
                year,
                sex: sex.to_string(),
                participants,
            })
            .collect(),
    )
}

/// Athletes per (year, NOC, sex), each athlete counted once per Games and country.
pub fn participation_by_country(
    dataset: &Dataset,
    filter: &DashboardFilter,
) -> View<Vec<CountryParticipation>> {
    let rows = filter.apply(&dataset.records);
    let unique = distinct_by(&rows, |r| {
        Some((
            r.games.as_deref(),
            r.noc.as_deref()?,
            r.sex.as_deref()?,
            r.identity()?,
        ))
    });
    let tally = unique
        .iter()
        .filter_map(|r| Some((r.year?, r.noc.as_deref()?, r.sex.as_deref()?)))
        .collect::<Tally<_>>();
    View::from_rows(
        tally
            .into_sorted()
            .into_iter()
            .map(|((year, noc, sex), participants)| CountryParticipation {
                year,
                noc: noc.to_string(),
                sex: sex.to_string(),
                participants,
            })
            .collect(),
    )
}

fn sport_entries<'a>(
    dataset: &'a Dataset,
    filter: &DashboardFilter,
) -> Vec<&'a AthleteEvent> {
    let rows = filter.apply(&dataset.records);
    distinct_by(&rows, |r| {
        Some((
            r.games.as_deref(),
            r.sport.as_deref()?,
            r.event.as_deref(),
            r.identity()?,
        ))
    })
}

/// Entries per sport (one per athlete per event per Games), most popular first.
pub fn sport_popularity(
    dataset: &Dataset,
    filter: &DashboardFilter,
    top: usize,
) -> View<Vec<SportEntries>> {
    let tally = sport_entries(dataset, filter)
        .iter()
        .filter_map(|r| r.sport.as_deref())
        .collect::<Tally<_>>();
    View::from_rows(
        tally
            .into_ranked(top)
            .into_iter()
            .map(|(sport, entries)| SportEntries {
                sport: sport.to_string(),
                entries,
            })
            .collect(),
    )
}

/// Sport x year entry counts for the `top` most popular sports.
/// Rows follow popularity order, columns run by year ascending.
pub fn sport_heatmap(dataset: &Dataset, filter: &DashboardFilter, top: usize) -> View<Matrix> {
    let entries = sport_entries(dataset, filter);
    let ranked = entries
        .iter()
        .filter_map(|r| r.sport.as_deref())
        .collect::<Tally<_>>()
        .into_ranked(top);

    let mut cells: BTreeMap<(&str, i32), u64> = BTreeMap::new();
    let mut years = BTreeSet::new();
    for entry in &entries {
        let (Some(sport), Some(year)) = (entry.sport.as_deref(), entry.year) else {
            continue;
        };
        if ranked.iter().any(|(ranked_sport, _)| *ranked_sport == sport) {
            *cells.entry((sport, year)).or_insert(0) += 1;
            years.insert(year);
        }
    }
    if cells.is_empty() {
        return View::NoData;
    }

    let years = years.into_iter().collect::<Vec<_>>();
    let rows = ranked
        .iter()
        .map(|(sport, _)| MatrixRow {
            label: sport.to_string(),
            values: years
                .iter()
                .map(|year| cells.get(&(*sport, *year)).copied().unwrap_or(0))
                .collect(),
        })
        .collect();
    View::Data(Matrix {
        row_header: "Sport".to_string(),
        columns: years.iter().map(i32::to_string).collect(),
        rows,
    })
}

impl TableRow for GenderParticipation {
    fn headers() -> Vec<String> {
        vec!["Year".into(), "Sex".into(), "Participants".into()]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            self.sex.clone(),
            self.participants.to_string(),
        ]
    }
}

impl TableRow for CountryParticipation {
    fn headers() -> Vec<String> {
        vec![
            "Year".into(),
            "NOC".into(),
            "Sex".into(),
            "Participants".into(),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            self.noc.clone(),
            self.sex.clone(),
            self.participants.to_string(),
        ]
    }
}

impl TableRow for SportEntries {
    fn headers() -> Vec<String> {
        vec!["Sport".into(), "Entries".into()]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.sport.clone(), self.entries.to_string()]
    }
}
