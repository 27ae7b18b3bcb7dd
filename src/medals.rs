//! Team-adjusted medal views: over time, pivot table, rankings and breakdown.

use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use serde::Serialize;

use crate::{
    data::Medal,
    filter::DashboardFilter,
    frequency::{Tally, distinct_by},
    loader::Dataset,
    view::{Matrix, MatrixRow, TableRow, View},
};

pub const DEFAULT_TOP_COUNTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearMedals {
    pub year: i32,
    pub noc: String,
    pub medals: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryMedals {
    pub noc: String,
    pub medals: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedalCount {
    pub noc: String,
    pub medal: Medal,
    pub count: u64,
}

/// Team medals summed per (year, NOC), year ascending then NOC.
/// Medals without a usable year are left out of the series.
pub fn medals_over_time(dataset: &Dataset, filter: &DashboardFilter) -> View<Vec<YearMedals>> {
    let mut tally = Tally::new();
    for medal in filter.apply(&dataset.team_medals) {
        if let Some(year) = medal.year {
            tally.add((year, medal.noc.as_str()), u64::from(medal.count));
        }
    }
    View::from_rows(
        tally
            .into_sorted()
            .into_iter()
            .map(|((year, noc), medals)| YearMedals {
                year,
                noc: noc.to_string(),
                medals,
            })
            .collect(),
    )
}

/// Regroups a medals-over-time result into one `(year, medals)` series per NOC.
pub fn series(rows: &[YearMedals]) -> BTreeMap<String, Vec<(i32, u64)>> {
    let mut series: BTreeMap<String, Vec<(i32, u64)>> = BTreeMap::new();
    for row in rows {
        series
            .entry(row.noc.clone())
            .or_default()
            .push((row.year, row.medals));
    }
    series
}

/// Year x NOC pivot of the medals-over-time view.
pub fn medal_table(dataset: &Dataset, filter: &DashboardFilter) -> View<Matrix> {
    let View::Data(rows) = medals_over_time(dataset, filter) else {
        return View::NoData;
    };
    let columns = rows
        .iter()
        .map(|r| r.noc.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();
    let position = columns
        .iter()
        .enumerate()
        .map(|(idx, noc)| (noc.as_str(), idx))
        .collect::<BTreeMap<_, _>>();

    let matrix_rows = rows
        .iter()
        .chunk_by(|r| r.year)
        .into_iter()
        .map(|(year, group)| {
            let mut values = vec![0u64; columns.len()];
            for row in group {
                values[position[row.noc.as_str()]] += row.medals;
            }
            MatrixRow {
                label: year.to_string(),
                values,
            }
        })
        .collect::<Vec<_>>();

    View::Data(Matrix {
        row_header: "Year".to_string(),
        columns,
        rows: matrix_rows,
    })
}

pub fn top_countries(
    dataset: &Dataset,
    filter: &DashboardFilter,
    top: usize,
) -> View<Vec<CountryMedals>> {
    let mut tally = Tally::new();
    for medal in filter.apply(&dataset.team_medals) {
        tally.add(medal.noc.as_str(), u64::from(medal.count));
    }
    View::from_rows(
        tally
            .into_ranked(top)
            .into_iter()
            .map(|(noc, medals)| CountryMedals {
                noc: noc.to_string(),
                medals,
            })
            .collect(),
    )
}

/// Gold/silver/bronze per NOC, computed from the full table with one row per
/// (games, event, medal, NOC). Ordered by NOC, then medal rank.
pub fn medal_breakdown(dataset: &Dataset, filter: &DashboardFilter) -> View<Vec<MedalCount>> {
    let medal_rows = filter
        .apply(&dataset.records)
        .into_iter()
        .filter(|r| Medal::AWARDED.contains(&r.medal))
        .collect::<Vec<_>>();
    let unique = distinct_by(&medal_rows, |r| {
        Some((r.games.as_deref(), r.event.as_deref(), r.medal, r.noc.as_deref()?))
    });
    let tally = unique
        .iter()
        .filter_map(|r| Some((r.noc.as_deref()?, r.medal)))
        .collect::<Tally<_>>();
    View::from_rows(
        tally
            .into_sorted()
            .into_iter()
            .map(|((noc, medal), count)| MedalCount {
                noc: noc.to_string(),
                medal,
                count,
            })
            .collect(),
    )
}

impl TableRow for YearMedals {
    fn headers() -> Vec<String> {
        vec!["Year".into(), "NOC".into(), "Medals".into()]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.year.to_string(), self.noc.clone(), self.medals.to_string()]
    }
}

impl TableRow for CountryMedals {
    fn headers() -> Vec<String> {
        vec!["NOC".into(), "Medals".into()]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.noc.clone(), self.medals.to_string()]
    }
}

impl TableRow for MedalCount {
    fn headers() -> Vec<String> {
        vec!["NOC".into(), "Medal".into(), "Count".into()]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.noc.clone(),
            self.medal.to_string(),
            self.count.to_string(),
        ]
    }
}
