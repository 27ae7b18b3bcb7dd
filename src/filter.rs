//! Season, year-range and country predicates shared by every view.

use std::{collections::BTreeSet, fmt, str::FromStr};

use anyhow::{Result, anyhow, ensure};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    data::{AthleteEvent, TeamMedal},
    loader::Dataset,
    view::{Grid, ToGrid},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "kebab-case")]
#[serde(rename_all = "lowercase")]
pub enum SeasonFilter {
    #[default]
    Both,
    Summer,
    Winter,
}

impl SeasonFilter {
    /// A blank season only passes when no season is selected.
    fn accepts(self, season: Option<&str>) -> bool {
        match (self, season) {
            (SeasonFilter::Both, _) => true,
            (SeasonFilter::Summer, Some(season)) => season.eq_ignore_ascii_case("Summer"),
            (SeasonFilter::Winter, Some(season)) => season.eq_ignore_ascii_case("Winter"),
            (_, None) => false,
        }
    }
}

/// Inclusive year range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self> {
        ensure!(
            start <= end,
            "Year range start ({start}) is after its end ({end})"
        );
        Ok(Self { start, end })
    }

    pub fn contains(&self, year: Option<i32>) -> bool {
        year.is_some_and(|y| y >= self.start && y <= self.end)
    }
}

impl FromStr for YearRange {
    type Err = anyhow::Error;

    /// Accepts `1996`, `1996:2016` or `1996-2016`.
    fn from_str(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let parse = |part: &str| {
            part.trim()
                .parse::<i32>()
                .map_err(|_| anyhow!("Invalid year '{}' in range '{trimmed}'", part.trim()))
        };
        match trimmed.split_once([':', '-']) {
            Some((start, end)) => YearRange::new(parse(start)?, parse(end)?),
            None => {
                let year = parse(trimmed)?;
                YearRange::new(year, year)
            }
        }
    }
}

impl TryFrom<String> for YearRange {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<YearRange> for String {
    fn from(range: YearRange) -> Self {
        range.to_string()
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Anything a [`DashboardFilter`] can select on.
pub trait Filterable {
    fn season(&self) -> Option<&str>;
    fn year(&self) -> Option<i32>;
    fn noc(&self) -> Option<&str>;
}

impl Filterable for AthleteEvent {
    fn season(&self) -> Option<&str> {
        self.season.as_deref()
    }
    fn year(&self) -> Option<i32> {
        self.year
    }
    fn noc(&self) -> Option<&str> {
        self.noc.as_deref()
    }
}

impl Filterable for TeamMedal {
    fn season(&self) -> Option<&str> {
        self.season.as_deref()
    }
    fn year(&self) -> Option<i32> {
        self.year
    }
    fn noc(&self) -> Option<&str> {
        Some(&self.noc)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardFilter {
    pub season: SeasonFilter,
    pub years: Option<YearRange>,
    pub countries: Option<BTreeSet<String>>,
}

impl DashboardFilter {
    pub fn new(
        season: SeasonFilter,
        years: Option<YearRange>,
        countries: impl IntoIterator<Item = String>,
    ) -> Self {
        let countries = countries
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect::<BTreeSet<_>>();
        Self {
            season,
            years,
            countries: (!countries.is_empty()).then_some(countries),
        }
    }

    pub fn matches<T: Filterable + ?Sized>(&self, row: &T) -> bool {
        if !self.season.accepts(row.season()) {
            return false;
        }
        if let Some(range) = &self.years
            && !range.contains(row.year())
        {
            return false;
        }
        match &self.countries {
            Some(countries) => row.noc().is_some_and(|noc| countries.contains(noc)),
            None => true,
        }
    }

    /// Borrowed subset of `rows` passing every active predicate, in input order.
    pub fn apply<'a, T: Filterable>(&self, rows: &'a [T]) -> Vec<&'a T> {
        rows.iter().filter(|row| self.matches(*row)).collect()
    }

    pub fn describe(&self) -> String {
        let season = format!("{:?}", self.season).to_lowercase();
        let years = self
            .years
            .map(|r| r.to_string())
            .unwrap_or_else(|| "all".to_string());
        let countries = self
            .countries
            .as_ref()
            .map(|c| c.iter().cloned().collect::<Vec<_>>().join(","))
            .unwrap_or_else(|| "all".to_string());
        format!("season={season} years={years} countries={countries}")
    }
}

/// Choices offered for each filter, derived from the loaded records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub seasons: Vec<String>,
    pub years: Vec<i32>,
    pub countries: Vec<String>,
}

pub fn filter_options(dataset: &Dataset) -> FilterOptions {
    let mut seasons = BTreeSet::new();
    let mut years = BTreeSet::new();
    let mut countries = BTreeSet::new();
    for record in &dataset.records {
        seasons.extend(record.season.as_deref());
        years.extend(record.year);
        countries.extend(record.noc.as_deref());
    }
    FilterOptions {
        seasons: seasons.into_iter().map(str::to_string).collect(),
        years: years.into_iter().collect(),
        countries: countries.into_iter().map(str::to_string).collect(),
    }
}

impl ToGrid for FilterOptions {
    fn to_grid(&self) -> Grid {
        let years = self.years.iter().map(i32::to_string).collect::<Vec<_>>();
        Grid {
            headers: vec!["Filter".to_string(), "Choices".to_string()],
            rows: vec![
                vec!["Season".to_string(), self.seasons.join(", ")],
                vec!["Year".to_string(), years.join(", ")],
                vec!["NOC".to_string(), self.countries.join(", ")],
            ],
        }
    }
}
