//! Header resolution for the two input tables.
//!
//! Header names are trimmed before lookup. A column is matched exactly first
//! and case-insensitively second, so `noc` resolves when `NOC` is absent.
//! Required columns that cannot be found stop the load with
//! [`LoadError::MissingColumn`].

use crate::error::{LoadError, LoadResult, TableKind};

pub const COL_ID: &str = "ID";
pub const COL_NAME: &str = "Name";
pub const COL_SEX: &str = "Sex";
pub const COL_AGE: &str = "Age";
pub const COL_HEIGHT: &str = "Height";
pub const COL_WEIGHT: &str = "Weight";
pub const COL_TEAM: &str = "Team";
pub const COL_NOC: &str = "NOC";
pub const COL_GAMES: &str = "Games";
pub const COL_YEAR: &str = "Year";
pub const COL_SEASON: &str = "Season";
pub const COL_CITY: &str = "City";
pub const COL_SPORT: &str = "Sport";
pub const COL_EVENT: &str = "Event";
pub const COL_MEDAL: &str = "Medal";
pub const COL_REGION: &str = "region";
pub const COL_NOTES: &str = "notes";

pub const REQUIRED_EVENT_COLUMNS: &[&str] = &[
    COL_NAME, COL_SEX, COL_NOC, COL_GAMES, COL_YEAR, COL_SEASON, COL_SPORT, COL_EVENT, COL_MEDAL,
];
pub const REQUIRED_REGION_COLUMNS: &[&str] = &[COL_NOC, COL_REGION];

pub fn trim_headers(headers: &[String]) -> Vec<String> {
    headers.iter().map(|h| h.trim().to_string()).collect()
}

pub fn column_index(headers: &[String], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .or_else(|| headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
}

fn require(headers: &[String], table: TableKind, name: &'static str) -> LoadResult<usize> {
    column_index(headers, name).ok_or(LoadError::MissingColumn {
        table,
        column: name,
    })
}

/// Positions of the athlete-events columns within a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventColumns {
    pub id: Option<usize>,
    pub name: usize,
    pub sex: usize,
    pub age: Option<usize>,
    pub height: Option<usize>,
    pub weight: Option<usize>,
    pub team: Option<usize>,
    pub noc: usize,
    pub games: usize,
    pub year: usize,
    pub season: usize,
    pub city: Option<usize>,
    pub sport: usize,
    pub event: usize,
    pub medal: usize,
}

impl EventColumns {
    pub fn resolve(headers: &[String]) -> LoadResult<Self> {
        let table = TableKind::Events;
        // Report the first missing column in declaration order.
        for name in REQUIRED_EVENT_COLUMNS {
            require(headers, table, name)?;
        }
        Ok(Self {
            id: column_index(headers, COL_ID),
            name: require(headers, table, COL_NAME)?,
            sex: require(headers, table, COL_SEX)?,
            age: column_index(headers, COL_AGE),
            height: column_index(headers, COL_HEIGHT),
            weight: column_index(headers, COL_WEIGHT),
            team: column_index(headers, COL_TEAM),
            noc: require(headers, table, COL_NOC)?,
            games: require(headers, table, COL_GAMES)?,
            year: require(headers, table, COL_YEAR)?,
            season: require(headers, table, COL_SEASON)?,
            city: column_index(headers, COL_CITY),
            sport: require(headers, table, COL_SPORT)?,
            event: require(headers, table, COL_EVENT)?,
            medal: require(headers, table, COL_MEDAL)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionColumns {
    pub noc: usize,
    pub region: usize,
    pub notes: Option<usize>,
}

impl RegionColumns {
    pub fn resolve(headers: &[String]) -> LoadResult<Self> {
        let table = TableKind::Regions;
        Ok(Self {
            noc: require(headers, table, COL_NOC)?,
            region: require(headers, table, COL_REGION)?,
            notes: column_index(headers, COL_NOTES),
        })
    }
}

pub fn field(record: &[String], idx: usize) -> &str {
    record.get(idx).map(String::as_str).unwrap_or("")
}

pub fn optional_field(record: &[String], idx: Option<usize>) -> &str {
    idx.map(|i| field(record, i)).unwrap_or("")
}
