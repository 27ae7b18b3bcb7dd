use std::fmt;

use serde::{Deserialize, Serialize};

/// Tokens read as missing values, matching what common dataframe readers treat as NA.
const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub const NO_MEDAL_LABEL: &str = "No Medal";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
    /// Medal text that names none of the three podium places. Still a medal,
    /// but left out of the gold/silver/bronze breakdown.
    Other,
    #[serde(rename = "No Medal")]
    NoMedal,
}

impl Medal {
    pub const AWARDED: [Medal; 3] = [Medal::Gold, Medal::Silver, Medal::Bronze];

    /// Reads a raw medal cell. Missing values become [`Medal::NoMedal`] and
    /// unrecognized text becomes [`Medal::Other`].
    pub fn parse(raw: &str) -> Medal {
        let Some(value) = non_null(raw) else {
            return Medal::NoMedal;
        };
        match value.to_ascii_lowercase().as_str() {
            "gold" => Medal::Gold,
            "silver" => Medal::Silver,
            "bronze" => Medal::Bronze,
            "no medal" | "nomedal" | "no_medal" => Medal::NoMedal,
            _ => Medal::Other,
        }
    }

    pub fn is_awarded(self) -> bool {
        self != Medal::NoMedal
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Medal::Gold => "Gold",
            Medal::Silver => "Silver",
            Medal::Bronze => "Bronze",
            Medal::Other => "Other",
            Medal::NoMedal => NO_MEDAL_LABEL,
        }
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One athlete entered in one event at one Games, joined with its region.
///
/// Text cells may be blank in the source; such rows are kept and simply drop
/// out of any view keyed on the missing field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AthleteEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    pub sex: Option<String>,
    pub age: Option<f64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub team: Option<String>,
    pub noc: Option<String>,
    pub games: Option<String>,
    pub year: Option<i32>,
    pub season: Option<String>,
    pub city: Option<String>,
    pub sport: Option<String>,
    pub event: Option<String>,
    pub medal: Medal,
    pub region: Option<String>,
    pub notes: Option<String>,
}

impl AthleteEvent {
    pub fn has_medal(&self) -> bool {
        self.medal.is_awarded()
    }

    /// Identity used when counting distinct athletes: the ID column when the
    /// input carries one, otherwise the athlete's name.
    pub fn identity(&self) -> Option<&str> {
        self.id.as_deref().or(self.name.as_deref())
    }
}

/// One medal per country per event per Games.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TeamMedal {
    pub games: Option<String>,
    pub season: Option<String>,
    pub year: Option<i32>,
    pub sport: Option<String>,
    pub event: Option<String>,
    pub noc: String,
    pub medal: Medal,
    pub count: u32,
}

impl TeamMedal {
    /// `None` for rows without a medal or without a NOC to credit it to.
    pub fn from_record(record: &AthleteEvent) -> Option<Self> {
        if !record.has_medal() {
            return None;
        }
        Some(Self {
            games: record.games.clone(),
            season: record.season.clone(),
            year: record.year,
            sport: record.sport.clone(),
            event: record.event.clone(),
            noc: record.noc.clone()?,
            medal: record.medal,
            count: 1,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub noc: String,
    pub region: Option<String>,
    pub notes: Option<String>,
}

pub fn is_null_token(value: &str) -> bool {
    NULL_TOKENS.contains(&value.trim())
}

pub fn non_null(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if is_null_token(trimmed) {
        None
    } else {
        Some(trimmed)
    }
}

pub fn optional_text(value: &str) -> Option<String> {
    non_null(value).map(str::to_string)
}

/// Lenient float parsing: anything unparseable is a missing value.
pub fn parse_lenient_f64(value: &str) -> Option<f64> {
    non_null(value)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Lenient year parsing. Accepts integral floats such as `1996.0`.
pub fn parse_lenient_year(value: &str) -> Option<i32> {
    let trimmed = non_null(value)?;
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }
    let float = trimmed.parse::<f64>().ok()?;
    if float.fract() == 0.0 && float >= i32::MIN as f64 && float <= i32::MAX as f64 {
        Some(float as i32)
    } else {
        None
    }
}
