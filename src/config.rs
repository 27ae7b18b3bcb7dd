//! Optional YAML configuration supplying defaults for the command line.
//!
//! ```yaml
//! events: data/athlete_events.csv
//! regions: data/noc_regions.csv
//! season: summer
//! years: "1960:2016"
//! countries: [USA, URS, CHN, GBR, IND]
//! format: table
//! top:
//!   countries: 12
//!   athletes: 20
//! ```
//!
//! Flags given on the command line always win over the file.

use std::{fs::File, io::BufReader, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    athletes::DEFAULT_TOP_ATHLETES,
    filter::{SeasonFilter, YearRange},
    medals::DEFAULT_TOP_COUNTRIES,
    output::OutputFormat,
    participation::{DEFAULT_HEATMAP_SPORTS, DEFAULT_TOP_SPORTS},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub events: Option<PathBuf>,
    pub regions: Option<PathBuf>,
    pub season: Option<SeasonFilter>,
    pub years: Option<YearRange>,
    pub countries: Vec<String>,
    pub format: Option<OutputFormat>,
    pub top: TopLimits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TopLimits {
    pub countries: usize,
    pub athletes: usize,
    pub sports: usize,
    pub heatmap_sports: usize,
}

impl Default for TopLimits {
    fn default() -> Self {
        Self {
            countries: DEFAULT_TOP_COUNTRIES,
            athletes: DEFAULT_TOP_ATHLETES,
            sports: DEFAULT_TOP_SPORTS,
            heatmap_sports: DEFAULT_HEATMAP_SPORTS,
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Opening config file {path:?}"))?;
        let reader = BufReader::new(file);
        let config: DashboardConfig =
            serde_yaml::from_reader(reader).context("Parsing config YAML")?;
        Ok(config)
    }

    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let yaml = "season: winter\nyears: \"1994:2014\"\ntop:\n  athletes: 5\n";
        let config: DashboardConfig = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(config.season, Some(SeasonFilter::Winter));
        assert_eq!(config.years, Some(YearRange::new(1994, 2014).unwrap()));
        assert_eq!(config.top.athletes, 5);
        assert_eq!(config.top.countries, DEFAULT_TOP_COUNTRIES);
        assert!(config.countries.is_empty());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_yaml::from_str::<DashboardConfig>("colour: red\n").is_err());
    }

    #[test]
    fn inverted_year_range_is_rejected() {
        assert!(serde_yaml::from_str::<DashboardConfig>("years: \"2016:1896\"\n").is_err());
    }
}
