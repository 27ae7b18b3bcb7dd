use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    filter::{SeasonFilter, YearRange},
    output::OutputFormat,
};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Explore Olympic medals, participation and sport popularity",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Headline figures: team-adjusted medals, athletes, countries, sports
    Summary(ViewArgs),
    /// Team-adjusted medals per year and NOC
    MedalsOverTime(ViewArgs),
    /// Year x NOC pivot of team-adjusted medals
    MedalTable(ViewArgs),
    /// Countries ranked by team-adjusted medals
    TopCountries(RankedArgs),
    /// Gold, silver and bronze counts per NOC
    MedalBreakdown(ViewArgs),
    /// Distinct athletes per year and sex
    Gender(ViewArgs),
    /// Distinct athletes per year, NOC and sex
    Participation(ViewArgs),
    /// Sports ranked by number of entries
    Sports(RankedArgs),
    /// Sport x year entry counts for the most popular sports
    SportHeatmap(RankedArgs),
    /// Athletes ranked by medal count
    TopAthletes(RankedArgs),
    /// Every view in one run
    Report(ViewArgs),
    /// List the seasons, years and NOC codes available for filtering
    Options(OptionsArgs),
}

#[derive(Debug, Clone, Args)]
pub struct DatasetArgs {
    /// athlete_events table (use '-' for stdin)
    #[arg(short = 'e', long = "events")]
    pub events: Option<PathBuf>,
    /// noc_regions table
    #[arg(short = 'r', long = "regions")]
    pub regions: Option<PathBuf>,
    /// CSV delimiter character for both inputs (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the inputs (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// YAML file with default filters, limits and input paths
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct FilterArgs {
    /// Restrict to one season
    #[arg(long, value_enum)]
    pub season: Option<SeasonFilter>,
    /// Inclusive year range such as `1996`, `1960:2016` or `1960-2016`
    #[arg(long)]
    pub years: Option<YearRange>,
    /// NOC codes to include (comma-separated or repeated); all when omitted
    #[arg(long = "country", value_delimiter = ',', action = clap::ArgAction::Append)]
    pub countries: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
    /// Output file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct ViewArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
    #[command(flatten)]
    pub filter: FilterArgs,
    #[command(flatten)]
    pub output: OutputArgs,
}

/// Inputs and output only; the options listing covers the whole dataset.
#[derive(Debug, Clone, Args)]
pub struct OptionsArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,
    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Args)]
pub struct RankedArgs {
    #[command(flatten)]
    pub view: ViewArgs,
    /// Number of entries to keep (0 = all)
    #[arg(long)]
    pub top: Option<usize>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
