#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use olympic_stats::{
    filter::{DashboardFilter, SeasonFilter, YearRange},
    loader::{self, Dataset, LoadOptions},
};
use tempfile::{TempDir, tempdir};

pub const EVENTS_FIXTURE: &str = "athlete_events_sample.csv";
pub const REGIONS_FIXTURE: &str = "noc_regions_sample.csv";

pub const EVENTS_HEADER: &str =
    "ID,Name,Sex,Age,Height,Weight,Team,NOC,Games,Year,Season,City,Sport,Event,Medal";

/// Returns the absolute path to a fixture under `tests/data`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

pub fn fixture_bytes(name: &str) -> Vec<u8> {
    fs::read(fixture_path(name)).expect("read fixture")
}

/// Loads the bundled sample tables with default options.
pub fn sample_dataset() -> Dataset {
    loader::load_dataset(
        &fixture_bytes(EVENTS_FIXTURE),
        &fixture_bytes(REGIONS_FIXTURE),
        &LoadOptions::default(),
    )
    .expect("load sample dataset")
}

/// Builds an athlete-events CSV from data lines under the standard header.
pub fn events_csv(rows: &[&str]) -> String {
    let mut csv = String::from(EVENTS_HEADER);
    csv.push('\n');
    for row in rows {
        csv.push_str(row);
        csv.push('\n');
    }
    csv
}

pub fn no_filter() -> DashboardFilter {
    DashboardFilter::default()
}

pub fn filter(
    season: SeasonFilter,
    years: Option<(i32, i32)>,
    countries: &[&str],
) -> DashboardFilter {
    DashboardFilter::new(
        season,
        years.map(|(start, end)| YearRange::new(start, end).expect("valid range")),
        countries.iter().map(|c| c.to_string()),
    )
}

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(contents.as_bytes())
            .expect("write temp file contents");
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.temp_dir.path().join(name)).expect("read temp file")
    }
}
