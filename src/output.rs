//! Emits view results as text tables, CSV or JSON.

use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    filter::FilterOptions,
    io_utils,
    kpi::Kpis,
    table,
    view::{Grid, ToGrid, View},
};

pub const NO_DATA_MESSAGE: &str = "No data to display";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[value(rename_all = "kebab-case")]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

/// Something the CLI can print: either a bare result or a [`View`] that may be empty.
pub trait Emit: Serialize {
    fn grid(&self) -> Option<Grid>;
}

impl<T: ToGrid + Serialize> Emit for View<T> {
    fn grid(&self) -> Option<Grid> {
        match self {
            View::Data(data) => Some(data.to_grid()),
            View::NoData => None,
        }
    }
}

impl Emit for Kpis {
    fn grid(&self) -> Option<Grid> {
        Some(self.to_grid())
    }
}

impl Emit for FilterOptions {
    fn grid(&self) -> Option<Grid> {
        Some(self.to_grid())
    }
}

pub fn write_section<W: Write, E: Emit + ?Sized>(
    writer: &mut W,
    title: &str,
    value: &E,
    format: OutputFormat,
    delimiter: u8,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let rendered = match value.grid() {
                Some(grid) => table::render_section(title, &grid.headers, &grid.rows),
                None => format!("{title}\n{}\n{NO_DATA_MESSAGE}\n", "=".repeat(title.chars().count())),
            };
            writer
                .write_all(rendered.as_bytes())
                .with_context(|| format!("Writing table for '{title}'"))?;
        }
        OutputFormat::Csv => {
            if let Some(grid) = value.grid() {
                let mut csv_writer = io_utils::csv_writer(&mut *writer, delimiter);
                csv_writer
                    .write_record(&grid.headers)
                    .context("Writing CSV headers")?;
                for row in &grid.rows {
                    csv_writer.write_record(row).context("Writing CSV row")?;
                }
                csv_writer.flush().context("Flushing CSV output")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, value).context("Serializing JSON output")?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
