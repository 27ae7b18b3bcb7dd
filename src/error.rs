//! Loader error taxonomy.
//!
//! Only conditions that must block a load live here. Blank cells, numeric
//! parse failures, unrecognized medals, unmatched NOC codes and empty view
//! results are not errors.

use thiserror::Error;

/// Which of the two input tables an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Events,
    Regions,
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableKind::Events => f.write_str("athlete events"),
            TableKind::Regions => f.write_str("NOC regions"),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{table} table is missing required column '{column}'")]
    MissingColumn { table: TableKind, column: &'static str },

    #[error("{table} table is empty (no header row)")]
    EmptyInput { table: TableKind },

    #[error("{table} table row {row}: {message}")]
    Decode {
        table: TableKind,
        row: usize,
        message: String,
    },

    #[error("{table} table: {source}")]
    Csv {
        table: TableKind,
        #[source]
        source: csv::Error,
    },
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;
