//! View results shared by every aggregation.
//!
//! A view either carries data or is explicitly [`View::NoData`]; callers never
//! have to guess whether an empty vector means "nothing matched".

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum View<T> {
    Data(T),
    NoData,
}

impl<T> View<Vec<T>> {
    pub fn from_rows(rows: Vec<T>) -> Self {
        if rows.is_empty() {
            View::NoData
        } else {
            View::Data(rows)
        }
    }

    pub fn rows(&self) -> &[T] {
        match self {
            View::Data(rows) => rows,
            View::NoData => &[],
        }
    }
}

impl<T> View<T> {
    pub fn is_no_data(&self) -> bool {
        matches!(self, View::NoData)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            View::Data(data) => Some(data),
            View::NoData => None,
        }
    }
}

/// A row type that knows how to present itself as table cells.
pub trait TableRow {
    fn headers() -> Vec<String>;
    fn cells(&self) -> Vec<String>;
}

/// Plain string grid handed to the renderers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Grid {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub trait ToGrid {
    fn to_grid(&self) -> Grid;
}

impl<T: TableRow> ToGrid for Vec<T> {
    fn to_grid(&self) -> Grid {
        Grid {
            headers: T::headers(),
            rows: self.iter().map(TableRow::cells).collect(),
        }
    }
}

/// Labelled counts laid out as rows x columns, missing cells as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Matrix {
    pub row_header: String,
    pub columns: Vec<String>,
    pub rows: Vec<MatrixRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixRow {
    pub label: String,
    pub values: Vec<u64>,
}

impl Matrix {
    pub fn cell(&self, row: &str, column: &str) -> Option<u64> {
        let col_idx = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|r| r.label == row)
            .and_then(|r| r.values.get(col_idx).copied())
    }
}

impl ToGrid for Matrix {
    fn to_grid(&self) -> Grid {
        let mut headers = Vec::with_capacity(self.columns.len() + 1);
        headers.push(self.row_header.clone());
        headers.extend(self.columns.iter().cloned());
        let rows = self
            .rows
            .iter()
            .map(|row| {
                std::iter::once(row.label.clone())
                    .chain(row.values.iter().map(u64::to_string))
                    .collect()
            })
            .collect();
        Grid { headers, rows }
    }
}

impl<T: ToGrid> ToGrid for View<T> {
    fn to_grid(&self) -> Grid {
        match self {
            View::Data(data) => data.to_grid(),
            View::NoData => Grid::default(),
        }
    }
}
