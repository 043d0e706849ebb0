//! Output rendering: box-drawn tables, JSON and CSV.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::{CliError, Result};

/// Format names accepted by `--format` and the `format` config key.
pub const VALID_FORMATS: [&str; 3] = ["table", "json", "csv"];

/// How a command prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// CSV with a header row
    Csv,
}

impl OutputFormat {
    /// Resolves `--format`, falling back to `configured`.
    pub fn resolve(flag: Option<&str>, configured: OutputFormat) -> Result<Self> {
        match flag {
            Some(flag) => flag.parse(),
            None => Ok(configured),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(CliError::invalid_argument(format!(
                "Unknown format: {}. Supported: json, csv, table",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
        };
        f.write_str(name)
    }
}

/// Serialises `value` as pretty JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Serialises `rows` as CSV with a header row taken from the field names.
pub fn to_csv<T, I>(rows: I) -> Result<String>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CliError::serialisation(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| CliError::serialisation(e.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

/// A plain box-drawn table.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    align: Vec<Align>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Table with the given column headers, all left-aligned.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let align = vec![Align::Left; headers.len()];
        Self {
            headers,
            align,
            rows: Vec::new(),
        }
    }

    /// Right-aligns every column from `first` onwards (numeric columns).
    pub fn right_align_from(mut self, first: usize) -> Self {
        for align in self.align.iter_mut().skip(first) {
            *align = Align::Right;
        }
        self
    }

    /// Appends a row. Missing cells render empty and extra cells are dropped.
    pub fn push<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// Renders the table.
    pub fn render(&self) -> String {
        let widths: Vec<usize> = (0..self.headers.len())
            .map(|col| {
                self.rows
                    .iter()
                    .map(|row| row[col].chars().count())
                    .chain(std::iter::once(self.headers[col].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let rule = |left: &str, mid: &str, right: &str| {
            let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
            format!("{}{}{}\n", left, segments.join(mid), right)
        };
        let line = |cells: &[String], align: &[Align]| {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .zip(align)
                .map(|((cell, width), align)| {
                    let fill = " ".repeat(width - cell.chars().count());
                    match align {
                        Align::Left => format!(" {}{} ", cell, fill),
                        Align::Right => format!(" {}{} ", fill, cell),
                    }
                })
                .collect();
            format!("│{}│\n", padded.join("│"))
        };

        let mut out = rule("┌", "┬", "┐");
        out.push_str(&line(&self.headers, &vec![Align::Left; self.headers.len()]));
        out.push_str(&rule("├", "┼", "┤"));
        for row in &self.rows {
            out.push_str(&line(row, &self.align));
        }
        out.push_str(&rule("└", "┴", "┘"));
        out
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
