//! Translation between raw CSV rows and domain records.

use std::collections::HashMap;

use cps_model::{MATURITY_UNSPECIFIED, Record, Value};
use tracing::{debug, warn};

use crate::column_map::{Columns, ImportRule};
use crate::dates::DateAdapter;
use crate::error::{CsvError, Result};

/// Fixed column order for one export batch.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    columns: Vec<&'static str>,
    positions: HashMap<&'static str, usize>,
}

impl ColumnLayout {
    /// Derives the layout from a record's datum iteration order.
    pub fn from_record<R>(record: &R) -> Self
    where
        R: Record,
        R::Field: Columns,
    {
        let columns: Vec<&'static str> = record
            .datums()
            .iter()
            .map(|datum| datum.field.column_name())
            .collect();
        let positions = columns
            .iter()
            .enumerate()
            .map(|(idx, name)| (*name, idx))
            .collect();
        Self { columns, positions }
    }

    pub fn headers(&self) -> &[&'static str] {
        &self.columns
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.positions.get(column).copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Renders a record as a row aligned to `layout`.
///
/// Non-concrete datums export as empty strings; dates use the adapter's
/// canonical format.
pub fn record_to_row<R>(record: &R, layout: &ColumnLayout, dates: &DateAdapter) -> Result<Vec<String>>
where
    R: Record,
    R::Field: Columns,
{
    let mut row = vec![String::new(); layout.len()];
    for datum in record.datums() {
        let column = datum.field.column_name();
        let idx = layout
            .position(column)
            .ok_or_else(|| CsvError::UnknownExportColumn {
                column: column.to_string(),
            })?;
        if !datum.concrete {
            continue;
        }
        row[idx] = match &datum.value {
            Value::Date(date) => dates.format(*date),
            other => other.to_string(),
        };
    }
    Ok(row)
}

/// Import header with each position resolved to a field once.
#[derive(Debug, Clone)]
pub struct HeaderMap<F> {
    headers: Vec<String>,
    fields: Vec<Option<F>>,
}

impl<F: Columns> HeaderMap<F> {
    pub fn resolve<I, S>(headers: I, case_insensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let headers: Vec<String> = headers
            .into_iter()
            .map(|header| normalize_header(header.as_ref()))
            .collect();
        let fields = headers
            .iter()
            .map(|header| {
                let field = if case_insensitive {
                    F::from_column_name_ignore_case(header)
                } else {
                    F::from_column_name(header)
                };
                if field.is_none() {
                    debug!(
                        column = %header,
                        record_type = %F::RECORD_TYPE,
                        "ignoring unrecognized column"
                    );
                }
                field
            })
            .collect();
        Self { headers, fields }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub fn field_at(&self, idx: usize) -> Option<F> {
        self.fields.get(idx).copied().flatten()
    }

    /// Position of the first column mapped to `field`.
    pub fn position_of(&self, field: F) -> Option<usize> {
        self.fields.iter().position(|f| *f == Some(field))
    }

    /// Headers that map to no field.
    pub fn unknown_headers(&self) -> Vec<&str> {
        self.headers
            .iter()
            .zip(&self.fields)
            .filter(|(_, field)| field.is_none())
            .map(|(header, _)| header.as_str())
            .collect()
    }
}

/// Strips a byte order mark and surrounding whitespace.
pub(crate) fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

/// Builds a record from one data row.
///
/// Unknown columns and empty cells are skipped. Values that cannot be parsed
/// are logged and leave the field unset. `row_number` is only used in log
/// output.
pub fn row_to_record<R, S>(
    header: &HeaderMap<R::Field>,
    row: &[S],
    row_number: usize,
    dates: &DateAdapter,
) -> R
where
    R: Record,
    R::Field: Columns,
    S: AsRef<str>,
{
    let mut record = R::default();
    for (idx, cell) in row.iter().enumerate() {
        let Some(field) = header.field_at(idx) else {
            continue;
        };
        let raw = cell.as_ref();
        if raw.trim().is_empty() {
            continue;
        }
        let column = field.column_name();
        let value = match field.import_rule() {
            ImportRule::Raw => Value::text(raw),
            ImportRule::Date => match dates.parse(raw) {
                Some(date) => Value::Date(date),
                None => {
                    warn!(row = row_number, column, value = raw, "unparseable date, field left unset");
                    continue;
                }
            },
            ImportRule::MaturityDays => match raw.trim().parse::<i64>() {
                Ok(days) if days <= 0 => Value::Integer(MATURITY_UNSPECIFIED),
                Ok(days) => Value::Integer(days),
                Err(_) => {
                    warn!(row = row_number, column, value = raw, "unparseable maturity, field left unset");
                    continue;
                }
            },
        };
        if let Err(error) = record.set(field, value) {
            warn!(row = row_number, column, %error, "field left unset");
        }
    }
    record
}
