use std::path::PathBuf;

use chrono::NaiveDate;
use cps_csv::{Columns, ImportRule};
use cps_model::{FieldId, FieldKind, Record, RecordType};

/// What `cps import` found in a file.
#[derive(Debug)]
pub struct ImportReport {
    pub path: PathBuf,
    pub record_type: RecordType,
    pub records: usize,
    pub columns: Vec<ColumnCount>,
    pub highlights: Highlights,
}

/// How many records carry a concrete value for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnCount {
    pub column: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub concrete: usize,
}

/// Per record type facts shown under the column table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Highlights {
    Crops {
        base_crops: usize,
        varieties: usize,
    },
    Plantings {
        ignored: usize,
        first_planting: Option<NaiveDate>,
        last_harvest: Option<NaiveDate>,
    },
}

/// One line of `cps columns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub column: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub rule: ImportRule,
}

impl ColumnInfo {
    pub fn of<F: Columns>(field: F) -> Self {
        Self {
            column: field.column_name(),
            label: field.label(),
            kind: field.kind(),
            rule: field.import_rule(),
        }
    }
}

pub fn column_counts<R>(records: &[R]) -> Vec<ColumnCount>
where
    R: Record,
    R::Field: Columns,
{
    R::Field::ALL
        .iter()
        .map(|&field| ColumnCount {
            column: field.column_name(),
            label: field.label(),
            kind: field.kind(),
            concrete: records
                .iter()
                .filter(|record| record.is_concrete(field))
                .count(),
        })
        .collect()
}
