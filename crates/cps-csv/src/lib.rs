//! CSV import and export for crop planning records.
//!
//! This crate translates between CSV sheets and the record types of
//! `cps-model`.
//!
//! # Features
//!
//! - **Column Map**: fixed column name for every crop and planting field
//! - **Date Adapter**: tolerant date parsing, one canonical output format
//! - **Translation**: sparse export of records, unknown-column tolerant import
//! - **Files**: comment-framed export with atomic replace, whole-file import
//! - **Crop Table**: base-crop lookup over a loaded crop list
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use cps_csv::{CsvOptions, export_crop_plan, import_crop_plan};
//!
//! let options = CsvOptions::default();
//! let plantings = import_crop_plan(Path::new("plan.csv"), &options)?;
//! export_crop_plan(Path::new("plan-2025.csv"), "2025", &plantings, &options)?;
//! ```

mod column_map;
mod dates;
mod error;
mod options;
mod reader;
mod table;
mod translate;
mod writer;

// === Error Types ===
pub use error::{CsvError, Result};

// === Configuration ===
pub use options::{
    CsvOptions, DEFAULT_ATTRIBUTION, DEFAULT_EXTENSION, DEFAULT_SOURCE_URL, DateFormats,
};

// === Column Map ===
pub use column_map::{
    Columns, ImportRule, column_name_for_field, column_names, field_for_column_name,
};

// === Dates ===
pub use dates::DateAdapter;

// === Translation ===
pub use translate::{ColumnLayout, HeaderMap, record_to_row, row_to_record};

// === Import / Export ===
pub use reader::{import_crop_plan, import_crops_and_varieties, import_records};
pub use writer::{
    CROPS_AND_VARIETIES_LABEL, ExportSummary, crop_plan_label, export_crop_plan,
    export_crops_and_varieties, export_records, export_records_at,
};

// === Crop Table ===
pub use table::CropTable;
