//! Crop planning data model.
//!
//! Records are sparse: a field is either concrete (explicitly set) or reports
//! the placeholder default of its [`FieldKind`].

pub mod error;
pub mod field;
pub mod record;
pub mod value;

pub use error::{ModelError, Result};
pub use field::{CropField, FieldId, PlantingField, RecordType};
pub use record::{
    CropRecord, Datum, FieldSet, MATURITY_UNSPECIFIED, Milestone, PlantingRecord, Record,
};
pub use value::{FieldKind, Value, parse_bool};
