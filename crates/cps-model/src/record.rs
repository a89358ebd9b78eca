//! Crop and planting records.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::field::{CropField, FieldId, PlantingField, RecordType};
use crate::value::{FieldKind, Value, coerce};

/// Maturity value stored when no usable maturity is known.
pub const MATURITY_UNSPECIFIED: i64 = -1;

/// One field of a record as seen during iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct Datum<F> {
    pub field: F,
    pub value: Value,
    /// False when `value` is only the kind's placeholder.
    pub concrete: bool,
}

impl<F: FieldId> Datum<F> {
    pub fn kind(&self) -> FieldKind {
        self.field.kind()
    }
}

/// Sparse storage of the fields that have been set on a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "F: Serialize", deserialize = "F: Deserialize<'de>"))]
pub struct FieldSet<F: Ord> {
    values: BTreeMap<F, Value>,
}

impl<F: Ord> Default for FieldSet<F> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<F: FieldId> FieldSet<F> {
    pub fn get(&self, field: F) -> Option<&Value> {
        self.values.get(&field)
    }

    pub fn is_concrete(&self, field: F) -> bool {
        self.values.contains_key(&field)
    }

    /// Assigns `value`, coercing it to the field's kind.
    ///
    /// Empty text clears the field. On error the field is left untouched.
    pub fn set(&mut self, field: F, value: Value) -> Result<()> {
        match coerce(field.label(), field.kind(), value)? {
            Some(value) => {
                self.values.insert(field, value);
            }
            None => {
                self.values.remove(&field);
            }
        }
        Ok(())
    }

    pub fn clear(&mut self, field: F) {
        self.values.remove(&field);
    }

    pub fn concrete_count(&self) -> usize {
        self.values.len()
    }

    pub fn datums(&self) -> Vec<Datum<F>> {
        F::ALL
            .iter()
            .map(|&field| match self.values.get(&field) {
                Some(value) => Datum {
                    field,
                    value: value.clone(),
                    concrete: true,
                },
                None => Datum {
                    field,
                    value: field.kind().default_value(),
                    concrete: false,
                },
            })
            .collect()
    }

    fn text(&self, field: F) -> &str {
        self.get(field).and_then(Value::as_text).unwrap_or("")
    }
}

/// Behaviour shared by every record type that can be read from or written to a sheet.
pub trait Record: Default + Clone + std::fmt::Debug {
    type Field: FieldId;

    fn fields(&self) -> &FieldSet<Self::Field>;

    fn fields_mut(&mut self) -> &mut FieldSet<Self::Field>;

    fn record_type() -> RecordType {
        <Self::Field as FieldId>::RECORD_TYPE
    }

    /// Current datums in column iteration order.
    fn datums(&self) -> Vec<Datum<Self::Field>> {
        self.fields().datums()
    }

    fn get(&self, field: Self::Field) -> Option<&Value> {
        self.fields().get(field)
    }

    fn set(&mut self, field: Self::Field, value: Value) -> Result<()> {
        self.fields_mut().set(field, value)
    }

    fn is_concrete(&self, field: Self::Field) -> bool {
        self.fields().is_concrete(field)
    }
}

/// A crop, or a named variety of one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CropRecord {
    fields: FieldSet<CropField>,
}

impl CropRecord {
    pub fn new(crop_name: &str, variety_name: &str) -> Self {
        let mut record = Self::default();
        record.set_text(CropField::CropName, crop_name);
        record.set_text(CropField::VarietyName, variety_name);
        record
    }

    pub fn crop_name(&self) -> &str {
        self.fields.text(CropField::CropName)
    }

    pub fn variety_name(&self) -> &str {
        self.fields.text(CropField::VarietyName)
    }

    /// True for the generic entry of a crop rather than one of its varieties.
    pub fn is_base_crop(&self) -> bool {
        self.variety_name().is_empty()
    }

    /// Days to maturity, or [`MATURITY_UNSPECIFIED`].
    pub fn maturity_days(&self) -> i64 {
        self.fields
            .get(CropField::MaturityDays)
            .and_then(Value::as_integer)
            .unwrap_or(MATURITY_UNSPECIFIED)
    }

    pub fn set_maturity_days(&mut self, days: i64) {
        self.fields
            .values
            .insert(CropField::MaturityDays, Value::Integer(days));
    }

    fn set_text(&mut self, field: CropField, value: &str) {
        if value.trim().is_empty() {
            self.fields.clear(field);
        } else {
            self.fields.values.insert(field, Value::text(value));
        }
    }
}

impl Record for CropRecord {
    type Field = CropField;

    fn fields(&self) -> &FieldSet<CropField> {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut FieldSet<CropField> {
        &mut self.fields
    }
}

/// Planting milestones that carry a planned and an actual date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Milestone {
    Plant,
    Transplant,
    Harvest,
}

impl Milestone {
    pub fn planned_field(self) -> PlantingField {
        match self {
            Milestone::Plant => PlantingField::DatePlantPlan,
            Milestone::Transplant => PlantingField::DateTransplantPlan,
            Milestone::Harvest => PlantingField::DateHarvestPlan,
        }
    }

    pub fn actual_field(self) -> PlantingField {
        match self {
            Milestone::Plant => PlantingField::DatePlantActual,
            Milestone::Transplant => PlantingField::DateTransplantActual,
            Milestone::Harvest => PlantingField::DateHarvestActual,
        }
    }
}

/// One planting of a crop in a plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantingRecord {
    fields: FieldSet<PlantingField>,
}

impl PlantingRecord {
    pub fn new(crop_name: &str) -> Self {
        let mut record = Self::default();
        if !crop_name.trim().is_empty() {
            record
                .fields
                .values
                .insert(PlantingField::CropName, Value::text(crop_name));
        }
        record
    }

    pub fn crop_name(&self) -> &str {
        self.fields.text(PlantingField::CropName)
    }

    pub fn variety_name(&self) -> &str {
        self.fields.text(PlantingField::VarietyName)
    }

    pub fn location(&self) -> &str {
        self.fields.text(PlantingField::Location)
    }

    pub fn date(&self, field: PlantingField) -> Option<NaiveDate> {
        self.fields.get(field).and_then(Value::as_date)
    }

    /// Sets a date field; `None` clears it.
    pub fn set_date(&mut self, field: PlantingField, date: Option<NaiveDate>) {
        match date {
            Some(date) if field.kind() == FieldKind::Date => {
                self.fields.values.insert(field, Value::Date(date));
            }
            Some(_) => {}
            None => self.fields.clear(field),
        }
    }

    /// The actual date of a milestone when recorded, otherwise the planned one.
    pub fn effective_date(&self, milestone: Milestone) -> Option<NaiveDate> {
        self.date(milestone.actual_field())
            .or_else(|| self.date(milestone.planned_field()))
    }

    pub fn is_ignored(&self) -> bool {
        self.fields
            .get(PlantingField::Ignore)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

impl Record for PlantingRecord {
    type Field = PlantingField;

    fn fields(&self) -> &FieldSet<PlantingField> {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut FieldSet<PlantingField> {
        &mut self.fields
    }
}
