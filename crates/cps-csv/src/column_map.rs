//! Canonical CSV column names for every record field.
//!
//! Field to column is total and injective per record type (one `match` per
//! field enum). Column to field is partial: names outside the table resolve
//! to `None` and import simply skips them.

use cps_model::{CropField, FieldId, PlantingField, RecordType};

/// How a raw cell is turned into a field value on import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportRule {
    /// Assigned as text; the record coerces it.
    Raw,
    /// Parsed through the date adapter first.
    Date,
    /// Integer where zero or negative means "unspecified".
    MaturityDays,
}

/// Column naming for a field enum.
pub trait Columns: FieldId {
    fn column_name(self) -> &'static str;

    fn import_rule(self) -> ImportRule {
        ImportRule::Raw
    }

    /// Exact (case-sensitive) reverse lookup.
    fn from_column_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.column_name() == name)
    }

    /// Reverse lookup ignoring ASCII case.
    fn from_column_name_ignore_case(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.column_name().eq_ignore_ascii_case(name))
    }
}

impl Columns for CropField {
    fn column_name(self) -> &'static str {
        match self {
            CropField::CropName => "crop_name",
            CropField::VarietyName => "var_name",
            CropField::SimilarTo => "similar_to",
            CropField::BotanicalName => "bot_name",
            CropField::FamilyName => "fam_name",
            CropField::Groups => "groups",
            CropField::Successions => "successions",
            CropField::Description => "description",
            CropField::Keywords => "keywords",
            CropField::Fudge => "fudge",
            CropField::OtherRequirements => "other_req",
            CropField::Notes => "notes",
            CropField::MaturityDays => "maturity",
            CropField::MaturityAdjust => "mat_adjust",
            CropField::MiscAdjust => "misc_adjust",
            CropField::SeedSources => "seeds_sources",
            CropField::SeedItemCodes => "seeds_item_codes",
            CropField::SeedUnitSize => "seeds_unit_size",
        }
    }

    fn import_rule(self) -> ImportRule {
        match self {
            CropField::MaturityDays => ImportRule::MaturityDays,
            _ => ImportRule::Raw,
        }
    }
}

impl Columns for PlantingField {
    fn column_name(self) -> &'static str {
        match self {
            PlantingField::CropName => "crop_name",
            PlantingField::VarietyName => "var_name",
            PlantingField::Groups => "groups",
            PlantingField::Location => "location",
            PlantingField::Keywords => "keywords",
            PlantingField::Notes => "notes",
            PlantingField::MaturityDays => "maturity",
            PlantingField::MaturityAdjust => "mat_adjust",
            PlantingField::DatePlantPlan => "date_plant_plan",
            PlantingField::DatePlantActual => "date_plant_actual",
            PlantingField::DateTransplantPlan => "date_tp_plan",
            PlantingField::DateTransplantActual => "date_tp_actual",
            PlantingField::DateHarvestPlan => "date_harvest_plan",
            PlantingField::DateHarvestActual => "date_harvest_actual",
            PlantingField::DonePlanting => "done_plant",
            PlantingField::DoneTransplanting => "done_tp",
            PlantingField::DoneHarvesting => "done_harvest",
            PlantingField::Ignore => "ignore",
            PlantingField::DirectSeeded => "direct_seed",
            PlantingField::BedsToPlant => "beds_to_plant",
            PlantingField::RowsPerBed => "rows_p_bed",
            PlantingField::InRowSpacing => "inrow_spacing",
            PlantingField::PlantsNeeded => "plants_needed",
            PlantingField::PlantsToStart => "plants_to_start",
            PlantingField::FlatSize => "flat_size",
            PlantingField::YieldPerFoot => "yield_p_foot",
            PlantingField::TotalYield => "total_yield",
            PlantingField::CropUnit => "crop_unit",
        }
    }

    fn import_rule(self) -> ImportRule {
        if self.is_milestone_date() {
            ImportRule::Date
        } else {
            ImportRule::Raw
        }
    }
}

pub fn column_name_for_field<F: Columns>(field: F) -> &'static str {
    field.column_name()
}

pub fn field_for_column_name<F: Columns>(name: &str) -> Option<F> {
    F::from_column_name(name)
}

/// Every column of a record type, in export order.
pub fn column_names(record_type: RecordType) -> Vec<&'static str> {
    match record_type {
        RecordType::Crop => names::<CropField>(),
        RecordType::Planting => names::<PlantingField>(),
    }
}

fn names<F: Columns>() -> Vec<&'static str> {
    F::ALL.iter().map(|field| field.column_name()).collect()
}
