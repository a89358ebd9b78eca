//! Field identifiers for crop and planting records.
//!
//! Each record type has its own field enum, so a field can never be looked up
//! against the wrong record type. `ALL` fixes the iteration order records use
//! when they enumerate their datums.

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::FieldKind;

/// Discriminates the two record families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordType {
    Crop,
    Planting,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Crop => "crop",
            RecordType::Planting => "planting",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common behaviour of the per-record field enums.
pub trait FieldId: Copy + Eq + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    const RECORD_TYPE: RecordType;

    /// Every field in record iteration order.
    const ALL: &'static [Self];

    fn kind(self) -> FieldKind;

    /// Human readable name, used in diagnostics.
    fn label(self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CropField {
    CropName,
    VarietyName,
    SimilarTo,
    BotanicalName,
    FamilyName,
    Groups,
    Successions,
    Description,
    Keywords,
    Fudge,
    OtherRequirements,
    Notes,
    MaturityDays,
    MaturityAdjust,
    MiscAdjust,
    SeedSources,
    SeedItemCodes,
    SeedUnitSize,
}

impl FieldId for CropField {
    const RECORD_TYPE: RecordType = RecordType::Crop;

    const ALL: &'static [Self] = &[
        CropField::CropName,
        CropField::VarietyName,
        CropField::SimilarTo,
        CropField::BotanicalName,
        CropField::FamilyName,
        CropField::Groups,
        CropField::Successions,
        CropField::Description,
        CropField::Keywords,
        CropField::Fudge,
        CropField::OtherRequirements,
        CropField::Notes,
        CropField::MaturityDays,
        CropField::MaturityAdjust,
        CropField::MiscAdjust,
        CropField::SeedSources,
        CropField::SeedItemCodes,
        CropField::SeedUnitSize,
    ];

    fn kind(self) -> FieldKind {
        match self {
            CropField::Successions => FieldKind::Boolean,
            CropField::Fudge => FieldKind::Float,
            CropField::MaturityDays | CropField::MaturityAdjust => FieldKind::Integer,
            _ => FieldKind::Text,
        }
    }

    fn label(self) -> &'static str {
        match self {
            CropField::CropName => "crop name",
            CropField::VarietyName => "variety name",
            CropField::SimilarTo => "similar crop",
            CropField::BotanicalName => "botanical name",
            CropField::FamilyName => "family name",
            CropField::Groups => "groups",
            CropField::Successions => "successions",
            CropField::Description => "description",
            CropField::Keywords => "keywords",
            CropField::Fudge => "fudge factor",
            CropField::OtherRequirements => "other requirements",
            CropField::Notes => "notes",
            CropField::MaturityDays => "maturity days",
            CropField::MaturityAdjust => "maturity adjustment",
            CropField::MiscAdjust => "misc adjustment",
            CropField::SeedSources => "seed sources",
            CropField::SeedItemCodes => "seed item codes",
            CropField::SeedUnitSize => "seed unit size",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlantingField {
    CropName,
    VarietyName,
    Groups,
    Location,
    Keywords,
    Notes,
    MaturityDays,
    MaturityAdjust,
    DatePlantPlan,
    DatePlantActual,
    DateTransplantPlan,
    DateTransplantActual,
    DateHarvestPlan,
    DateHarvestActual,
    DonePlanting,
    DoneTransplanting,
    DoneHarvesting,
    Ignore,
    DirectSeeded,
    BedsToPlant,
    RowsPerBed,
    InRowSpacing,
    PlantsNeeded,
    PlantsToStart,
    FlatSize,
    YieldPerFoot,
    TotalYield,
    CropUnit,
}

impl PlantingField {
    /// The six planned/actual milestone dates.
    pub fn is_milestone_date(self) -> bool {
        matches!(
            self,
            PlantingField::DatePlantPlan
                | PlantingField::DatePlantActual
                | PlantingField::DateTransplantPlan
                | PlantingField::DateTransplantActual
                | PlantingField::DateHarvestPlan
                | PlantingField::DateHarvestActual
        )
    }
}

impl FieldId for PlantingField {
    const RECORD_TYPE: RecordType = RecordType::Planting;

    const ALL: &'static [Self] = &[
        PlantingField::CropName,
        PlantingField::VarietyName,
        PlantingField::Groups,
        PlantingField::Location,
        PlantingField::Keywords,
        PlantingField::Notes,
        PlantingField::MaturityDays,
        PlantingField::MaturityAdjust,
        PlantingField::DatePlantPlan,
        PlantingField::DatePlantActual,
        PlantingField::DateTransplantPlan,
        PlantingField::DateTransplantActual,
        PlantingField::DateHarvestPlan,
        PlantingField::DateHarvestActual,
        PlantingField::DonePlanting,
        PlantingField::DoneTransplanting,
        PlantingField::DoneHarvesting,
        PlantingField::Ignore,
        PlantingField::DirectSeeded,
        PlantingField::BedsToPlant,
        PlantingField::RowsPerBed,
        PlantingField::InRowSpacing,
        PlantingField::PlantsNeeded,
        PlantingField::PlantsToStart,
        PlantingField::FlatSize,
        PlantingField::YieldPerFoot,
        PlantingField::TotalYield,
        PlantingField::CropUnit,
    ];

    fn kind(self) -> FieldKind {
        match self {
            field if field.is_milestone_date() => FieldKind::Date,
            PlantingField::MaturityDays
            | PlantingField::MaturityAdjust
            | PlantingField::RowsPerBed
            | PlantingField::InRowSpacing
            | PlantingField::PlantsNeeded
            | PlantingField::PlantsToStart => FieldKind::Integer,
            PlantingField::BedsToPlant | PlantingField::YieldPerFoot | PlantingField::TotalYield => {
                FieldKind::Float
            }
            PlantingField::DonePlanting
            | PlantingField::DoneTransplanting
            | PlantingField::DoneHarvesting
            | PlantingField::Ignore
            | PlantingField::DirectSeeded => FieldKind::Boolean,
            _ => FieldKind::Text,
        }
    }

    fn label(self) -> &'static str {
        match self {
            PlantingField::CropName => "crop name",
            PlantingField::VarietyName => "variety name",
            PlantingField::Groups => "groups",
            PlantingField::Location => "location",
            PlantingField::Keywords => "keywords",
            PlantingField::Notes => "notes",
            PlantingField::MaturityDays => "maturity days",
            PlantingField::MaturityAdjust => "maturity adjustment",
            PlantingField::DatePlantPlan => "planned planting date",
            PlantingField::DatePlantActual => "actual planting date",
            PlantingField::DateTransplantPlan => "planned transplant date",
            PlantingField::DateTransplantActual => "actual transplant date",
            PlantingField::DateHarvestPlan => "planned harvest date",
            PlantingField::DateHarvestActual => "actual harvest date",
            PlantingField::DonePlanting => "planting done",
            PlantingField::DoneTransplanting => "transplanting done",
            PlantingField::DoneHarvesting => "harvest done",
            PlantingField::Ignore => "ignored",
            PlantingField::DirectSeeded => "direct seeded",
            PlantingField::BedsToPlant => "beds to plant",
            PlantingField::RowsPerBed => "rows per bed",
            PlantingField::InRowSpacing => "in-row spacing",
            PlantingField::PlantsNeeded => "plants needed",
            PlantingField::PlantsToStart => "plants to start",
            PlantingField::FlatSize => "flat size",
            PlantingField::YieldPerFoot => "yield per foot",
            PlantingField::TotalYield => "total yield",
            PlantingField::CropUnit => "yield unit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn milestone_dates_are_date_kind() {
        let dates: Vec<PlantingField> = PlantingField::ALL
            .iter()
            .copied()
            .filter(|field| field.kind() == FieldKind::Date)
            .collect();
        assert_eq!(dates.len(), 6);
        assert!(dates.iter().all(|field| field.is_milestone_date()));
    }

    #[test]
    fn crops_have_no_date_fields() {
        assert!(
            CropField::ALL
                .iter()
                .all(|field| field.kind() != FieldKind::Date)
        );
    }
}
