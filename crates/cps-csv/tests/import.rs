//! Import tests, including export/import round trips.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use cps_csv::{
    CropTable, CsvError, CsvOptions, export_crop_plan, export_crops_and_varieties,
    import_crop_plan, import_crops_and_varieties,
};
use cps_model::{CropField, CropRecord, PlantingField, PlantingRecord, Record, Value};
use proptest::prelude::*;
use tempfile::{TempDir, tempdir};

fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write csv");
    path
}

#[test]
fn unknown_header_is_ignored() {
    let dir = tempdir().unwrap();
    let path = write_csv(
        &dir,
        "plan.csv",
        "crop_name,bed_colour,location,date_plant_plan\n\
         Carrot,orange,East,4/15/2024\n\
         Radish,red,West,2024-04-20\n",
    );

    let plantings = import_crop_plan(&path, &CsvOptions::default()).unwrap();

    assert_eq!(plantings.len(), 2);
    assert_eq!(plantings[0].crop_name(), "Carrot");
    assert_eq!(plantings[0].location(), "East");
    assert_eq!(
        plantings[0].date(PlantingField::DatePlantPlan),
        NaiveDate::from_ymd_opt(2024, 4, 15)
    );
    assert_eq!(plantings[1].crop_name(), "Radish");
    assert_eq!(
        plantings[1].date(PlantingField::DatePlantPlan),
        NaiveDate::from_ymd_opt(2024, 4, 20)
    );
    assert_eq!(plantings[1].fields().concrete_count(), 3);
}

#[test]
fn maturity_days_are_normalized_for_crops() {
    let dir = tempdir().unwrap();
    let path = write_csv(
        &dir,
        "crops.csv",
        "crop_name,var_name,maturity\nPea,,0\nPea,Snow,-5\nPea,Snap,45\n",
    );

    let crops = import_crops_and_varieties(&path, &CsvOptions::default()).unwrap();
    let maturity: Vec<i64> = crops.iter().map(CropRecord::maturity_days).collect();
    assert_eq!(maturity, vec![-1, -1, 45]);
}

#[test]
fn bad_values_do_not_abort() {
    let dir = tempdir().unwrap();
    let path = write_csv(
        &dir,
        "plan.csv",
        "crop_name,date_tp_plan,rows_p_bed\nOnion,tomorrow,three\n",
    );

    let plantings = import_crop_plan(&path, &CsvOptions::default()).unwrap();
    assert_eq!(plantings.len(), 1);
    assert_eq!(plantings[0].crop_name(), "Onion");
    assert!(!plantings[0].is_concrete(PlantingField::DateTransplantPlan));
    assert!(!plantings[0].is_concrete(PlantingField::RowsPerBed));
}

#[test]
fn malformed_row_aborts_import() {
    let dir = tempdir().unwrap();
    let path = write_csv(&dir, "plan.csv", "crop_name,location\nOnion,North\nLeek\n");

    let result = import_crop_plan(&path, &CsvOptions::default());
    assert!(matches!(result, Err(CsvError::Csv { .. })));
}

#[test]
fn base_crop_lookup_ignores_varieties() {
    let dir = tempdir().unwrap();
    let path = write_csv(
        &dir,
        "crops.csv",
        "crop_name,var_name,maturity\nTomato,,75\nTomato,Cherry,60\n",
    );

    let table = CropTable::open(&path, &CsvOptions::default()).unwrap();
    for query in ["tomato", "TOMATO", "Tomato"] {
        let crop = table.find_crop_by_name(query).expect("base crop");
        assert_eq!(crop.variety_name(), "");
        assert_eq!(crop.maturity_days(), 75);
    }
}

#[test]
fn sparse_export_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plan.csv");

    let mut planting = PlantingRecord::new("Garlic");
    planting
        .set(PlantingField::Notes, Value::text("mulch, then wait"))
        .unwrap();
    planting.set_date(
        PlantingField::DatePlantActual,
        NaiveDate::from_ymd_opt(2023, 10, 28),
    );
    export_crop_plan(&path, "Fall", &[planting.clone()], &CsvOptions::default()).unwrap();

    let imported = import_crop_plan(&path, &CsvOptions::default()).unwrap();
    assert_eq!(imported, vec![planting]);
}

#[test]
fn crop_cell_starting_with_comment_marker_survives() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("crops.csv");
    let crops = vec![CropRecord::new("#1 Melon", "")];

    export_crops_and_varieties(&path, &crops, &CsvOptions::default()).unwrap();
    let imported = import_crops_and_varieties(&path, &CsvOptions::default()).unwrap();

    assert_eq!(imported.len(), 1);
    assert_eq!(imported[0].crop_name(), "#1 Melon");
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).expect("valid date"))
}

fn text_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ,'\"-]{0,20}"
}

prop_compose! {
    fn planting_strategy()(
        crop in text_strategy(),
        notes in text_strategy(),
        plant in date_strategy(),
        harvest in date_strategy(),
        rows in 1i64..8,
        beds in 0.0f64..100.0,
        done in any::<bool>(),
    ) -> PlantingRecord {
        let mut planting = PlantingRecord::new(&crop);
        planting.set(PlantingField::Notes, Value::Text(notes)).unwrap();
        planting.set_date(PlantingField::DatePlantPlan, Some(plant));
        planting.set_date(PlantingField::DateHarvestActual, Some(harvest));
        planting.set(PlantingField::RowsPerBed, Value::Integer(rows)).unwrap();
        planting.set(PlantingField::BedsToPlant, Value::Float(beds)).unwrap();
        planting.set(PlantingField::DonePlanting, Value::Boolean(done)).unwrap();
        planting
    }
}

prop_compose! {
    fn crop_strategy()(
        crop in text_strategy(),
        variety in text_strategy(),
        maturity in 1i64..365,
        fudge in 0.0f64..10.0,
    ) -> CropRecord {
        let mut record = CropRecord::new(&crop, &variety);
        record.set_maturity_days(maturity);
        record.set(CropField::Fudge, Value::Float(fudge)).unwrap();
        record
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn plantings_round_trip(plantings in prop::collection::vec(planting_strategy(), 1..5)) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.csv");
        export_crop_plan(&path, "prop", &plantings, &CsvOptions::default()).unwrap();
        let imported = import_crop_plan(&path, &CsvOptions::default()).unwrap();
        prop_assert_eq!(imported, plantings);
    }

    #[test]
    fn crops_round_trip(crops in prop::collection::vec(crop_strategy(), 1..5)) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crops.csv");
        export_crops_and_varieties(&path, &crops, &CsvOptions::default()).unwrap();
        let imported = import_crops_and_varieties(&path, &CsvOptions::default()).unwrap();
        prop_assert_eq!(imported, crops);
    }
}
