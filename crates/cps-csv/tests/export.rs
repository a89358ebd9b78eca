//! Export framing and sparse-output tests.

use std::fs;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use cps_csv::{CsvError, CsvOptions, export_crop_plan, export_records_at};
use cps_model::{CropField, CropRecord, PlantingField, PlantingRecord, Record, Value};
use tempfile::tempdir;

fn fixed_time() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
        .unwrap()
}

fn sample_crops() -> Vec<CropRecord> {
    let mut tomato = CropRecord::new("Tomato", "");
    tomato.set_maturity_days(70);
    let mut cherry = CropRecord::new("Tomato", "Cherry");
    cherry
        .set(CropField::Successions, Value::Boolean(true))
        .unwrap();
    cherry.set(CropField::Fudge, Value::Float(1.5)).unwrap();
    vec![tomato, cherry]
}

/// Data lines of an exported file (comments removed), split on the delimiter.
fn data_lines(body: &str) -> Vec<Vec<String>> {
    body.lines()
        .filter(|line| !line.starts_with('#'))
        .map(|line| {
            line.split(',')
                .map(|cell| cell.trim_matches('"').to_string())
                .collect()
        })
        .collect()
}

#[test]
fn crop_export_snapshot() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("crops.csv");

    let summary = export_records_at(
        &path,
        "Crops and Varieties",
        &sample_crops(),
        &CsvOptions::default(),
        fixed_time(),
    )
    .unwrap();
    assert_eq!(summary.records, 2);
    assert_eq!(summary.columns, 18);

    let body = fs::read_to_string(&path).unwrap();
    insta::assert_snapshot!("crop_export", body);
}

#[test]
fn planting_scenario_dates_and_sparse_cells() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plan.csv");

    let mut first = PlantingRecord::new("Lettuce");
    first.set_date(
        PlantingField::DatePlantPlan,
        NaiveDate::from_ymd_opt(2024, 5, 1),
    );
    first.set_date(
        PlantingField::DateHarvestActual,
        NaiveDate::from_ymd_opt(2024, 6, 20),
    );
    let mut second = PlantingRecord::new("Lettuce");
    second.set_date(
        PlantingField::DatePlantPlan,
        NaiveDate::from_ymd_opt(2024, 5, 15),
    );

    export_crop_plan(&path, "Spring", &[first, second], &CsvOptions::default()).unwrap();

    let body = fs::read_to_string(&path).unwrap();
    assert!(body.contains("# Records exported: crop plan: Spring\n"));
    assert!(body.trim_end().ends_with("# End of file"));

    let lines = data_lines(&body);
    let header = &lines[0];
    let plant_plan = header.iter().position(|h| h == "date_plant_plan").unwrap();
    let harvest_actual = header
        .iter()
        .position(|h| h == "date_harvest_actual")
        .unwrap();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1][plant_plan], "2024-05-01");
    assert_eq!(lines[1][harvest_actual], "2024-06-20");
    assert_eq!(lines[2][plant_plan], "2024-05-15");
    assert_eq!(lines[2][harvest_actual], "");
}

#[test]
fn comment_lines_lead_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("crops.csv");
    export_records_at(
        &path,
        "Crops and Varieties",
        &sample_crops(),
        &CsvOptions::default(),
        fixed_time(),
    )
    .unwrap();

    let body = fs::read_to_string(&path).unwrap();
    let comments: Vec<&str> = body.lines().take(4).collect();
    assert_eq!(
        comments,
        vec![
            "# Created by CropPlanning Software",
            "# Available at http://cropplanning.googlecode.com",
            "# Records exported: Crops and Varieties",
            "# Exported: Wed May 01 12:00:00 +00:00 2024",
        ]
    );
}

#[test]
fn empty_export_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plan.csv");
    let result = export_crop_plan(&path, "Empty", &[], &CsvOptions::default());
    assert!(matches!(result, Err(CsvError::NoData)));
    assert!(!path.exists());
}

#[test]
fn failed_export_keeps_existing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("crops.csv");
    fs::write(&path, "previous contents").unwrap();

    let options = CsvOptions::default().with_quote('é');
    let result = export_records_at(&path, "x", &sample_crops(), &options, fixed_time());

    assert!(matches!(
        result,
        Err(CsvError::InvalidOption { name: "quote", .. })
    ));
    assert_eq!(fs::read_to_string(&path).unwrap(), "previous contents");
}

#[test]
fn custom_comment_marker() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("crops.csv");
    let options = CsvOptions::default().with_comment(';');
    export_records_at(&path, "Crops", &sample_crops(), &options, fixed_time()).unwrap();

    let body = fs::read_to_string(&path).unwrap();
    assert!(body.starts_with("; Created by CropPlanning Software\n"));
    assert!(body.trim_end().ends_with("; End of file"));
}
