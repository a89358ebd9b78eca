use std::path::Path;

use anyhow::{Context, Result};
use cps_csv::{
    CROPS_AND_VARIETIES_LABEL, CropTable, CsvOptions, DateFormats, ExportSummary, crop_plan_label,
    export_records, import_crops_and_varieties, import_crop_plan,
};
use cps_model::{CropField, CropRecord, FieldId, Milestone, PlantingField, PlantingRecord};
use tracing::{info, info_span};

use crate::cli::{CsvArgs, RecordKindArg};
use crate::types::{ColumnInfo, Highlights, ImportReport, column_counts};

/// Builds the CSV options from `--config` and the dialect flags.
pub fn load_options(args: &CsvArgs) -> Result<CsvOptions> {
    let mut options = match &args.config {
        Some(path) => CsvOptions::load(path)
            .with_context(|| format!("load config {}", path.display()))?,
        None => CsvOptions::default(),
    };
    if let Some(delimiter) = args.delimiter {
        options = options.with_delimiter(delimiter);
    }
    if let Some(comment) = args.comment {
        options = options.with_comment(comment);
    }
    if let Some(quote) = args.quote {
        options = options.with_quote(quote);
    }
    if let Some(format) = &args.date_format {
        let dates = DateFormats {
            output: format.clone(),
            ..options.dates.clone()
        };
        options = options.with_dates(dates);
    }
    if args.ignore_header_case {
        options = options.with_case_insensitive_headers(true);
    }
    options.validate().context("invalid CSV options")?;
    Ok(options)
}

pub fn run_import(path: &Path, kind: RecordKindArg, options: &CsvOptions) -> Result<ImportReport> {
    let span = info_span!("cps_import", path = %path.display());
    let _guard = span.enter();

    let report = match kind {
        RecordKindArg::Crops => {
            let crops = import_crops_and_varieties(path, options)
                .with_context(|| format!("import crops from {}", path.display()))?;
            crop_report(path, &crops)
        }
        RecordKindArg::Plantings => {
            let plantings = import_crop_plan(path, options)
                .with_context(|| format!("import crop plan from {}", path.display()))?;
            planting_report(path, &plantings)
        }
    };
    Ok(report)
}

pub fn run_convert(
    input: &Path,
    output: &Path,
    kind: RecordKindArg,
    label: Option<&str>,
    options: &CsvOptions,
) -> Result<ExportSummary> {
    let span = info_span!("cps_convert", input = %input.display(), output = %output.display());
    let _guard = span.enter();

    let summary = match kind {
        RecordKindArg::Crops => {
            let crops = import_crops_and_varieties(input, options)
                .with_context(|| format!("import crops from {}", input.display()))?;
            let label = label.unwrap_or(CROPS_AND_VARIETIES_LABEL);
            export_records(output, label, &crops, options)
        }
        RecordKindArg::Plantings => {
            let plantings = import_crop_plan(input, options)
                .with_context(|| format!("import crop plan from {}", input.display()))?;
            let plan_name = label.map_or_else(|| plan_name_from_path(input), str::to_string);
            export_records(output, &crop_plan_label(&plan_name), &plantings, options)
        }
    }
    .with_context(|| format!("export to {}", output.display()))?;

    info!(records = summary.records, columns = summary.columns, "converted");
    Ok(summary)
}

/// Finds the base crop named `crop`; `None` when the list has no such entry.
pub fn run_lookup(path: &Path, crop: &str, options: &CsvOptions) -> Result<Option<CropRecord>> {
    let table = CropTable::open(path, options)
        .with_context(|| format!("open crop list {}", path.display()))?;
    Ok(table.find_crop_by_name(crop))
}

pub fn run_columns(kind: RecordKindArg) -> Vec<ColumnInfo> {
    match kind {
        RecordKindArg::Crops => CropField::ALL.iter().map(|&f| ColumnInfo::of(f)).collect(),
        RecordKindArg::Plantings => PlantingField::ALL
            .iter()
            .map(|&f| ColumnInfo::of(f))
            .collect(),
    }
}

fn crop_report(path: &Path, crops: &[CropRecord]) -> ImportReport {
    let base_crops = crops.iter().filter(|crop| crop.is_base_crop()).count();
    ImportReport {
        path: path.to_path_buf(),
        record_type: CropField::RECORD_TYPE,
        records: crops.len(),
        columns: column_counts(crops),
        highlights: Highlights::Crops {
            base_crops,
            varieties: crops.len() - base_crops,
        },
    }
}

fn planting_report(path: &Path, plantings: &[PlantingRecord]) -> ImportReport {
    let active: Vec<&PlantingRecord> = plantings.iter().filter(|p| !p.is_ignored()).collect();
    ImportReport {
        path: path.to_path_buf(),
        record_type: PlantingField::RECORD_TYPE,
        records: plantings.len(),
        columns: column_counts(plantings),
        highlights: Highlights::Plantings {
            ignored: plantings.len() - active.len(),
            first_planting: active
                .iter()
                .filter_map(|p| p.effective_date(Milestone::Plant))
                .min(),
            last_harvest: active
                .iter()
                .filter_map(|p| p.effective_date(Milestone::Harvest))
                .max(),
        },
    }
}

fn plan_name_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "plan".to_string())
}
