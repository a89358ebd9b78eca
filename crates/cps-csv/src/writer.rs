//! Writing crop and planting records to CSV files.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Local};
use cps_model::{CropRecord, PlantingRecord, Record};
use tracing::{info, info_span, warn};

use crate::column_map::Columns;
use crate::error::{CsvError, Result};
use crate::options::CsvOptions;
use crate::translate::{ColumnLayout, record_to_row};

/// Label used when exporting the crop and variety list.
pub const CROPS_AND_VARIETIES_LABEL: &str = "Crops and Varieties";

/// Format of the export timestamp comment.
const TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S %:z %Y";

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub records: usize,
    pub columns: usize,
}

/// Writes `records` to `path`, stamped with the current local time.
pub fn export_records<R>(
    path: &Path,
    label: &str,
    records: &[R],
    options: &CsvOptions,
) -> Result<ExportSummary>
where
    R: Record,
    R::Field: Columns,
{
    export_records_at(path, label, records, options, Local::now().fixed_offset())
}

/// Writes `records` to `path` with an explicit export timestamp.
///
/// The file is framed by four leading comment lines and a trailing
/// `End of file` comment. The header comes from the first record. Output goes
/// to a temp file that replaces `path` only once everything is written, so a
/// failed export leaves any existing file untouched.
pub fn export_records_at<R>(
    path: &Path,
    label: &str,
    records: &[R],
    options: &CsvOptions,
    exported_at: DateTime<FixedOffset>,
) -> Result<ExportSummary>
where
    R: Record,
    R::Field: Columns,
{
    let span = info_span!("export", path = %path.display(), record_type = %R::record_type());
    let _guard = span.enter();

    let first = records.first().ok_or(CsvError::NoData)?;
    let layout = ColumnLayout::from_record(first);
    options.validate()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CsvError::io("create directory", parent, e))?;
    }

    let temp_path = temp_path_for(path);
    let written = write_file(&temp_path, label, records, &layout, options, exported_at);
    if let Err(error) = written {
        if let Err(cleanup) = fs::remove_file(&temp_path) {
            warn!(path = %temp_path.display(), %cleanup, "could not remove partial export");
        }
        return Err(error);
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        CsvError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source: e,
        }
    })?;

    info!(records = records.len(), columns = layout.len(), "exported records");
    Ok(ExportSummary {
        path: path.to_path_buf(),
        records: records.len(),
        columns: layout.len(),
    })
}

pub fn export_crop_plan(
    path: &Path,
    plan_name: &str,
    plantings: &[PlantingRecord],
    options: &CsvOptions,
) -> Result<ExportSummary> {
    export_records(path, &crop_plan_label(plan_name), plantings, options)
}

pub fn export_crops_and_varieties(
    path: &Path,
    crops: &[CropRecord],
    options: &CsvOptions,
) -> Result<ExportSummary> {
    export_records(path, CROPS_AND_VARIETIES_LABEL, crops, options)
}

pub fn crop_plan_label(plan_name: &str) -> String {
    format!("crop plan: {plan_name}")
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_file<R>(
    path: &Path,
    label: &str,
    records: &[R],
    layout: &ColumnLayout,
    options: &CsvOptions,
    exported_at: DateTime<FixedOffset>,
) -> Result<()>
where
    R: Record,
    R::Field: Columns,
{
    let file = File::create(path).map_err(|e| CsvError::io("create", path, e))?;
    let mut out = BufWriter::new(file);
    let comment = options.comment;
    let write_err = |e| CsvError::io("write", path, e);

    write_comment(&mut out, comment, &options.attribution).map_err(write_err)?;
    write_comment(&mut out, comment, &format!("Available at {}", options.source_url))
        .map_err(write_err)?;
    write_comment(&mut out, comment, &format!("Records exported: {label}")).map_err(write_err)?;
    write_comment(
        &mut out,
        comment,
        &format!("Exported: {}", exported_at.format(TIMESTAMP_FORMAT)),
    )
    .map_err(write_err)?;

    let dates = options.date_adapter()?;
    {
        // Always quoting keeps a cell that starts with the comment marker from
        // being read back as a comment line.
        let mut csv_out = csv::WriterBuilder::new()
            .has_headers(false)
            .delimiter(options.delimiter_byte()?)
            .quote(options.quote_byte()?)
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut out);
        let csv_err = |source| CsvError::Csv {
            path: path.to_path_buf(),
            source,
        };

        csv_out.write_record(layout.headers()).map_err(csv_err)?;
        for record in records {
            let row = record_to_row(record, layout, &dates)?;
            csv_out.write_record(&row).map_err(csv_err)?;
        }
        csv_out.flush().map_err(write_err)?;
    }

    write_comment(&mut out, comment, "End of file").map_err(write_err)?;

    let file = out.into_inner().map_err(|e| write_err(e.into_error()))?;
    file.sync_all().map_err(|e| CsvError::io("sync", path, e))?;
    Ok(())
}

/// Writes `text` as one comment line; line breaks are flattened.
fn write_comment<W: Write>(out: &mut W, marker: char, text: &str) -> std::io::Result<()> {
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    writeln!(out, "{marker} {flat}")
}
