//! Reading crop and planting records from CSV files.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use cps_model::{CropRecord, PlantingRecord, Record};
use tracing::{debug, info, info_span};

use crate::column_map::Columns;
use crate::error::{CsvError, Result};
use crate::options::CsvOptions;
use crate::translate::{HeaderMap, row_to_record};

/// Raw header and data rows of a file, comment lines removed.
#[derive(Debug, Clone)]
pub(crate) struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Opens a CSV reader configured from `options`.
fn open_reader(path: &Path, options: &CsvOptions) -> Result<csv::Reader<BufReader<File>>> {
    let file = File::open(path).map_err(|e| CsvError::open(path, e))?;
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .delimiter(options.delimiter_byte()?)
        .quote(options.quote_byte()?)
        .comment(Some(options.comment_byte()?))
        .from_reader(BufReader::new(file));
    Ok(reader)
}

/// Reads the header line and every data row.
///
/// A row whose length differs from the header aborts the read.
pub(crate) fn read_raw_table(path: &Path, options: &CsvOptions) -> Result<RawTable> {
    let mut reader = open_reader(path, options)?;
    let csv_error = |source| CsvError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(ToString::to_string)
        .collect();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(CsvError::MissingHeader {
            path: path.to_path_buf(),
        });
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        rows.push(record.iter().map(ToString::to_string).collect());
    }
    Ok(RawTable { headers, rows })
}

/// Reads every record of type `R` from `path`, in file order.
///
/// Unknown columns are ignored and unparseable values leave their field unset;
/// malformed rows fail the whole import.
pub fn import_records<R>(path: &Path, options: &CsvOptions) -> Result<Vec<R>>
where
    R: Record,
    R::Field: Columns,
{
    let span = info_span!("import", path = %path.display(), record_type = %R::record_type());
    let _guard = span.enter();

    let dates = options.date_adapter()?;
    let table = read_raw_table(path, options)?;
    let header: HeaderMap<R::Field> =
        HeaderMap::resolve(&table.headers, options.case_insensitive_headers);
    let unknown = header.unknown_headers();
    if !unknown.is_empty() {
        debug!(columns = ?unknown, "columns without a field mapping");
    }

    let records: Vec<R> = table
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| row_to_record(&header, row, idx + 1, &dates))
        .collect();

    info!(records = records.len(), columns = header.len(), "imported records");
    Ok(records)
}

pub fn import_crops_and_varieties(path: &Path, options: &CsvOptions) -> Result<Vec<CropRecord>> {
    import_records(path, options)
}

pub fn import_crop_plan(path: &Path, options: &CsvOptions) -> Result<Vec<PlantingRecord>> {
    import_records(path, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_raw_table_skips_comments() {
        let file = create_temp_csv("# header comment\ncrop_name,var_name\nTomato,\n# End of file\n");
        let table = read_raw_table(file.path(), &CsvOptions::default()).unwrap();

        assert_eq!(table.headers, vec!["crop_name", "var_name"]);
        assert_eq!(table.rows, vec![vec!["Tomato".to_string(), String::new()]]);
    }

    #[test]
    fn test_read_raw_table_empty_file() {
        let file = create_temp_csv("# only comments\n");
        let result = read_raw_table(file.path(), &CsvOptions::default());

        assert!(matches!(result, Err(CsvError::MissingHeader { .. })));
    }

    #[test]
    fn test_read_raw_table_wrong_column_count() {
        let file = create_temp_csv("crop_name,var_name\nTomato,Cherry,extra\n");
        let result = read_raw_table(file.path(), &CsvOptions::default());

        assert!(matches!(result, Err(CsvError::Csv { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = import_crop_plan(Path::new("/nonexistent/plan.csv"), &CsvOptions::default());
        assert!(matches!(result, Err(CsvError::FileNotFound { .. })));
    }

    #[test]
    fn test_case_insensitive_headers() {
        let file = create_temp_csv("CROP_NAME,Location\nGarlic,North\n");
        let strict = import_crop_plan(file.path(), &CsvOptions::default()).unwrap();
        assert_eq!(strict[0].crop_name(), "");

        let options = CsvOptions::default().with_case_insensitive_headers(true);
        let relaxed = import_crop_plan(file.path(), &options).unwrap();
        assert_eq!(relaxed[0].crop_name(), "Garlic");
        assert_eq!(relaxed[0].location(), "North");
    }
}
