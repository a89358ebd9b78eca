//! A crop list held as raw CSV rows.

use std::path::{Path, PathBuf};

use cps_model::{CropField, CropRecord};

use crate::dates::DateAdapter;
use crate::error::Result;
use crate::options::CsvOptions;
use crate::reader::read_raw_table;
use crate::translate::{HeaderMap, row_to_record};

/// Crop rows loaded from a file and translated on demand.
#[derive(Debug, Clone)]
pub struct CropTable {
    path: PathBuf,
    header: HeaderMap<CropField>,
    rows: Vec<Vec<String>>,
    dates: DateAdapter,
}

impl CropTable {
    pub fn open(path: &Path, options: &CsvOptions) -> Result<Self> {
        let dates = options.date_adapter()?;
        let table = read_raw_table(path, options)?;
        let header = HeaderMap::resolve(&table.headers, options.case_insensitive_headers);
        tracing::debug!(path = %path.display(), rows = table.rows.len(), "loaded crop table");
        Ok(Self {
            path: path.to_path_buf(),
            header,
            rows: table.rows,
            dates,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Translates one row; `None` past the end of the table.
    pub fn crop_for_row(&self, row: usize) -> Option<CropRecord> {
        let cells = self.rows.get(row)?;
        Some(row_to_record(&self.header, cells, row + 1, &self.dates))
    }

    pub fn crops(&self) -> Vec<CropRecord> {
        (0..self.rows.len())
            .filter_map(|row| self.crop_for_row(row))
            .collect()
    }

    /// Finds the base entry of a crop: the first row whose crop name matches
    /// `name` ignoring case and whose variety cell is empty.
    ///
    /// Cells are compared as stored, without trimming. Named varieties never
    /// match. An empty `name` finds nothing.
    pub fn find_crop_by_name(&self, name: &str) -> Option<CropRecord> {
        if name.is_empty() {
            return None;
        }
        let name_col = self.header.position_of(CropField::CropName)?;
        let variety_col = self.header.position_of(CropField::VarietyName);
        let wanted = name.to_lowercase();

        let row = self.rows.iter().position(|cells| {
            let crop = cells.get(name_col).map(String::as_str).unwrap_or("");
            let variety = variety_col
                .and_then(|col| cells.get(col))
                .map(String::as_str)
                .unwrap_or("");
            crop.to_lowercase() == wanted && variety.is_empty()
        })?;
        self.crop_for_row(row)
    }
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
    fn test_base_crop_lookup_skips_varieties() {
        let file = create_temp_csv(
            "crop_name,var_name,maturity\nTomato,Cherry,55\nTomato,,70\nPepper,,80\n",
        );
        let table = CropTable::open(file.path(), &CsvOptions::default()).unwrap();

        let tomato = table.find_crop_by_name("TOMATO").unwrap();
        assert_eq!(tomato.variety_name(), "");
        assert_eq!(tomato.maturity_days(), 70);
        assert!(table.find_crop_by_name("Cherry").is_none());
        assert!(table.find_crop_by_name("").is_none());
        assert!(table.find_crop_by_name("Squash").is_none());
    }

    #[test]
    fn test_lookup_compares_cells_as_stored() {
        let file = create_temp_csv(
            "crop_name,var_name,maturity\n\" Tomato \",\" \",40\n Leek ,,90\n",
        );
        let table = CropTable::open(file.path(), &CsvOptions::default()).unwrap();

        // whitespace-only variety is not empty
        assert!(table.find_crop_by_name(" Tomato ").is_none());
        assert!(table.find_crop_by_name("tomato").is_none());

        let leek = table.find_crop_by_name(" LEEK ").unwrap();
        assert_eq!(leek.maturity_days(), 90);
        assert!(table.find_crop_by_name("leek").is_none());
    }

    #[test]
    fn test_only_varieties_present() {
        let file = create_temp_csv("crop_name,var_name\nTomato,Cherry\n");
        let table = CropTable::open(file.path(), &CsvOptions::default()).unwrap();
        assert!(table.find_crop_by_name("tomato").is_none());
    }

    #[test]
    fn test_rows_and_list() {
        let file = create_temp_csv("# crops\ncrop_name,var_name,maturity\nBean,,0\nBean,Dragon,52\n");
        let table = CropTable::open(file.path(), &CsvOptions::default()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.crop_for_row(0).unwrap().maturity_days(), -1);
        assert!(table.crop_for_row(2).is_none());

        let crops = table.crops();
        assert_eq!(crops.len(), 2);
        assert_eq!(crops[1].variety_name(), "Dragon");
    }
}
