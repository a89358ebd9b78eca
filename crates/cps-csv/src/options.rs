//! Configuration options for CSV import and export.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dates::DateAdapter;
use crate::error::{CsvError, Result};

/// Attribution written as the first comment line of every export.
pub const DEFAULT_ATTRIBUTION: &str = "Created by CropPlanning Software";

/// Project URL written as the second comment line of every export.
pub const DEFAULT_SOURCE_URL: &str = "http://cropplanning.googlecode.com";

/// File extension used for both import and export.
pub const DEFAULT_EXTENSION: &str = "csv";

/// Date formats used by the date adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateFormats {
    /// Canonical format written on export.
    pub output: String,
    /// Formats tried in order on import.
    pub inputs: Vec<String>,
}

impl Default for DateFormats {
    fn default() -> Self {
        Self {
            output: "%Y-%m-%d".to_string(),
            // Two-digit years go before four-digit ones: %Y would accept "24" as year 24.
            inputs: [
                "%Y-%m-%d",
                "%m/%d/%y",
                "%m/%d/%Y",
                "%m-%d-%Y",
                "%b %d, %Y",
                "%B %d, %Y",
                "%d %b %Y",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
        }
    }
}

/// Options controlling how files are read and written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    pub delimiter: char,
    /// Text qualifier.
    pub quote: char,
    /// Comment line prefix.
    pub comment: char,
    pub attribution: String,
    pub source_url: String,
    /// Match import headers to columns ignoring ASCII case.
    pub case_insensitive_headers: bool,
    pub dates: DateFormats,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            quote: '"',
            comment: '#',
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            source_url: DEFAULT_SOURCE_URL.to_string(),
            case_insensitive_headers: false,
            dates: DateFormats::default(),
        }
    }
}

impl CsvOptions {
    pub fn with_quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    pub fn with_comment(mut self, comment: char) -> Self {
        self.comment = comment;
        self
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_case_insensitive_headers(mut self, enable: bool) -> Self {
        self.case_insensitive_headers = enable;
        self
    }

    pub fn with_dates(mut self, dates: DateFormats) -> Self {
        self.dates = dates;
        self
    }

    /// Parses options from TOML; missing keys keep their defaults.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self> {
        let options: Self = toml::from_str(text).map_err(|e| CsvError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CsvError::open(path, e))?;
        let options = Self::from_toml_str(&text, path)?;
        tracing::debug!(path = %path.display(), "loaded CSV options");
        Ok(options)
    }

    /// Checks the separator characters and date formats.
    ///
    /// Delimiter, quote and comment must be distinct: a quoted line that
    /// starts with the comment marker would otherwise be skipped on import.
    pub fn validate(&self) -> Result<()> {
        self.delimiter_byte()?;
        self.quote_byte()?;
        self.comment_byte()?;
        let separators = [
            ("delimiter", self.delimiter),
            ("quote", self.quote),
            ("comment", self.comment),
        ];
        for (idx, &(first, value)) in separators.iter().enumerate() {
            if let Some(&(second, _)) = separators[idx + 1..].iter().find(|(_, c)| *c == value) {
                return Err(CsvError::ConflictingOptions {
                    first,
                    second,
                    value,
                });
            }
        }
        self.date_adapter()?;
        Ok(())
    }

    pub(crate) fn delimiter_byte(&self) -> Result<u8> {
        ascii_byte("delimiter", self.delimiter)
    }

    pub(crate) fn quote_byte(&self) -> Result<u8> {
        ascii_byte("quote", self.quote)
    }

    pub(crate) fn comment_byte(&self) -> Result<u8> {
        ascii_byte("comment", self.comment)
    }

    pub fn date_adapter(&self) -> Result<DateAdapter> {
        DateAdapter::new(&self.dates)
    }
}

fn ascii_byte(name: &'static str, value: char) -> Result<u8> {
    if value.is_ascii() {
        Ok(value as u8)
    } else {
        Err(CsvError::InvalidOption { name, value })
    }
}
