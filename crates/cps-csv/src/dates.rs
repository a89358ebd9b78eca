//! Date parsing and formatting for date-valued columns.

use std::fmt::Write;

use chrono::NaiveDate;
use chrono::format::{Item, StrftimeItems};

use crate::error::{CsvError, Result};
use crate::options::DateFormats;

/// Parses dates in any of a set of formats and writes them in one.
#[derive(Debug, Clone)]
pub struct DateAdapter {
    output: String,
    inputs: Vec<String>,
}

impl DateAdapter {
    /// Builds an adapter, rejecting format strings chrono cannot interpret.
    ///
    /// The output format is always accepted on input so exported files
    /// re-import without loss.
    pub fn new(formats: &DateFormats) -> Result<Self> {
        check_output_format(&formats.output)?;
        let mut inputs = Vec::with_capacity(formats.inputs.len() + 1);
        for format in &formats.inputs {
            check_format(format)?;
            inputs.push(format.clone());
        }
        if !inputs.contains(&formats.output) {
            inputs.insert(0, formats.output.clone());
        }
        Ok(Self {
            output: formats.output.clone(),
            inputs,
        })
    }

    /// Parses a human-entered date. Returns `None` for empty or unrecognized text.
    pub fn parse(&self, text: &str) -> Option<NaiveDate> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.inputs
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
    }

    /// Formats a date in the canonical export format.
    pub fn format(&self, date: NaiveDate) -> String {
        date.format(&self.output).to_string()
    }
}

impl Default for DateAdapter {
    fn default() -> Self {
        let formats = DateFormats::default();
        Self {
            output: formats.output,
            inputs: formats.inputs,
        }
    }
}

/// Output formats must also render a bare date (no time or zone fields).
fn check_output_format(format: &str) -> Result<()> {
    check_format(format)?;
    let mut rendered = String::new();
    if write!(rendered, "{}", NaiveDate::default().format(format)).is_err() {
        return Err(CsvError::InvalidDateFormat {
            format: format.to_string(),
        });
    }
    Ok(())
}

fn check_format(format: &str) -> Result<()> {
    let invalid = format.trim().is_empty()
        || StrftimeItems::new(format).any(|item| matches!(item, Item::Error));
    if invalid {
        return Err(CsvError::InvalidDateFormat {
            format: format.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn may_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn parses_common_formats() {
        let adapter = DateAdapter::default();
        for text in [
            "2024-05-01",
            "5/1/2024",
            "05/01/2024",
            "5/1/24",
            "05-01-2024",
            "May 1, 2024",
            "01 May 2024",
            " 2024-05-01 ",
        ] {
            assert_eq!(adapter.parse(text), Some(may_first()), "{text}");
        }
    }

    #[test]
    fn rejects_garbage() {
        let adapter = DateAdapter::default();
        assert_eq!(adapter.parse(""), None);
        assert_eq!(adapter.parse("soon"), None);
        assert_eq!(adapter.parse("2024-13-01"), None);
    }

    #[test]
    fn formats_canonically() {
        assert_eq!(DateAdapter::default().format(may_first()), "2024-05-01");
    }

    #[test]
    fn custom_output_is_also_an_input() {
        let formats = DateFormats {
            output: "%d.%m.%Y".to_string(),
            inputs: vec!["%Y-%m-%d".to_string()],
        };
        let adapter = DateAdapter::new(&formats).unwrap();
        let text = adapter.format(may_first());
        assert_eq!(text, "01.05.2024");
        assert_eq!(adapter.parse(&text), Some(may_first()));
    }

    #[test]
    fn time_fields_rejected_for_output() {
        let formats = DateFormats {
            output: "%Y-%m-%d %H:%M".to_string(),
            inputs: Vec::new(),
        };
        assert!(DateAdapter::new(&formats).is_err());
    }

    #[test]
    fn invalid_format_rejected() {
        let formats = DateFormats {
            output: "%Q".to_string(),
            inputs: Vec::new(),
        };
        assert!(matches!(
            DateAdapter::new(&formats),
            Err(CsvError::InvalidDateFormat { .. })
        ));
    }
}
