use std::collections::HashSet;

use csv::ReaderBuilder;

use crate::error::{PipelineError, Result};

/// Name of the column holding review text.
pub const TEXT_COLUMN: &str = "text";

/// An uploaded CSV: header names plus string cells, row by row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl ReviewTable {
    /// Build a table from already split cells.
    ///
    /// Repeated header names are made unique by suffixing `.1`, `.2`, ... so every
    /// column survives into the output rows.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Csv`] if a row's length differs from the header's.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let headers = dedup_headers(headers);
        if let Some(i) = rows.iter().position(|r| r.len() != headers.len()) {
            return Err(PipelineError::Csv(format!(
                "Row {} has {} fields, header has {}",
                i,
                rows[i].len(),
                headers.len()
            )));
        }
        Ok(Self { headers, rows })
    }

    /// Parse CSV bytes. The first record is the header.
    ///
    /// UTF-8 input is read as is (a leading byte-order mark is dropped); anything else is
    /// decoded as Latin-1, which maps every byte to a character.
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self> {
        let content = decode_text(bytes);

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let rows = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect::<Vec<_>>()))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Self::new(headers, rows)
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows in file order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the file had a header but no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Every review text, in row order.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Schema`] if there is no `text` column, and
    /// [`PipelineError::InputValidation`] if a row's text cell is empty. Whitespace-only
    /// text is kept.
    pub fn texts(&self) -> Result<Vec<&str>> {
        let column = self.column(TEXT_COLUMN).ok_or_else(|| {
            PipelineError::Schema(format!(
                "Missing required column '{}' (found: {})",
                TEXT_COLUMN,
                self.headers.join(", ")
            ))
        })?;

        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let text = row[column].as_str();
                if text.is_empty() {
                    Err(PipelineError::InputValidation(format!(
                        "Row {i} has an empty '{TEXT_COLUMN}' value"
                    )))
                } else {
                    Ok(text)
                }
            })
            .collect()
    }
}

fn dedup_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(headers.len());
    let mut unique = Vec::with_capacity(headers.len());
    for header in headers {
        let mut name = header.clone();
        let mut n = 1;
        while seen.contains(&name) {
            name = format!("{header}.{n}");
            n += 1;
        }
        seen.insert(name.clone());
        unique.push(name);
    }
    unique
}

fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.strip_prefix('\u{feff}').unwrap_or(text).to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
