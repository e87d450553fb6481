//! CSV importer for published draw histories. Accepts exports with the
//! headers `Draw Date, CRS Minimum, Invitations, Category`, skips blank
//! rows, and returns the records sorted newest-first as the analysis
//! functions expect.

use super::DrawRecord;
use chrono::NaiveDate;
use csv::StringRecord;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DrawImportError {
    #[error("failed to read draw history: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid draw history CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid draw record on line {line}: {reason}")]
    Record { line: u64, reason: String },
}

pub struct DrawHistoryImporter;

impl DrawHistoryImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<DrawRecord>, DrawImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<DrawRecord>, DrawImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let date_idx = column(&headers, "Draw Date")?;
        let cutoff_idx = column(&headers, "CRS Minimum")?;
        let invitations_idx = find_column(&headers, "Invitations");
        let category_idx = find_column(&headers, "Category");

        let mut records = Vec::new();
        for row in csv_reader.records() {
            let row = row?;
            let line = row.position().map(|position| position.line()).unwrap_or(0);

            if row.iter().all(|field| field.is_empty()) {
                continue;
            }

            let raw_date = field_at(&row, date_idx);
            let draw_date =
                NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|err| {
                    DrawImportError::Record {
                        line,
                        reason: format!("'{raw_date}' is not a YYYY-MM-DD date ({err})"),
                    }
                })?;

            let raw_cutoff = field_at(&row, cutoff_idx);
            let crs_minimum = raw_cutoff.parse::<u16>().map_err(|_| {
                DrawImportError::Record {
                    line,
                    reason: format!("'{raw_cutoff}' is not a valid CRS cutoff"),
                }
            })?;

            let invitations_issued = invitations_idx
                .map(|idx| field_at(&row, idx))
                .filter(|value| !value.is_empty())
                .map(|value| {
                    value.parse::<u32>().map_err(|_| DrawImportError::Record {
                        line,
                        reason: format!("'{value}' is not a valid invitation count"),
                    })
                })
                .transpose()?
                .unwrap_or(0);

            let category = category_idx
                .map(|idx| field_at(&row, idx))
                .filter(|value| !value.is_empty())
                .unwrap_or("general")
                .to_string();

            records.push(DrawRecord {
                draw_date,
                crs_minimum,
                invitations_issued,
                category,
            });
        }

        records.sort_by(|a, b| b.draw_date.cmp(&a.draw_date));
        Ok(records)
    }
}

fn column(headers: &StringRecord, name: &str) -> Result<usize, DrawImportError> {
    find_column(headers, name).ok_or_else(|| DrawImportError::Record {
        line: 1,
        reason: format!("missing required column '{name}'"),
    })
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(name))
}

fn field_at<'a>(row: &'a StringRecord, idx: usize) -> &'a str {
    row.get(idx).unwrap_or("").trim()
}
