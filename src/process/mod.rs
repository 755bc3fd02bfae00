// src/process/mod.rs
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod date_parser;
pub mod error_log;

use date_parser::parse_birthdate;
use error_log::{RowError, RowErrorSink};

/// Number of fields every data row must have: id, name, birthdate.
pub const FIELDS_PER_ROW: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    pub name: String,
    pub birthdate: NaiveDate,
}

/// Id → person, built once by [`parse_records`] and read-only afterwards.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PersonTable {
    people: HashMap<String, PersonRecord>,
}

impl PersonTable {
    pub fn get(&self, id: &str) -> Option<&PersonRecord> {
        self.people.get(id)
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}

/// Fatal loader failures. Rows with a bad birthdate are not errors here;
/// they go to the [`RowErrorSink`] instead.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("payload is not valid UTF-8")]
    Decode(#[from] std::str::Utf8Error),

    #[error("line {line}: expected {FIELDS_PER_ROW} fields, found {fields}")]
    MalformedRow { line: usize, fields: usize },

    #[error("line {line}: unreadable CSV record")]
    Csv {
        line: usize,
        #[source]
        source: csv::Error,
    },

    #[error("could not write to the error log")]
    Sink(#[source] std::io::Error),
}

/// Turn a fetched CSV payload into a [`PersonTable`].
///
/// - The first line is a header and is skipped without inspection.
/// - Each data line must have exactly [`FIELDS_PER_ROW`] fields, otherwise the
///   whole load fails with [`LoadError::MalformedRow`]. A blank line has none.
/// - Rows whose birthdate isn't `D/M/YYYY` are reported to `sink` with their
///   1-based line number and left out of the table.
/// - A later row with the same id replaces the earlier one.
#[tracing::instrument(level = "info", skip(csv_bytes, sink), fields(bytes = csv_bytes.len()))]
pub fn parse_records<S: RowErrorSink + ?Sized>(
    csv_bytes: &[u8],
    sink: &mut S,
) -> Result<PersonTable, LoadError> {
    let text = std::str::from_utf8(csv_bytes)?;

    // Lines are split here rather than by the csv reader, which would skip
    // blank lines and shift every line number after them.
    let mut row_reader = ReaderBuilder::new();
    row_reader.has_headers(false).flexible(true);
    let mut record = StringRecord::new();

    let mut table = PersonTable::default();
    let mut rejected = 0usize;
    let mut rows = 0usize;

    for (idx, raw) in text.lines().enumerate().skip(1) {
        // header is line 1
        let line = idx + 1;
        rows += 1;

        // a blank line reads as no record at all, leaving `record` empty
        row_reader
            .from_reader(raw.as_bytes())
            .read_record(&mut record)
            .map_err(|source| LoadError::Csv { line, source })?;

        let (id, name, bday) = match (record.len(), record.get(0), record.get(1), record.get(2)) {
            (FIELDS_PER_ROW, Some(id), Some(name), Some(bday)) => (id, name, bday),
            (fields, ..) => return Err(LoadError::MalformedRow { line, fields }),
        };

        match parse_birthdate(bday) {
            Ok(birthdate) => {
                let replaced = table.people.insert(
                    id.to_string(),
                    PersonRecord {
                        name: name.to_string(),
                        birthdate,
                    },
                );
                if replaced.is_some() {
                    debug!(line, id, "duplicate id, keeping the later row");
                }
            }
            Err(err) => {
                warn!(line, id, error = %err, "dropping row with unparseable birthdate");
                rejected += 1;
                sink.record(&RowError {
                    line,
                    id: id.to_string(),
                })
                .map_err(LoadError::Sink)?;
            }
        }
    }

    info!(rows, kept = table.len(), rejected, "loaded person table");
    Ok(table)
}
