//! Record sources feeding the aggregator.
//!
//! The aggregator consumes any `Iterator<Item = Result<Record>>`; this module provides
//! the adapter for CSV event logs.

use crate::{parse_date, Error, Record};
use std::{fs::File, io::Read, path::Path};

/// Default column holding the customer identifier.
pub const CUSTOMER_COLUMN: usize = 1;

/// Default column holding the event date.
pub const DATE_COLUMN: usize = 2;

/// Lazily reads [`Record`]s from a CSV event log.
///
/// The first row is treated as a header and skipped.
pub struct CsvSource<R: Read> {
    records: csv::ByteRecordsIntoIter<R>,
    customer_column: usize,
    date_column: usize,
}

impl CsvSource<File> {
    /// Opens a CSV event log on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        log::debug!("opening event log {path:?}");
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> CsvSource<R> {
    /// Wraps a reader containing CSV data.
    pub fn new(reader: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        Self {
            // NOTE: Fields are decoded one by one so bad UTF-8 is pinned to its own row
            records: reader.into_byte_records(),
            customer_column: CUSTOMER_COLUMN,
            date_column: DATE_COLUMN,
        }
    }

    /// Sets which (0-based) columns hold the customer and the date.
    ///
    /// Default = 1 and 2
    #[must_use]
    pub fn with_columns(mut self, customer: usize, date: usize) -> Self {
        self.customer_column = customer;
        self.date_column = date;
        self
    }

    fn convert(&self, row: &csv::ByteRecord) -> crate::Result<Record> {
        let line = row.position().map_or(0, csv::Position::line);

        let customer = field(row, line, self.customer_column, "customer")?;

        if customer.is_empty() {
            return Err(Error::MalformedRecord {
                line,
                reason: "empty customer id".into(),
            });
        }

        let date = field(row, line, self.date_column, "date")?;

        let date = parse_date(date).map_err(|e| Error::MalformedRecord {
            line,
            reason: format!("invalid date {date:?}: {e}"),
        })?;

        Ok(Record::new(customer, date))
    }
}

/// Decodes one field of a row as UTF-8.
fn field<'a>(
    row: &'a csv::ByteRecord,
    line: u64,
    idx: usize,
    name: &str,
) -> crate::Result<&'a str> {
    let malformed = |reason: String| Error::MalformedRecord { line, reason };

    let bytes = row
        .get(idx)
        .ok_or_else(|| malformed(format!("missing {name} column {idx}")))?;

    std::str::from_utf8(bytes)
        .map_err(|e| malformed(format!("{name} column {idx} is not valid UTF-8: {e}")))
}

impl<R: Read> Iterator for CsvSource<R> {
    type Item = crate::Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = match self.records.next()? {
            Ok(row) => row,
            Err(e) => return Some(Err(e.into())),
        };

        Some(self.convert(&row))
    }
}
