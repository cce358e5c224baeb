use chrono::NaiveDate;

/// Date format used by input logs, config files and reports (`MM/DD/YYYY`).
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// A single brewing event.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Record {
    /// Customer that brewed
    pub customer_id: String,

    /// Calendar day of the event
    pub date: NaiveDate,
}

impl Record {
    /// Creates a record.
    pub fn new<S: Into<String>>(customer_id: S, date: NaiveDate) -> Self {
        Self {
            customer_id: customer_id.into(),
            date,
        }
    }
}

/// Parses a `MM/DD/YYYY` date; leading zeroes are optional.
///
/// # Errors
///
/// Returns an error if the string is not a valid calendar date in that format.
pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
}

/// Formats a date as `MM/DD/YYYY`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
