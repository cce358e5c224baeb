use chrono::NaiveDate;

/// Error type
#[derive(Debug)]
pub enum Error {
    /// An IO error.
    Io(std::io::Error),

    /// The CSV reader or writer failed.
    Csv(csv::Error),

    /// A record could not be turned into a `(customer, date)` pair.
    MalformedRecord {
        /// 1-based line in the input.
        line: u64,

        /// What was wrong with it.
        reason: String,
    },

    /// A record is dated before the record that preceded it.
    OutOfOrderInput {
        /// 1-based position of the offending record in the stream, if known.
        record: Option<u64>,

        /// Date of the offending record.
        date: NaiveDate,

        /// Most recent date seen before it.
        previous: NaiveDate,
    },

    /// A record reached a streak tracker after its streaks were closed.
    StreaksClosed {
        /// Customer of the rejected record.
        customer_id: String,

        /// Date of the rejected record.
        date: NaiveDate,
    },

    /// Options are missing, unparseable or contradict each other.
    InvalidConfiguration(String),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => {
                write!(f, "{e}")
            }
            Self::Csv(e) => {
                write!(f, "{e}")
            }
            Self::MalformedRecord { line, reason } => {
                write!(f, "MalformedRecord at line {line}: {reason}")
            }
            Self::OutOfOrderInput {
                record,
                date,
                previous,
            } => {
                write!(f, "OutOfOrderInput: {date} comes after {previous}")?;
                if let Some(n) = record {
                    write!(f, " (record #{n})")?;
                }
                Ok(())
            }
            Self::StreaksClosed { customer_id, date } => {
                write!(f, "StreaksClosed: cannot record {customer_id:?} on {date}")
            }
            Self::InvalidConfiguration(msg) => {
                write!(f, "InvalidConfiguration: {msg}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Csv(e) => Some(e),
            _ => None,
        }
    }
}

/// Result helper type
pub type Result<T> = std::result::Result<T, Error>;
