mod ini;
mod span;

use crate::{parse_date, Error};
use chrono::NaiveDate;
use ini::Ini;
use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

/// Section of the config file holding the run parameters.
const SECTION: &str = "Parameters";

/// Run parameters of an aggregation pass.
///
/// Constructed through [`Config::builder`] or loaded from an INI file:
///
/// ```ini
/// [Parameters]
/// startBrewDay = 01/01/2020
/// endBrewDay = 01/31/2020
/// movingWindow = 7
/// brewCountDay = 01/15/2020
/// csvPath = brews.csv
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    start_date: NaiveDate,
    end_date: NaiveDate,
    window_size: NonZeroUsize,
    target_day: NaiveDate,
    input_path: Option<PathBuf>,
    output_dir: PathBuf,
}

impl Config {
    /// Returns a builder with no parameters set.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Loads the `[Parameters]` section of an INI file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the parameters are invalid.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        log::debug!("loading config from {path:?}");

        let contents = std::fs::read_to_string(path)?;
        Self::from_ini_str(&contents)
    }

    /// Parses the `[Parameters]` section of an INI document.
    ///
    /// Recognized keys: `startBrewDay`, `endBrewDay`, `movingWindow`, `brewCountDay`,
    /// `csvPath` (all required) and `outputDir` (optional).
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed, a key is missing, or the
    /// parameters are invalid.
    pub fn from_ini_str(contents: &str) -> crate::Result<Self> {
        let ini = Ini::parse(contents)?;

        let section = ini
            .section(SECTION)
            .ok_or_else(|| invalid(format!("missing section [{SECTION}]")))?;

        let required = |key: &str| {
            section
                .get(key)
                .ok_or_else(|| invalid(format!("missing key {key:?} in [{SECTION}]")))
        };

        let date = |key: &str| {
            let value = required(key)?;
            parse_date(value).map_err(|e| invalid(format!("{key} = {value:?}: {e}")))
        };

        let window_size = {
            let value = required("movingWindow")?;
            value
                .parse::<usize>()
                .map_err(|e| invalid(format!("movingWindow = {value:?}: {e}")))?
        };

        let mut builder = Self::builder()
            .start_date(date("startBrewDay")?)
            .end_date(date("endBrewDay")?)
            .window_size(window_size)
            .target_day(date("brewCountDay")?)
            .input_path(required("csvPath")?);

        if let Some(dir) = section.get("outputDir") {
            builder = builder.output_dir(dir);
        }

        builder.build()
    }

    /// First day of streak tracking (inclusive).
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of streak tracking (inclusive).
    #[must_use]
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Number of days averaged by the moving average.
    #[must_use]
    pub fn window_size(&self) -> NonZeroUsize {
        self.window_size
    }

    /// Day whose distinct customers are counted.
    #[must_use]
    pub fn target_day(&self) -> NaiveDate {
        self.target_day
    }

    /// Location of the event log, if configured.
    #[must_use]
    pub fn input_path(&self) -> Option<&Path> {
        self.input_path.as_deref()
    }

    /// Directory reports are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns `true` if `date` lies inside the tracked range.
    #[must_use]
    pub fn in_range(&self, date: NaiveDate) -> bool {
        (self.start_date..=self.end_date).contains(&date)
    }

    /// Number of days in the tracked range, which bounds the longest possible streak.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn range_days(&self) -> u32 {
        (self.end_date - self.start_date).num_days() as u32 + 1
    }
}

fn invalid(msg: String) -> Error {
    Error::InvalidConfiguration(msg)
}

/// Builder for [`Config`].
#[derive(Clone, Debug)]
pub struct ConfigBuilder {
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    window_size: Option<usize>,
    target_day: Option<NaiveDate>,
    input_path: Option<PathBuf>,
    output_dir: PathBuf,
}

impl ConfigBuilder {
    pub(crate) fn new() -> Self {
        Self {
            start_date: None,
            end_date: None,
            window_size: None,
            target_day: None,
            input_path: None,
            output_dir: PathBuf::from("."),
        }
    }

    /// Sets the first day of streak tracking (inclusive).
    #[must_use]
    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the last day of streak tracking (inclusive).
    #[must_use]
    pub fn end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Sets the number of days averaged by the moving average.
    #[must_use]
    pub fn window_size(mut self, days: usize) -> Self {
        self.window_size = Some(days);
        self
    }

    /// Sets the day whose distinct customers are counted.
    #[must_use]
    pub fn target_day(mut self, date: NaiveDate) -> Self {
        self.target_day = Some(date);
        self
    }

    /// Sets the location of the event log.
    #[must_use]
    pub fn input_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Sets the directory reports are written to.
    ///
    /// Default = current directory
    #[must_use]
    pub fn output_dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_dir = path.into();
        self
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if a parameter is missing, the window size is zero,
    /// or the end date lies before the start date.
    pub fn build(self) -> crate::Result<Config> {
        let start_date = self.start_date.ok_or_else(|| invalid("start date not set".into()))?;
        let end_date = self.end_date.ok_or_else(|| invalid("end date not set".into()))?;
        let target_day = self.target_day.ok_or_else(|| invalid("target day not set".into()))?;

        let window_size = self
            .window_size
            .ok_or_else(|| invalid("window size not set".into()))?;
        let window_size = NonZeroUsize::new(window_size)
            .ok_or_else(|| invalid("window size must be positive".into()))?;

        if end_date < start_date {
            return Err(invalid(format!(
                "end date {end_date} is before start date {start_date}"
            )));
        }

        let config = Config {
            start_date,
            end_date,
            window_size,
            target_day,
            input_path: self.input_path,
            output_dir: self.output_dir,
        };

        log::debug!("using {config:?}");

        Ok(config)
    }
}
