use chrono::NaiveDate;

/// Counts distinct customers active on one day.
#[derive(Debug)]
pub struct UniqueDayCounter {
    target_day: NaiveDate,
    customers: crate::HashSet<String>,
}

impl UniqueDayCounter {
    /// Creates a counter for `target_day`.
    #[must_use]
    pub fn new(target_day: NaiveDate) -> Self {
        Self {
            target_day,
            customers: crate::HashSet::default(),
        }
    }

    /// Registers a record; records of other days are ignored.
    pub fn observe(&mut self, customer_id: &str, date: NaiveDate) {
        if date == self.target_day && !self.customers.contains(customer_id) {
            self.customers.insert(customer_id.to_owned());
        }
    }

    /// The day being counted.
    #[must_use]
    pub fn target_day(&self) -> NaiveDate {
        self.target_day
    }

    /// Number of distinct customers seen on the target day.
    #[must_use]
    pub fn unique_count(&self) -> usize {
        self.customers.len()
    }
}
