use crate::Error;
use chrono::NaiveDate;

/// Streak bookkeeping of a single customer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreakState {
    /// Most recent day the customer was seen on
    pub last_date: NaiveDate,

    /// Length of the streak still in progress; 0 once closed
    pub current_length: u32,

    /// Finished streaks, oldest first
    pub completed_lengths: Vec<u32>,
}

impl StreakState {
    fn new(date: NaiveDate) -> Self {
        Self {
            last_date: date,
            current_length: 1,
            completed_lengths: Vec::new(),
        }
    }

    fn advance(&mut self, date: NaiveDate) -> crate::Result<()> {
        match (date - self.last_date).num_days() {
            // NOTE: Same day again, nothing to do
            0 => return Ok(()),
            1 => self.current_length += 1,
            gap if gap > 1 => {
                self.completed_lengths.push(self.current_length);
                self.current_length = 1;
            }
            _ => {
                return Err(Error::OutOfOrderInput {
                    record: None,
                    date,
                    previous: self.last_date,
                })
            }
        }

        self.last_date = date;
        Ok(())
    }

    fn close(&mut self) {
        self.completed_lengths.push(self.current_length);
        self.current_length = 0;
    }
}

/// A customer's finished streaks, oldest first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerStreaks {
    /// Customer the streaks belong to
    pub customer_id: String,

    /// Streak lengths in days
    pub lengths: Vec<u32>,
}

/// Tracks contiguous-day streaks per customer.
///
/// Customers are kept in the order they were first seen.
#[derive(Debug, Default)]
pub struct StreakTracker {
    index: crate::HashMap<String, usize>,
    customers: Vec<(String, StreakState)>,
    is_closed: bool,
}

impl StreakTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers that `customer_id` brewed on `date`.
    ///
    /// Dates must be non-decreasing per customer, and the tracker must not be closed yet.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfOrderInput`] if `date` is before the customer's last seen day,
    /// or [`Error::StreaksClosed`] once [`StreakTracker::close_all`] has run.
    pub fn record(&mut self, customer_id: &str, date: NaiveDate) -> crate::Result<()> {
        if self.is_closed {
            return Err(Error::StreaksClosed {
                customer_id: customer_id.to_owned(),
                date,
            });
        }

        if let Some(&idx) = self.index.get(customer_id) {
            if let Some((_, state)) = self.customers.get_mut(idx) {
                return state.advance(date);
            }
        }

        self.index.insert(customer_id.to_owned(), self.customers.len());
        self.customers
            .push((customer_id.to_owned(), StreakState::new(date)));

        Ok(())
    }

    /// Finishes every open streak.
    ///
    /// Only the first call has an effect.
    pub fn close_all(&mut self) {
        if self.is_closed {
            return;
        }

        log::debug!("closing streaks of {} customers", self.customers.len());

        for (_, state) in &mut self.customers {
            state.close();
        }

        self.is_closed = true;
    }

    /// Returns `true` once [`StreakTracker::close_all`] has run.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    /// Returns the state of a customer.
    #[must_use]
    pub fn get(&self, customer_id: &str) -> Option<&StreakState> {
        let idx = *self.index.get(customer_id)?;
        self.customers.get(idx).map(|(_, state)| state)
    }

    /// Number of customers seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// Returns `true` if no customer was seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Consumes the tracker, returning the finished streaks of each customer.
    #[must_use]
    pub fn into_streaks(self) -> Vec<CustomerStreaks> {
        self.customers
            .into_iter()
            .map(|(customer_id, state)| CustomerStreaks {
                customer_id,
                lengths: state.completed_lengths,
            })
            .collect()
    }
}
