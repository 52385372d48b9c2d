use chrono::{DateTime, Local, NaiveDate};

/// Represents an entity responsible for providing dates across the
/// application. This allows date-dependent behavior (template loading,
/// application state stamping) to be tested.
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
