use chrono::{NaiveDate, Utc};

/// Daily counter columns. Increment-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterField {
    TotalRequests,
    TotalUpsells,
}

impl CounterField {
    pub fn column(self) -> &'static str {
        match self {
            CounterField::TotalRequests => "total_requests",
            CounterField::TotalUpsells => "total_upsells",
        }
    }
}

/// Counter key for the current UTC day.
pub fn current_day() -> NaiveDate {
    Utc::now().date_naive()
}
