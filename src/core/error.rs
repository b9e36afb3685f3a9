use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("calendar defines no months")]
    NoMonths,

    #[error("calendar defines no weekdays")]
    NoWeekdays,

    #[error("month {0:?} has zero days")]
    EmptyMonth(String),

    #[error("leap year interval must be positive, got {0}")]
    InvalidLeapInterval(i64),

    #[error("leap year rule targets undefined month {0}")]
    UnknownLeapMonth(u32),

    #[error("intercalary block {name:?} follows undefined month {after_month}")]
    UnknownIntercalaryMonth { name: String, after_month: u32 },

    #[error("intercalary block {0:?} has zero days")]
    EmptyIntercalary(String),

    #[error("time subdivision must be positive: {0} hours/day, {1} minutes/hour, {2} seconds/minute")]
    InvalidTimeSubdivision(u32, u32, u32),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CalendarError>;
