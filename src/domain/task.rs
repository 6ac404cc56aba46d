use chrono::NaiveDateTime;
use derive_more::derive::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub status: String,
    pub created_at: Option<NaiveDateTime>,
}

// title and status as text for the store, absent fields included
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskMetrics {
    pub open_tasks: i64,
    pub inprogress_tasks: i64,
    pub completed_tasks: i64,
}

/// A LIMIT or OFFSET value as it is bound. Whole numbers go in as integers, anything else is
/// handed over untouched and sqlite decides whether it is usable.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum PageBound {
    #[display("{_0}")]
    Integer(i64),
    #[display("{_0}")]
    Real(f64),
    #[display("'{_0}'")]
    Text(String),
}

impl PageBound {
    pub fn from_number(value: f64) -> Self {
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
            PageBound::Integer(value as i64)
        } else {
            PageBound::Real(value)
        }
    }
}
