use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::{EstateError, Result};

/// A scheduled meeting slot with a client, or the unset sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Appointment {
    #[default]
    Empty,
    Scheduled {
        date: NaiveDate,
        from: NaiveTime,
        to: NaiveTime,
    },
}

impl Appointment {
    /// Create a scheduled slot
    ///
    /// # Errors
    ///
    /// Returns `InvalidField` if `from` is not strictly before `to`.
    pub fn scheduled(date: NaiveDate, from: NaiveTime, to: NaiveTime) -> Result<Self> {
        if from >= to {
            return Err(EstateError::InvalidField {
                field: "appointment",
                reason: format!("Start time {} must be before end time {}", from, to),
            });
        }
        Ok(Self::Scheduled { date, from, to })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "-"),
            Self::Scheduled { date, from, to } => write!(
                f,
                "Date: {} (From: {} To: {})",
                date.format("%d-%m-%y"),
                from.format("%H:%M"),
                to.format("%H:%M")
            ),
        }
    }
}
