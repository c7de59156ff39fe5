use std::fmt;

use serde::{Deserialize, Serialize};

use crate::time::{Day, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Canceled,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Canceled => "canceled",
        }
    }
}

/// An appointment. Only `date` (reschedule) and `status` (cancel) change
/// after creation, and a canceled booking stays canceled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub service: String,
    #[serde(rename = "appt_date")]
    pub date: Day,
    #[serde(default)]
    pub note: String,
    pub status: Status,
    pub created_at: Timestamp,
}

impl Booking {
    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            fmt,
            "{}  {}  {}  [{}]",
            self.id,
            self.date,
            self.service,
            self.status.as_str()
        )?;

        if !self.note.is_empty() {
            write!(fmt, "  \u{201c}{}\u{201d}", self.note)?;
        }
        Ok(())
    }
}
