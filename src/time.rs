use std::{fmt, str::FromStr};

use log::{error, warn};
use serde::{Deserialize, Serialize};

use ::time::{format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime};

use crate::bookcorner::{Error, Result};

#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(#[serde(with = "::time::serde::rfc3339")] OffsetDateTime);

impl Timestamp {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    #[cfg(test)]
    pub fn from_unix(secs: i64) -> Self {
        Self(OffsetDateTime::from_unix_timestamp(secs).unwrap())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.format(&Rfc3339) {
            Ok(s) => write!(fmt, "{}", s),
            Err(_) => write!(fmt, "{}", self.0.unix_timestamp()),
        }
    }
}

::time::serde::format_description!(iso_day, Date, "[year]-[month]-[day]");

/// A calendar day with no time component, stored as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Day(#[serde(with = "iso_day")] Date);

impl Day {
    /// The current day in local time, or UTC if the local offset is unknown.
    pub fn today() -> Self {
        let now = OffsetDateTime::now_local().unwrap_or_else(|e| {
            warn!("couldn't determine local offset, using UTC: {e}");
            OffsetDateTime::now_utc()
        });

        Self(now.date())
    }

    /// Bookings can't be made for, or moved to, a day before `today`.
    pub fn ensure_not_past(self, today: Day) -> Result<()> {
        if self < today {
            return Err(Error::DAY_PAST);
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn previous(self) -> Option<Self> {
        self.0.previous_day().map(Self)
    }
}

impl From<Date> for Day {
    fn from(date: Date) -> Self {
        Self(date)
    }
}

impl FromStr for Day {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Date::parse(s.trim(), format_description!("[year]-[month]-[day]"))
            .map(Self)
            .map_err(|e| {
                warn!("couldn't parse \"{s}\" as a day: {e}");
                Error::BadDate
            })
    }
}

impl fmt::Display for Day {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.format(format_description!("[year]-[month]-[day]")) {
            Ok(s) => write!(fmt, "{}", s),
            Err(e) => {
                error!("couldn't format day {:?}: {e}", self.0);
                Err(fmt::Error)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use ::time::macros::date;

    #[test]
    fn day_parses_and_prints_iso() {
        let day: Day = "2025-06-01".parse().unwrap();

        assert_eq!(day, Day::from(date!(2025 - 06 - 01)));
        assert_eq!(day.to_string(), "2025-06-01");
    }

    #[test]
    fn day_rejects_garbage() {
        assert_eq!("".parse::<Day>(), Err(Error::BadDate));
        assert_eq!("2025-13-01".parse::<Day>(), Err(Error::BadDate));
        assert_eq!("01/06/2025".parse::<Day>(), Err(Error::BadDate));
    }

    #[test]
    fn day_serialises_as_plain_string() {
        let day = Day::from(date!(2025 - 06 - 01));

        let json = serde_json::to_string(&day).unwrap();
        assert_eq!(json, "\"2025-06-01\"");

        let back: Day = serde_json::from_str(&json).unwrap();
        assert_eq!(back, day);
    }

    #[test]
    fn past_days_are_rejected() {
        let today = Day::from(date!(2025 - 06 - 10));

        assert_eq!(
            Day::from(date!(2025 - 06 - 09)).ensure_not_past(today),
            Err(Error::DAY_PAST)
        );
        // today itself is fine
        assert_eq!(today.ensure_not_past(today), Ok(()));
        assert_eq!(Day::from(date!(2026 - 01 - 01)).ensure_not_past(today), Ok(()));
    }

    #[test]
    fn timestamps_order_chronologically() {
        let earlier = Timestamp::from_unix(1_700_000_000);
        let later = Timestamp::from_unix(1_700_000_001);

        assert!(earlier < later);

        let json = serde_json::to_string(&earlier).unwrap();
        assert_eq!(json, "\"2023-11-14T22:13:20Z\"");
        assert_eq!(serde_json::from_str::<Timestamp>(&json).unwrap(), earlier);
    }
}
