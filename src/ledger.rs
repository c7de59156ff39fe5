use std::fmt;

use log::{debug, info};

use crate::backend::{kv, Store, BOOKINGS};
use crate::bookcorner::{Error, Result};
use crate::booking::{Booking, Status};
use crate::id::new_id;
use crate::time::{Day, Timestamp};

pub const DEFAULT_CAPACITY: usize = 50;

/// How full a day is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    pub used: usize,
    pub capacity: usize,
}

impl Availability {
    pub fn is_full(&self) -> bool {
        self.used >= self.capacity
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "{} / {} booked", self.used, self.capacity)
    }
}

/// All bookings, with at most `capacity` active ones on any day.
///
/// Every call re-reads the collection and every mutation writes the whole
/// collection back in one go. The ledger doesn't know about past days,
/// callers check that.
pub struct Ledger<'s, S> {
    store: &'s S,
    capacity: usize,
}

fn count_active(bookings: &[Booking], date: Day) -> usize {
    bookings
        .iter()
        .filter(|b| b.date == date && b.is_active())
        .count()
}

impl<'s, S: Store> Ledger<'s, S> {
    pub fn new(store: &'s S, capacity: usize) -> Self {
        Self { store, capacity }
    }

    fn bookings(&self) -> Vec<Booking> {
        kv::load(self.store, BOOKINGS, vec![])
    }

    // for read-modify-write: refuses rather than starting from an empty list
    fn bookings_for_update(&self) -> Result<Vec<Booking>> {
        kv::try_load(self.store, BOOKINGS)
            .map(Option::unwrap_or_default)
            .map_err(|()| Error::Internal)
    }

    fn save(&self, bookings: &[Booking]) -> Result<()> {
        kv::save(self.store, BOOKINGS, bookings).map_err(|()| Error::Internal)
    }

    pub fn active_count_on(&self, date: Day) -> usize {
        count_active(&self.bookings(), date)
    }

    pub fn availability(&self, date: Day) -> Availability {
        Availability {
            used: self.active_count_on(date),
            capacity: self.capacity,
        }
    }

    pub fn get(&self, booking_id: &str) -> Option<Booking> {
        self.bookings().into_iter().find(|b| b.id == booking_id)
    }

    pub fn create(
        &self,
        user_id: &str,
        service: &str,
        date: Day,
        note: &str,
        now: Timestamp,
    ) -> Result<String> {
        let mut bookings = self.bookings_for_update()?;

        let used = count_active(&bookings, date);
        if used >= self.capacity {
            info!("{user_id}: {date} is full ({used}/{})", self.capacity);
            return Err(Error::DAY_FULL);
        }

        let booking = Booking {
            id: new_id(),
            user_id: user_id.into(),
            service: service.into(),
            date,
            note: note.into(),
            status: Status::Active,
            created_at: now,
        };
        let id = booking.id.clone();
        info!("{user_id}: booked {service} on {date} as {id}");

        bookings.push(booking);
        self.save(&bookings)?;

        Ok(id)
    }

    /// A user's bookings, most recently created first.
    pub fn list_for_user(&self, user_id: &str) -> Vec<Booking> {
        // reversed before the (stable) sort so equal timestamps come out newest-inserted first
        let mut mine: Vec<_> = self
            .bookings()
            .into_iter()
            .rev()
            .filter(|b| b.user_id == user_id)
            .collect();

        mine.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        debug!("{user_id}: {} bookings", mine.len());

        mine
    }

    /// Move a booking to `new_date`.
    ///
    /// The capacity of `new_date` is only checked if the date actually
    /// changes, and is checked against that day's current active count.
    pub fn reschedule(&self, booking_id: &str, new_date: Day) -> Result<()> {
        let mut bookings = self.bookings_for_update()?;
        let target_full = count_active(&bookings, new_date) >= self.capacity;

        let booking = bookings
            .iter_mut()
            .find(|b| b.id == booking_id)
            .ok_or(Error::NotFound)?;

        if booking.date == new_date {
            debug!("{booking_id}: already on {new_date}");
        } else if target_full {
            info!("{booking_id}: can't move to {new_date}, full");
            return Err(Error::MOVE_FULL);
        }

        info!("{booking_id}: moved from {} to {new_date}", booking.date);
        booking.date = new_date;

        self.save(&bookings)
    }

    /// Cancel a booking. Unknown ids and repeat cancels succeed without effect.
    pub fn cancel(&self, booking_id: &str) -> Result<()> {
        let mut bookings = self.bookings_for_update()?;

        let Some(booking) = bookings.iter_mut().find(|b| b.id == booking_id) else {
            debug!("{booking_id}: no such booking, nothing to cancel");
            return Ok(());
        };

        if booking.status == Status::Canceled {
            debug!("{booking_id}: already canceled");
            return Ok(());
        }

        booking.status = Status::Canceled;
        info!("{booking_id}: canceled ({})", booking.date);

        self.save(&bookings)
    }
}
