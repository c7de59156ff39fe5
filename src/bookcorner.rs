use std::result;

use log::{debug, error, info, trace};

use crate::auth::Credentials;
use crate::backend::{self, Store};
use crate::booking::Booking;
use crate::directory::Directory;
use crate::ledger::{Availability, Ledger};
use crate::session::{Session, Sessions};
use crate::time::{Day, Timestamp};

/// Everything a caller can be told went wrong. The messages are meant to
/// be shown to the user as-is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("Email already registered.")]
    DuplicateEmail,
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("{0}")]
    DateFull(&'static str),
    #[error("Booking not found.")]
    NotFound,
    #[error("{0}")]
    PastDate(&'static str),
    #[error("That appointment has been canceled.")]
    Canceled,
    #[error("Please log in first.")]
    NotLoggedIn,
    #[error("{0}")]
    MissingFields(&'static str),
    #[error("Invalid date, expected YYYY-MM-DD.")]
    BadDate,
    #[error("Internal error.")]
    Internal,
}

impl Error {
    pub const DAY_FULL: Self = Self::DateFull("Sorry, bookings are full for that day.");
    pub const MOVE_FULL: Self = Self::DateFull("That date is fully booked.");
    pub const DAY_PAST: Self = Self::PastDate("You cannot book for past dates.");
    pub const MOVE_PAST: Self = Self::PastDate("You cannot move to a past date.");
}

pub type Result<T> = result::Result<T, Error>;

pub struct BookCorner<S> {
    store: S,
    capacity: usize,
}

/// A logged-in caller. Booking operations act as `session`'s user.
pub struct BookCornerAuthed<'a, S> {
    corner: &'a BookCorner<S>,
    session: Session,
}

impl<S: Store> BookCorner<S> {
    pub fn new(store: S, capacity: usize) -> Result<Self> {
        backend::init(&store).map_err(|()| {
            error!("couldn't initialise store");
            Error::Internal
        })?;

        Ok(Self { store, capacity })
    }

    fn directory(&self) -> Directory<'_, S> {
        Directory::new(&self.store)
    }

    fn sessions(&self) -> Sessions<'_, S> {
        Sessions::new(&self.store)
    }

    fn ledger(&self) -> Ledger<'_, S> {
        Ledger::new(&self.store, self.capacity)
    }

    pub fn register(&self, name: &str, email: &str, pass: &str) -> Result<()> {
        self.directory().register(name, email, pass)
    }

    pub fn login(&self, email: &str, pass: &str) -> Result<BookCornerAuthed<'_, S>> {
        let user = self.directory().authenticate(&Credentials::new(email, pass))?;
        let session = self.sessions().start(&user)?;

        Ok(BookCornerAuthed {
            corner: self,
            session,
        })
    }

    /// Pick up the persisted session, if there is one.
    pub fn resume(&self) -> Result<BookCornerAuthed<'_, S>> {
        let session = self.sessions().current().ok_or(Error::NotLoggedIn)?;

        // not re-validated against the directory, only noted
        if self.directory().find(&session.user_id).is_none() {
            debug!("session user {} isn't in the directory", session.user_id);
        }

        trace!("{} resumed session", session.email);
        Ok(BookCornerAuthed {
            corner: self,
            session,
        })
    }

    pub fn availability(&self, date: Day) -> Availability {
        self.ledger().availability(date)
    }
}

impl<'a, S: Store> BookCornerAuthed<'a, S> {
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn logout(self) -> Result<()> {
        self.corner.sessions().end()
    }

    fn user_id(&self) -> &str {
        &self.session.user_id
    }

    pub fn book(&self, service: &str, date: Day, note: &str) -> Result<String> {
        let service = service.trim();
        if service.is_empty() {
            return Err(Error::MissingFields("Please choose a service and a date."));
        }
        date.ensure_not_past(Day::today())?;

        self.corner
            .ledger()
            .create(self.user_id(), service, date, note, Timestamp::now())
    }

    pub fn bookings(&self) -> Vec<Booking> {
        let bookings = self.corner.ledger().list_for_user(self.user_id());
        info!("{}, {} bookings", self.session.email, bookings.len());
        bookings
    }

    fn own(&self, booking_id: &str) -> Option<Booking> {
        self.corner
            .ledger()
            .get(booking_id)
            .filter(|b| b.user_id == self.user_id())
    }

    /// Move one of the user's active bookings. Canceled bookings stay put.
    pub fn reschedule(&self, booking_id: &str, new_date: Day) -> Result<()> {
        let Some(booking) = self.own(booking_id) else {
            info!("{}: no booking {booking_id} to move", self.session.email);
            return Err(Error::NotFound);
        };
        if !booking.is_active() {
            info!("{}: booking {booking_id} is canceled, not moving", self.session.email);
            return Err(Error::Canceled);
        }
        new_date
            .ensure_not_past(Day::today())
            .map_err(|_| Error::MOVE_PAST)?;

        self.corner.ledger().reschedule(booking_id, new_date)
    }

    pub fn cancel(&self, booking_id: &str) -> Result<()> {
        if self.own(booking_id).is_none() {
            debug!("{}: no booking {booking_id} to cancel", self.session.email);
            return Ok(());
        }

        self.corner.ledger().cancel(booking_id)
    }
}
