use log::{debug, info};

use crate::auth::{normalise_email, Credentials, PwHash};
use crate::backend::{kv, Store, USERS};
use crate::bookcorner::{Error, Result};
use crate::id::new_id;
use crate::user::User;

/// Registered accounts. Users are only ever added.
pub struct Directory<'s, S> {
    store: &'s S,
}

impl<'s, S: Store> Directory<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    fn users(&self) -> Vec<User> {
        kv::load(self.store, USERS, vec![])
    }

    fn users_for_update(&self) -> Result<Vec<User>> {
        kv::try_load(self.store, USERS)
            .map(Option::unwrap_or_default)
            .map_err(|()| Error::Internal)
    }

    pub fn register(&self, name: &str, email: &str, pass: &str) -> Result<()> {
        let name = name.trim();
        let email = normalise_email(email);

        if name.is_empty() || email.is_empty() || pass.is_empty() {
            return Err(Error::MissingFields("All fields are required."));
        }

        let mut users = self.users_for_update()?;
        if users.iter().any(|u| normalise_email(&u.email) == email) {
            info!("rejecting registration, {email} already registered");
            return Err(Error::DuplicateEmail);
        }

        let user = User {
            id: new_id(),
            name: name.into(),
            email,
            pwhash: PwHash::new(pass),
        };
        info!("registered {} as {}", user.email, user.id);
        users.push(user);

        kv::save(self.store, USERS, &users).map_err(|()| Error::Internal)
    }

    pub fn authenticate(&self, creds: &Credentials) -> Result<User> {
        let user = self
            .users()
            .into_iter()
            .find(|u| u.email == creds.email() && u.pwhash.verify(creds.pass()));

        match user {
            Some(user) => {
                debug!("{} authenticated", user.email);
                Ok(user)
            }
            None => {
                info!("failed login for {}", creds.email());
                Err(Error::InvalidCredentials)
            }
        }
    }

    pub fn find(&self, user_id: &str) -> Option<User> {
        self.users().into_iter().find(|u| u.id == user_id)
    }
}
