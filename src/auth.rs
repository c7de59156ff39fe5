use std::fmt;

use log::error;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub fn normalise_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// A login attempt, with the email already normalised.
pub struct Credentials {
    email: String,
    pass: String,
}

impl Credentials {
    pub fn new(email: &str, pass: &str) -> Self {
        Self {
            email: normalise_email(email),
            pass: pass.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn pass(&self) -> &str {
        &self.pass
    }
}

/// Salted SHA-256 of a password, stored as `salt$digest`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PwHash(String);

impl PwHash {
    pub fn new(pass: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        Self::with_salt(&salt, pass)
    }

    fn with_salt(salt: &str, pass: &str) -> Self {
        let digest = sha256::digest(format!("{salt}:{pass}").as_bytes());
        Self(format!("{salt}${digest}"))
    }

    pub fn verify(&self, pass: &str) -> bool {
        let Some((salt, _)) = self.0.split_once('$') else {
            error!("stored password hash has no salt");
            return false;
        };

        Self::with_salt(salt, pass) == *self
    }
}

// keep digests out of logs
impl fmt::Debug for PwHash {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "PwHash(..)")
    }
}
