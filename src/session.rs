use log::info;
use serde::{Deserialize, Serialize};

use crate::backend::{kv, Store, SESSION};
use crate::bookcorner::{Error, Result};
use crate::user::User;

/// Who is logged in. Refers to the user by id; name and email are copied for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for Session {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// The single persisted session. No expiry: it lasts until ended.
pub struct Sessions<'s, S> {
    store: &'s S,
}

impl<'s, S: Store> Sessions<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self { store }
    }

    pub fn start(&self, user: &User) -> Result<Session> {
        let session = Session::from(user);

        kv::save(self.store, SESSION, &Some(&session)).map_err(|()| Error::Internal)?;
        info!("{} login: session started", session.email);

        Ok(session)
    }

    pub fn current(&self) -> Option<Session> {
        kv::load(self.store, SESSION, None)
    }

    pub fn end(&self) -> Result<()> {
        if let Some(session) = self.current() {
            info!("{} logout", session.email);
        }

        kv::save(self.store, SESSION, &None::<Session>).map_err(|()| Error::Internal)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::auth::PwHash;
    use crate::backend::MemBackend;

    fn user(id: &str, email: &str) -> User {
        User {
            id: id.into(),
            name: "Ann".into(),
            email: email.into(),
            pwhash: PwHash::new("pw"),
        }
    }

    #[test]
    fn start_current_end() {
        let store = MemBackend::default();
        let sessions = Sessions::new(&store);

        assert_eq!(sessions.current(), None);

        let started = sessions.start(&user("u1", "a@x.com")).unwrap();
        assert_eq!(started.user_id, "u1");
        assert_eq!(sessions.current(), Some(started));

        sessions.end().unwrap();
        assert_eq!(sessions.current(), None);
        assert_eq!(store.read(SESSION).unwrap().as_deref(), Some("null"));
    }

    #[test]
    fn later_login_replaces_session() {
        let store = MemBackend::default();
        let sessions = Sessions::new(&store);

        sessions.start(&user("u1", "a@x.com")).unwrap();
        sessions.start(&user("u2", "b@x.com")).unwrap();

        assert_eq!(sessions.current().map(|s| s.user_id), Some("u2".into()));
    }

    #[test]
    fn persisted_layout() {
        let store = MemBackend::default();
        Sessions::new(&store).start(&user("u1", "a@x.com")).unwrap();

        assert_eq!(
            store.read(SESSION).unwrap().as_deref(),
            Some(r#"{"userId":"u1","name":"Ann","email":"a@x.com"}"#)
        );
    }

    #[test]
    fn ending_without_session_is_fine() {
        let store = MemBackend::default();

        Sessions::new(&store).end().unwrap();
        assert_eq!(Sessions::new(&store).current(), None);
    }
}
