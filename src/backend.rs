use std::io;

use log::{error, info};

mod backend_file;
pub use backend_file::FileBackend;

mod backend_mem;
pub use backend_mem::MemBackend;

pub mod kv;

pub const USERS: &str = "lbc_users";
pub const SESSION: &str = "lbc_session";
pub const BOOKINGS: &str = "lbc_bookings";

/// Durable text storage, one value per key.
///
/// Each call is atomic on its own; nothing spans keys.
pub trait Store {
    fn read(&self, key: &str) -> io::Result<Option<String>>;

    fn write(&self, key: &str, value: &str) -> io::Result<()>;
}

/// Seed any missing or unreadable collection with its empty value.
pub fn init(store: &impl Store) -> Result<(), ()> {
    let seeds = [(USERS, "[]"), (BOOKINGS, "[]"), (SESSION, "null")];

    for (key, empty) in seeds {
        let existing = store.read(key).map_err(|e| {
            error!("read \"{key}\": {e:?}");
        })?;

        let valid = existing
            .as_deref()
            .map(|s| serde_json::from_str::<serde_json::Value>(s).is_ok())
            .unwrap_or(false);

        if !valid {
            info!("initialising \"{key}\"");
            store.write(key, empty).map_err(|e| {
                error!("write \"{key}\": {e:?}");
            })?;
        }
    }

    Ok(())
}
