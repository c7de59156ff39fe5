use log::{error, warn};
use serde::{de::DeserializeOwned, Serialize};

use super::Store;

/// Read `key` as JSON, falling back to `default` if it's missing or unreadable.
pub fn load<T: DeserializeOwned>(store: &impl Store, key: &str, default: T) -> T {
    let text = match store.read(key) {
        Ok(Some(text)) => text,
        Ok(None) => return default,
        Err(e) => {
            error!("read \"{key}\": {e:?}");
            return default;
        }
    };

    serde_json::from_str::<Option<T>>(&text)
        .map_err(|e| {
            warn!("couldn't parse \"{key}\", using default: {e}");
        })
        .ok()
        .flatten()
        .unwrap_or(default)
}

/// Read `key` ahead of writing it back. A value that is present but
/// unreadable is an error here, so callers never overwrite what they
/// couldn't read.
pub fn try_load<T: DeserializeOwned>(store: &impl Store, key: &str) -> Result<Option<T>, ()> {
    let text = store.read(key).map_err(|e| {
        error!("read \"{key}\": {e:?}");
    })?;

    let Some(text) = text else {
        return Ok(None);
    };

    serde_json::from_str::<Option<T>>(&text).map_err(|e| {
        error!("couldn't parse \"{key}\", refusing to update it: {e}");
    })
}

pub fn save<T: Serialize + ?Sized>(store: &impl Store, key: &str, value: &T) -> Result<(), ()> {
    let json = serde_json::to_string(value).map_err(|e| {
        error!("couldn't convert \"{key}\" to json: {e:?}");
    })?;

    store.write(key, &json).map_err(|e| {
        error!("write \"{key}\": {e:?}");
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::backend::MemBackend;

    #[test]
    fn missing_key_gives_default() {
        let store = MemBackend::default();

        let got: Vec<u32> = load(&store, "nothing", vec![7]);
        assert_eq!(got, vec![7]);
    }

    #[test]
    fn malformed_value_gives_default() {
        let store = MemBackend::default();
        store.write("k", "[1, 2,").unwrap();

        let got: Vec<u32> = load(&store, "k", vec![]);
        assert!(got.is_empty());
    }

    #[test]
    fn null_gives_default() {
        let store = MemBackend::default();
        store.write("k", "null").unwrap();

        let got: Vec<u32> = load(&store, "k", vec![3]);
        assert_eq!(got, vec![3]);
    }

    #[test]
    fn try_load_distinguishes_missing_from_unreadable() {
        let store = MemBackend::default();

        assert_eq!(try_load::<Vec<u32>>(&store, "k"), Ok(None));

        store.write("k", "null").unwrap();
        assert_eq!(try_load::<Vec<u32>>(&store, "k"), Ok(None));

        store.write("k", "[1, 2]").unwrap();
        assert_eq!(try_load::<Vec<u32>>(&store, "k"), Ok(Some(vec![1, 2])));

        // valid json, wrong shape
        store.write("k", r#"[1, "two"]"#).unwrap();
        assert_eq!(try_load::<Vec<u32>>(&store, "k"), Err(()));
    }

    #[test]
    fn saved_values_load_back() {
        let store = MemBackend::default();

        save(&store, "k", &["a", "b"]).unwrap();

        assert_eq!(store.read("k").unwrap().as_deref(), Some(r#"["a","b"]"#));
        let got: Vec<String> = load(&store, "k", vec![]);
        assert_eq!(got, ["a", "b"]);
    }
}
