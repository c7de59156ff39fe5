use std::cell::RefCell;
use std::collections::HashMap;
use std::io;

use super::Store;

/// Volatile store; everything is lost with the process.
#[derive(Default)]
pub struct MemBackend {
    values: RefCell<HashMap<String, String>>,
}

impl Store for MemBackend {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        self.values.borrow_mut().insert(key.into(), value.into());
        Ok(())
    }
}
