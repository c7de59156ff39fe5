use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use super::Store;

/// Keeps each key in `<root>/<key>.json`.
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    pub fn new(root: &Path) -> io::Result<Self> {
        fs::create_dir_all(root)?;

        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl Store for FileBackend {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    // write to a sibling then rename over, so a reader never sees half a collection
    fn write(&self, key: &str, value: &str) -> io::Result<()> {
        let path = self.path(key);
        let tmp = path.with_extension("json.tmp");

        let written = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&tmp)
            .and_then(|mut file| {
                file.write_all(value.as_bytes())?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&tmp, &path));

        if let Err(e) = written {
            if let Err(rm) = fs::remove_file(&tmp) {
                if rm.kind() != ErrorKind::NotFound {
                    warn!("couldn't remove {tmp:?}: {rm:?}");
                }
            }
            return Err(e);
        }

        debug!("wrote {} bytes to {path:?}", value.len());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn read_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path()).unwrap();

        assert_eq!(backend.read("lbc_users").unwrap(), None);
    }

    #[test]
    fn writes_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();

        {
            let backend = FileBackend::new(dir.path()).unwrap();
            backend.write("lbc_users", "[]").unwrap();
            backend.write("lbc_users", r#"[{"id":"x"}]"#).unwrap();
        }

        let backend = FileBackend::new(dir.path()).unwrap();
        assert_eq!(
            backend.read("lbc_users").unwrap().as_deref(),
            Some(r#"[{"id":"x"}]"#)
        );
        assert!(dir.path().join("lbc_users.json").exists());
        assert!(!dir.path().join("lbc_users.json.tmp").exists());
    }

    #[test]
    fn creates_missing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let backend = FileBackend::new(&nested).unwrap();
        backend.write("k", "1").unwrap();

        assert_eq!(backend.read("k").unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path()).unwrap();

        // a non-empty directory where the file should go makes the rename fail
        let blocker = dir.path().join("k.json");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("inside"), "x").unwrap();

        assert!(backend.write("k", "[]").is_err());
        assert!(!dir.path().join("k.json.tmp").exists());
        assert!(blocker.join("inside").exists());
    }
}
