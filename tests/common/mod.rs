#![allow(dead_code)]

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

use dbkeys::store::{Cursor, KeyRange, Store, StoreError};

const REFRESH_VAR: &str = "DBKEYS_UPDATE_SNAPSHOTS";

fn snapshot_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/snapshots")
        .join(name)
}

/// Compare `rendered` with the stored snapshot `name`, ignoring CRLF
/// differences. With `DBKEYS_UPDATE_SNAPSHOTS` set the snapshot is rewritten
/// instead.
pub fn assert_snapshot(name: &str, rendered: &str) {
    let path = snapshot_path(name);
    if std::env::var_os(REFRESH_VAR).is_some() {
        refresh_snapshot(&path, rendered);
        return;
    }

    let stored = match fs::read_to_string(&path) {
        Ok(stored) => stored,
        Err(err) => panic!("{}: {} (run with {}=1 to create it)", path.display(), err, REFRESH_VAR),
    };
    let stored = stored.replace("\r\n", "\n");
    let rendered = rendered.replace("\r\n", "\n");
    assert!(
        stored == rendered,
        "output differs from {}\n--- stored\n{}--- rendered\n{}",
        path.display(),
        stored,
        rendered
    );
}

fn refresh_snapshot(path: &Path, rendered: &str) {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).expect("snapshot directory is writable");
    }
    fs::write(path, rendered).expect("snapshot file is writable");
}

/// Store whose cursors fail on demand, for exercising scan error paths.
#[derive(Debug, Default)]
pub struct FaultyStore {
    pub entries: Vec<(Vec<u8>, Vec<u8>)>,
    pub fail_open: bool,
    /// Fail the advance that would move past this many entries.
    pub fail_read_after: Option<usize>,
    pub fail_close: bool,
    pub close_calls: Cell<usize>,
}

impl FaultyStore {
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(k, v)| (k.as_bytes().to_vec(), v.as_bytes().to_vec()))
                .collect(),
            ..Self::default()
        }
    }
}

impl Store for FaultyStore {
    fn backend(&self) -> &'static str {
        "faulty"
    }

    fn iterator<'a>(&'a self, _range: &KeyRange) -> Result<Box<dyn Cursor + 'a>, StoreError> {
        if self.fail_open {
            return Err(StoreError::Iterator("injected open failure".to_string()));
        }
        Ok(Box::new(FaultyCursor {
            store: self,
            pos: 0,
        }))
    }
}

struct FaultyCursor<'a> {
    store: &'a FaultyStore,
    pos: usize,
}

impl Cursor for FaultyCursor<'_> {
    fn valid(&self) -> bool {
        self.pos < self.store.entries.len()
    }

    fn key(&self) -> &[u8] {
        &self.store.entries[self.pos].0
    }

    fn value(&self) -> &[u8] {
        &self.store.entries[self.pos].1
    }

    fn advance(&mut self) -> Result<(), StoreError> {
        if self.store.fail_read_after == Some(self.pos + 1) {
            return Err(StoreError::Read("injected read failure".to_string()));
        }
        self.pos += 1;
        Ok(())
    }

    fn close(&mut self) -> Result<(), StoreError> {
        self.store.close_calls.set(self.store.close_calls.get() + 1);
        if self.store.fail_close {
            return Err(StoreError::Close("injected close failure".to_string()));
        }
        Ok(())
    }
}
