use std::fmt;
use std::path::{Path, PathBuf};

use redb::{Database, TableDefinition, TableError};
use tracing::{debug, warn};

use super::{Cursor, KeyRange, Store, StoreError};

/// Table scanned when none is configured.
pub const DEFAULT_TABLE: &str = "kv";

type RawRange = redb::Range<'static, &'static [u8], &'static [u8]>;

/// Read-only view of one table in a redb database file.
pub struct RedbStore {
    db: Database,
    path: PathBuf,
    table: String,
}

impl fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedbStore")
            .field("path", &self.path)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open an existing database file. The file is never created.
    pub fn open(path: &Path, table: &str) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::Open {
                path: path.to_path_buf(),
                message: "database file does not exist".to_string(),
            });
        }
        let db = Database::open(path).map_err(|e| StoreError::Open {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), table, "opened redb database");
        Ok(Self {
            db,
            path: path.to_path_buf(),
            table: table.to_string(),
        })
    }

    /// Name of the scanned table.
    pub fn table(&self) -> &str {
        &self.table
    }
}

impl Store for RedbStore {
    fn backend(&self) -> &'static str {
        "redb"
    }

    fn iterator<'a>(&'a self, range: &KeyRange) -> Result<Box<dyn Cursor + 'a>, StoreError> {
        let txn = self
            .db
            .begin_read()
            .map_err(|e| StoreError::Iterator(e.to_string()))?;
        let definition: TableDefinition<&[u8], &[u8]> = TableDefinition::new(&self.table);

        let table = match txn.open_table(definition) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => {
                warn!(
                    path = %self.path.display(),
                    table = %self.table,
                    "table does not exist, treating keyspace as empty"
                );
                return Ok(Box::new(RedbCursor::empty()));
            }
            Err(e) => return Err(StoreError::Iterator(e.to_string())),
        };

        if range.is_empty() {
            return Ok(Box::new(RedbCursor::empty()));
        }
        let raw = table
            .range::<&[u8]>(range.bounds())
            .map_err(|e| StoreError::Iterator(e.to_string()))?;
        RedbCursor::new(raw).map(|cursor| Box::new(cursor) as Box<dyn Cursor + 'a>)
    }
}

/// Cursor over a redb range. Entries are copied out as the cursor advances.
struct RedbCursor {
    range: Option<RawRange>,
    current: Option<(Vec<u8>, Vec<u8>)>,
    closed: bool,
}

impl RedbCursor {
    fn new(range: RawRange) -> Result<Self, StoreError> {
        let mut cursor = Self {
            range: Some(range),
            current: None,
            closed: false,
        };
        cursor.fetch()?;
        Ok(cursor)
    }

    fn empty() -> Self {
        Self {
            range: None,
            current: None,
            closed: false,
        }
    }

    fn fetch(&mut self) -> Result<(), StoreError> {
        let next = self.range.as_mut().and_then(Iterator::next);
        self.current = None;
        if let Some(entry) = next {
            let (key, value) = entry.map_err(|e| StoreError::Read(e.to_string()))?;
            self.current = Some((key.value().to_vec(), value.value().to_vec()));
        }
        Ok(())
    }
}

impl Cursor for RedbCursor {
    fn valid(&self) -> bool {
        !self.closed && self.current.is_some()
    }

    fn key(&self) -> &[u8] {
        self.current.as_ref().map(|(k, _)| k.as_slice()).unwrap_or_default()
    }

    fn value(&self) -> &[u8] {
        self.current.as_ref().map(|(_, v)| v.as_slice()).unwrap_or_default()
    }

    fn advance(&mut self) -> Result<(), StoreError> {
        if self.closed {
            return Err(StoreError::Read("iterator is closed".to_string()));
        }
        self.fetch()
    }

    fn close(&mut self) -> Result<(), StoreError> {
        if self.closed {
            return Err(StoreError::Close("iterator already closed".to_string()));
        }
        self.closed = true;
        self.current = None;
        self.range = None;
        Ok(())
    }
}
