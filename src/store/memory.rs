use std::collections::BTreeMap;

use super::{Cursor, KeyRange, Store, StoreError};

/// In-memory ordered store.
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MemStore
where
    K: Into<Vec<u8>>,
    V: Into<Vec<u8>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (key, value) in iter {
            store.insert(key, value);
        }
        store
    }
}

impl Store for MemStore {
    fn backend(&self) -> &'static str {
        "memdb"
    }

    fn iterator<'a>(&'a self, range: &KeyRange) -> Result<Box<dyn Cursor + 'a>, StoreError> {
        let entries: Entries<'a> = if range.is_empty() {
            Box::new(std::iter::empty())
        } else {
            Box::new(self.entries.range::<[u8], _>(range.bounds()))
        };
        Ok(Box::new(MemCursor::new(entries)))
    }
}

type Entries<'a> = Box<dyn Iterator<Item = (&'a Vec<u8>, &'a Vec<u8>)> + 'a>;

struct MemCursor<'a> {
    entries: Entries<'a>,
    current: Option<(&'a Vec<u8>, &'a Vec<u8>)>,
    closed: bool,
}

impl<'a> MemCursor<'a> {
    fn new(mut entries: Entries<'a>) -> Self {
        let current = entries.next();
        Self {
            entries,
            current,
            closed: false,
        }
    }
}

impl Cursor for MemCursor<'_> {
    fn valid(&self) -> bool {
        !self.closed && self.current.is_some()
    }

    fn key(&self) -> &[u8] {
        self.current.map(|(k, _)| k.as_slice()).unwrap_or_default()
    }

    fn value(&self) -> &[u8] {
        self.current.map(|(_, v)| v.as_slice()).unwrap_or_default()
    }

    fn advance(&mut self) -> Result<(), StoreError> {
        if self.closed {
            return Err(StoreError::Read("iterator is closed".to_string()));
        }
        self.current = self.entries.next();
        Ok(())
    }

    fn close(&mut self) -> Result<(), StoreError> {
        if self.closed {
            return Err(StoreError::Close("iterator already closed".to_string()));
        }
        self.closed = true;
        self.current = None;
        Ok(())
    }
}
