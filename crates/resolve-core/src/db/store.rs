//! Durable record store

use crate::error::Result;
use crate::models::{Resolution, ResolutionId};
use rusqlite::{params, Connection};

/// Ordered map from resolution id to record
///
/// The store is the only owner of persisted records; callers always receive
/// copies. Mutating methods take `&mut self`, so at most one read-modify-write
/// can be in flight per store at a time.
pub trait RecordStore {
    /// Upsert a record under its own id
    fn insert(&mut self, record: &Resolution) -> Result<()>;

    /// Get a record by id
    fn get(&self, id: &ResolutionId) -> Result<Option<Resolution>>;

    /// Remove a record, returning the prior value if present
    fn remove(&mut self, id: &ResolutionId) -> Result<Option<Resolution>>;

    /// All records in store order (ascending key order)
    ///
    /// The order is substrate-defined and carries no caller meaning; every
    /// list/filter/search operation is built on this.
    fn values(&self) -> Result<Vec<Resolution>>;
}

/// SQLite implementation of `RecordStore`
///
/// Records are serialized to JSON in a single value column; the table is a
/// plain string-keyed ordered map, durable across restarts.
pub struct SqliteStore<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteStore<'a> {
    /// Create a new store over the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn parse_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<String> {
        row.get(0)
    }
}

impl RecordStore for SqliteStore<'_> {
    fn insert(&mut self, record: &Resolution) -> Result<()> {
        let encoded = serde_json::to_string(record)?;
        self.conn.execute(
            "INSERT INTO resolutions (id, record) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET record = excluded.record",
            params![record.id.as_str(), encoded],
        )?;
        Ok(())
    }

    fn get(&self, id: &ResolutionId) -> Result<Option<Resolution>> {
        let result = self.conn.query_row(
            "SELECT record FROM resolutions WHERE id = ?1",
            params![id.as_str()],
            Self::parse_record,
        );

        match result {
            Ok(encoded) => Ok(Some(serde_json::from_str(&encoded)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn remove(&mut self, id: &ResolutionId) -> Result<Option<Resolution>> {
        let prior = self.get(id)?;
        if prior.is_some() {
            self.conn.execute(
                "DELETE FROM resolutions WHERE id = ?1",
                params![id.as_str()],
            )?;
        }
        Ok(prior)
    }

    fn values(&self) -> Result<Vec<Resolution>> {
        let mut stmt = self
            .conn
            .prepare("SELECT record FROM resolutions ORDER BY id")?;

        let encoded = stmt
            .query_map([], Self::parse_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        encoded
            .iter()
            .map(|record| Ok(serde_json::from_str(record)?))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::models::{Priority, ResolutionPayload};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn record(name: &str) -> Resolution {
        Resolution::new(
            ResolutionId::new(),
            ResolutionPayload {
                name: name.into(),
                description: String::new(),
                deadline: "2026-12-31".into(),
                completed: false,
                category: "general".into(),
                progress: 0,
                priority: Priority::Medium,
            },
            1,
        )
    }

    #[test]
    fn test_insert_and_get() {
        let db = Database::open_in_memory().unwrap();
        let mut store = SqliteStore::new(db.connection());

        let r = record("Run 5k");
        store.insert(&r).unwrap();

        let fetched = store.get(&r.id).unwrap().unwrap();
        assert_eq!(fetched, r);
    }

    #[test]
    fn test_get_missing_is_none() {
        let db = Database::open_in_memory().unwrap();
        let store = SqliteStore::new(db.connection());

        assert!(store.get(&ResolutionId::new()).unwrap().is_none());
    }

    #[test]
    fn test_insert_upserts() {
        let db = Database::open_in_memory().unwrap();
        let mut store = SqliteStore::new(db.connection());

        let mut r = record("Run 5k");
        store.insert(&r).unwrap();

        r.progress = 80;
        store.insert(&r).unwrap();

        let fetched = store.get(&r.id).unwrap().unwrap();
        assert_eq!(fetched.progress, 80);
        assert_eq!(store.values().unwrap().len(), 1);
    }

    #[test]
    fn test_remove_returns_prior() {
        let db = Database::open_in_memory().unwrap();
        let mut store = SqliteStore::new(db.connection());

        let r = record("Run 5k");
        store.insert(&r).unwrap();

        let removed = store.remove(&r.id).unwrap();
        assert_eq!(removed, Some(r.clone()));
        assert!(store.get(&r.id).unwrap().is_none());

        // A second remove finds nothing
        assert!(store.remove(&r.id).unwrap().is_none());
    }

    #[test]
    fn test_values_in_key_order() {
        let db = Database::open_in_memory().unwrap();
        let mut store = SqliteStore::new(db.connection());

        for name in ["c", "a", "b"] {
            store.insert(&record(name)).unwrap();
        }

        let values = store.values().unwrap();
        assert_eq!(values.len(), 3);

        let ids: Vec<String> = values.iter().map(|r| r.id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_values_empty_store() {
        let db = Database::open_in_memory().unwrap();
        let store = SqliteStore::new(db.connection());
        assert!(store.values().unwrap().is_empty());
    }

    #[test]
    fn test_records_persist_across_reopen() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("resolve.db");
        let r = record("Run 5k");

        {
            let db = Database::open(&path).unwrap();
            let mut store = SqliteStore::new(db.connection());
            store.insert(&r).unwrap();
        }

        let db = Database::open(&path).unwrap();
        let store = SqliteStore::new(db.connection());
        let fetched = store.get(&r.id).unwrap().unwrap();
        assert_eq!(fetched, r);
    }
}
