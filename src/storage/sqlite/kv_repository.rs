use crate::errors::{CircliteError, CircliteResult};
use crate::storage::sqlite::SqliteStorage;
use crate::storage::traits::KvStore;

#[derive(Clone)]
pub struct SqliteKvStore {
    storage: SqliteStorage,
}

impl SqliteKvStore {
    pub fn new(storage: SqliteStorage) -> Self {
        Self { storage }
    }
}

impl KvStore for SqliteKvStore {
    fn get(&self, key: &str) -> CircliteResult<Option<String>> {
        let conn = self.storage.connection()?;
        let mut stmt = conn.prepare("SELECT value FROM kv_store WHERE key = ?1")?;

        let value = stmt.query_row([key], |row| row.get::<_, String>(0));

        match value {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(CircliteError::from(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> CircliteResult<()> {
        let conn = self.storage.connection()?;
        conn.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
            (key, value),
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> CircliteResult<()> {
        let conn = self.storage.connection()?;
        conn.execute("DELETE FROM kv_store WHERE key = ?1", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> SqliteKvStore {
        let storage = SqliteStorage::in_memory().unwrap();
        SqliteKvStore::new(storage)
    }

    #[test]
    fn test_get_missing_key() {
        let kv = setup();
        assert!(kv.get("absent").unwrap().is_none());
    }

    #[test]
    fn test_set_and_get() {
        let kv = setup();
        kv.set("fcl_time", "1700000000000").unwrap();
        assert_eq!(kv.get("fcl_time").unwrap().unwrap(), "1700000000000");
    }

    #[test]
    fn test_set_overwrites() {
        let kv = setup();
        kv.set("k", "one").unwrap();
        kv.set("k", "two").unwrap();
        assert_eq!(kv.get("k").unwrap().unwrap(), "two");
    }

    #[test]
    fn test_remove() {
        let kv = setup();
        kv.set("k", "v").unwrap();
        kv.remove("k").unwrap();
        assert!(kv.get("k").unwrap().is_none());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let kv = setup();
        kv.remove("never-set").unwrap();
    }
}
