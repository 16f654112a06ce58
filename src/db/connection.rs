use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use crate::errors::ProspectorError;

/// Shared handle to the lead store. Clones share one connection; each
/// statement acquires it for its own duration.
pub struct Database {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new(path: &str) -> Result<Self, ProspectorError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)
            .map_err(|e| ProspectorError::Database(format!("Failed to open database: {}", e)))?;

        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| ProspectorError::Database(format!("Failed to set pragmas: {}", e)))?;

        let db = Self { conn: Arc::new(Mutex::new(conn)) };
        db.initialize()?;
        Ok(db)
    }

    pub fn in_memory() -> Result<Self, ProspectorError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| ProspectorError::Database(format!("Failed to open in-memory db: {}", e)))?;
        let db = Self { conn: Arc::new(Mutex::new(conn)) };
        db.initialize()?;
        Ok(db)
    }

    fn initialize(&self) -> Result<(), ProspectorError> {
        let conn = self.lock()?;
        conn.execute_batch(super::schema::CREATE_TABLES)
            .map_err(|e| ProspectorError::Database(format!("Failed to create tables: {}", e)))?;
        Ok(())
    }

    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, Connection>, ProspectorError> {
        self.conn
            .lock()
            .map_err(|_| ProspectorError::Database("Connection mutex poisoned".into()))
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self { conn: self.conn.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("leads.db");
        let db = Database::new(path.to_str().unwrap()).unwrap();
        assert!(path.exists());
        assert!(db.list_leads(None).unwrap().is_empty());
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leads.db");
        let path = path.to_str().unwrap();
        {
            let db = Database::new(path).unwrap();
            db.upsert_from_scan(&crate::models::ScannedLead {
                place_id: "p1".into(),
                name: "Tacos El Gordo".into(),
                address: "Blvd. Agua Caliente".into(),
                phone: None,
                rating: 4.7,
                latitude: 32.51,
                longitude: -117.01,
                source_keyword: "TAQUERIA".into(),
            }).unwrap();
        }
        let db = Database::new(path).unwrap();
        assert_eq!(db.list_leads(None).unwrap().len(), 1);
    }
}
