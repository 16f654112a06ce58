use chrono::Utc;
use crate::errors::ProspectorError;
use crate::models::{Lead, LeadStatus, ScannedLead};
use super::Database;

const LEAD_COLUMNS: &str = "place_id, name, address, phone, rating, latitude, longitude, status, source_keyword, notes, created_at, updated_at";

fn row_to_lead(row: &rusqlite::Row) -> rusqlite::Result<Lead> {
    let status_str: String = row.get(7)?;
    Ok(Lead {
        place_id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        phone: row.get(3)?,
        rating: row.get(4)?,
        latitude: row.get(5)?,
        longitude: row.get(6)?,
        status: status_str.parse().unwrap_or_default(),
        source_keyword: row.get(8)?,
        notes: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

impl Database {
    /// All leads, or only those in `status`. Status is matched against the
    /// stored lowercase value.
    pub fn list_leads(&self, status: Option<LeadStatus>) -> Result<Vec<Lead>, ProspectorError> {
        let conn = self.lock()?;
        let order = "ORDER BY name COLLATE NOCASE, place_id";

        let (sql, params): (String, Vec<&str>) = match status {
            Some(s) => (
                format!("SELECT {} FROM leads WHERE LOWER(status) = ?1 {}", LEAD_COLUMNS, order),
                vec![s.as_str()],
            ),
            None => (format!("SELECT {} FROM leads {}", LEAD_COLUMNS, order), vec![]),
        };

        let mut stmt = conn.prepare(&sql)
            .map_err(|e| ProspectorError::Database(format!("Query failed: {}", e)))?;
        let rows = stmt.query_map(rusqlite::params_from_iter(params), row_to_lead)
            .map_err(|e| ProspectorError::Database(format!("Query error: {}", e)))?;

        let mut leads = Vec::new();
        for row in rows {
            leads.push(row.map_err(|e| ProspectorError::Database(format!("Row error: {}", e)))?);
        }
        Ok(leads)
    }

    pub fn get_lead(&self, place_id: &str) -> Result<Option<Lead>, ProspectorError> {
        let conn = self.lock()?;
        let sql = format!("SELECT {} FROM leads WHERE place_id = ?1", LEAD_COLUMNS);
        let mut stmt = conn.prepare(&sql)
            .map_err(|e| ProspectorError::Database(format!("Query failed: {}", e)))?;

        match stmt.query_row(rusqlite::params![place_id], row_to_lead) {
            Ok(lead) => Ok(Some(lead)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(ProspectorError::Database(format!("Query error: {}", e))),
        }
    }

    /// Insert a freshly scanned lead as `new`. If the place is already known
    /// only its `source_keyword` moves; status, notes and phone stay as they are.
    pub fn upsert_from_scan(&self, lead: &ScannedLead) -> Result<(), ProspectorError> {
        let conn = self.lock()?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO leads (place_id, name, address, phone, rating, latitude, longitude, status, source_keyword, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 'new', ?8, NULL, ?9, ?9)
             ON CONFLICT(place_id) DO UPDATE SET source_keyword = excluded.source_keyword",
            rusqlite::params![
                lead.place_id,
                lead.name,
                lead.address,
                lead.phone,
                lead.rating,
                lead.latitude,
                lead.longitude,
                lead.source_keyword,
                now,
            ],
        ).map_err(|e| ProspectorError::Database(format!("Failed to upsert lead: {}", e)))?;
        Ok(())
    }

    /// Move a lead to `status`. Notes are replaced only when `note` is given.
    /// Returns `false` when no lead has this `place_id`.
    pub fn set_status(
        &self,
        place_id: &str,
        status: LeadStatus,
        note: Option<&str>,
    ) -> Result<bool, ProspectorError> {
        let conn = self.lock()?;
        let affected = conn.execute(
            "UPDATE leads SET status = ?2, notes = COALESCE(?3, notes), updated_at = ?4 WHERE place_id = ?1",
            rusqlite::params![place_id, status.as_str(), note, Utc::now().to_rfc3339()],
        ).map_err(|e| ProspectorError::Database(format!("Update failed: {}", e)))?;
        Ok(affected > 0)
    }

    /// Replace a lead's notes, keeping its status.
    pub fn save_note(&self, place_id: &str, note: &str) -> Result<bool, ProspectorError> {
        let conn = self.lock()?;
        let affected = conn.execute(
            "UPDATE leads SET notes = ?2, updated_at = ?3 WHERE place_id = ?1",
            rusqlite::params![place_id, note, Utc::now().to_rfc3339()],
        ).map_err(|e| ProspectorError::Database(format!("Update failed: {}", e)))?;
        Ok(affected > 0)
    }

    /// Lead count for every status, zero counts included, in pipeline order.
    pub fn status_counts(&self) -> Result<Vec<(LeadStatus, i64)>, ProspectorError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT LOWER(status), COUNT(*) FROM leads GROUP BY LOWER(status)")
            .map_err(|e| ProspectorError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map([], |row: &rusqlite::Row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
        }).map_err(|e| ProspectorError::Database(format!("Query error: {}", e)))?;

        let mut counts: Vec<(LeadStatus, i64)> = LeadStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for row in rows {
            let (status, count) = row.map_err(|e| ProspectorError::Database(format!("Row error: {}", e)))?;
            if let Ok(status) = status.parse::<LeadStatus>() {
                if let Some(slot) = counts.iter_mut().find(|(s, _)| *s == status) {
                    slot.1 += count;
                }
            }
        }
        Ok(counts)
    }
}
