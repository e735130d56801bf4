//! SQLite persistence layer for pipeline run sessions.
//!
//! A session is the original query plus the full step-record list, stored as
//! one JSON payload keyed by session id. The round-trip is lossless for
//! every StepRecord field.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{error, info};

use offer_core::StepRecord;

use crate::dto::StoredSession;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS sessions (
    id TEXT PRIMARY KEY,
    query TEXT NOT NULL,
    steps_json TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);";

/// Initializes the database, creating tables if needed.
pub fn init_db(path: &str) -> Result<Connection> {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent).context("failed to create db directory")?;
    }
    let conn = Connection::open(path).context("failed to open database")?;
    conn.execute_batch(SCHEMA)
        .context("failed to create sessions table")?;
    info!("Database initialized at {}", path);
    Ok(conn)
}

/// Saves or overwrites a session.
pub fn save_session(
    conn: &Connection,
    session_id: &str,
    query: &str,
    steps: &[StepRecord],
) -> Result<()> {
    let steps_json = serde_json::to_string(steps).context("failed to serialize steps")?;
    conn.execute(
        "INSERT OR REPLACE INTO sessions (id, query, steps_json, updated_at)
         VALUES (?1, ?2, ?3, datetime('now'))",
        params![session_id, query, steps_json],
    )
    .context("failed to save session")?;
    info!("Saved session {} ({} steps)", session_id, steps.len());
    Ok(())
}

/// Loads a session by id, or `None` when it does not exist.
pub fn load_session(conn: &Connection, session_id: &str) -> Result<Option<StoredSession>> {
    let row = conn
        .query_row(
            "SELECT query, steps_json FROM sessions WHERE id = ?1",
            params![session_id],
            |row| {
                let query: String = row.get(0)?;
                let steps_json: String = row.get(1)?;
                Ok((query, steps_json))
            },
        )
        .optional()
        .context("failed to query session")?;

    match row {
        Some((query, steps_json)) => {
            let steps: Vec<StepRecord> =
                serde_json::from_str(&steps_json).context("failed to parse stored steps")?;
            Ok(Some(StoredSession {
                session_id: session_id.to_string(),
                query,
                steps,
            }))
        }
        None => Ok(None),
    }
}

/// Lists session ids, most recently updated first.
pub fn list_sessions(conn: &Connection) -> Vec<String> {
    let mut stmt = match conn.prepare("SELECT id FROM sessions ORDER BY updated_at DESC, id") {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to prepare session list query: {}", e);
            return vec![];
        }
    };

    let rows = match stmt.query_map([], |row| row.get::<_, String>(0)) {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to list sessions: {}", e);
            return vec![];
        }
    };

    rows.filter_map(|r| r.ok()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use offer_core::stages;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn
    }

    fn record(agent: &str) -> StepRecord {
        StepRecord {
            agent: agent.to_string(),
            user_query: "Develop 3 offers".into(),
            input_data_sample: vec![[("brand".to_string(), "Taco Bell".to_string())]
                .into_iter()
                .collect()],
            input_summary: "User query: Develop 3 offers".into(),
            system_prompt: "system".into(),
            user_content: "user".into(),
            output: "output".into(),
            hand_off: "passed downstream".into(),
        }
    }

    #[test]
    fn session_round_trip_is_lossless() {
        let conn = test_conn();

        let steps: Vec<StepRecord> = stages::ALL.iter().map(|a| record(a)).collect();
        save_session(&conn, "run-1", "Develop 3 offers", &steps).unwrap();

        let loaded = load_session(&conn, "run-1").unwrap().unwrap();
        assert_eq!(loaded.query, "Develop 3 offers");
        assert_eq!(loaded.steps.len(), 4);
        assert_eq!(loaded.steps[0].agent, stages::MARKET_RESEARCH);
        assert_eq!(loaded.steps[0].input_data_sample[0]["brand"], "Taco Bell");
        assert_eq!(loaded.steps[3].hand_off, "passed downstream");
    }

    #[test]
    fn missing_session_is_none() {
        let conn = test_conn();
        assert!(load_session(&conn, "nope").unwrap().is_none());
    }

    #[test]
    fn save_overwrites_and_list_orders_by_recency() {
        let conn = test_conn();

        save_session(&conn, "a", "first", &[]).unwrap();
        save_session(&conn, "b", "second", &[]).unwrap();
        save_session(&conn, "a", "first again", &[]).unwrap();

        let loaded = load_session(&conn, "a").unwrap().unwrap();
        assert_eq!(loaded.query, "first again");

        let ids = list_sessions(&conn);
        assert_eq!(ids.len(), 2);
        assert!(ids.contains(&"a".to_string()));
        assert!(ids.contains(&"b".to_string()));
    }
}
