use anyhow::Context;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

pub const DB_FILE_NAME: &str = "codify.sqlite3";

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)
        .with_context(|| format!("failed to create workspace {}", workspace.to_string_lossy()))?;
    let db_path = workspace.join(DB_FILE_NAME);
    let conn = Connection::open(&db_path)
        .with_context(|| format!("failed to open {}", db_path.to_string_lossy()))?;

    // Plays the role of browser local storage: one JSON value per key.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings(
            key TEXT PRIMARY KEY,
            value_json TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        [],
    )?;

    Ok(conn)
}

pub fn settings_get_json(conn: &Connection, key: &str) -> anyhow::Result<Option<serde_json::Value>> {
    let raw: Option<String> = conn
        .query_row(
            "SELECT value_json FROM settings WHERE key = ?",
            [key],
            |r| r.get(0),
        )
        .optional()?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw)
        .with_context(|| format!("settings value for {key} is not valid json"))?;
    Ok(Some(value))
}

pub fn settings_set_json(
    conn: &Connection,
    key: &str,
    value: &serde_json::Value,
) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value_json, updated_at) VALUES(?, ?, ?)
         ON CONFLICT(key) DO UPDATE SET
            value_json = excluded.value_json,
            updated_at = excluded.updated_at",
        (
            key,
            serde_json::to_string(value)?,
            chrono::Utc::now().to_rfc3339(),
        ),
    )?;
    Ok(())
}

pub fn settings_delete(conn: &Connection, key: &str) -> anyhow::Result<()> {
    conn.execute("DELETE FROM settings WHERE key = ?", [key])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(prefix: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "{}-{}",
            prefix,
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos()
        ))
    }

    #[test]
    fn settings_overwrite_and_delete() {
        let workspace = temp_dir("codify-db-settings");
        let conn = open_db(&workspace).expect("open db");
        assert_eq!(settings_get_json(&conn, "k").expect("get"), None);

        settings_set_json(&conn, "k", &json!({ "a": 1 })).expect("set");
        settings_set_json(&conn, "k", &json!({ "a": 2 })).expect("set again");
        assert_eq!(
            settings_get_json(&conn, "k").expect("get"),
            Some(json!({ "a": 2 }))
        );

        settings_delete(&conn, "k").expect("delete");
        assert_eq!(settings_get_json(&conn, "k").expect("get"), None);
    }

    #[test]
    fn reopening_keeps_values() {
        let workspace = temp_dir("codify-db-reopen");
        {
            let conn = open_db(&workspace).expect("open db");
            settings_set_json(&conn, "k", &json!("v")).expect("set");
        }
        let conn = open_db(&workspace).expect("reopen db");
        assert_eq!(settings_get_json(&conn, "k").expect("get"), Some(json!("v")));
    }
}
