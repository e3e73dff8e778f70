use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

use crate::models::DrawRecord;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    draw_id  INTEGER PRIMARY KEY,
    date     TEXT NOT NULL,
    n1       INTEGER NOT NULL,
    n2       INTEGER NOT NULL,
    n3       INTEGER NOT NULL,
    n4       INTEGER NOT NULL,
    n5       INTEGER NOT NULL,
    n6       INTEGER NOT NULL
);
";

pub fn default_db_path() -> PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("megafuzzy.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("cannot create directory {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("cannot open database {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA).context("migration failed")?;
    Ok(())
}

/// Inserts a validated record. Returns `false` when the draw id already exists.
pub fn insert_draw(conn: &Connection, record: &DrawRecord) -> Result<bool> {
    let n = &record.numbers;
    anyhow::ensure!(n.len() == 6, "draw {} has {} numbers", record.draw_id, n.len());
    let changed = conn
        .execute(
            "INSERT OR IGNORE INTO draws (draw_id, date, n1, n2, n3, n4, n5, n6)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![record.draw_id, record.date, n[0], n[1], n[2], n[3], n[4], n[5]],
        )
        .context("insert failed")?;
    Ok(changed > 0)
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<DrawRecord> {
    Ok(DrawRecord {
        draw_id: row.get(0)?,
        date: row.get(1)?,
        numbers: vec![
            row.get::<_, u8>(2)?,
            row.get::<_, u8>(3)?,
            row.get::<_, u8>(4)?,
            row.get::<_, u8>(5)?,
            row.get::<_, u8>(6)?,
            row.get::<_, u8>(7)?,
        ],
    })
}

/// Most recent first.
pub fn fetch_last_draws(conn: &Connection, limit: u32) -> Result<Vec<DrawRecord>> {
    let mut stmt = conn.prepare(
        "SELECT draw_id, date, n1, n2, n3, n4, n5, n6
         FROM draws ORDER BY draw_id DESC LIMIT ?1",
    )?;
    let records = stmt
        .query_map([limit], row_to_record)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

pub fn fetch_all_draws(conn: &Connection) -> Result<Vec<DrawRecord>> {
    let mut stmt = conn.prepare(
        "SELECT draw_id, date, n1, n2, n3, n4, n5, n6
         FROM draws ORDER BY draw_id DESC",
    )?;
    let records = stmt
        .query_map([], row_to_record)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}

pub fn count_draws(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM draws", [], |row| row.get(0))?;
    Ok(count)
}
