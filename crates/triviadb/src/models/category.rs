// Copyright 2025 Alexandre D. Díaz
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::OnceLock;

use rand_core::{OsRng, RngCore};
use rusqlite::{params, Connection, Result, ToSql};
use serde::{Deserialize, Serialize};

pub static TABLE_NAME: &str = "category";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Model {
    pub id: i64,
    pub name: String,
    pub opentdb_id: i64,
}

pub fn create_table(conn: &Connection) -> Result<usize, rusqlite::Error> {
    conn.execute(
        format!(
            "CREATE TABLE IF NOT EXISTS {} (
            id integer primary key,
            name text not null,
            opentdb_id integer not null
        )",
            &TABLE_NAME
        )
        .as_str(),
        params![],
    )?;
    conn.execute(
        format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS uniq_category_name ON {}(name)",
            &TABLE_NAME
        )
        .as_str(),
        params![],
    )?;
    conn.execute(
        format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS uniq_category_opentdb_id ON {}(opentdb_id)",
            &TABLE_NAME
        )
        .as_str(),
        params![],
    )
}

fn query(
    conn: &Connection,
    extra_sql: &str,
    params: &[&dyn ToSql],
) -> Result<Vec<Model>, rusqlite::Error> {
    let sql: String = format!(
        "SELECT ca.id, ca.name, ca.opentdb_id \
    FROM {} as ca \
    {}",
        &TABLE_NAME, &extra_sql
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params, |row| {
        Ok(Model {
            id: row.get(0)?,
            name: row.get(1)?,
            opentdb_id: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<Model>, rusqlite::Error>>()
}

pub fn get_by_name(conn: &Connection, name: &str) -> Result<Option<Model>, rusqlite::Error> {
    let mut records = query(conn, "WHERE ca.name = ?1 LIMIT 1", params![&name])?;
    Ok(records.pop())
}

pub fn get_by_opentdb_id(
    conn: &Connection,
    opentdb_id: i64,
) -> Result<Option<Model>, rusqlite::Error> {
    let mut records = query(
        conn,
        "WHERE ca.opentdb_id = ?1 LIMIT 1",
        params![&opentdb_id],
    )?;
    Ok(records.pop())
}

// Unique negative placeholder for the opentdb_id column when the upstream
// response carries no usable numeric id. The sequence starts at a random
// offset and advances per call, so two creations within the same
// millisecond still get distinct values.
pub(crate) fn sentinel_opentdb_id() -> i64 {
    static SEQ: OnceLock<AtomicI64> = OnceLock::new();
    let seq = SEQ.get_or_init(|| AtomicI64::new(OsRng.next_u32() as i64));
    let suffix = seq.fetch_add(1, Ordering::Relaxed) & 0x3ff;
    let millis = chrono::Utc::now().timestamp_millis();
    -(millis * 1024 + suffix)
}

/// Lookup-or-create by name. When the name is unknown but `opentdb_id` is a
/// positive id already stored, the upstream renamed the category: the stored
/// name is refreshed in place and the existing row wins.
pub fn add(conn: &Connection, name: &str, opentdb_id: i64) -> Result<Model, rusqlite::Error> {
    if let Some(category) = get_by_name(conn, name)? {
        return Ok(category);
    }
    if opentdb_id > 0 {
        if let Some(category) = get_by_opentdb_id(conn, opentdb_id)? {
            conn.execute(
                format!("UPDATE {} SET name = ?1 WHERE id = ?2", &TABLE_NAME).as_str(),
                params![&name, &category.id],
            )?;
            return Ok(Model {
                name: name.to_string(),
                ..category
            });
        }
    }
    let stored_id = if opentdb_id > 0 {
        opentdb_id
    } else {
        sentinel_opentdb_id()
    };
    conn.execute(
        format!(
            "INSERT INTO {}(name, opentdb_id) VALUES (?1, ?2)",
            &TABLE_NAME
        )
        .as_str(),
        params![&name, &stored_id],
    )?;
    Ok(Model {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
        opentdb_id: stored_id,
    })
}
