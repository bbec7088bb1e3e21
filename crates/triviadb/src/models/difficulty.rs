// Copyright 2025 Alexandre D. Díaz
use rusqlite::{params, Connection, Result, ToSql};
use serde::{Deserialize, Serialize};

pub static TABLE_NAME: &str = "difficulty";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Model {
    pub id: i64,
    pub level: String,
}

pub fn create_table(conn: &Connection) -> Result<usize, rusqlite::Error> {
    conn.execute(
        format!(
            "CREATE TABLE IF NOT EXISTS {} (
            id integer primary key,
            level text not null unique
        )",
            &TABLE_NAME
        )
        .as_str(),
        params![],
    )
}

pub fn populate(conn: &Connection) -> Result<usize, rusqlite::Error> {
    conn.execute(
        format!(
            "INSERT OR IGNORE INTO {}(level) VALUES ('easy'), ('medium'), ('hard')",
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
        "SELECT df.id, df.level \
    FROM {} as df \
    {}",
        &TABLE_NAME, &extra_sql
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params, |row| {
        Ok(Model {
            id: row.get(0)?,
            level: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<Model>, rusqlite::Error>>()
}

pub fn get_by_level(conn: &Connection, level: &str) -> Result<Option<Model>, rusqlite::Error> {
    let mut records = query(conn, "WHERE df.level = ?1 LIMIT 1", params![&level])?;
    Ok(records.pop())
}

/// Lookup-or-create by label. Labels are immutable once created.
pub fn add(conn: &Connection, level: &str) -> Result<Model, rusqlite::Error> {
    if let Some(difficulty) = get_by_level(conn, level)? {
        return Ok(difficulty);
    }
    conn.execute(
        format!("INSERT INTO {}(level) VALUES (?1)", &TABLE_NAME).as_str(),
        params![&level],
    )?;
    Ok(Model {
        id: conn.last_insert_rowid(),
        level: level.to_string(),
    })
}
