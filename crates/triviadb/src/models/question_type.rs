// Copyright 2025 Alexandre D. Díaz
use rusqlite::{params, Connection, Result, ToSql};
use serde::{Deserialize, Serialize};

pub static TABLE_NAME: &str = "question_type";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Model {
    pub id: i64,
    pub name: String,
}

pub fn create_table(conn: &Connection) -> Result<usize, rusqlite::Error> {
    conn.execute(
        format!(
            "CREATE TABLE IF NOT EXISTS {} (
            id integer primary key,
            name text not null unique
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
            "INSERT OR IGNORE INTO {}(name) VALUES ('multiple'), ('boolean')",
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
        "SELECT qt.id, qt.name \
    FROM {} as qt \
    {}",
        &TABLE_NAME, &extra_sql
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params, |row| {
        Ok(Model {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<Model>, rusqlite::Error>>()
}

pub fn get_by_name(conn: &Connection, name: &str) -> Result<Option<Model>, rusqlite::Error> {
    let mut records = query(conn, "WHERE qt.name = ?1 LIMIT 1", params![&name])?;
    Ok(records.pop())
}

/// Lookup-or-create by label. Labels are immutable once created.
pub fn add(conn: &Connection, name: &str) -> Result<Model, rusqlite::Error> {
    if let Some(qtype) = get_by_name(conn, name)? {
        return Ok(qtype);
    }
    conn.execute(
        format!("INSERT INTO {}(name) VALUES (?1)", &TABLE_NAME).as_str(),
        params![&name],
    )?;
    Ok(Model {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}
