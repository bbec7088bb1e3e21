// Copyright 2025 Alexandre D. Díaz
use rusqlite::{params, Connection, Result, ToSql};
use serde::{Deserialize, Serialize};

pub static TABLE_NAME: &str = "answer";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Model {
    pub id: i64,
    pub answer: String,
}

// No uniqueness on the text: the same answer is expected to reappear across
// questions and every occurrence gets its own row.
pub fn create_table(conn: &Connection) -> Result<usize, rusqlite::Error> {
    conn.execute(
        format!(
            "CREATE TABLE IF NOT EXISTS {} (
            id integer primary key,
            answer text not null
        )",
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
        "SELECT an.id, an.answer \
    FROM {} as an \
    {}",
        &TABLE_NAME, &extra_sql
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params, |row| {
        Ok(Model {
            id: row.get(0)?,
            answer: row.get(1)?,
        })
    })?;
    rows.collect::<Result<Vec<Model>, rusqlite::Error>>()
}

pub fn get_by_id(conn: &Connection, answer_id: i64) -> Result<Option<Model>, rusqlite::Error> {
    let mut records = query(conn, "WHERE an.id = ?1 LIMIT 1", params![&answer_id])?;
    Ok(records.pop())
}

pub fn add(conn: &Connection, answer: &str) -> Result<Model, rusqlite::Error> {
    conn.execute(
        format!("INSERT INTO {}(answer) VALUES (?1)", &TABLE_NAME).as_str(),
        params![&answer],
    )?;
    Ok(Model {
        id: conn.last_insert_rowid(),
        answer: answer.to_string(),
    })
}
