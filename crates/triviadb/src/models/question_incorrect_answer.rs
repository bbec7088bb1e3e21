// Copyright 2025 Alexandre D. Díaz
use rusqlite::{params, Connection, Result, ToSql};
use serde::{Deserialize, Serialize};

use crate::models::{answer, question};

pub static TABLE_NAME: &str = "question_incorrect_answer";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Model {
    pub id: i64,
    pub question_id: i64,
    pub answer_id: i64,
}

// Junction rows are owned by their question: created only alongside a
// question insert, removed with it via the cascade.
pub fn create_table(conn: &Connection) -> Result<usize, rusqlite::Error> {
    conn.execute(
        format!(
            "CREATE TABLE IF NOT EXISTS {0} (
            id integer primary key,
            question_id integer not null references {1}(id),
            answer_id integer not null references {2}(id),
            CONSTRAINT fk_question
                FOREIGN KEY (question_id)
                REFERENCES {1}(id)
                ON DELETE CASCADE,
            CONSTRAINT fk_answer
                FOREIGN KEY (answer_id)
                REFERENCES {2}(id)
                ON DELETE CASCADE
        )",
            &TABLE_NAME,
            &question::TABLE_NAME,
            &answer::TABLE_NAME
        )
        .as_str(),
        params![],
    )?;
    conn.execute(
        format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS uniq_question_incorrect_answer ON {}(question_id, answer_id)",
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
        "SELECT qia.id, qia.question_id, qia.answer_id \
    FROM {} as qia \
    {}",
        &TABLE_NAME, &extra_sql
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params, |row| {
        Ok(Model {
            id: row.get(0)?,
            question_id: row.get(1)?,
            answer_id: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<Model>, rusqlite::Error>>()
}

pub fn get_by_question_id(
    conn: &Connection,
    question_id: i64,
) -> Result<Vec<Model>, rusqlite::Error> {
    query(conn, "WHERE qia.question_id = ?1", params![&question_id])
}

pub fn add(
    conn: &Connection,
    question_id: i64,
    answer_id: i64,
) -> Result<Model, rusqlite::Error> {
    conn.execute(
        format!(
            "INSERT INTO {}(question_id, answer_id) VALUES (?1, ?2)",
            &TABLE_NAME
        )
        .as_str(),
        params![&question_id, &answer_id],
    )?;
    Ok(Model {
        id: conn.last_insert_rowid(),
        question_id,
        answer_id,
    })
}
