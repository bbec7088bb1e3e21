// Copyright 2025 Alexandre D. Díaz
use rusqlite::{params, Result, ToSql};
use serde::{Deserialize, Serialize};

use crate::models::{answer, category, difficulty, question_incorrect_answer, question_type};

pub static TABLE_NAME: &str = "question";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Model {
    pub id: i64,
    pub question: String,
    pub type_id: i64,
    pub difficulty_id: i64,
    pub category_id: i64,
    pub correct_answer_id: i64,
}

/// A question as received from the upstream API, normalized labels still in
/// free-text form. `category_opentdb_id` is 0 when the response carried no
/// usable numeric id.
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question: String,
    pub qtype: String,
    pub difficulty: String,
    pub category: String,
    pub category_opentdb_id: i64,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum WriteResult {
    Inserted(i64),
    Skipped,
}

pub fn create_table(conn: &rusqlite::Connection) -> Result<usize, rusqlite::Error> {
    conn.execute(
        format!(
            "CREATE TABLE IF NOT EXISTS {0} (
            id integer primary key,
            question text not null,
            type_id integer not null references {1}(id),
            difficulty_id integer not null references {2}(id),
            category_id integer not null references {3}(id),
            correct_answer_id integer not null references {4}(id)
        )",
            &TABLE_NAME,
            &question_type::TABLE_NAME,
            &difficulty::TABLE_NAME,
            &category::TABLE_NAME,
            &answer::TABLE_NAME
        )
        .as_str(),
        params![],
    )
}

fn query(
    conn: &rusqlite::Connection,
    extra_sql: &str,
    params: &[&dyn ToSql],
) -> Result<Vec<Model>, rusqlite::Error> {
    let sql: String = format!(
        "SELECT qu.id, qu.question, qu.type_id, qu.difficulty_id, qu.category_id, qu.correct_answer_id \
    FROM {} as qu \
    {}",
        &TABLE_NAME, &extra_sql
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params, |row| {
        Ok(Model {
            id: row.get(0)?,
            question: row.get(1)?,
            type_id: row.get(2)?,
            difficulty_id: row.get(3)?,
            category_id: row.get(4)?,
            correct_answer_id: row.get(5)?,
        })
    })?;
    rows.collect::<Result<Vec<Model>, rusqlite::Error>>()
}

// Exact text match is the dedupe key. Two distinct questions with identical
// phrasing count as one; upstream whitespace changes count as new questions.
pub fn get_by_text(
    conn: &rusqlite::Connection,
    text: &str,
) -> Result<Option<Model>, rusqlite::Error> {
    let mut records = query(conn, "WHERE qu.question = ?1 LIMIT 1", params![&text])?;
    Ok(records.pop())
}

pub fn count(conn: &rusqlite::Connection) -> Result<i64, rusqlite::Error> {
    conn.query_row(
        format!("SELECT count(*) FROM {}", &TABLE_NAME).as_str(),
        params![],
        |row| row.get(0),
    )
}

/// Deduplicating write. Skips on an exact text match, otherwise resolves the
/// lookup rows and inserts the question with all its answers inside one
/// transaction, so a failure mid-sequence leaves no orphaned answer rows.
pub fn add(
    conn: &mut rusqlite::Connection,
    new_question: &NewQuestion,
) -> Result<WriteResult, rusqlite::Error> {
    if get_by_text(conn, &new_question.question)?.is_some() {
        return Ok(WriteResult::Skipped);
    }
    let tx = conn.transaction()?;
    let qtype = question_type::add(&tx, &new_question.qtype)?;
    let difficulty = difficulty::add(&tx, &new_question.difficulty)?;
    let category = category::add(
        &tx,
        &new_question.category,
        new_question.category_opentdb_id,
    )?;
    let correct_answer = answer::add(&tx, &new_question.correct_answer)?;
    tx.execute(
        format!(
            "INSERT INTO {}(question, type_id, difficulty_id, category_id, correct_answer_id) \
            VALUES (?1, ?2, ?3, ?4, ?5)",
            &TABLE_NAME
        )
        .as_str(),
        params![
            &new_question.question,
            &qtype.id,
            &difficulty.id,
            &category.id,
            &correct_answer.id
        ],
    )?;
    let question_id = tx.last_insert_rowid();
    for incorrect_text in &new_question.incorrect_answers {
        let incorrect_answer = answer::add(&tx, incorrect_text)?;
        question_incorrect_answer::add(&tx, question_id, incorrect_answer.id)?;
    }
    tx.commit()?;
    Ok(WriteResult::Inserted(question_id))
}
