// Copyright 2025 Alexandre D. Díaz
pub mod answer;
pub mod category;
pub mod difficulty;
pub mod question;
pub mod question_incorrect_answer;
pub mod question_type;

pub fn prepare_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    question_type::create_table(conn)?;
    difficulty::create_table(conn)?;
    category::create_table(conn)?;
    answer::create_table(conn)?;
    question::create_table(conn)?;
    question_incorrect_answer::create_table(conn)?;
    Ok(())
}

pub fn populate_basics(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    question_type::populate(conn)?;
    difficulty::populate(conn)?;
    Ok(())
}
