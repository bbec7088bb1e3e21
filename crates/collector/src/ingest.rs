// Copyright 2025 Alexandre D. Díaz
use std::sync::OnceLock;

use regex::Regex;

use triviadb::models::question::{self, NewQuestion, WriteResult};

use crate::error::CollectorError;
use crate::opentdb::RawQuestion;

#[derive(Debug, Default)]
pub struct IngestStats {
    pub inserted: usize,
    pub skipped: usize,
}

fn category_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // matches a trailing "(#31)" or "(31)" suffix on the category label
    PATTERN.get_or_init(|| Regex::new(r"\(#?(\d+)\)$").expect("valid pattern"))
}

/// Recovers the upstream numeric category id from the label suffix when
/// present; 0 otherwise (the resolver then falls back to a sentinel).
pub fn parse_category_id(name: &str) -> i64 {
    category_id_pattern()
        .captures(name.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|id| id.as_str().parse().ok())
        .unwrap_or(0)
}

pub fn to_new_question(raw: &RawQuestion) -> NewQuestion {
    NewQuestion {
        question: raw.question.clone(),
        qtype: raw.qtype.clone(),
        difficulty: raw.difficulty.clone(),
        category: raw.category.clone(),
        category_opentdb_id: parse_category_id(&raw.category),
        correct_answer: raw.correct_answer.clone(),
        incorrect_answers: raw.incorrect_answers.clone(),
    }
}

/// Writes one page sequentially. Each question commits on its own, so the
/// dedupe lookup for the next row always sees the previous insert.
pub fn write_page(
    conn: &mut rusqlite::Connection,
    page: &[RawQuestion],
    stats: &mut IngestStats,
) -> Result<(), CollectorError> {
    for raw in page {
        match question::add(conn, &to_new_question(raw))? {
            WriteResult::Inserted(question_id) => {
                stats.inserted += 1;
                log::info!("Inserted question {question_id}");
            }
            WriteResult::Skipped => {
                stats.skipped += 1;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_id_is_parsed_from_suffix() {
        assert_eq!(parse_category_id("Entertainment: Anime & Manga (#31)"), 31);
        assert_eq!(parse_category_id("Science (17)"), 17);
    }

    #[test]
    fn missing_or_malformed_suffix_yields_zero() {
        assert_eq!(parse_category_id("General Knowledge"), 0);
        assert_eq!(parse_category_id("Weird (#) Label"), 0);
        assert_eq!(parse_category_id("(42) prefix not suffix"), 0);
    }

    #[test]
    fn conversion_carries_the_parsed_id() {
        let raw = RawQuestion {
            category: "Entertainment: Anime & Manga (#31)".to_string(),
            qtype: "multiple".to_string(),
            difficulty: "easy".to_string(),
            question: "Q1".to_string(),
            correct_answer: "A".to_string(),
            incorrect_answers: vec!["B".to_string(), "C".to_string(), "D".to_string()],
        };
        let new_question = to_new_question(&raw);
        assert_eq!(new_question.category_opentdb_id, 31);
        assert_eq!(new_question.incorrect_answers.len(), 3);
    }

    #[test]
    fn pages_commit_row_by_row() {
        let mut conn = rusqlite::Connection::open_in_memory().unwrap();
        triviadb::models::prepare_schema(&conn).unwrap();
        triviadb::models::populate_basics(&conn).unwrap();

        let raw = RawQuestion {
            category: "General Knowledge (#9)".to_string(),
            qtype: "boolean".to_string(),
            difficulty: "hard".to_string(),
            question: "Q1".to_string(),
            correct_answer: "True".to_string(),
            incorrect_answers: vec!["False".to_string()],
        };
        let mut stats = IngestStats::default();
        write_page(&mut conn, &[raw.clone(), raw], &mut stats).unwrap();
        assert_eq!(stats.inserted, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(triviadb::models::question::count(&conn).unwrap(), 1);
    }
}
