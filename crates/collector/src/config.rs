// Copyright 2025 Alexandre D. Díaz
use std::env;

use crate::error::CollectorError;
use crate::opentdb::DEFAULT_BASE_URL;

static USAGE: &str = "usage: collector <token|fetch> [QUERY]";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Token,
    Fetch,
}

#[derive(Debug)]
pub struct CollectorConfig {
    command: Command,
    query: String,
    base_url: String,
    db_path: String,
    token_path: String,
}

impl CollectorConfig {
    pub fn new(args: &[String]) -> Result<CollectorConfig, CollectorError> {
        let base_url = env::var("TRIVIA_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let command = match args.get(1).map(String::as_str) {
            Some("token") => Command::Token,
            Some("fetch") => Command::Fetch,
            Some(other) => {
                return Err(CollectorError::Usage(format!(
                    "unknown command '{other}'. {USAGE}"
                )))
            }
            None => return Err(CollectorError::Usage(USAGE.to_string())),
        };
        let query = match args.get(2) {
            Some(query) => query.clone(),
            None => format!("{base_url}/api.php?amount=50"),
        };
        let db_path = env::var("TRIVIA_DB_PATH").unwrap_or_else(|_| "data/trivia.db".to_string());
        let token_path =
            env::var("TRIVIA_TOKEN_FILE").unwrap_or_else(|_| "data/opentdb_token.json".to_string());

        Ok(CollectorConfig {
            command,
            query,
            base_url,
            db_path,
            token_path,
        })
    }

    pub fn get_command(&self) -> &Command {
        &self.command
    }

    pub fn get_query(&self) -> &String {
        &self.query
    }

    pub fn get_base_url(&self) -> &String {
        &self.base_url
    }

    pub fn get_db_path(&self) -> &String {
        &self.db_path
    }

    pub fn get_token_path(&self) -> &String {
        &self.token_path
    }
}
