// Copyright 2025 Alexandre D. Díaz
use serde::{Deserialize, Serialize};

use crate::error::CollectorError;

pub const DEFAULT_BASE_URL: &str = "https://opentdb.com";
const TOKEN_REQUEST_PATH: &str = "/api_token.php?command=request";

pub const RESPONSE_SUCCESS: i64 = 0;
pub const RESPONSE_NO_RESULTS: i64 = 1;
pub const RESPONSE_TOKEN_NOT_FOUND: i64 = 3;
pub const RESPONSE_TOKEN_EXHAUSTED: i64 = 4;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RawQuestion {
    pub category: String,
    #[serde(rename = "type")]
    pub qtype: String,
    pub difficulty: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionResponse {
    pub response_code: i64,
    #[serde(default)]
    pub results: Vec<RawQuestion>,
}

#[derive(Debug)]
pub struct OpenTdbClient {
    base_url: String,
    client: reqwest::Client,
}

impl OpenTdbClient {
    pub fn new(base_url: &str) -> Self {
        let client_result = reqwest::Client::builder().build();
        let client = match client_result {
            Ok(cl) => cl,
            Err(e) => panic!("Problem creating the client: {e:?}"),
        };
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request(&self, url: &str) -> Result<reqwest::Response, reqwest::Error> {
        let res = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, "TriviaCollector")
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        res.error_for_status()
    }

    /// Requests a fresh session token. The raw body is returned untouched so
    /// the caller can persist it alongside the extracted token.
    pub async fn request_token(&self) -> Result<serde_json::Value, CollectorError> {
        let url = format!("{}{}", self.base_url, TOKEN_REQUEST_PATH);
        let res = self.request(&url).await?;
        let body: serde_json::Value = res
            .json()
            .await
            .map_err(|e| CollectorError::Protocol(format!("undecodable token response: {e}")))?;
        Ok(body)
    }

    pub async fn get_questions(&self, url: &url::Url) -> Result<QuestionResponse, CollectorError> {
        let res = self.request(url.as_str()).await?;
        let body: QuestionResponse = res
            .json()
            .await
            .map_err(|e| CollectorError::Protocol(format!("undecodable question response: {e}")))?;
        Ok(body)
    }
}
