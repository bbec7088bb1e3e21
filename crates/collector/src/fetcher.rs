// Copyright 2025 Alexandre D. Díaz
use std::time::Duration;

use url::Url;

use crate::error::CollectorError;
use crate::opentdb::{self, OpenTdbClient, QuestionResponse, RawQuestion};

pub const DEFAULT_AMOUNT: usize = 50;
const PAGE_DELAY_SECS: u64 = 5;

/// Normalizes a caller-supplied query into a full question URL: relative
/// fragments are resolved against the API base, any stale `token` parameter
/// is dropped, and `amount` defaults to 50 when absent.
pub fn normalize_query(raw_query: &str, base_url: &str) -> Result<Url, CollectorError> {
    let mut url = match Url::parse(raw_query) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(&format!("{base_url}/"))
                .map_err(|e| CollectorError::Usage(format!("invalid base URL '{base_url}': {e}")))?;
            base.join(raw_query)
                .map_err(|e| CollectorError::Usage(format!("invalid query '{raw_query}': {e}")))?
        }
        Err(e) => {
            return Err(CollectorError::Usage(format!(
                "invalid query '{raw_query}': {e}"
            )))
        }
    };
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != "token")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let has_amount = pairs.iter().any(|(key, _)| key == "amount");
    {
        let mut query_pairs = url.query_pairs_mut();
        query_pairs.clear();
        for (key, value) in &pairs {
            query_pairs.append_pair(key, value);
        }
        if !has_amount {
            query_pairs.append_pair("amount", &DEFAULT_AMOUNT.to_string());
        }
    }
    Ok(url)
}

pub fn page_size(url: &Url) -> usize {
    url.query_pairs()
        .find(|(key, _)| key == "amount")
        .and_then(|(_, value)| value.parse().ok())
        .unwrap_or(DEFAULT_AMOUNT)
}

#[derive(Debug, PartialEq)]
pub enum PageOutcome {
    Page(Vec<RawQuestion>),
    Exhausted,
    NoResults,
    Empty,
    InvalidToken,
}

/// Maps an HTTP-success response onto the loop decision. An empty result set
/// under any unexpected code stops the loop rather than fetching forever.
pub fn classify_response(res: QuestionResponse) -> PageOutcome {
    match res.response_code {
        opentdb::RESPONSE_TOKEN_NOT_FOUND => PageOutcome::InvalidToken,
        opentdb::RESPONSE_TOKEN_EXHAUSTED => PageOutcome::Exhausted,
        opentdb::RESPONSE_NO_RESULTS => PageOutcome::NoResults,
        opentdb::RESPONSE_SUCCESS if !res.results.is_empty() => PageOutcome::Page(res.results),
        _ => PageOutcome::Empty,
    }
}

/// Finite page sequence over one session token. Not restartable: the
/// exhaustion state lives server-side with the token. After a terminal stop
/// no further request is ever issued.
pub struct BatchFetcher<'a> {
    client: &'a OpenTdbClient,
    query: Url,
    token: String,
    amount: usize,
    round: usize,
    done: bool,
}

impl<'a> BatchFetcher<'a> {
    pub fn new(client: &'a OpenTdbClient, query: Url, token: &str) -> Self {
        let amount = page_size(&query);
        Self {
            client,
            query,
            token: token.to_string(),
            amount,
            round: 0,
            done: false,
        }
    }

    fn page_url(&self) -> Url {
        let mut url = self.query.clone();
        url.query_pairs_mut().append_pair("token", &self.token);
        url
    }

    pub async fn next_page(&mut self) -> Result<Option<Vec<RawQuestion>>, CollectorError> {
        if self.done {
            return Ok(None);
        }
        if self.round > 0 {
            log::info!("Waiting {PAGE_DELAY_SECS} seconds before next batch...");
            tokio::time::sleep(Duration::from_secs(PAGE_DELAY_SECS)).await;
        }
        self.round += 1;
        let url = self.page_url();
        log::info!(
            "[round {}] Fetching {} questions from {}",
            self.round,
            self.amount,
            url
        );
        let res = self.client.get_questions(&url).await?;
        match classify_response(res) {
            PageOutcome::Page(results) => Ok(Some(results)),
            PageOutcome::Exhausted => {
                log::info!("Token has returned all available questions for this query. Stopping.");
                self.done = true;
                Ok(None)
            }
            PageOutcome::NoResults => {
                log::info!("No results for this query. Stopping.");
                self.done = true;
                Ok(None)
            }
            PageOutcome::Empty => {
                log::info!("No results returned. Stopping.");
                self.done = true;
                Ok(None)
            }
            PageOutcome::InvalidToken => {
                self.done = true;
                Err(CollectorError::TokenInvalid)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opentdb::{QuestionResponse, RawQuestion, DEFAULT_BASE_URL};

    fn raw_question() -> RawQuestion {
        RawQuestion {
            category: "General Knowledge".to_string(),
            qtype: "multiple".to_string(),
            difficulty: "easy".to_string(),
            question: "Q1".to_string(),
            correct_answer: "A".to_string(),
            incorrect_answers: vec!["B".to_string()],
        }
    }

    #[test]
    fn normalize_strips_token_and_keeps_filters() {
        let url = normalize_query(
            "https://opentdb.com/api.php?amount=10&category=31&token=dead",
            DEFAULT_BASE_URL,
        )
        .unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.iter().all(|(k, _)| k != "token"));
        assert!(pairs.contains(&("amount".to_string(), "10".to_string())));
        assert!(pairs.contains(&("category".to_string(), "31".to_string())));
        assert_eq!(page_size(&url), 10);
    }

    #[test]
    fn normalize_defaults_amount_to_fifty() {
        let url = normalize_query("https://opentdb.com/api.php?category=9", DEFAULT_BASE_URL)
            .unwrap();
        assert_eq!(page_size(&url), 50);
    }

    #[test]
    fn normalize_resolves_relative_fragments() {
        let url = normalize_query("api.php?category=9", DEFAULT_BASE_URL).unwrap();
        assert_eq!(url.host_str(), Some("opentdb.com"));
        assert_eq!(url.path(), "/api.php");
    }

    #[test]
    fn garbage_query_is_a_usage_error() {
        let err = normalize_query("http://[broken", DEFAULT_BASE_URL).unwrap_err();
        assert!(matches!(err, CollectorError::Usage(_)));
    }

    #[test]
    fn success_with_results_yields_a_page() {
        let res = QuestionResponse {
            response_code: 0,
            results: vec![raw_question()],
        };
        assert!(matches!(classify_response(res), PageOutcome::Page(page) if page.len() == 1));
    }

    #[test]
    fn exhausted_token_stops_the_loop() {
        let res = QuestionResponse {
            response_code: 4,
            results: vec![],
        };
        assert_eq!(classify_response(res), PageOutcome::Exhausted);
    }

    #[test]
    fn no_results_stops_the_loop() {
        let res = QuestionResponse {
            response_code: 1,
            results: vec![],
        };
        assert_eq!(classify_response(res), PageOutcome::NoResults);
    }

    #[test]
    fn unknown_token_is_fatal() {
        let res = QuestionResponse {
            response_code: 3,
            results: vec![],
        };
        assert_eq!(classify_response(res), PageOutcome::InvalidToken);
    }

    #[tokio::test]
    async fn stopped_fetcher_never_issues_another_request() {
        // unroutable client: any request attempt would fail, not return None
        let client = OpenTdbClient::new("http://127.0.0.1:0");
        let query = normalize_query("http://127.0.0.1:0/api.php?amount=5", "http://127.0.0.1:0")
            .unwrap();
        let mut batch_fetcher = BatchFetcher::new(&client, query, "tok");
        batch_fetcher.done = true;

        assert!(batch_fetcher.next_page().await.unwrap().is_none());
        assert!(batch_fetcher.next_page().await.unwrap().is_none());
        assert_eq!(batch_fetcher.round, 0);
    }

    #[test]
    fn ambiguous_empty_page_stops_the_loop() {
        // success code but no rows, and an unknown code: never loop forever
        for code in [0, 2, 99] {
            let res = QuestionResponse {
                response_code: code,
                results: vec![],
            };
            assert_eq!(classify_response(res), PageOutcome::Empty);
        }
    }
}
