// Copyright 2025 Alexandre D. Díaz
use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CollectorError;

/// Persisted session token. The token scopes a server-side "no repeats"
/// guarantee; re-running the token command replaces the record wholesale.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TokenRecord {
    pub token: String,
    pub fetched_at: String,
    pub raw: Value,
}

impl TokenRecord {
    /// Builds a record from the raw token-endpoint body. A body without a
    /// non-empty `token` field is a protocol violation and nothing may be
    /// written to disk in that case.
    pub fn from_response(raw: Value) -> Result<TokenRecord, CollectorError> {
        let token = raw
            .get("token")
            .and_then(|value| value.as_str())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                CollectorError::Protocol(format!("no token field in response: {raw}"))
            })?
            .to_string();
        Ok(TokenRecord {
            token,
            fetched_at: Utc::now().to_rfc3339(),
            raw,
        })
    }

    pub fn save(&self, path: &str) -> Result<(), CollectorError> {
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(self)
            .map_err(|e| CollectorError::TokenFile(format!("cannot encode record: {e}")))?;
        fs::write(path, payload)
            .map_err(|e| CollectorError::TokenFile(format!("cannot write '{path}': {e}")))
    }

    pub fn load(path: &str) -> Result<TokenRecord, CollectorError> {
        let payload = fs::read_to_string(path).map_err(|e| {
            CollectorError::TokenFile(format!(
                "cannot read '{path}': {e}. Run 'collector token' first"
            ))
        })?;
        serde_json::from_str(&payload)
            .map_err(|e| CollectorError::TokenFile(format!("cannot decode '{path}': {e}")))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::CollectorError;

    #[test]
    fn response_with_token_becomes_record() {
        let raw = json!({"response_code": 0, "response_message": "", "token": "abc123"});
        let record = TokenRecord::from_response(raw.clone()).unwrap();
        assert_eq!(record.token, "abc123");
        assert_eq!(record.raw, raw);
        assert!(!record.fetched_at.is_empty());
    }

    #[test]
    fn response_without_token_is_a_protocol_error() {
        let raw = json!({"response_code": 0, "response_message": ""});
        let err = TokenRecord::from_response(raw).unwrap_err();
        assert!(matches!(err, CollectorError::Protocol(_)));
    }

    #[test]
    fn empty_token_is_a_protocol_error() {
        let raw = json!({"response_code": 0, "token": ""});
        let err = TokenRecord::from_response(raw).unwrap_err();
        assert!(matches!(err, CollectorError::Protocol(_)));
    }
}
