// Copyright 2025 Alexandre D. Díaz
use thiserror::Error;

/// Every failure in a run is terminal: nothing is retried, nothing is
/// downgraded to a warning. Each variant maps to its own process exit code.
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("token rejected by the server, request a new one with 'collector token'")]
    TokenInvalid,
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("storage error: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
    #[error("token file error: {0}")]
    TokenFile(String),
    #[error("{0}")]
    Usage(String),
}

impl CollectorError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CollectorError::Storage(_) | CollectorError::Pool(_) | CollectorError::Io(_) => 1,
            CollectorError::TokenFile(_) | CollectorError::Usage(_) => 2,
            CollectorError::Network(_) => 3,
            CollectorError::Protocol(_) => 4,
            CollectorError::TokenInvalid => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_the_documented_contract() {
        assert_eq!(CollectorError::TokenFile("gone".to_string()).exit_code(), 2);
        assert_eq!(CollectorError::Usage("bad args".to_string()).exit_code(), 2);
        assert_eq!(
            CollectorError::Protocol("bad body".to_string()).exit_code(),
            4
        );
        assert_eq!(CollectorError::TokenInvalid.exit_code(), 5);
    }
}
