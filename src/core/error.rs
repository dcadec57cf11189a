use std::io;

#[derive(thiserror::Error, Debug)]
pub enum WatchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("timeout")]
    Timeout,
    #[error("http error: {0}")]
    Http(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("unknown error")]
    Unknown,
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl From<reqwest::Error> for WatchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WatchError::Timeout
        } else if err.is_connect() {
            WatchError::Network(err.to_string())
        } else if err.is_status() {
            WatchError::Http(err.to_string())
        } else if err.is_decode() || err.is_body() {
            WatchError::Parse(err.to_string())
        } else if err.is_request() {
            WatchError::Network(err.to_string())
        } else {
            WatchError::Unknown
        }
    }
}

impl From<serde_json::Error> for WatchError {
    fn from(err: serde_json::Error) -> Self {
        WatchError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err: WatchError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, WatchError::Parse(_)));
    }
}
