use thiserror::Error;

/// All errors generated in `screener-feed`.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("invalid bridge url: {0}")]
    Url(#[from] url::ParseError),

    #[error("bridge request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("bridge returned unexpected payload: {0}")]
    Decode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FeedError::Decode("expected a JSON array".to_string());
        assert_eq!(
            err.to_string(),
            "bridge returned unexpected payload: expected a JSON array"
        );
    }
}
