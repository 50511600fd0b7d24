use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::Timeout("https://example.com after 30s".to_string());
        assert_eq!(err.to_string(), "Request timed out: https://example.com after 30s");

        let err: Error = url::Url::parse("not a url").unwrap_err().into();
        assert!(err.to_string().starts_with("Invalid URL:"));
    }

    #[test]
    fn test_from_serde_error() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = parse.into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
