use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GitHub API error: {status}")]
    Http { status: u16 },

    #[error("GraphQL Error: {}", messages.join(", "))]
    GraphQL { messages: Vec<String> },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("User {0} not found")]
    UserNotFound(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::UserNotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_messages_are_joined() {
        let err = Error::GraphQL {
            messages: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(err.to_string(), "GraphQL Error: first, second");
    }

    #[test]
    fn test_not_found_is_distinct_from_http() {
        assert!(Error::UserNotFound("ghost".to_string()).is_not_found());
        assert!(!Error::Http { status: 404 }.is_not_found());
        assert_eq!(Error::Http { status: 502 }.to_string(), "GitHub API error: 502");
    }
}
