use thiserror::Error;

pub type Result<T> = std::result::Result<T, CounterError>;

/// Everything that can go wrong between issuing the request and holding the
/// counter text. The fetcher logs these and swallows them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CounterError {
    #[error("no browser environment: {0}")]
    Environment(String),
    #[error("request to counting service failed: {0}")]
    Network(String),
    #[error("unable to read response body: {0}")]
    Body(String),
}

impl CounterError {
    pub fn environment(msg: impl Into<String>) -> Self { CounterError::Environment(msg.into()) }
    pub fn network(msg: impl Into<String>) -> Self { CounterError::Network(msg.into()) }
    pub fn body(msg: impl Into<String>) -> Self { CounterError::Body(msg.into()) }
}
