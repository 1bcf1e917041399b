use thiserror::Error;

pub type Result<T> = std::result::Result<T, NornError>;

#[allow(clippy::enum_variant_names)]
#[derive(Error, Debug)]
pub enum NornError {
    /// Transport failure, HTTP error status or undecodable response body.
    #[error("an unexpected error occurred: {0}")]
    Request(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    VarError(#[from] std::env::VarError),
    /// Logical error reported by the oracle service inside the envelope.
    #[error("oracle service reported an error: {0}")]
    Server(serde_json::Value),
}

impl NornError {
    pub fn new(msg: &str) -> NornError {
        NornError::Config(msg.to_owned())
    }
}

impl From<reqwest::Error> for NornError {
    fn from(err: reqwest::Error) -> Self {
        NornError::Request(err.to_string())
    }
}

impl From<serde_json::Error> for NornError {
    fn from(err: serde_json::Error) -> Self {
        NornError::Request(err.to_string())
    }
}
