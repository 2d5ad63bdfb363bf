use thiserror::Error;

/// Ways a request to the upstream API can go wrong.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    #[error("{0}")]
    Network(String),
    #[error("HTTP {0}")]
    Status(u16),
    /// The body decoded fine but said `ok: false`.
    #[error("{0}")]
    Rejected(String),
    #[error("invalid response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MountError {
    #[error("required element #{0} is missing from the page")]
    MissingElement(&'static str),
}
