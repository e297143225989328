use thiserror::Error;

/// Message shown for any failed fetch, whatever the underlying cause.
pub const FETCH_FAILURE_MESSAGE: &str = "Error fetching weather data. Please try again.";

/// Message shown when the submitted location is blank.
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a valid location.";

/// Why a provider request failed. Kept apart for logs and tests only;
/// the user always sees [`FETCH_FAILURE_MESSAGE`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request could not be sent: {0}")]
    Network(String),

    #[error("provider answered with status {0}")]
    NotFound(u16),

    #[error("unexpected response body: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyInput,
    FetchFailure,
}

/// Outcome of a failed search attempt. `Display` is the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("{}", EMPTY_INPUT_MESSAGE)]
    EmptyInput,

    #[error("{}", FETCH_FAILURE_MESSAGE)]
    Fetch(#[source] FetchError),
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::EmptyInput => ErrorKind::EmptyInput,
            SearchError::Fetch(_) => ErrorKind::FetchFailure,
        }
    }
}

impl From<FetchError> for SearchError {
    fn from(err: FetchError) -> Self {
        SearchError::Fetch(err)
    }
}
