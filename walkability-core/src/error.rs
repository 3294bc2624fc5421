use thiserror::Error;

/// Every failure the core can report. The CLI is the only place these are caught.
#[derive(Debug, Error)]
pub enum WalkError {
    /// The provider returned a record that is incomplete or has the wrong shape.
    #[error("invalid weather data: {0}")]
    InvalidData(String),

    /// The provider could not be reached, timed out, or answered with an error.
    #[error("error obtaining weather data: {0}")]
    Fetch(String),

    /// A preference rating or the daytime flag is outside its accepted domain.
    #[error("{0}")]
    InvalidPreference(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl WalkError {
    pub(crate) fn missing(path: &str) -> Self {
        WalkError::InvalidData(format!("missing required field `{path}`"))
    }

    pub(crate) fn malformed(path: &str) -> Self {
        WalkError::InvalidData(format!("malformed field `{path}`"))
    }
}

impl From<reqwest::Error> for WalkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WalkError::Fetch(format!("request timed out: {err}"))
        } else {
            WalkError::Fetch(err.to_string())
        }
    }
}

pub type Result<T, E = WalkError> = std::result::Result<T, E>;
