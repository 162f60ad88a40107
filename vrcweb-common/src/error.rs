// ================================================================
// File: vrcweb-common/src/error.rs
// ================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Unrecognized {field}: {token}")]
    Decode { field: &'static str, token: String },

    #[error("Authentication error: {0}")]
    Auth(String),
}

impl Error {
    /// Decode failure for a closed enum field.
    pub fn decode(field: &'static str, token: &str) -> Self {
        Error::Decode {
            field,
            token: token.to_string(),
        }
    }

    /// Missing or wrongly-typed required field.
    pub fn missing_field(key: &str) -> Self {
        Error::MalformedResponse(format!("missing required field \"{key}\""))
    }

    /// Field is present but its JSON type does not match the expected one.
    pub fn field_type(key: &str, expected: &str) -> Self {
        Error::MalformedResponse(format!("field \"{key}\" is not {expected}"))
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::MalformedResponse(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::MalformedResponse(s.to_string())
    }
}

impl From<chrono::format::ParseError> for Error {
    fn from(err: chrono::format::ParseError) -> Self {
        Error::MalformedResponse(err.to_string())
    }
}
