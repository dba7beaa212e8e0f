use std::fmt;

use serde::Deserialize;
use serde_json::Value;

pub const UNAUTHORIZED_MESSAGE: &str =
    "Invalid username or password or you do not have an account yet!";
pub const NOT_FOUND_MESSAGE: &str = "The requested resource was not found!";
pub const UNKNOWN_MESSAGE: &str = "Unknown error! Please retry later.";

/// Result of one completed API call: a status code and, when the server sent
/// one, the JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpOutcome {
    pub status_code: u16,
    pub body: Option<Value>,
}

impl HttpOutcome {
    pub fn new(status_code: u16, body: Option<Value>) -> Self {
        Self { status_code, body }
    }

    pub fn status(status_code: u16) -> Self {
        Self::new(status_code, None)
    }

    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Shape of a 400 payload from the API. Only the first entry of `errors` is
/// read, so later entries and the other top level fields may hold anything.
#[derive(Deserialize, Debug, Clone)]
pub struct BadRequestBody {
    pub errors: Vec<Value>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApiMessage {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    Validation(String),
    Unauthorized,
    NotFound,
    Unknown,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::Validation(msg) => f.write_str(msg),
            ApiFailure::Unauthorized => f.write_str(UNAUTHORIZED_MESSAGE),
            ApiFailure::NotFound => f.write_str(NOT_FOUND_MESSAGE),
            ApiFailure::Unknown => f.write_str(UNKNOWN_MESSAGE),
        }
    }
}

/// Typed classification of an outcome. `None` means the call succeeded.
pub fn classify_failure(outcome: &HttpOutcome) -> Option<ApiFailure> {
    if outcome.is_ok() {
        return None;
    }

    let failure = match outcome.status_code {
        400 => first_validation_message(outcome.body.as_ref())
            .map(ApiFailure::Validation)
            .unwrap_or(ApiFailure::Unknown),
        401 => ApiFailure::Unauthorized,
        404 => ApiFailure::NotFound,
        _ => ApiFailure::Unknown,
    };
    Some(failure)
}

/// Human readable message for an outcome, empty when it succeeded.
pub fn classify(outcome: &HttpOutcome) -> String {
    classify_failure(outcome)
        .map(|failure| failure.to_string())
        .unwrap_or_default()
}

fn first_validation_message(body: Option<&Value>) -> Option<String> {
    let parsed = BadRequestBody::deserialize(body?).ok()?;
    let first = parsed.errors.into_iter().next()?;
    ApiMessage::deserialize(first).ok().map(|entry| entry.message)
}
