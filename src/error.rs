use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PostameError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Network error ({context}): {source}")]
    Network {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected response ({context}): {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("You are not logged in")]
    NotLoggedIn,

    #[error("{0}")]
    Validation(String),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl PostameError {
    /// Wrap a transport failure with the message shown to the user for that operation.
    pub fn network(context: &'static str, source: reqwest::Error) -> Self {
        PostameError::Network { context, source }
    }

    /// The text a user should see. API failures already carry a classified
    /// message; transport failures fall back to the per-operation one.
    pub fn user_message(&self) -> String {
        match self {
            PostameError::Api { message, .. } => message.clone(),
            PostameError::Network { context, .. } | PostameError::Decode { context, .. } => {
                context.to_string()
            }
            PostameError::NotLoggedIn => "Please log in first.".to_string(),
            PostameError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for PostameError {
    fn from(err: serde_json::Error) -> Self {
        PostameError::Json(err.to_string())
    }
}

impl From<io::Error> for PostameError {
    fn from(err: io::Error) -> Self {
        PostameError::Io(err.to_string())
    }
}
