use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// The registrar answered with `status: error`.
    #[error("{command} failed: {message}")]
    RemoteApi {
        command: &'static str,
        message: String,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Cannot modify a DNS record without an id")]
    MissingRecordId,

    #[error("A record '{name}' not found in zone {domain} after creation")]
    RecordNotFound { domain: String, name: String },
}

/// Failures below the registrar's application protocol.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("malformed {command} response: {reason}. Response: {body}")]
    Malformed {
        command: &'static str,
        reason: String,
        body: String,
    },
}

impl Error {
    pub fn remote_api(command: &'static str, message: impl Into<String>) -> Self {
        Self::RemoteApi {
            command,
            message: message.into(),
        }
    }

    pub fn malformed(
        command: &'static str,
        reason: impl ToString,
        body: impl Into<String>,
    ) -> Self {
        Self::Transport(TransportError::Malformed {
            command,
            reason: reason.to_string(),
            body: body.into(),
        })
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(TransportError::Http(err))
    }
}
