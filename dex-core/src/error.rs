use std::{error, fmt, io};

const DEFAULT_MESSAGE: &str = "Failed to load";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Timeout, connection failure or a non-success HTTP status.
    NetworkError(String),
    WebApiError(String),
    ConfigError(String),
}

impl Error {
    pub fn is_network(&self) -> bool {
        matches!(self, Self::NetworkError(_))
    }

    fn message(&self) -> &str {
        match self {
            Self::NetworkError(msg) | Self::WebApiError(msg) | Self::ConfigError(msg) => msg,
        }
    }

    /// Message to show in a view's error state.
    pub fn message_or_default(&self) -> &str {
        let msg = self.message().trim();
        if msg.is_empty() {
            DEFAULT_MESSAGE
        } else {
            msg
        }
    }
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(code) => {
                Self::NetworkError(format!("Request failed with status code {code}"))
            }
            ureq::Error::Timeout(_)
            | ureq::Error::Io(_)
            | ureq::Error::HostNotFound
            | ureq::Error::ConnectionFailed => Self::NetworkError(err.to_string()),
            other => Self::WebApiError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::WebApiError(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::WebApiError(err.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::ConfigError(err.to_string())
    }
}
