use std::fmt;

/// Main error type for the flysas client
#[derive(Debug)]
pub enum FlysasClientError {
    // Transport Errors
    Transport(String),
    HttpStatus { status: u16, message: String },
    NotLoggedIn(String),

    // Response Errors
    InvalidResponse(String),

    // Query Errors
    QuerySyntax(String),

    // Configuration Errors
    InvalidConfigValue(String),
    ConfigFileError(String),

    // IO Errors
    Io(std::io::Error),
}

impl fmt::Display for FlysasClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Transport Errors
            Self::Transport(msg) => write!(f, "Request failed: {}", msg),
            Self::HttpStatus { status, message } => {
                write!(f, "Server responded with {}: {}", status, message)
            }
            Self::NotLoggedIn(msg) => write!(f, "Not logged in: {}", msg),

            // Response Errors
            Self::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),

            // Query Errors
            Self::QuerySyntax(msg) => write!(f, "{}", msg),

            // Configuration Errors
            Self::InvalidConfigValue(msg) => write!(f, "Invalid config value: {}", msg),
            Self::ConfigFileError(msg) => write!(f, "Config file error: {}", msg),

            // IO Errors
            Self::Io(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for FlysasClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FlysasClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<reqwest::Error> for FlysasClientError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::HttpStatus {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None if err.is_decode() => Self::InvalidResponse(err.to_string()),
            None => Self::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for FlysasClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}

impl From<config::ConfigError> for FlysasClientError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigFileError(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, FlysasClientError>;
