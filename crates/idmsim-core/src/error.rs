use std::io;
use thiserror::Error;

/// Custom result type for idmsim operations
pub type SimResult<T> = Result<T, SimError>;

/// Custom error type for idmsim operations
#[derive(Debug, Error)]
pub enum SimError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required parameters: {0}")]
    MissingParameters(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Distribution error: {0}")]
    Distribution(String),

    #[error("Bootstrap error: {0}")]
    Bootstrap(String),

    #[error("Command failed: {0} - {1}")]
    CommandFailed(String, String),
}

impl SimError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SimError::Config(msg.into())
    }

    /// Create an error naming every required parameter left unset
    pub fn missing_parameters(keys: &[&str]) -> Self {
        SimError::MissingParameters(keys.join(", "))
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        SimError::Parse(msg.into())
    }

    /// Create a new distribution error
    pub fn distribution<S: Into<String>>(msg: S) -> Self {
        SimError::Distribution(msg.into())
    }

    /// Create a new bootstrap error
    pub fn bootstrap<S: Into<String>>(msg: S) -> Self {
        SimError::Bootstrap(msg.into())
    }
}

impl From<io::Error> for SimError {
    fn from(err: io::Error) -> Self {
        SimError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for SimError {
    fn from(err: toml::de::Error) -> Self {
        SimError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameters_lists_keys() {
        let err = SimError::missing_parameters(&["dt", "sim_time"]);
        assert_eq!(
            err.to_string(),
            "Missing required parameters: dt, sim_time"
        );
    }

    #[test]
    fn io_error_converts() {
        let err: SimError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, SimError::Io(_)));
    }
}
