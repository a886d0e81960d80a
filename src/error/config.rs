//! Configuration errors

use super::PackError;

/// Creates a config not found error
pub fn not_found(path: impl Into<String>) -> PackError {
    PackError::ConfigNotFound { path: path.into() }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> PackError {
    PackError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> PackError {
    PackError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> PackError {
    PackError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a missing environment variable error
pub fn env_missing(name: impl Into<String>) -> PackError {
    PackError::EnvVarMissing { name: name.into() }
}
