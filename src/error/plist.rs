//! Property list errors

use super::PackError;

/// Creates an error for inserting a key that is already present
pub fn key_exists(path: impl Into<String>, key: impl Into<String>) -> PackError {
    PackError::PlistKeyExists {
        path: path.into(),
        key: key.into(),
    }
}

/// Creates an error for replacing a key that is absent
pub fn key_missing(path: impl Into<String>, key: impl Into<String>) -> PackError {
    PackError::PlistKeyMissing {
        path: path.into(),
        key: key.into(),
    }
}

/// Creates a plist read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> PackError {
    PackError::PlistReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a plist write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> PackError {
    PackError::PlistWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
