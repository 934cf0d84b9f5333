//! Error handling for alias-forge


use thiserror::Error;

/// Main error type for alias-forge
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AliasForgeError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Malformed address '{address}': expected exactly one '@' between two non-empty parts")]
    MalformedAddress { address: String },

    #[error("Input too large: username has {length} characters (max {max})")]
    InputTooLarge { length: usize, max: usize },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("Generation cancelled after {completed} address(es)")]
    Cancelled { completed: usize },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("CLI error: {message}")]
    Cli { message: String },
}

impl AliasForgeError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a malformed address error
    pub fn malformed_address(address: impl Into<String>) -> Self {
        Self::MalformedAddress {
            address: address.into(),
        }
    }

    /// Create an input-too-large error
    pub fn input_too_large(length: usize, max: usize) -> Self {
        Self::InputTooLarge { length, max }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create a cancellation error
    pub fn cancelled(completed: usize) -> Self {
        Self::Cancelled { completed }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a CLI error
    pub fn cli(message: impl Into<String>) -> Self {
        Self::Cli {
            message: message.into(),
        }
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your .env file or ALIAS_FORGE_* variables", message)
            }
            Self::MalformedAddress { address } => {
                format!("❌ '{}' is not a usable address\n💡 Use the form name@gmail.com", address)
            }
            Self::InputTooLarge { length, max } => {
                format!(
                    "❌ Username has {} characters, dot generation supports at most {}\n💡 Shorten the username or use tag mode instead",
                    length, max
                )
            }
            Self::Validation { message } => {
                format!("❌ Validation error: {}\n💡 Check your input format", message)
            }
            Self::Io { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ File error{}: {}\n💡 Check file permissions and paths", path_info, message)
            }
            Self::Parse { message, .. } => {
                format!("❌ Parse error: {}\n💡 The stored data may be corrupted, remove it and retry", message)
            }
            Self::Cancelled { completed } => {
                format!("⏹️  Generation cancelled after {} address(es)", completed)
            }
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
            Self::Cli { message } => {
                format!("❌ Command error: {}\n💡 Use --help for usage information", message)
            }
        }
    }

}

impl From<serde_json::Error> for AliasForgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

impl From<std::io::Error> for AliasForgeError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AliasForgeError>;



/// Helper macros for common error patterns
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::AliasForgeError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::AliasForgeError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! validation_error {
    ($msg:expr) => {
        $crate::error::AliasForgeError::validation($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::AliasForgeError::validation(format!($fmt, $($arg)*))
    };
}
