//! # Error Types
//!
//! Error handling for the SPLPv1 validator.
//!
//! The protocol itself knows exactly one failure: a message that is not legal
//! for the current session state, whether because of its direction, its text,
//! or both. The remaining variants belong to configuration loading and
//! logging setup.
//!
//! ## Example Usage
//! ```rust
//! use splp_validator::error::{ProtocolError, Result};
//! use splp_validator::protocol::message::Message;
//! use splp_validator::protocol::validator::Validator;
//!
//! fn open(validator: &mut Validator) -> Result<()> {
//!     validator.try_validate(&Message::client("CONNECT"))?;
//!     validator.try_validate(&Message::server("CONNECT_OK"))?;
//!     Ok(())
//! }
//!
//! let mut validator = Validator::new();
//! assert!(open(&mut validator).is_ok());
//! assert!(matches!(
//!     validator.try_validate(&Message::server("CONNECT_OK")),
//!     Err(ProtocolError::ProtocolViolation { .. })
//! ));
//! ```

use crate::protocol::message::Direction;
use crate::protocol::state::State;
use thiserror::Error;

/// Error message constants to reduce allocations in error paths.
pub mod constants {
    /// Configuration errors
    pub const ERR_CONFIG_READ: &str = "Failed to read config file";
    pub const ERR_CONFIG_PARSE: &str = "Failed to parse TOML";
    pub const ERR_CONFIG_SERIALIZE: &str = "Failed to serialize config";
    pub const ERR_CONFIG_WRITE: &str = "Failed to write config file";

    /// Logging errors
    pub const ERR_LOG_FILTER: &str = "Invalid log filter directive";
}

// ProtocolError is the primary error type for all validator operations
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// The message was malformed or not allowed in the current state.
    /// The session continues from `INIT` after this error.
    #[error("Protocol violation: {direction} message rejected in state {state}")]
    ProtocolViolation { state: State, direction: Direction },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Logging error: {0}")]
    LoggingError(String),
}

/// Type alias for Results using ProtocolError
pub type Result<T> = std::result::Result<T, ProtocolError>;
