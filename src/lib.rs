//! # splp-validator
//!
//! Conformance checker for SPLPv1, a small text request/response protocol
//! between a client (A) and a server (B).
//!
//! Each call takes the current session record and one directional message,
//! decides whether the message is both well formed and legal in that state,
//! and returns the verdict together with the next session record. Any
//! rejected message resets the session to `INIT`.
//!
//! ## Modules
//! - [`protocol`]: messages, states, grammars and the state machine
//! - [`config`]: TOML/env configuration for labels, logging and metrics
//! - [`error`]: the crate's error type
//! - [`utils`]: logging setup and metrics
//!
//! ## Example
//! ```rust
//! use splp_validator::protocol::message::{Message, Verdict};
//! use splp_validator::protocol::state::{SessionState, State};
//! use splp_validator::protocol::validator::validate;
//!
//! let session = SessionState::new();
//! let (verdict, session) = validate(session, &Message::client("CONNECT"));
//! assert_eq!(verdict, Verdict::Valid);
//! assert_eq!(session.state(), State::Connecting);
//!
//! let (verdict, session) = validate(session, &Message::client("CONNECT"));
//! assert_eq!(verdict, Verdict::Invalid);
//! assert_eq!(session.state(), State::Init);
//! ```

pub mod config;
pub mod error;
pub mod protocol;
pub mod utils;

pub use error::{ProtocolError, Result};
pub use protocol::message::{Command, Direction, Message, Verdict};
pub use protocol::state::{SessionState, State};
pub use protocol::validator::{transition, validate, Validator};
