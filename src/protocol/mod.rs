//! # SPLPv1 Protocol
//!
//! - **message**: directional messages, pending commands, verdicts
//! - **state**: protocol states and the per-session record
//! - **grammar**: payload grammars of the version, data and base64 replies
//! - **validator**: the state machine

pub mod grammar;
pub mod message;
pub mod state;
pub mod validator;
