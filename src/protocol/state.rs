//! Protocol states and the per-session record threaded through validation.
//!
//! Instead of a process-wide state variable, each session owns a
//! [`SessionState`] value that the caller passes into every validation call
//! and stores again afterwards.

use crate::protocol::message::Command;
use serde::{Deserialize, Serialize};
use std::fmt;

/// SPLPv1 protocol state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    /// No session; only `CONNECT` is accepted
    #[default]
    Init,
    /// Client waits for connection approval
    Connecting,
    /// Session established, client may issue requests
    Connected,
    /// Client waits for `VERSION n`
    WaitingVersion,
    /// Client waits for `CMD data CMD`
    WaitingData,
    /// Client waits for `B64: payload`
    WaitingB64,
    /// Client waits for `DISCONNECT_OK`
    Disconnecting,
}

impl State {
    pub const ALL: [State; 7] = [
        State::Init,
        State::Connecting,
        State::Connected,
        State::WaitingVersion,
        State::WaitingData,
        State::WaitingB64,
        State::Disconnecting,
    ];

    /// Protocol name of the state
    pub fn name(self) -> &'static str {
        match self {
            State::Init => "INIT",
            State::Connecting => "CONNECTING",
            State::Connected => "CONNECTED",
            State::WaitingVersion => "WAITING_VER",
            State::WaitingData => "WAITING_DATA",
            State::WaitingB64 => "WAITING_B64_DATA",
            State::Disconnecting => "DISCONNECTING",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything the validator remembers between two messages of one session.
///
/// `pending` is only meaningful while `state` is [`State::WaitingData`]; the
/// constructors below are the only way the validator builds this value, so
/// that pairing always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    state: State,
    pending: Option<Command>,
}

impl SessionState {
    /// Fresh session in `INIT`
    pub const fn new() -> Self {
        Self {
            state: State::Init,
            pending: None,
        }
    }

    /// Session in a state that carries no pending command.
    /// `WaitingData` cannot be built this way; use [`SessionState::awaiting`].
    pub(crate) const fn at(state: State) -> Self {
        Self {
            state,
            pending: None,
        }
    }

    /// Session waiting for the server's reply to `command`
    pub const fn awaiting(command: Command) -> Self {
        Self {
            state: State::WaitingData,
            pending: Some(command),
        }
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    /// Command awaiting its data reply, if any
    #[inline]
    pub fn pending(&self) -> Option<Command> {
        self.pending
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pending {
            Some(cmd) => write!(f, "{} ({cmd})", self.state),
            None => write!(f, "{}", self.state),
        }
    }
}
