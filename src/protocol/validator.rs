//! SPLPv1 state machine.
//!
//! ```text
//! # | STATE            | ALLOWED MESSAGES                        | NEW STATE
//! --+------------------+-----------------------------------------+----------
//! 1 | INIT             | A->B CONNECT                            | 2
//! 2 | CONNECTING       | A<-B CONNECT_OK                         | 3
//! 3 | CONNECTED        | A->B GET_VER                            | 4
//!   |                  | A->B GET_DATA / GET_FILE / GET_COMMAND  | 5
//!   |                  | A->B GET_B64                            | 6
//!   |                  | A->B DISCONNECT                         | 7
//! 4 | WAITING_VER      | A<-B VERSION ver                        | 3
//! 5 | WAITING_DATA     | A<-B CMD data CMD                       | 3
//! 6 | WAITING_B64_DATA | A<-B B64: data                          | 3
//! 7 | DISCONNECTING    | A<-B DISCONNECT_OK                      | 1
//! ```
//!
//! Any other message resets the session to INIT.
//!
//! The core is [`transition`], a pure function of the session record and one
//! message. [`Validator`] wraps it for callers that want to keep the record
//! in one place.

use crate::config::{SessionConfig, ValidatorConfig, PROTOCOL_NAME};
use crate::error::{ProtocolError, Result};
use crate::protocol::grammar;
use crate::protocol::message::{keywords, Command, Direction, Message, Verdict};
use crate::protocol::state::{SessionState, State};
use crate::utils::metrics::Metrics;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Next session state for an accepted message, `None` when the message is
/// not legal in `session`.
fn next_state(session: SessionState, msg: &Message) -> Option<SessionState> {
    use Direction::{ClientToServer as C, ServerToClient as S};

    let text = msg.text.as_str();
    match (session.state(), msg.direction) {
        (State::Init, C) if text == keywords::CONNECT => Some(SessionState::at(State::Connecting)),

        (State::Connecting, S) if text == keywords::CONNECT_OK => {
            Some(SessionState::at(State::Connected))
        }

        (State::Connected, C) => match text {
            keywords::GET_VER => Some(SessionState::at(State::WaitingVersion)),
            keywords::GET_B64 => Some(SessionState::at(State::WaitingB64)),
            keywords::DISCONNECT => Some(SessionState::at(State::Disconnecting)),
            other => Command::from_text(other).map(SessionState::awaiting),
        },

        (State::WaitingVersion, S) if grammar::is_version_reply(text) => {
            Some(SessionState::at(State::Connected))
        }

        (State::WaitingData, S) => session
            .pending()
            .filter(|&cmd| grammar::is_data_reply(text, cmd))
            .map(|_| SessionState::at(State::Connected)),

        (State::WaitingB64, S) if grammar::is_base64_reply(text) => {
            Some(SessionState::at(State::Connected))
        }

        (State::Disconnecting, S) if text == keywords::DISCONNECT_OK => {
            Some(SessionState::at(State::Init))
        }

        _ => None,
    }
}

/// Apply one message to a session.
///
/// # Errors
/// Returns `ProtocolError::ProtocolViolation` naming the state the message
/// arrived in. The caller must then continue from `SessionState::new()`;
/// [`validate`] does that automatically.
pub fn transition(session: SessionState, msg: &Message) -> Result<SessionState> {
    next_state(session, msg).ok_or(ProtocolError::ProtocolViolation {
        state: session.state(),
        direction: msg.direction,
    })
}

/// Validate one message and compute the session state that follows it.
///
/// A rejected message always yields `INIT` with no pending command.
pub fn validate(session: SessionState, msg: &Message) -> (Verdict, SessionState) {
    match transition(session, msg) {
        Ok(next) => (Verdict::Valid, next),
        Err(_) => (Verdict::Invalid, SessionState::new()),
    }
}

/// Stateful validator for one protocol session.
///
/// Holds the session record between calls and optionally reports into a
/// shared [`Metrics`] collector.
#[derive(Debug, Default)]
pub struct Validator {
    session: SessionState,
    settings: SessionConfig,
    metrics: Option<Arc<Metrics>>,
}

impl Validator {
    /// Validator at `INIT` with default settings and no metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator reporting into a shared metrics collector
    pub fn with_metrics(metrics: Arc<Metrics>) -> Self {
        Self {
            metrics: Some(metrics),
            ..Self::default()
        }
    }

    /// Build a validator from configuration.
    /// A fresh collector is attached when `collect_metrics` is set.
    pub fn from_config(config: &ValidatorConfig) -> Self {
        let settings = config.validator.clone();
        let metrics = settings.collect_metrics.then(|| Arc::new(Metrics::new()));
        Self {
            session: SessionState::new(),
            settings,
            metrics,
        }
    }

    /// Validate `msg` against the current state and advance the session.
    pub fn validate(&mut self, msg: &Message) -> Verdict {
        match self.try_validate(msg) {
            Ok(_) => Verdict::Valid,
            Err(_) => Verdict::Invalid,
        }
    }

    /// Like [`Validator::validate`] but reports a rejection as an error.
    /// The session is already back at `INIT` when the error is returned.
    #[instrument(
        level = "trace",
        skip(self, msg),
        fields(protocol = PROTOCOL_NAME, session = %self.settings.session_label)
    )]
    pub fn try_validate(&mut self, msg: &Message) -> Result<State> {
        let from = self.session;
        let result = transition(from, msg);

        match &result {
            Ok(next) => {
                debug!(from = %from, to = %next, direction = %msg.direction, "Message accepted");
                self.session = *next;
            }
            Err(_) => {
                if self.settings.log_message_text {
                    debug!(
                        state = %from,
                        direction = %msg.direction,
                        text = %self.settings.truncate_for_log(&msg.text),
                        "Protocol violation, resetting session"
                    );
                } else {
                    debug!(state = %from, direction = %msg.direction, "Protocol violation, resetting session");
                }
                self.session = SessionState::new();
            }
        }

        if let Some(metrics) = &self.metrics {
            metrics.record(from.state(), self.session.state(), result.is_ok());
        }

        result.map(|next| next.state())
    }

    /// Current protocol state
    #[inline]
    pub fn state(&self) -> State {
        self.session.state()
    }

    /// Full session record, including the pending command
    #[inline]
    pub fn session(&self) -> SessionState {
        self.session
    }

    /// Command awaiting its data reply, if any
    #[inline]
    pub fn pending(&self) -> Option<Command> {
        self.session.pending()
    }

    /// Shared metrics collector, if one is attached
    pub fn metrics(&self) -> Option<&Arc<Metrics>> {
        self.metrics.as_ref()
    }

    /// Drop the current session and return to `INIT`
    pub fn reset(&mut self) {
        self.session = SessionState::new();
    }
}
