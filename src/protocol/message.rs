//! SPLPv1 message values and protocol keywords.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed message texts of the protocol.
pub mod keywords {
    pub const CONNECT: &str = "CONNECT";
    pub const CONNECT_OK: &str = "CONNECT_OK";
    pub const GET_VER: &str = "GET_VER";
    pub const GET_DATA: &str = "GET_DATA";
    pub const GET_FILE: &str = "GET_FILE";
    pub const GET_COMMAND: &str = "GET_COMMAND";
    pub const GET_B64: &str = "GET_B64";
    pub const DISCONNECT: &str = "DISCONNECT";
    pub const DISCONNECT_OK: &str = "DISCONNECT_OK";

    /// Prefix of the server's version reply, including its single space
    pub const VERSION_PREFIX: &str = "VERSION ";
    /// Prefix of the server's base64 reply, including its single space
    pub const B64_PREFIX: &str = "B64: ";
}

/// Which peer sent a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// A -> B
    ClientToServer,
    /// A <- B
    ServerToClient,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ClientToServer => f.write_str("A->B"),
            Direction::ServerToClient => f.write_str("A<-B"),
        }
    }
}

/// A single directional protocol message.
///
/// The text is whatever the transport layer decoded for one message, with
/// framing already stripped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub direction: Direction,
    pub text: String,
}

impl Message {
    pub fn new(direction: Direction, text: impl Into<String>) -> Self {
        Self {
            direction,
            text: text.into(),
        }
    }

    /// Message sent by the client (A->B)
    pub fn client(text: impl Into<String>) -> Self {
        Self::new(Direction::ClientToServer, text)
    }

    /// Message sent by the server (A<-B)
    pub fn server(text: impl Into<String>) -> Self {
        Self::new(Direction::ServerToClient, text)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.direction, self.text)
    }
}

/// Data request the client issued from `CONNECTED`.
///
/// The server must echo the same command around its data reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    GetData,
    GetFile,
    GetCommand,
}

impl Command {
    pub const ALL: [Command; 3] = [Command::GetData, Command::GetFile, Command::GetCommand];

    /// Literal wire text of the command
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Command::GetData => keywords::GET_DATA,
            Command::GetFile => keywords::GET_FILE,
            Command::GetCommand => keywords::GET_COMMAND,
        }
    }

    /// Exact-match lookup of a command by its wire text
    pub fn from_text(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.as_str() == text)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of validating one message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Valid,
    Invalid,
}

impl Verdict {
    #[inline]
    pub fn is_valid(self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Valid => f.write_str("MESSAGE_VALID"),
            Verdict::Invalid => f.write_str("MESSAGE_INVALID"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_command_lookup_is_exact() {
        assert_eq!(Command::from_text("GET_DATA"), Some(Command::GetData));
        assert_eq!(Command::from_text("GET_FILE"), Some(Command::GetFile));
        assert_eq!(Command::from_text("GET_COMMAND"), Some(Command::GetCommand));
        assert_eq!(Command::from_text("GET_DATA "), None);
        assert_eq!(Command::from_text("get_data"), None);
        assert_eq!(Command::from_text(""), None);
    }

    #[test]
    fn test_message_serde_names() {
        let msg = Message::server("CONNECT_OK");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"direction":"server_to_client","text":"CONNECT_OK"}"#);

        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_display() {
        assert_eq!(Message::client("CONNECT").to_string(), "A->B CONNECT");
        assert_eq!(Message::server("CONNECT_OK").to_string(), "A<-B CONNECT_OK");
        assert_eq!(Verdict::Invalid.to_string(), "MESSAGE_INVALID");
    }
}
