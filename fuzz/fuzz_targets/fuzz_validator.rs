#![no_main]

use libfuzzer_sys::fuzz_target;
use splp_validator::{validate, Direction, Message, SessionState, State, Verdict};

/// Messages that drive a fresh session into `state`
fn path_to(state: State) -> Vec<Message> {
    if state == State::Init {
        return Vec::new();
    }
    let mut path = vec![Message::client("CONNECT")];
    if state == State::Connecting {
        return path;
    }
    path.push(Message::server("CONNECT_OK"));

    let request = match state {
        State::WaitingVersion => "GET_VER",
        State::WaitingData => "GET_DATA",
        State::WaitingB64 => "GET_B64",
        State::Disconnecting => "DISCONNECT",
        _ => return path,
    };
    path.push(Message::client(request));
    path
}

fuzz_target!(|data: &[u8]| {
    let Some((&flags, rest)) = data.split_first() else {
        return;
    };
    let Ok(text) = std::str::from_utf8(rest) else {
        return;
    };

    let direction = if flags & 1 == 0 {
        Direction::ClientToServer
    } else {
        Direction::ServerToClient
    };
    let msg = Message::new(direction, text);

    // Feed the same text from every state
    for state in State::ALL {
        let mut session = SessionState::new();
        for m in path_to(state) {
            session = validate(session, &m).1;
        }
        assert_eq!(session.state(), state);

        let (verdict, next) = validate(session, &msg);
        if verdict == Verdict::Invalid {
            assert_eq!(next, SessionState::new());
        }
        assert_eq!(next.pending().is_some(), next.state() == State::WaitingData);
    }
});
