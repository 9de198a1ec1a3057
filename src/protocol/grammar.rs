//! Text grammars of the three server replies that carry a payload.
//!
//! Each check receives the whole message text and answers whether it matches
//! exactly; none of them allocate.
//!
//! ```text
//! version  = "VERSION " nonzero *digit
//! data     = CMD " " 1*( lower / digit / "." ) " " CMD
//! base64   = "B64: " *b64char 0*2"=" ; total length of run and padding % 4 == 0
//! ```

use crate::protocol::message::{keywords, Command};

/// Maximum number of `=` padding characters after a base64 run
pub const MAX_B64_PADDING: usize = 2;

#[inline]
fn is_nonzero_digit(b: u8) -> bool {
    matches!(b, b'1'..=b'9')
}

/// Characters allowed in a `CMD data CMD` payload
#[inline]
pub fn is_data_char(b: u8) -> bool {
    matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'.')
}

/// Characters of the standard base64 alphabet, padding excluded
#[inline]
pub fn is_base64_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'+' | b'/')
}

/// Length of the longest prefix of `bytes` whose bytes all satisfy `pred`
#[inline]
fn run_len(bytes: &[u8], pred: impl Fn(u8) -> bool) -> usize {
    bytes.iter().take_while(|&&b| pred(b)).count()
}

/// `VERSION n` where `n` is a positive decimal integer without leading zeros
pub fn is_version_reply(text: &str) -> bool {
    let Some(digits) = text.strip_prefix(keywords::VERSION_PREFIX) else {
        return false;
    };
    match digits.as_bytes().split_first() {
        Some((&first, rest)) => is_nonzero_digit(first) && rest.iter().all(u8::is_ascii_digit),
        None => false,
    }
}

/// `CMD data CMD` where both `CMD` tokens are the pending command's text
pub fn is_data_reply(text: &str, pending: Command) -> bool {
    let cmd = pending.as_str();
    let Some(rest) = text.strip_prefix(cmd).and_then(|r| r.strip_prefix(' ')) else {
        return false;
    };

    // Maximal data run; the character that stops it must be the separator.
    let data_len = run_len(rest.as_bytes(), is_data_char);
    if data_len == 0 {
        return false;
    }

    // data_len covers ASCII bytes only, so slicing here stays on a char boundary
    rest[data_len..]
        .strip_prefix(' ')
        .is_some_and(|trailer| trailer == cmd)
}

/// `B64: payload` with an aligned, optionally padded base64 payload
pub fn is_base64_reply(text: &str) -> bool {
    let Some(payload) = text.strip_prefix(keywords::B64_PREFIX) else {
        return false;
    };
    let bytes = payload.as_bytes();

    let run = run_len(bytes, is_base64_char);
    let padding = run_len(&bytes[run..], |b| b == b'=').min(MAX_B64_PADDING);
    let consumed = run + padding;

    consumed == bytes.len() && consumed % 4 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_classes() {
        for b in b'a'..=b'z' {
            assert!(is_data_char(b));
            assert!(is_base64_char(b));
        }
        for b in b'A'..=b'Z' {
            assert!(!is_data_char(b));
            assert!(is_base64_char(b));
        }
        for b in b'0'..=b'9' {
            assert!(is_data_char(b));
            assert!(is_base64_char(b));
        }
        assert!(is_data_char(b'.'));
        assert!(!is_base64_char(b'.'));
        assert!(is_base64_char(b'+') && is_base64_char(b'/'));
        assert!(!is_data_char(b'+') && !is_data_char(b'/'));
        assert!(!is_base64_char(b'=') && !is_data_char(b'='));
        assert!(!is_data_char(b' ') && !is_base64_char(b' '));
        assert!(!is_data_char(0) && !is_base64_char(0));
        assert!(!is_data_char(0xC3) && !is_base64_char(0xC3));
    }

    #[test]
    fn test_version_reply() {
        assert!(is_version_reply("VERSION 1"));
        assert!(is_version_reply("VERSION 2"));
        assert!(is_version_reply("VERSION 10"));
        assert!(is_version_reply("VERSION 9876543210"));

        assert!(!is_version_reply("VERSION 0"));
        assert!(!is_version_reply("VERSION 01"));
        assert!(!is_version_reply("VERSION 12a"));
        assert!(!is_version_reply("VERSION "));
        assert!(!is_version_reply("VERSION"));
        assert!(!is_version_reply("VERSION  1"));
        assert!(!is_version_reply("VERSION 1 "));
        assert!(!is_version_reply("VERSION -1"));
        assert!(!is_version_reply("version 1"));
        assert!(!is_version_reply("VERSION １"));
    }

    #[test]
    fn test_data_reply() {
        assert!(is_data_reply("GET_DATA a GET_DATA", Command::GetData));
        assert!(is_data_reply("GET_FILE file.txt GET_FILE", Command::GetFile));
        assert!(is_data_reply("GET_COMMAND ls.0 GET_COMMAND", Command::GetCommand));
        assert!(is_data_reply("GET_DATA ... GET_DATA", Command::GetData));

        assert!(!is_data_reply("GET_DATA a GET_FILE", Command::GetData));
        assert!(!is_data_reply("GET_FILE a GET_FILE", Command::GetData));
        assert!(!is_data_reply("GET_DATA A GET_DATA", Command::GetData));
        assert!(!is_data_reply("GET_DATA a b GET_DATA", Command::GetData));
        assert!(!is_data_reply("GET_DATA a  GET_DATA", Command::GetData));
        assert!(!is_data_reply("GET_DATA  a GET_DATA", Command::GetData));
        assert!(!is_data_reply("GET_DATA a GET_DATA ", Command::GetData));
        assert!(!is_data_reply("GET_DATA a GET_DATAX", Command::GetData));
        assert!(!is_data_reply("GET_DATAa GET_DATA", Command::GetData));
        assert!(!is_data_reply("GET_DATA a", Command::GetData));
        assert!(!is_data_reply("GET_DATA a ", Command::GetData));
        assert!(!is_data_reply("GET_DATA", Command::GetData));
        assert!(!is_data_reply("", Command::GetData));
    }

    #[test]
    fn test_data_reply_rejects_empty_data() {
        assert!(!is_data_reply("GET_DATA  GET_DATA", Command::GetData));
        assert!(!is_data_reply("GET_FILE  GET_FILE", Command::GetFile));
    }

    #[test]
    fn test_data_reply_non_ascii_after_run() {
        assert!(!is_data_reply("GET_DATA aé GET_DATA", Command::GetData));
        assert!(!is_data_reply("GET_DATA é GET_DATA", Command::GetData));
    }

    #[test]
    fn test_base64_reply() {
        assert!(is_base64_reply("B64: SGVsbG8="));
        assert!(is_base64_reply("B64: YWJjZA=="));
        assert!(is_base64_reply("B64: YWJj"));
        assert!(is_base64_reply("B64: a+/Z"));

        assert!(!is_base64_reply("B64: SGVsbG8"));
        assert!(!is_base64_reply("B64: YWJjZA="));
        assert!(!is_base64_reply("B64: YWJj="));
        assert!(!is_base64_reply("B64: YWJjZA== "));
        assert!(!is_base64_reply("B64: YW Jj"));
        assert!(!is_base64_reply("B64:  YWJj"));
        assert!(!is_base64_reply("B64:YWJj"));
        assert!(!is_base64_reply("b64: YWJj"));
        assert!(!is_base64_reply("B64: YW=J"));
        assert!(!is_base64_reply("B64: YWJj.A=="));
    }

    #[test]
    fn test_base64_zero_length_payload() {
        assert!(is_base64_reply("B64: "));
        assert!(!is_base64_reply("B64:"));
    }

    #[test]
    fn test_base64_padding_limits() {
        // two padding characters at most
        assert!(is_base64_reply("B64: YW=="));
        assert!(!is_base64_reply("B64: Y==="));
        assert!(!is_base64_reply("B64: YWJjZ==="));
        // padding alone
        assert!(!is_base64_reply("B64: =="));
        assert!(!is_base64_reply("B64: ===="));
    }
}
