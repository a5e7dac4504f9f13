//! The tokenizer (`word`) and the number parser (`parse-number`).
//!
//! `word` skips whitespace, honours `#`-to-end-of-line comments both
//! before and after a token, and fails with a diagnostic rather than
//! truncating when a token would exceed the shared 64-byte buffer.
use crate::dictionary::TOKEN_BUFFER_SIZE;
use crate::error::ForthError;
use crate::stream::StreamRegistry;

fn is_whitespace(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\r' || b == b'\n'
}

/// Reads the next whitespace-delimited token from the active stream.
/// Returns `None` at end-of-stream with nothing collected.
pub fn next_token(streams: &mut StreamRegistry) -> Result<Option<Vec<u8>>, ForthError> {
    // Skip whitespace and comment lines.
    loop {
        match streams.read_active_byte()? {
            None => return Ok(None),
            Some(b) if is_whitespace(b) => continue,
            Some(b'#') => {
                drain_to_eol(streams)?;
                continue;
            }
            Some(b) => {
                let token = accumulate(streams, b)?;
                return Ok(Some(token));
            }
        }
    }
}

fn drain_to_eol(streams: &mut StreamRegistry) -> Result<(), ForthError> {
    loop {
        match streams.read_active_byte()? {
            None => return Ok(()),
            Some(b'\n') => return Ok(()),
            Some(_) => continue,
        }
    }
}

fn accumulate(streams: &mut StreamRegistry, first: u8) -> Result<Vec<u8>, ForthError> {
    let mut token = vec![first];
    loop {
        match streams.read_active_byte()? {
            None => break,
            Some(b) if is_whitespace(b) => break,
            Some(b'#') => {
                drain_to_eol(streams)?;
                break;
            }
            Some(b) => {
                token.push(b);
                if token.len() >= TOKEN_BUFFER_SIZE {
                    return Err(ForthError::TokenTooLong);
                }
            }
        }
    }
    Ok(token)
}

/// Optional leading `-`, then one or more ASCII digits, base 10. Anything
/// else — including empty input — fails, falling through to word lookup.
pub fn parse_number(token: &str) -> Option<i64> {
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Parse the full signed token, not the unsigned magnitude negated
    // afterward: i64::MIN's magnitude overflows i64 on its own.
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{BufferStream, StreamRegistry};

    fn registry_for(src: &str) -> StreamRegistry {
        let mut reg = StreamRegistry::new();
        let handle = reg.open(Box::new(BufferStream::new(src.as_bytes().to_vec())));
        reg.set_active(handle);
        reg
    }

    #[test]
    fn skips_leading_whitespace() {
        let mut reg = registry_for("   dup");
        assert_eq!(next_token(&mut reg).unwrap(), Some(b"dup".to_vec()));
    }

    #[test]
    fn stops_at_whitespace() {
        let mut reg = registry_for("dup drop");
        assert_eq!(next_token(&mut reg).unwrap(), Some(b"dup".to_vec()));
        assert_eq!(next_token(&mut reg).unwrap(), Some(b"drop".to_vec()));
    }

    #[test]
    fn line_comment_is_skipped() {
        let mut reg = registry_for("# comment\ndup");
        assert_eq!(next_token(&mut reg).unwrap(), Some(b"dup".to_vec()));
    }

    #[test]
    fn trailing_comment_after_token() {
        let mut reg = registry_for("dup # trailing\ndrop");
        assert_eq!(next_token(&mut reg).unwrap(), Some(b"dup".to_vec()));
        assert_eq!(next_token(&mut reg).unwrap(), Some(b"drop".to_vec()));
    }

    #[test]
    fn eof_with_nothing_collected_is_none() {
        let mut reg = registry_for("   ");
        assert_eq!(next_token(&mut reg).unwrap(), None);
    }

    #[test]
    fn overlong_token_is_an_error() {
        let long = "x".repeat(TOKEN_BUFFER_SIZE + 1);
        let mut reg = registry_for(&long);
        assert!(matches!(next_token(&mut reg), Err(ForthError::TokenTooLong)));
    }

    #[test]
    fn parses_signed_integers() {
        assert_eq!(parse_number("42"), Some(42));
        assert_eq!(parse_number("-17"), Some(-17));
        assert_eq!(parse_number("0"), Some(0));
    }

    #[test]
    fn rejects_non_numeric() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("-"), None);
        assert_eq!(parse_number("12a"), None);
        assert_eq!(parse_number("dup"), None);
    }

    #[test]
    fn extremes_round_trip() {
        assert_eq!(parse_number(&i64::MAX.to_string()), Some(i64::MAX));
        assert_eq!(parse_number(&i64::MIN.to_string()), Some(i64::MIN));
    }
}
