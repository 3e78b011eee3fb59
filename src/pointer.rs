// ============================================================================
// JSON Pointer navigation
// ============================================================================
//
// RFC 6901 path resolution over a [`TapeIterator`]: a byte-level escape
// table for `~0`/`~1`, plus the `#`-fragment convention from RFC 6901 §6.

use crate::error::{ErrorCode, ParseError, Result};
use crate::iterator::TapeIterator;

enum Token {
    Key(String),
    Index(usize),
    Append,
}

/// Move `it` to the value addressed by `pointer`, leaving `it` unchanged if
/// any segment fails to resolve.
///
/// Accepts both plain JSON Pointers (`"/a/b/0"`) and URI fragment form
/// (`"#/a/b/0"`, percent-decoded per RFC 6901 §6) plus the empty string,
/// meaning "the whole document". Navigation runs against a clone of `it` and
/// is only written back on full success (snapshot/restore), so a
/// partially-resolved path never leaves the iterator in a half-moved state.
pub fn move_to(it: &mut TapeIterator<'_>, pointer: &str) -> Result<()> {
    let mut cursor = it.clone();
    for token in tokenize(pointer)? {
        match token {
            Token::Key(key) => {
                if !cursor.is_object() {
                    return Err(ParseError::new(ErrorCode::TapeError, 0));
                }
                if !cursor.move_to_key(key.as_str()) {
                    return Err(ParseError::new(ErrorCode::TapeError, 0));
                }
            }
            Token::Index(index) => {
                if !cursor.is_array() {
                    return Err(ParseError::new(ErrorCode::TapeError, 0));
                }
                if !cursor.down() {
                    return Err(ParseError::new(ErrorCode::TapeError, 0));
                }
                for _ in 0..index {
                    if !cursor.next() {
                        return Err(ParseError::new(ErrorCode::TapeError, 0));
                    }
                }
            }
            Token::Append => {
                // In an array context, '-' (the past-the-end position of
                // RFC 6901 §4) moves to the last element and succeeds,
                // rather than erroring as a writer would for lack of a slot
                // to append into.
                if !cursor.is_array() {
                    return Err(ParseError::new(ErrorCode::TapeError, 0));
                }
                if !cursor.down() {
                    return Err(ParseError::new(ErrorCode::TapeError, 0));
                }
                while cursor.next() {}
            }
        }
    }
    *it = cursor;
    Ok(())
}

fn tokenize(pointer: &str) -> Result<Vec<Token>> {
    let body = if let Some(rest) = pointer.strip_prefix('#') {
        escape_raw_bytes(percent_decode(rest)?)
    } else {
        std::borrow::Cow::Borrowed(pointer)
    };
    let body: &str = &body;

    if body.is_empty() {
        return Ok(Vec::new());
    }
    if !body.starts_with('/') {
        return Err(ParseError::new(ErrorCode::TapeError, 0));
    }

    body[1..]
        .split('/')
        .map(|raw| {
            let decoded = unescape(raw);
            if decoded == "-" {
                Ok(Token::Append)
            } else if is_array_index(&decoded) {
                decoded
                    .parse::<usize>()
                    .map(Token::Index)
                    .map_err(|_| ParseError::new(ErrorCode::TapeError, 0))
            } else {
                Ok(Token::Key(decoded.into_owned()))
            }
        })
        .collect()
}

fn is_array_index(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) && (s == "0" || !s.starts_with('0'))
}

/// Fragment form (§4.H): after percent-decoding, any raw byte that is `\`,
/// `"`, or a control character (≤ 0x1F) is itself escaped with a leading
/// `\`, mirroring the backslash-escaped form a JSON key containing that byte
/// would use. This lets the same `unescape` pass handle both pointer forms.
/// All three bytes are ASCII, so byte-indexed slicing never splits a
/// multi-byte UTF-8 sequence (continuation bytes are all ≥ 0x80).
fn escape_raw_bytes(s: std::borrow::Cow<'_, str>) -> std::borrow::Cow<'_, str> {
    if !s.bytes().any(|b| b == b'\\' || b == b'"' || b <= 0x1F) {
        return s;
    }
    // Byte-level rewrite, not a per-byte `char` push: the input may contain
    // multi-byte UTF-8 sequences (continuation bytes ≥ 0x80), which must be
    // copied through verbatim rather than reinterpreted one byte at a time.
    let mut out = Vec::with_capacity(s.len() + 4);
    for &b in s.as_bytes() {
        if b == b'\\' || b == b'"' || b <= 0x1F {
            out.push(b'\\');
        }
        out.push(b);
    }
    std::borrow::Cow::Owned(String::from_utf8(out).expect("escaping preserves UTF-8 validity"))
}

/// RFC 6901 §4 tilde escapes plus §4.H's backslash escapes, decoded in a
/// single left-to-right pass so that e.g. `~1` is never misread once a
/// preceding `\` has already been consumed. `\\`, `\"`, and `\x` (x ≤ 0x1F)
/// decode to their second byte; `~1` decodes to `/`, `~0` decodes to `~`.
fn unescape(raw: &str) -> std::borrow::Cow<'_, str> {
    if !raw.contains('~') && !raw.contains('\\') {
        return std::borrow::Cow::Borrowed(raw);
    }
    // Byte-level rewrite: `~`, `0`, `1`, and `\` are all single-byte ASCII,
    // so matching on individual bytes never misaligns a multi-byte UTF-8
    // sequence — non-matching bytes (including continuation bytes) are
    // copied through one at a time unchanged.
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'~' if i + 1 < bytes.len() && bytes[i + 1] == b'1' => {
                out.push(b'/');
                i += 2;
            }
            b'~' if i + 1 < bytes.len() && bytes[i + 1] == b'0' => {
                out.push(b'~');
                i += 2;
            }
            b'\\' if i + 1 < bytes.len() => {
                out.push(bytes[i + 1]);
                i += 2;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    std::borrow::Cow::Owned(String::from_utf8(out).expect("unescaping preserves UTF-8 validity"))
}

fn percent_decode(s: &str) -> Result<std::borrow::Cow<'_, str>> {
    if !s.contains('%') {
        return Ok(std::borrow::Cow::Borrowed(s));
    }
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            if i + 3 > bytes.len() {
                return Err(ParseError::new(ErrorCode::TapeError, i));
            }
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3])
                .map_err(|_| ParseError::new(ErrorCode::TapeError, i))?;
            let byte = u8::from_str_radix(hex, 16)
                .map_err(|_| ParseError::new(ErrorCode::TapeError, i))?;
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out)
        .map(std::borrow::Cow::Owned)
        .map_err(|_| ParseError::new(ErrorCode::Utf8Error, 0))
}
