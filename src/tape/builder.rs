// ============================================================================
// Tape builder (Stage 2)
// ============================================================================
//
// A depth-counted recursive descent, one structural token at a time, over a
// [`StructuralCursor`]: each value writes a tape word (or, for containers, an
// open word backpatched on close) instead of building an intermediate tree.

use crate::error::{ErrorCode, ParseError, Result};
use crate::number::{self, NumberValue};
use crate::options::ParserOptions;
use crate::string;
use crate::structural::StructuralCursor;
use crate::tape::{make_word, TAG_ARRAY_CLOSE, TAG_ARRAY_OPEN, TAG_DOUBLE, TAG_FALSE, TAG_INT,
    TAG_NULL, TAG_OBJECT_CLOSE, TAG_OBJECT_OPEN, TAG_ROOT, TAG_STRING, TAG_TRUE};

/// Parse `input[..len]` into `tape`/`arena`, consuming `cursor` end to end.
///
/// `tape` and `arena` are appended to starting from their current length, so
/// callers ([`crate::document::Document`]) can reuse allocations across
/// parses without a fresh `Vec` each time.
pub fn build_tape(
    input: &[u8],
    len: usize,
    cursor: &mut StructuralCursor<'_>,
    tape: &mut Vec<u64>,
    arena: &mut Vec<u8>,
    options: &ParserOptions,
) -> Result<()> {
    if len == 0 {
        return Err(ParseError::new(ErrorCode::Empty, 0));
    }

    let root_index = tape.len();
    tape.push(make_word(TAG_ROOT, 0));

    parse_value(input, len, cursor, tape, arena, options, 0)?;

    let trailing = cursor.peek() as usize;
    if trailing != len {
        return Err(ParseError::new(ErrorCode::TapeError, trailing));
    }

    // The tape ends with a duplicate `r` sentinel (spec.md §3 invariant (d),
    // §4.E): the opening root's payload is the *total* tape length including
    // this trailing word, and the trailing word's own payload points back at
    // the opening root, mirroring how every other container backpatches.
    let tape_len = (tape.len() + 1) as u64;
    tape[root_index] = make_word(TAG_ROOT, tape_len);
    tape.push(make_word(TAG_ROOT, root_index as u64));
    Ok(())
}

/// `true` if `byte` may legally follow a scalar value (end of input is
/// checked separately by the caller). Catches trailing garbage like `1x` or
/// `truefoo` that the structural classifier lumps into one pseudo-structural
/// run together with the valid literal.
#[inline]
fn is_value_boundary(byte: u8) -> bool {
    matches!(
        byte,
        b'{' | b'}' | b'[' | b']' | b':' | b',' | b'"' | b' ' | b'\t' | b'\n' | b'\r'
    )
}

fn check_value_boundary(input: &[u8], pos: usize, len: usize) -> Result<()> {
    if pos == len || is_value_boundary(input[pos]) {
        Ok(())
    } else {
        Err(ParseError::new(ErrorCode::TapeError, pos))
    }
}

fn match_literal(
    input: &[u8],
    offset: usize,
    literal: &'static [u8],
    len: usize,
    on_mismatch: ErrorCode,
) -> Result<usize> {
    let end = offset + literal.len();
    if end > len || &input[offset..end] != literal {
        return Err(ParseError::new(on_mismatch, offset));
    }
    Ok(end)
}

fn parse_value(
    input: &[u8],
    len: usize,
    cursor: &mut StructuralCursor<'_>,
    tape: &mut Vec<u64>,
    arena: &mut Vec<u8>,
    options: &ParserOptions,
    depth: usize,
) -> Result<()> {
    let offset = cursor.peek() as usize;
    let byte = *input
        .get(offset)
        .ok_or(ParseError::new(ErrorCode::TapeError, offset))?;

    match byte {
        b'{' => parse_object(input, len, cursor, tape, arena, options, depth),
        b'[' => parse_array(input, len, cursor, tape, arena, options, depth),
        b'"' => {
            cursor.advance();
            let (arena_offset, end) = string::parse_string(input, offset, arena, options.validate_utf8)?;
            tape.push(make_word(TAG_STRING, u64::from(arena_offset)));
            check_value_boundary(input, end, len)
        }
        b't' => {
            cursor.advance();
            let end = match_literal(input, offset, b"true", len, ErrorCode::TAtomError)?;
            tape.push(make_word(TAG_TRUE, 0));
            check_value_boundary(input, end, len)
        }
        b'f' => {
            cursor.advance();
            let end = match_literal(input, offset, b"false", len, ErrorCode::FAtomError)?;
            tape.push(make_word(TAG_FALSE, 0));
            check_value_boundary(input, end, len)
        }
        b'n' => {
            cursor.advance();
            let end = match_literal(input, offset, b"null", len, ErrorCode::NAtomError)?;
            tape.push(make_word(TAG_NULL, 0));
            check_value_boundary(input, end, len)
        }
        b'-' | b'0'..=b'9' => {
            cursor.advance();
            let (value, end) = number::parse_number(input, offset, options.integer_digit_limit)?;
            check_value_boundary(input, end, len)?;
            match value {
                NumberValue::Int(i) => {
                    tape.push(make_word(TAG_INT, 0));
                    tape.push(i as u64);
                }
                NumberValue::Double(d) => {
                    tape.push(make_word(TAG_DOUBLE, 0));
                    tape.push(d.to_bits());
                }
            }
            Ok(())
        }
        _ => Err(ParseError::new(ErrorCode::TapeError, offset)),
    }
}

fn parse_array(
    input: &[u8],
    len: usize,
    cursor: &mut StructuralCursor<'_>,
    tape: &mut Vec<u64>,
    arena: &mut Vec<u8>,
    options: &ParserOptions,
    depth: usize,
) -> Result<()> {
    if depth >= options.max_depth {
        return Err(ParseError::new(ErrorCode::DepthError, cursor.peek() as usize));
    }
    cursor.advance(); // '['
    let open_index = tape.len();
    tape.push(make_word(TAG_ARRAY_OPEN, 0));

    let first_offset = cursor.peek() as usize;
    if first_offset < len && input[first_offset] == b']' {
        cursor.advance();
    } else {
        loop {
            parse_value(input, len, cursor, tape, arena, options, depth + 1)?;
            let sep_offset = cursor.peek() as usize;
            match input.get(sep_offset) {
                Some(b',') => {
                    cursor.advance();
                }
                Some(b']') => {
                    cursor.advance();
                    break;
                }
                _ => return Err(ParseError::new(ErrorCode::TapeError, sep_offset)),
            }
        }
    }

    let close_index = tape.len();
    tape.push(make_word(TAG_ARRAY_CLOSE, open_index as u64));
    tape[open_index] = make_word(TAG_ARRAY_OPEN, close_index as u64);
    Ok(())
}

fn parse_object(
    input: &[u8],
    len: usize,
    cursor: &mut StructuralCursor<'_>,
    tape: &mut Vec<u64>,
    arena: &mut Vec<u8>,
    options: &ParserOptions,
    depth: usize,
) -> Result<()> {
    if depth >= options.max_depth {
        return Err(ParseError::new(ErrorCode::DepthError, cursor.peek() as usize));
    }
    cursor.advance(); // '{'
    let open_index = tape.len();
    tape.push(make_word(TAG_OBJECT_OPEN, 0));

    let first_offset = cursor.peek() as usize;
    if first_offset < len && input[first_offset] == b'}' {
        cursor.advance();
    } else {
        loop {
            let key_offset = cursor.peek() as usize;
            if key_offset >= len || input[key_offset] != b'"' {
                return Err(ParseError::new(ErrorCode::TapeError, key_offset));
            }
            cursor.advance();
            let (arena_offset, key_end) =
                string::parse_string(input, key_offset, arena, options.validate_utf8)?;
            tape.push(make_word(TAG_STRING, u64::from(arena_offset)));

            let colon_offset = cursor.peek() as usize;
            if input.get(colon_offset) != Some(&b':') {
                // A key followed directly by garbage (e.g. `"a"x`) is caught
                // here rather than by check_value_boundary, since `:` is not
                // a generic scalar boundary but is mandatory after a key.
                let _ = key_end;
                return Err(ParseError::new(ErrorCode::TapeError, colon_offset));
            }
            cursor.advance();

            parse_value(input, len, cursor, tape, arena, options, depth + 1)?;

            let sep_offset = cursor.peek() as usize;
            match input.get(sep_offset) {
                Some(b',') => {
                    cursor.advance();
                }
                Some(b'}') => {
                    cursor.advance();
                    break;
                }
                _ => return Err(ParseError::new(ErrorCode::TapeError, sep_offset)),
            }
        }
    }

    let close_index = tape.len();
    tape.push(make_word(TAG_OBJECT_CLOSE, open_index as u64));
    tape[open_index] = make_word(TAG_OBJECT_OPEN, close_index as u64);
    Ok(())
}
