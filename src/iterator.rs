// ============================================================================
// Tape iterator
// ============================================================================
//
// A cursor for walking a finished parse: `down`/`up`/`next` report success as
// `bool`, and scalar readers report absence as `None`, so a caller can probe
// a position's shape without matching on an error type.

use crate::document::Document;
use crate::error::{ErrorCode, ParseError, Result};
use crate::string;
use crate::tape::{
    payload_of, tag_of, TAG_ARRAY_OPEN, TAG_DOUBLE, TAG_FALSE, TAG_INT, TAG_NULL,
    TAG_OBJECT_OPEN, TAG_STRING, TAG_TRUE,
};

/// The JSON type a tape position currently denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Null,
    Bool,
    Int,
    Double,
    String,
    Array,
    Object,
}

/// A cursor over a parsed [`Document`]'s tape.
///
/// Holds an explicit stack of enclosing container open-indices so `up()` is
/// O(1) (it pops the stack and reads the close index straight from the
/// container's backpatched open word) rather than re-scanning from the root.
///
/// `Clone` is cheap (two borrowed slices plus a small `Vec<usize>`) and is
/// exactly what [`crate::pointer::move_to`] uses to navigate speculatively
/// and only commit the result on success.
#[derive(Debug, Clone)]
pub struct TapeIterator<'a> {
    tape: &'a [u64],
    arena: &'a [u8],
    pos: usize,
    scope_stack: Vec<usize>,
}

impl<'a> TapeIterator<'a> {
    /// Start a new iterator at the document's root value (tape index 1; index
    /// 0 is the `TAG_ROOT` sentinel).
    pub fn new(document: &'a Document) -> Result<Self> {
        document.require_valid()?;
        let tape = document.tape().ok_or(ParseError::new(ErrorCode::Uninitialized, 0))?;
        let arena = document.arena().ok_or(ParseError::new(ErrorCode::Uninitialized, 0))?;
        Ok(Self {
            tape,
            arena,
            pos: 1,
            scope_stack: Vec::new(),
        })
    }

    /// The JSON type at the current position.
    #[must_use]
    pub fn get_type(&self) -> ValueType {
        match tag_of(self.tape[self.pos]) {
            TAG_OBJECT_OPEN => ValueType::Object,
            TAG_ARRAY_OPEN => ValueType::Array,
            TAG_STRING => ValueType::String,
            TAG_INT => ValueType::Int,
            TAG_DOUBLE => ValueType::Double,
            TAG_TRUE | TAG_FALSE => ValueType::Bool,
            TAG_NULL => ValueType::Null,
            _ => ValueType::Null,
        }
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        self.get_type() == ValueType::Object
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        self.get_type() == ValueType::Array
    }

    /// Descend into the current object/array's first child. Returns `false`
    /// (leaving the position unchanged) if the current value isn't a
    /// container, or is an empty one.
    pub fn down(&mut self) -> bool {
        match tag_of(self.tape[self.pos]) {
            TAG_OBJECT_OPEN | TAG_ARRAY_OPEN => {
                let close = payload_of(self.tape[self.pos]) as usize;
                if self.pos + 1 == close {
                    return false;
                }
                self.scope_stack.push(self.pos);
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    /// Ascend back to the enclosing container, positioned back on its open
    /// word. Returns `false` (leaving the position unchanged) if already at
    /// the root.
    pub fn up(&mut self) -> bool {
        match self.scope_stack.pop() {
            Some(open_index) => {
                self.pos = open_index;
                true
            }
            None => false,
        }
    }

    /// Move to the next sibling value. Returns `false` (leaving the position
    /// unchanged) if there is no next sibling — either because the current
    /// value is the last element of its container, or because it's the root
    /// value (which has no siblings).
    pub fn next(&mut self) -> bool {
        let Some(&open_index) = self.scope_stack.last() else {
            return false;
        };
        let close = payload_of(self.tape[open_index]) as usize;
        let candidate = self.pos + width_at(self.tape, self.pos);
        if candidate >= close {
            return false;
        }
        self.pos = candidate;
        true
    }

    /// Search the current object's key/value pairs for `key`, moving onto
    /// its value on a match. Leaves the position unchanged and returns
    /// `false` if the current value isn't an object or has no such key.
    pub fn move_to_key(&mut self, key: &str) -> bool {
        if tag_of(self.tape[self.pos]) != TAG_OBJECT_OPEN {
            return false;
        }
        let open_index = self.pos;
        let close = payload_of(self.tape[open_index]) as usize;
        let mut cursor = open_index + 1;
        while cursor < close {
            let key_bytes = string::read_arena_entry(self.arena, payload_of(self.tape[cursor]) as u32);
            let value_pos = cursor + 1;
            if key_bytes == key.as_bytes() {
                self.scope_stack.push(open_index);
                self.pos = value_pos;
                return true;
            }
            cursor = value_pos + width_at(self.tape, value_pos);
        }
        false
    }

    /// The decoded string at the current position, if it is a string and its
    /// bytes are valid UTF-8.
    #[must_use]
    pub fn get_string(&self) -> Option<&'a str> {
        if tag_of(self.tape[self.pos]) != TAG_STRING {
            return None;
        }
        let bytes = string::read_arena_entry(self.arena, payload_of(self.tape[self.pos]) as u32);
        std::str::from_utf8(bytes).ok()
    }

    /// The byte length of the string at the current position, without
    /// paying for UTF-8 validation.
    #[must_use]
    pub fn get_string_length(&self) -> Option<usize> {
        if tag_of(self.tape[self.pos]) != TAG_STRING {
            return None;
        }
        Some(string::read_arena_entry(self.arena, payload_of(self.tape[self.pos]) as u32).len())
    }

    #[must_use]
    pub fn get_integer(&self) -> Option<i64> {
        if tag_of(self.tape[self.pos]) != TAG_INT {
            return None;
        }
        Some(self.tape[self.pos + 1] as i64)
    }

    #[must_use]
    pub fn get_double(&self) -> Option<f64> {
        if tag_of(self.tape[self.pos]) != TAG_DOUBLE {
            return None;
        }
        Some(f64::from_bits(self.tape[self.pos + 1]))
    }

    #[must_use]
    pub fn get_bool(&self) -> Option<bool> {
        match tag_of(self.tape[self.pos]) {
            TAG_TRUE => Some(true),
            TAG_FALSE => Some(false),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.get_type() == ValueType::Null
    }
}

/// How many tape words the value at `pos` occupies, including itself.
#[inline]
fn width_at(tape: &[u64], pos: usize) -> usize {
    match tag_of(tape[pos]) {
        TAG_INT | TAG_DOUBLE => 2,
        TAG_OBJECT_OPEN | TAG_ARRAY_OPEN => payload_of(tape[pos]) as usize + 1 - pos,
        _ => 1,
    }
}
