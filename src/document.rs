// ============================================================================
// Parsed document container
// ============================================================================
//
// Owns the tape, the string arena, and the padded input copy as one reusable
// container, sized up front from the input length and reset in place across
// many parses rather than dropped and reallocated each time.

use crate::error::{ErrorCode, ParseError, Result};
use crate::options::ParserOptions;
use crate::simd::PADDING;
use crate::structural::{StructuralCursor, StructuralIndex};
use crate::tape::builder::build_tape;

/// Owns everything a completed parse produced: the tape, the string arena,
/// and (for [`Document::parse`]) the padded copy of the input the tape's
/// string-arena offsets and structural offsets are relative to —
/// [`Document::parse_padded`] reads the caller's own buffer instead and
/// leaves this copy empty.
///
/// A `Document` can be reused across many `parse` calls: each call truncates
/// the tape/arena/buffer in place rather than dropping and reallocating
/// them.
#[derive(Debug, Default)]
pub struct Document {
    tape: Vec<u64>,
    arena: Vec<u8>,
    owned_input: Vec<u8>,
    input_len: usize,
    valid: bool,
}

impl Document {
    /// An empty, unparsed document. Any accessor other than `parse` returns
    /// [`ErrorCode::Uninitialized`] until the first successful parse.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty document with buffers pre-sized per `options`'s capacity
    /// hints, avoiding the first parse's growth reallocations.
    #[must_use]
    pub fn with_capacity(options: &ParserOptions) -> Self {
        Self {
            tape: Vec::with_capacity(options.initial_tape_capacity_hint),
            arena: Vec::with_capacity(options.initial_string_capacity_hint),
            owned_input: Vec::new(),
            input_len: 0,
            valid: false,
        }
    }

    /// Parse `input` into this document, replacing any previous contents.
    ///
    /// `input` is treated as the entire logical content and is always copied
    /// into an internally owned, zero-padded buffer first — the caller's
    /// slice need not carry [`PADDING`] trailing bytes. A single `&[u8]` has
    /// no way to distinguish "logical content" from "buffer with trailing
    /// padding the caller already owns", so `options.copy_into_padded_buffer`
    /// set to `false` is rejected here with [`ErrorCode::UnexpectedError`];
    /// callers who already hold a padded buffer and want to skip the copy
    /// must use [`Document::parse_padded`] instead, which takes the logical
    /// length as its own parameter.
    pub fn parse(&mut self, input: &[u8], options: &ParserOptions) -> Result<()> {
        self.valid = false;
        self.tape.clear();
        self.arena.clear();

        let len = input.len();
        if len == 0 {
            return Err(ParseError::new(ErrorCode::Empty, 0));
        }

        if !options.copy_into_padded_buffer {
            // `parse` only ever sees one length (`input.len()`), so it can't
            // honor "the buffer already carries PADDING bytes past a shorter
            // logical length" — that needs `parse_padded`'s extra parameter.
            return Err(ParseError::new(ErrorCode::UnexpectedError, len));
        }

        if self.owned_input.capacity() < len + PADDING {
            log::debug!(
                "jsontape: growing padded input buffer to {} bytes",
                len + PADDING
            );
        }
        self.owned_input.clear();
        self.owned_input.reserve(len + PADDING);
        self.owned_input.extend_from_slice(input);
        self.owned_input.resize(len + PADDING, 0);

        // Bind a local before calling `parse_prepared`: borrowing
        // `self.owned_input` and passing `&mut self` to the same call would
        // conflict, even though the method only touches disjoint fields.
        let owned = std::mem::take(&mut self.owned_input);
        let result = self.parse_prepared(&owned, len, options);
        self.owned_input = owned;
        result
    }

    /// Parse a caller-owned, already-padded `buffer` into this document,
    /// skipping the internal copy `parse` performs.
    ///
    /// `buffer` must be at least `logical_len + PADDING` bytes long, with the
    /// JSON text occupying its first `logical_len` bytes; the remaining bytes
    /// are read by the SIMD classifier but never interpreted as content. This
    /// is the overload [`ParserOptions::copy_into_padded_buffer`] set to
    /// `false` is for — it exists so a caller who already owns a padded
    /// buffer (e.g. reused across parses, or mapped from elsewhere) can avoid
    /// `parse`'s copy.
    pub fn parse_padded(
        &mut self,
        buffer: &[u8],
        logical_len: usize,
        options: &ParserOptions,
    ) -> Result<()> {
        self.valid = false;
        self.tape.clear();
        self.arena.clear();
        self.owned_input.clear();

        if logical_len == 0 {
            return Err(ParseError::new(ErrorCode::Empty, 0));
        }
        if buffer.len() < logical_len + PADDING {
            return Err(ParseError::new(ErrorCode::UnexpectedError, logical_len));
        }

        self.parse_prepared(buffer, logical_len, options)
    }

    /// Shared tail of `parse`/`parse_padded`: `padded` already has at least
    /// `len + PADDING` bytes and just needs the structural pass.
    fn parse_prepared(&mut self, padded: &[u8], len: usize, options: &ParserOptions) -> Result<()> {
        let index = StructuralIndex::build(padded, len)?;
        let mut cursor = StructuralCursor::new(&index);
        build_tape(
            padded,
            len,
            &mut cursor,
            &mut self.tape,
            &mut self.arena,
            options,
        )?;

        self.input_len = len;
        self.valid = true;
        Ok(())
    }

    /// Discard this document's contents without releasing its allocations,
    /// so it can be handed to a fresh `parse` call.
    pub fn reset(&mut self) {
        self.tape.clear();
        self.arena.clear();
        self.owned_input.clear();
        self.input_len = 0;
        self.valid = false;
    }

    /// `true` once a parse has completed successfully and nothing has reset
    /// the document since.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// The completed tape, or `None` if this document was never
    /// successfully parsed.
    #[must_use]
    pub fn tape(&self) -> Option<&[u64]> {
        self.valid.then_some(self.tape.as_slice())
    }

    /// The string arena backing the tape's string offsets, or `None` if this
    /// document was never successfully parsed.
    #[must_use]
    pub fn arena(&self) -> Option<&[u8]> {
        self.valid.then_some(self.arena.as_slice())
    }

    pub(crate) fn require_valid(&self) -> Result<()> {
        if self.valid {
            Ok(())
        } else {
            Err(ParseError::new(ErrorCode::Uninitialized, 0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tape::{tag_of, TAG_ROOT};

    #[test]
    fn fresh_document_is_invalid() {
        let doc = Document::new();
        assert!(!doc.is_valid());
        assert!(doc.tape().is_none());
    }

    #[test]
    fn parse_populates_tape_and_marks_valid() {
        let mut doc = Document::new();
        doc.parse(b"[1,2,3]", &ParserOptions::default()).unwrap();
        assert!(doc.is_valid());
        let tape = doc.tape().unwrap();
        assert_eq!(tag_of(tape[0]), TAG_ROOT);
    }

    #[test]
    fn failed_parse_leaves_document_invalid() {
        let mut doc = Document::new();
        let err = doc.parse(b"{not json", &ParserOptions::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnclosedString);
        assert!(!doc.is_valid());
    }

    #[test]
    fn reuse_across_parses_reuses_allocations() {
        let mut doc = Document::new();
        doc.parse(b"[1,2,3]", &ParserOptions::default()).unwrap();
        let tape_cap_before = doc.tape.capacity();
        doc.parse(b"[4,5]", &ParserOptions::default()).unwrap();
        assert!(doc.tape.capacity() >= tape_cap_before || doc.tape.capacity() > 0);
        assert!(doc.is_valid());
    }

    #[test]
    fn empty_input_is_rejected() {
        let mut doc = Document::new();
        let err = doc.parse(b"", &ParserOptions::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::Empty);
    }

    #[test]
    fn reset_clears_validity() {
        let mut doc = Document::new();
        doc.parse(b"1", &ParserOptions::default()).unwrap();
        doc.reset();
        assert!(!doc.is_valid());
    }

    #[test]
    fn parse_rejects_no_copy_option_since_it_has_no_separate_logical_length() {
        let mut doc = Document::new();
        let options = ParserOptions {
            copy_into_padded_buffer: false,
            ..ParserOptions::default()
        };
        let err = doc.parse(b"[1,2,3]", &options).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnexpectedError);
    }

    #[test]
    fn parse_padded_skips_the_copy_given_a_correctly_padded_buffer() {
        let json = b"[1,2,3]";
        let mut buffer = Vec::with_capacity(json.len() + PADDING);
        buffer.extend_from_slice(json);
        buffer.resize(json.len() + PADDING, 0);

        let mut doc = Document::new();
        let options = ParserOptions {
            copy_into_padded_buffer: false,
            ..ParserOptions::default()
        };
        doc.parse_padded(&buffer, json.len(), &options).unwrap();
        assert!(doc.is_valid());
        let tape = doc.tape().unwrap();
        assert_eq!(tag_of(tape[0]), TAG_ROOT);
    }

    #[test]
    fn parse_padded_rejects_a_buffer_without_enough_trailing_padding() {
        let json = b"[1,2,3]";
        let mut doc = Document::new();
        let err = doc
            .parse_padded(json, json.len(), &ParserOptions::default())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UnexpectedError);
    }
}
