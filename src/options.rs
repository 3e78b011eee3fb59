//! Parser configuration.
//!
//! A small `Copy` struct of tunables passed by value into the parse entry
//! point: a depth bound, capacity hints, and a digit-run limit.

/// Tunables for [`crate::parse`](crate::parse) / [`crate::Document::parse`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParserOptions {
    /// Maximum container nesting depth. Exceeding this yields
    /// [`crate::ErrorCode::DepthError`] — a bound that keeps adversarial
    /// input from blowing the call stack during recursive descent.
    pub max_depth: usize,
    /// Initial tape (`Vec<u64>`) capacity, in words, reserved up front.
    pub initial_tape_capacity_hint: usize,
    /// Initial string arena (`Vec<u8>`) capacity, in bytes, reserved up front.
    pub initial_string_capacity_hint: usize,
    /// If `true`, [`crate::Document::parse`] copies the input into an
    /// internally allocated buffer with [`crate::PADDING`] trailing bytes
    /// before classifying it. `false` only has an effect through
    /// [`crate::Document::parse_padded`], which takes the caller's
    /// already-padded buffer directly along with the logical length needed
    /// to interpret it — `Document::parse` itself has no way to express a
    /// logical length shorter than its input slice, so it rejects `false`.
    pub copy_into_padded_buffer: bool,
    /// Upper bound on the digit run accepted for a number's integer part (0
    /// disables the check). An ambient DoS guard, not JSON grammar.
    pub integer_digit_limit: usize,
    /// Validate that decoded string bytes are well-formed UTF-8.
    pub validate_utf8: bool,
}

impl ParserOptions {
    /// Conservative defaults suitable for parsing untrusted input.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: 1024,
            initial_tape_capacity_hint: 256,
            initial_string_capacity_hint: 256,
            copy_into_padded_buffer: true,
            integer_digit_limit: 1024,
            validate_utf8: true,
        }
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let opts = ParserOptions::default();
        assert_eq!(opts.max_depth, 1024);
        assert_eq!(opts.integer_digit_limit, 1024);
        assert!(opts.copy_into_padded_buffer);
        assert!(opts.validate_utf8);
    }
}
