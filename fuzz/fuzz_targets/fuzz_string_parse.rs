#![no_main]
use jsontape::string::parse_string;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() || data[0] != b'"' {
        return;
    }
    let mut arena = Vec::new();
    // Must never panic on truncated escapes, bad surrogates, or raw control
    // bytes — only ever return Ok or a well-formed ParseError.
    let _ = parse_string(data, 0, &mut arena, true);
});
