#![no_main]
use jsontape::number::parse_number;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() || !(data[0] == b'-' || data[0].is_ascii_digit()) {
        return;
    }
    // Must never panic on digit runs of any length or malformed exponents;
    // a 0 digit_limit disables the ambient DoS guard so the grammar rules
    // themselves get full coverage.
    let _ = parse_number(data, 0, 0);
});
