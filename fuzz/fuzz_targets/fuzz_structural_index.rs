#![no_main]
use jsontape::structural::StructuralIndex;
use jsontape::PADDING;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let len = data.len();
    let mut padded = data.to_vec();
    padded.resize(len + PADDING, 0);
    // Must never panic regardless of input; UnclosedString is the only
    // error Stage 1 itself can report.
    let _ = StructuralIndex::build(&padded, len);
});
