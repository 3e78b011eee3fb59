#![no_main]
use jsontape::{Document, ParserOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut doc = Document::new();
    let options = ParserOptions {
        max_depth: 64,
        ..ParserOptions::default()
    };
    // End-to-end Stage 1 + Stage 2: must never panic, and on success the
    // tape/arena closure and containment invariants must hold.
    if doc.parse(data, &options).is_ok() {
        let tape = doc.tape().expect("valid document has a tape");
        let arena = doc.arena().expect("valid document has an arena");
        assert_eq!(jsontape::tape::tag_of(tape[0]), jsontape::tape::TAG_ROOT);
        assert_eq!(jsontape::tape::payload_of(tape[0]) as usize, tape.len());
        let last = *tape.last().unwrap();
        assert_eq!(jsontape::tape::tag_of(last), jsontape::tape::TAG_ROOT);
        assert_eq!(jsontape::tape::payload_of(last) as usize, 0);
        let _ = arena.len();
    }
});
