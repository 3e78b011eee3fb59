#![no_main]
use jsontape::{pointer, Document, ParserOptions, TapeIterator};
use libfuzzer_sys::fuzz_target;

// Splits the corpus entry on the first NUL byte: the left half is attempted
// as the JSON document (falling back to a fixed nested document so the
// pointer side still gets real traversal to chew on), the right half
// (lossily decoded) is the pointer string. Exercises pointer::move_to's
// snapshot/restore against arbitrary, possibly malformed tokens.
fuzz_target!(|data: &[u8]| {
    let split = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    let (json_part, rest) = data.split_at(split);
    let pointer_part = rest.strip_prefix(&[0]).unwrap_or(rest);

    let mut doc = Document::new();
    if doc.parse(json_part, &ParserOptions::default()).is_err() {
        doc.parse(br#"{"a":[1,2,{"b":"c"}],"d":{}}"#, &ParserOptions::default())
            .unwrap();
    }

    let pointer_str = String::from_utf8_lossy(pointer_part);
    let Ok(mut it) = TapeIterator::new(&doc) else {
        return;
    };
    let before = it.clone();
    if pointer::move_to(&mut it, &pointer_str).is_err() {
        // Failure must never leave the iterator in a different position
        // than before the call.
        assert_eq!(format!("{it:?}"), format!("{before:?}"));
    }
});
