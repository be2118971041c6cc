#![no_main]

use libfuzzer_sys::fuzz_target;
use libsnakediff::diff::{apply_edits, compute_edit_script_with_newlines};

fuzz_target!(|data: &[u8]| {
    // The first byte picks where the input is split into the two sequences.
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let split = split as usize % (rest.len() + 1);
    let (source, dest) = rest.split_at(split);

    let edits = compute_edit_script_with_newlines(source, dest, |b| *b == b'\n');
    assert_eq!(apply_edits(dest, &edits), source);
    for pair in edits.windows(2) {
        assert!(pair[0].end.index <= pair[1].start.index);
    }
});
