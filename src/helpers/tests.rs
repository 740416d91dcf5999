// Hex view tests.
// Unwrapping is okay here, since we want unexpected outcomes to fail tests.
#![allow(clippy::unwrap_used)]

// Imports

use test_log::test; // We want to see logs while testing.

use super::hex_view::hex_view;

// Tests

#[test]
fn renders_printables_and_dots() {
    let view = hex_view(7, b"Hi\x00!");
    // One header line, one data line.
    assert_eq!(view.lines().count(), 2, "4 bytes fit on one line");

    let data_line = view.lines().nth(1).unwrap();
    assert!(
        data_line.starts_with("     7.000"),
        "lines are addressed block.offset"
    );
    assert!(data_line.contains("48 69 00 21"), "hex bytes in order");
    assert!(data_line.ends_with("Hi.!"), "control bytes render as dots");
}

#[test]
fn repeated_rows_collapse() {
    let view = hex_view(0, &[0u8; 4096]);
    // Header, the first zero row, and one `*` for the other 255.
    assert_eq!(view.lines().count(), 3, "a zeroed block folds up");
    assert_eq!(
        view.lines().nth(2).unwrap().trim(),
        "*",
        "the repeats are one marker line"
    );
}

#[test]
fn collapse_ends_where_the_bytes_change() {
    let mut bytes = [0u8; 64];
    bytes[48] = 1;

    let view = hex_view(3, &bytes);
    // Header, first zero row, `*` for two more, then the changed row.
    assert_eq!(view.lines().count(), 4, "the changed row breaks the run");
    assert!(
        view.lines().nth(3).unwrap().starts_with("     3.030"),
        "and reappears with its own offset"
    );
}

#[test]
fn sixteen_bytes_per_line() {
    // Distinct rows so nothing collapses.
    let bytes: Vec<u8> = (0..40).collect();
    let view = hex_view(1, &bytes);
    // Header plus ceil(40 / 16) data lines.
    assert_eq!(view.lines().count(), 4, "40 bytes span three lines");
}

#[test]
fn empty_input_is_just_the_header() {
    let view = hex_view(0, &[]);
    assert_eq!(view.lines().count(), 1, "nothing to show but the header");
}
