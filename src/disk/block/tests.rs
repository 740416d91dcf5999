// Block byte-twiddling tests.
// Unwrapping is okay here, since we want unexpected outcomes to fail tests.
#![allow(clippy::unwrap_used)]

// Imports

use rand::Rng;

use test_log::test; // We want to see logs while testing.

use super::block_structs::{Block, BLOCK_SIZE};

// Tests

#[test]
fn fresh_block_is_zero() {
    let block = Block::zeroed();
    assert!(block.is_all_zero(), "a fresh block must be all zeros");
}

#[test]
fn word_round_trip() {
    let mut random = rand::rng();
    let mut block = Block::zeroed();
    for _ in 0..1000 {
        let index: usize = random.random_range(0..BLOCK_SIZE / 4);
        let value: u32 = random.random();
        block.write_u32(index, value);
        assert_eq!(block.read_u32(index), value, "word must read back intact");
    }
}

#[test]
fn words_do_not_overlap() {
    let mut block = Block::zeroed();
    block.write_u32(0, u32::MAX);
    block.write_u32(2, u32::MAX);
    // The word between them stays untouched.
    assert_eq!(block.read_u32(1), 0, "neighboring words must not bleed");
}

#[test]
fn zero_detection_sees_every_byte() {
    let mut block = Block::zeroed();
    block.data[BLOCK_SIZE - 1] = 1;
    assert!(!block.is_all_zero(), "a single set byte is not a zero block");
}
