// The library cannot use unwraps.
#![deny(clippy::unwrap_used)]

// Asserts need to have a reason.
#![deny(clippy::missing_assert_message)]

// Gotta use all the results.
#![deny(unused_results)]

// The two layers of the core, bottom-up: a disk emulator that presents a
// file as an array of blocks, and the filesystem that interprets them.
pub mod disk;
pub mod filesystem;

// Shared bits.
pub mod error_types;
pub mod helpers;
