// Things that can go wrong below the filesystem.

// Imports

use std::path::PathBuf;

use thiserror::Error;

// Errors

/// Errors from the disk emulator.
///
/// A short read or write surfaces as `Io`: the block is the atomic unit,
/// so a partial transfer is a hard failure, never a retry.
#[derive(Debug, Error)]
pub enum DiskError {
    #[error("could not open disk image `{path}`")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not size disk image `{path}`")]
    Truncate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("block {block} is out of range for a disk of {blocks} blocks")]
    OutOfRange { block: usize, blocks: usize },
    #[error("I/O failed on block {block}")]
    Io {
        block: usize,
        #[source]
        source: std::io::Error,
    },
}
