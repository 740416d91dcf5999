// Reading!

// Imports

use std::fs::File;
use std::os::unix::fs::FileExt;

use log::trace;

use crate::disk::block::block_structs::{Block, BLOCK_SIZE};
use crate::error_types::disk::DiskError;

// Implementations

/// Read exactly one block from the backing file.
///
/// Bounds checking happens on the `Disk` before we get here; this is only
/// the seek-and-transfer part. A short read comes back as an error from
/// `read_exact_at`, which is exactly what we want.
pub(crate) fn read_block(file: &File, block: usize, buffer: &mut Block) -> Result<(), DiskError> {
    trace!("Reading block {block}...");

    let offset: u64 = block as u64 * BLOCK_SIZE as u64;
    file.read_exact_at(&mut buffer.data, offset)
        .map_err(|source| DiskError::Io { block, source })?;

    Ok(())
}
