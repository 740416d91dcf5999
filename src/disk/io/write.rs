// Writing!

// Imports

use std::fs::File;
use std::os::unix::fs::FileExt;

use log::trace;

use crate::disk::block::block_structs::{Block, BLOCK_SIZE};
use crate::error_types::disk::DiskError;

// Implementations

/// Write exactly one block to the backing file.
///
/// A short write is a hard error; the layer above assumes all-or-nothing
/// semantics and never retries.
pub(crate) fn write_block(file: &File, block: usize, buffer: &Block) -> Result<(), DiskError> {
    trace!("Writing block {block}...");

    let offset: u64 = block as u64 * BLOCK_SIZE as u64;
    file.write_all_at(&buffer.data, offset)
        .map_err(|source| DiskError::Io { block, source })?;

    Ok(())
}
