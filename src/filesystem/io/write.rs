// Writing bytes into files. Blocks get allocated on the way.

// Imports

use log::{error, trace};

use crate::disk::block::block_structs::{Block, BLOCK_SIZE};
use crate::error_types::filesystem::FilesystemError;
use crate::filesystem::filesystem_struct::FileSystem;
use crate::filesystem::layout::indirect::indirect_struct::IndirectBlock;
use crate::filesystem::layout::inode::inode_struct::Inode;
use crate::filesystem::layout::{MAX_FILE_SIZE, POINTERS_PER_BLOCK, POINTERS_PER_INODE};

// Implementations

impl FileSystem {
    /// Write `data` into inode `number` starting at byte `offset`,
    /// allocating data blocks (and the indirect block) as needed.
    ///
    /// Returns how many bytes made it to disk. Running out of blocks or
    /// hitting an I/O failure mid-write keeps the partial progress: the
    /// size grows to `max(old, offset + written)` and the call errors
    /// only when nothing at all was written. Overwriting existing bytes
    /// never grows the file.
    pub fn write(
        &mut self,
        number: usize,
        data: &[u8],
        offset: usize,
    ) -> Result<usize, FilesystemError> {
        write(self, number, data, offset)
    }
}

// Functions

fn write(
    fs: &mut FileSystem,
    number: usize,
    data: &[u8],
    offset: usize,
) -> Result<usize, FilesystemError> {
    let (mut table_block, mut inode) = fs.load_valid_inode(number)?;

    if offset > MAX_FILE_SIZE {
        return Err(FilesystemError::OffsetUnaddressable(offset));
    }

    // A write can run into the ceiling; the tail just doesn't happen.
    let budget = data.len().min(MAX_FILE_SIZE - offset);

    let mut written = 0usize;
    let mut logical = offset / BLOCK_SIZE;
    let mut within = offset % BLOCK_SIZE;
    let mut pointers: Option<IndirectBlock> = None;
    // First failure, if any. The loop stops on it but the inode still
    // gets persisted with whatever progress was made.
    let mut stopped: Option<FilesystemError> = None;

    while written < budget {
        let (physical, fresh) = match ensure_block(fs, &mut inode, &mut pointers, logical) {
            Ok(Some(found)) => found,
            Ok(None) => break,
            Err(error) => {
                stopped = Some(error);
                break;
            }
        };

        let take = (BLOCK_SIZE - within).min(budget - written);

        let mut scratch = Block::zeroed();
        if take < BLOCK_SIZE && !fresh {
            // Partial write into an existing block: read-modify-write,
            // or the rest of the block gets clobbered.
            if let Err(error) = fs.disk.read(physical as usize, &mut scratch) {
                stopped = Some(error.into());
                break;
            }
        }
        // A fresh block starts from zeros instead: whatever its previous
        // life left behind must not leak into this file.

        scratch.data[within..within + take].copy_from_slice(&data[written..written + take]);
        if let Err(error) = fs.disk.write(physical as usize, &scratch) {
            stopped = Some(error.into());
            break;
        }

        written += take;
        logical += 1;
        within = 0;
    }

    // Overwrites don't grow the file: size is high-water, not a sum.
    inode.size = inode.size.max((offset + written) as u32);
    inode.encode(&mut table_block, Inode::table_slot(number));
    // Bytes already on disk still count even if the size update does
    // not stick; this failure is the return only when nothing moved.
    if let Err(error) = fs.disk.write(Inode::table_block(number), &table_block) {
        error!("Failed to persist inode {number}: {error}");
        if written == 0 {
            return Err(error.into());
        }
    }

    trace!("Wrote {written} bytes to inode {number} at offset {offset}");

    match stopped {
        Some(error) if written == 0 => Err(error),
        None if written == 0 && budget > 0 => Err(FilesystemError::DiskFull),
        _ => Ok(written),
    }
}

// Find the physical block behind logical block `logical`, allocating it
// (and the indirect block, if that's what it takes) when missing.
//
// Returns the block plus whether it was freshly allocated, or None when
// no block could be found or made. New pointers hit the disk before the
// data they guard: the zeroed indirect block is written the moment it is
// allocated, and a new entry is persisted before its data block is used.
fn ensure_block(
    fs: &mut FileSystem,
    inode: &mut Inode,
    pointers: &mut Option<IndirectBlock>,
    logical: usize,
) -> Result<Option<(u32, bool)>, FilesystemError> {
    let floor = fs.meta.data_region_start();

    if logical < POINTERS_PER_INODE {
        let existing = inode.direct[logical];
        if existing != 0 {
            return Ok(Some((existing, false)));
        }
        let Some(found) = fs.free_blocks.allocate_from(floor) else {
            return Ok(None);
        };
        inode.direct[logical] = found as u32;
        return Ok(Some((found as u32, true)));
    }

    let slot = logical - POINTERS_PER_INODE;
    if slot >= POINTERS_PER_BLOCK {
        return Ok(None);
    }

    if inode.indirect == 0 {
        // The indirect block itself comes out of the data region too.
        let Some(found) = fs.free_blocks.allocate_from(floor) else {
            return Ok(None);
        };
        // Zero it on disk right away, so stale bytes can never be read
        // back as pointers.
        if let Err(error) = fs.disk.write(found, &IndirectBlock::empty().to_block()) {
            fs.free_blocks.set_free(found);
            return Err(error.into());
        }
        inode.indirect = found as u32;
        *pointers = Some(IndirectBlock::empty());
    } else if pointers.is_none() {
        let mut block = Block::zeroed();
        fs.disk.read(inode.indirect as usize, &mut block)?;
        *pointers = Some(IndirectBlock::from_block(&block));
    }

    let table = pointers
        .as_mut()
        .expect("cache was filled on the lines above");

    let existing = table.pointers[slot];
    if existing != 0 {
        return Ok(Some((existing, false)));
    }

    let Some(found) = fs.free_blocks.allocate_from(floor) else {
        return Ok(None);
    };
    table.pointers[slot] = found as u32;
    if let Err(error) = fs.disk.write(inode.indirect as usize, &table.to_block()) {
        // The entry never made it to disk; put the block back.
        table.pointers[slot] = 0;
        fs.free_blocks.set_free(found);
        return Err(error.into());
    }

    Ok(Some((found as u32, true)))
}
