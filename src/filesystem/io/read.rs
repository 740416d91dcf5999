// Reading bytes back out of files.

// Imports

use crate::disk::block::block_structs::{Block, BLOCK_SIZE};
use crate::error_types::filesystem::FilesystemError;
use crate::filesystem::filesystem_struct::FileSystem;
use crate::filesystem::layout::indirect::indirect_struct::IndirectBlock;
use crate::filesystem::layout::inode::inode_struct::Inode;
use crate::filesystem::layout::{POINTERS_PER_BLOCK, POINTERS_PER_INODE};

// Implementations

impl FileSystem {
    /// Read from inode `number` starting at byte `offset`, filling as
    /// much of `buffer` as the file has bytes for.
    ///
    /// Returns how many bytes landed in `buffer`. Reading exactly at the
    /// end of the file returns 0; past it is an error. An unallocated
    /// block (a hole) ends the read early, and a disk failure mid-file
    /// returns whatever was copied before it, erroring only when that
    /// is nothing.
    pub fn read(
        &mut self,
        number: usize,
        buffer: &mut [u8],
        offset: usize,
    ) -> Result<usize, FilesystemError> {
        read(self, number, buffer, offset)
    }
}

// Functions

fn read(
    fs: &mut FileSystem,
    number: usize,
    buffer: &mut [u8],
    offset: usize,
) -> Result<usize, FilesystemError> {
    let (_, inode) = fs.load_valid_inode(number)?;

    let size = inode.size as usize;
    if offset > size {
        return Err(FilesystemError::OffsetPastEnd {
            inode: number,
            offset,
            size: inode.size,
        });
    }

    // Never read past the end of the file, whatever the buffer holds.
    let budget = buffer.len().min(size - offset);

    let mut copied = 0usize;
    let mut logical = offset / BLOCK_SIZE;
    let mut within = offset % BLOCK_SIZE;
    let mut pointers: Option<IndirectBlock> = None;
    let mut scratch = Block::zeroed();

    while copied < budget {
        let physical = match resolve(fs, &inode, &mut pointers, logical) {
            Ok(Some(block)) => block,
            // A hole. The bytes just aren't there; stop with what we have.
            Ok(None) => break,
            Err(error) => return partial(copied, error),
        };

        if let Err(error) = fs.disk.read(physical as usize, &mut scratch) {
            return partial(copied, error.into());
        }

        let take = (BLOCK_SIZE - within).min(budget - copied);
        buffer[copied..copied + take].copy_from_slice(&scratch.data[within..within + take]);

        copied += take;
        logical += 1;
        // Only the first block starts mid-way.
        within = 0;
    }

    Ok(copied)
}

// Bytes already moved win over the error that stopped the loop.
fn partial(copied: usize, error: FilesystemError) -> Result<usize, FilesystemError> {
    if copied > 0 {
        Ok(copied)
    } else {
        Err(error)
    }
}

// Map a logical block of the file to its physical block, if one is
// allocated. Logical blocks 0..5 sit in the inode; everything after
// goes through the indirect block, which is read once and cached in
// `pointers` across the loop.
fn resolve(
    fs: &mut FileSystem,
    inode: &Inode,
    pointers: &mut Option<IndirectBlock>,
    logical: usize,
) -> Result<Option<u32>, FilesystemError> {
    if logical < POINTERS_PER_INODE {
        let direct = inode.direct[logical];
        return Ok((direct != 0).then_some(direct));
    }

    let slot = logical - POINTERS_PER_INODE;
    if slot >= POINTERS_PER_BLOCK || inode.indirect == 0 {
        return Ok(None);
    }

    if pointers.is_none() {
        let mut block = Block::zeroed();
        fs.disk.read(inode.indirect as usize, &mut block)?;
        *pointers = Some(IndirectBlock::from_block(&block));
    }

    let entry = pointers
        .as_ref()
        .expect("cache was filled on the line above")
        .pointers[slot];
    Ok((entry != 0).then_some(entry))
}
