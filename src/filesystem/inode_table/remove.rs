// Unmaking inodes.

// Imports

use log::debug;

use crate::disk::block::block_structs::Block;
use crate::error_types::filesystem::FilesystemError;
use crate::filesystem::filesystem_struct::FileSystem;
use crate::filesystem::layout::indirect::indirect_struct::IndirectBlock;
use crate::filesystem::layout::inode::inode_struct::Inode;
use crate::filesystem::layout::POINTERS_PER_INODE;

// Implementations

impl FileSystem {
    /// Remove an inode: free every block it references, then zero the
    /// record on disk and release the slot.
    ///
    /// The freed data and indirect blocks are not scrubbed; the inode
    /// table is the durable record, and once nothing points at a block
    /// it is free, stale bytes and all.
    pub fn remove(&mut self, number: usize) -> Result<(), FilesystemError> {
        remove(self, number)
    }
}

// Functions

fn remove(fs: &mut FileSystem, number: usize) -> Result<(), FilesystemError> {
    let (mut block, inode) = fs.load_valid_inode(number)?;

    // Direct blocks first.
    for pointer in inode.direct {
        if pointer != 0 {
            fs.free_blocks.set_free(pointer as usize);
        }
    }

    // Then everything behind the indirect block, and the indirect block
    // itself.
    if inode.indirect != 0 {
        let mut pointers = Block::zeroed();
        fs.disk.read(inode.indirect as usize, &mut pointers)?;
        for entry in IndirectBlock::from_block(&pointers).allocated() {
            fs.free_blocks.set_free(entry as usize);
        }
        fs.free_blocks.set_free(inode.indirect as usize);
    }

    // Zero the record. A free inode has exactly one on-disk shape.
    let freed = Inode {
        valid: false,
        size: 0,
        direct: [0; POINTERS_PER_INODE],
        indirect: 0,
    };
    freed.encode(&mut block, Inode::table_slot(number));
    fs.disk.write(Inode::table_block(number), &block)?;

    fs.free_inodes.set_free(number);

    debug!("Removed inode {number}");
    Ok(())
}
