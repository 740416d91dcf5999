// Superblocks in and out of their block.

// Imports

use crate::disk::block::block_structs::Block;
use crate::filesystem::layout::superblock::superblock_struct::{SuperBlock, SuperBlockError};
use crate::filesystem::layout::{INODES_PER_BLOCK, MAGIC_NUMBER};

// Implementations

impl SuperBlock {
    /// The superblock a freshly formatted disk of `blocks` blocks gets:
    /// one tenth of the disk (rounded up) becomes inode table.
    pub fn for_disk(blocks: usize) -> Self {
        let blocks = blocks as u32;
        let inode_blocks = blocks.div_ceil(10);
        Self {
            magic: MAGIC_NUMBER,
            blocks,
            inode_blocks,
            inodes: inode_blocks * INODES_PER_BLOCK as u32,
        }
    }

    /// Pull a superblock out of block 0. No validation happens here;
    /// call [`SuperBlock::validate`] before trusting the result.
    pub fn from_block(block: &Block) -> Self {
        Self {
            magic: block.read_u32(0),
            blocks: block.read_u32(1),
            inode_blocks: block.read_u32(2),
            inodes: block.read_u32(3),
        }
    }

    /// Serialize into a block, zero-padded to full size.
    pub fn to_block(&self) -> Block {
        // Destructure so a new field can't silently miss the encoder.
        let SuperBlock {
            magic,
            blocks,
            inode_blocks,
            inodes,
        } = *self;

        let mut block = Block::zeroed();
        block.write_u32(0, magic);
        block.write_u32(1, blocks);
        block.write_u32(2, inode_blocks);
        block.write_u32(3, inodes);
        block
    }

    /// Check the layout invariants: right magic, the inode table is one
    /// tenth of the disk rounded up, the declared inode count matches the
    /// table size, and everything fits on the disk.
    pub fn validate(&self) -> Result<(), SuperBlockError> {
        if self.magic != MAGIC_NUMBER {
            return Err(SuperBlockError::BadMagic { found: self.magic });
        }

        let expected_inode_blocks = self.blocks.div_ceil(10);
        if self.inode_blocks != expected_inode_blocks {
            return Err(SuperBlockError::WrongInodeBlocks {
                expected: expected_inode_blocks,
                found: self.inode_blocks,
            });
        }

        if self.inodes != self.inode_blocks * INODES_PER_BLOCK as u32 {
            return Err(SuperBlockError::WrongInodeCount {
                inode_blocks: self.inode_blocks,
                inodes: self.inodes,
            });
        }

        // The superblock plus the whole table must fit.
        if 1 + self.inode_blocks > self.blocks {
            return Err(SuperBlockError::DoesNotFit {
                blocks: self.blocks,
                inode_blocks: self.inode_blocks,
            });
        }

        Ok(())
    }

    /// First block of the data region (one past the inode table).
    pub fn data_region_start(&self) -> usize {
        1 + self.inode_blocks as usize
    }
}
