// Block 0. The block that describes all the other blocks.

// Imports

use thiserror::Error;

// Structs, Enums, Flags

/// The superblock: disk geometry plus the magic number, living at block 0.
///
/// `inodes` is always `inode_blocks * INODES_PER_BLOCK`; it is stored
/// anyway so the record is self-describing.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SuperBlock {
    /// Must be `MAGIC_NUMBER` for the image to mean anything.
    pub magic: u32,
    /// Total blocks on the disk.
    pub blocks: u32,
    /// Blocks holding the inode table (blocks 1..=inode_blocks).
    pub inode_blocks: u32,
    /// Total inode records in the table.
    pub inodes: u32,
}

// Error types

/// Ways a superblock can fail to describe a mountable filesystem.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SuperBlockError {
    #[error("bad magic number {found:#010x}")]
    BadMagic { found: u32 },
    #[error("inode table is {found} blocks, geometry says it should be {expected}")]
    WrongInodeBlocks { expected: u32, found: u32 },
    #[error("{inodes} inodes cannot fit in {inode_blocks} table blocks")]
    WrongInodeCount { inode_blocks: u32, inodes: u32 },
    #[error("{blocks} blocks is too small for a superblock and {inode_blocks} table blocks")]
    DoesNotFit { blocks: u32, inode_blocks: u32 },
}
