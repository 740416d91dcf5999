// Things that can go wrong in the filesystem proper.

// Imports

use thiserror::Error;

use crate::disk::disk_struct::Disk;
use crate::error_types::disk::DiskError;
use crate::filesystem::layout::superblock::superblock_struct::SuperBlockError;

// Errors

/// Errors from filesystem operations.
#[derive(Debug, Error)]
pub enum FilesystemError {
    /// The disk's mount flag was already set. Formatting and mounting both
    /// require an unmounted disk.
    #[error("disk is already mounted")]
    AlreadyMounted,
    /// Block 0 did not describe a filesystem we can use.
    #[error(transparent)]
    SuperBlock(#[from] SuperBlockError),
    /// A valid inode points at a block outside the data region. The image
    /// is corrupt; mounting it would poison the free map.
    #[error("inode {inode} points at impossible block {block}")]
    BadPointer { inode: usize, block: u32 },
    #[error("inode {0} is out of range")]
    InodeOutOfRange(usize),
    #[error("inode {0} is not valid")]
    InvalidInode(usize),
    /// Every slot in the inode table is taken.
    #[error("no free inodes")]
    InodeTableFull,
    /// Read offsets may not point past the end of the file.
    #[error("offset {offset} is past the end of inode {inode} ({size} bytes)")]
    OffsetPastEnd {
        inode: usize,
        offset: usize,
        size: u32,
    },
    /// Write offsets may not point past the largest byte an inode can
    /// address through its direct and indirect pointers.
    #[error("offset {0} is past the largest addressable byte")]
    OffsetUnaddressable(usize),
    /// No data block could be allocated and nothing had been written yet.
    /// Exhaustion after partial progress is not an error: the operation
    /// reports the bytes it managed instead.
    #[error("no free data blocks")]
    DiskFull,
    #[error(transparent)]
    Disk(#[from] DiskError),
}

/// A failed mount.
///
/// Mounting consumes the [`Disk`], so the failure path has to hand it
/// back; the caller usually wants to keep using it.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct MountError {
    pub disk: Disk,
    #[source]
    pub source: FilesystemError,
}
