// Inode layout

// Imports

use crate::filesystem::layout::POINTERS_PER_INODE;

// Structs, Enums, Flags

/// One file's metadata: 32 bytes on disk, 128 to a table block.
///
/// On disk the record is eight 32-bit words: validity, size, the five
/// direct pointers, and the indirect pointer. A pointer of 0 means
/// "none" — block 0 holds the superblock, so the sentinel can never
/// collide with a real allocation.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Inode {
    /// Whether this record is in use. A free inode is all zeros on disk.
    pub valid: bool,
    /// File length in bytes.
    pub size: u32,
    /// Data-block numbers, addressed directly.
    pub direct: [u32; POINTERS_PER_INODE],
    /// Block number of the single indirect pointer block.
    pub indirect: u32,
}
