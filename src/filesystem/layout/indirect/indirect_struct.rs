// The indirect block: a block full of places other blocks live.

// Imports

use crate::filesystem::layout::POINTERS_PER_BLOCK;

// Structs, Enums, Flags

/// A data-region block reinterpreted as 1024 block pointers.
///
/// Slot `j` here extends an inode's addressing: logical block
/// `POINTERS_PER_INODE + j` of the file lives wherever slot `j` points.
/// A 0 entry is an unallocated slot.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct IndirectBlock {
    pub pointers: [u32; POINTERS_PER_BLOCK],
}
