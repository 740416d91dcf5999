// Pointer blocks in and out of their bytes.

// Imports

use crate::disk::block::block_structs::Block;
use crate::filesystem::layout::indirect::indirect_struct::IndirectBlock;
use crate::filesystem::layout::POINTERS_PER_BLOCK;

// Implementations

impl IndirectBlock {
    /// A pointer block with every slot unallocated. This is what gets
    /// written to disk the moment the indirect block itself is allocated,
    /// so stale bytes never get mistaken for pointers.
    pub fn empty() -> Self {
        Self {
            pointers: [0; POINTERS_PER_BLOCK],
        }
    }

    /// Reinterpret a block's bytes as pointers.
    pub fn from_block(block: &Block) -> Self {
        let mut pointers = [0u32; POINTERS_PER_BLOCK];
        for (slot, pointer) in pointers.iter_mut().enumerate() {
            *pointer = block.read_u32(slot);
        }
        Self { pointers }
    }

    /// Serialize back into a block.
    pub fn to_block(&self) -> Block {
        let mut block = Block::zeroed();
        for (slot, pointer) in self.pointers.iter().enumerate() {
            block.write_u32(slot, *pointer);
        }
        block
    }

    /// The allocated entries, in slot order.
    pub fn allocated(&self) -> impl Iterator<Item = u32> + '_ {
        self.pointers.iter().copied().filter(|pointer| *pointer != 0)
    }
}
