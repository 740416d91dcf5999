// Inodes in and out of their table slots.

// Imports

use crate::disk::block::block_structs::Block;
use crate::filesystem::layout::inode::inode_struct::Inode;
use crate::filesystem::layout::{INODES_PER_BLOCK, INODE_TABLE_START, POINTERS_PER_INODE};

// Eight u32 words per record: valid, size, direct[5], indirect.
const WORDS_PER_INODE: usize = 8;

// Implementations

impl Inode {
    /// A fresh, valid, empty inode: size 0, every pointer 0.
    pub fn blank() -> Self {
        Self {
            valid: true,
            size: 0,
            direct: [0; POINTERS_PER_INODE],
            indirect: 0,
        }
    }

    /// Which inode-table block holds inode `number`.
    pub fn table_block(number: usize) -> usize {
        INODE_TABLE_START + number / INODES_PER_BLOCK
    }

    /// Which slot inside that block holds inode `number`.
    pub fn table_slot(number: usize) -> usize {
        number % INODES_PER_BLOCK
    }

    /// Pull one inode record out of a table block.
    pub fn decode(block: &Block, slot: usize) -> Self {
        let base = slot * WORDS_PER_INODE;

        let mut direct = [0u32; POINTERS_PER_INODE];
        for (offset, pointer) in direct.iter_mut().enumerate() {
            *pointer = block.read_u32(base + 2 + offset);
        }

        Self {
            valid: block.read_u32(base) != 0,
            size: block.read_u32(base + 1),
            direct,
            indirect: block.read_u32(base + 7),
        }
    }

    /// Write this inode record into a table block slot.
    ///
    /// An invalid inode is stored as all zeros regardless of what the
    /// other fields say; a free slot has exactly one representation.
    pub fn encode(&self, block: &mut Block, slot: usize) {
        let base = slot * WORDS_PER_INODE;

        if !self.valid {
            for word in 0..WORDS_PER_INODE {
                block.write_u32(base + word, 0);
            }
            return;
        }

        block.write_u32(base, 1);
        block.write_u32(base + 1, self.size);
        for (offset, pointer) in self.direct.iter().enumerate() {
            block.write_u32(base + 2 + offset, *pointer);
        }
        block.write_u32(base + 7, self.indirect);
    }
}
