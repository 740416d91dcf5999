// Find, reserve, or even free things!

// One map tracks inodes, one tracks blocks. Neither is ever written to
// disk: the inode table and the indirect blocks are the durable record,
// and mount rebuilds both maps from them. Everything here is advisory.

// Imports

use log::trace;

// Structs, Enums, Flags

/// An in-memory bitmap of what's available. `true` means free.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FreeMap {
    slots: Vec<bool>,
}

// Implementations

impl FreeMap {
    /// A map with every slot marked used. Mount starts here and frees
    /// what it can prove is unreferenced.
    pub fn all_used(len: usize) -> Self {
        Self {
            slots: vec![false; len],
        }
    }

    /// Number of slots tracked.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_free(&self, index: usize) -> bool {
        self.slots[index]
    }

    pub fn set_free(&mut self, index: usize) {
        self.slots[index] = true;
    }

    pub fn set_used(&mut self, index: usize) {
        self.slots[index] = false;
    }

    /// Lowest free slot at or after `start`, if any.
    ///
    /// Lowest-first matters: it makes free space reuse holes
    /// deterministically, which the tests rely on.
    pub fn first_free_from(&self, start: usize) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, free)| **free)
            .map(|(index, _)| index)
    }

    /// How many slots are currently free.
    pub fn count_free(&self) -> usize {
        self.slots.iter().filter(|free| **free).count()
    }

    /// Claim the lowest free slot at or after `start`.
    ///
    /// This is the whole allocation policy. For data blocks, `start` is
    /// the first block past the inode table, so the superblock and table
    /// can never be handed out — and since block 0 is reserved by layout,
    /// 0 stays unambiguous as the "no block" sentinel on disk.
    pub fn allocate_from(&mut self, start: usize) -> Option<usize> {
        let found = self.first_free_from(start)?;
        self.set_used(found);
        trace!("Allocated slot {found}");
        Some(found)
    }
}
