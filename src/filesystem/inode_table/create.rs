// Making inodes.

// Imports

use log::debug;

use crate::disk::block::block_structs::Block;
use crate::error_types::filesystem::FilesystemError;
use crate::filesystem::filesystem_struct::FileSystem;
use crate::filesystem::layout::inode::inode_struct::Inode;

// Implementations

impl FileSystem {
    /// Claim the lowest free inode and write it back valid and empty.
    ///
    /// No data blocks get allocated here; a new file is size 0 with
    /// every pointer unset. On a fresh disk the returned numbers are
    /// dense: 0, 1, 2, … until the table runs out.
    pub fn create(&mut self) -> Result<usize, FilesystemError> {
        create(self)
    }
}

// Functions

fn create(fs: &mut FileSystem) -> Result<usize, FilesystemError> {
    let number = fs
        .free_inodes
        .first_free_from(0)
        .ok_or(FilesystemError::InodeTableFull)?;

    // Read-modify-write the table block holding the chosen slot.
    let mut block = Block::zeroed();
    fs.disk.read(Inode::table_block(number), &mut block)?;
    Inode::blank().encode(&mut block, Inode::table_slot(number));
    fs.disk.write(Inode::table_block(number), &block)?;

    // Only claim the slot once the table write stuck.
    fs.free_inodes.set_used(number);

    debug!("Created inode {number}");
    Ok(number)
}
