// Asking inodes how big they are.

// Imports

use crate::error_types::filesystem::FilesystemError;
use crate::filesystem::filesystem_struct::FileSystem;

// Implementations

impl FileSystem {
    /// Size in bytes of a valid inode.
    pub fn stat(&mut self, number: usize) -> Result<u32, FilesystemError> {
        let (_, inode) = self.load_valid_inode(number)?;
        Ok(inode.size)
    }
}
