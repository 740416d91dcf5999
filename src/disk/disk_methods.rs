// Opening, closing, and poking at disks.

// Imports

use std::fs::OpenOptions;
use std::path::Path;

use log::{debug, info};

use crate::disk::block::block_structs::{Block, BLOCK_SIZE};
use crate::disk::disk_struct::Disk;
use crate::disk::io;
use crate::error_types::disk::DiskError;

// Implementations

impl Disk {
    /// Open (or create) a disk image at `path` holding `blocks` blocks.
    ///
    /// The backing file is sized to exactly `blocks * BLOCK_SIZE` bytes,
    /// the counters start at zero, and the disk starts unmounted.
    pub fn open(path: &Path, blocks: usize) -> Result<Self, DiskError> {
        open(path, blocks)
    }

    /// Number of blocks on this disk.
    pub fn size(&self) -> usize {
        self.blocks
    }

    /// Number of successful block reads so far.
    pub fn reads(&self) -> u64 {
        self.reads
    }

    /// Number of successful block writes so far.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Is a filesystem currently mounted on this disk?
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // Only the filesystem layer may flip the mount flag.
    pub(crate) fn set_mounted(&mut self, mounted: bool) {
        self.mounted = mounted;
    }

    /// Read one block into `buffer`.
    ///
    /// All-or-nothing: a short read is a hard error, and the read counter
    /// only moves on success.
    pub fn read(&mut self, block: usize, buffer: &mut Block) -> Result<(), DiskError> {
        self.sanity_check(block)?;
        io::read::read_block(&self.file, block, buffer)?;
        self.reads += 1;
        Ok(())
    }

    /// Write one block from `buffer`. Symmetric to [`Disk::read`].
    pub fn write(&mut self, block: usize, buffer: &Block) -> Result<(), DiskError> {
        self.sanity_check(block)?;
        io::write::write_block(&self.file, block, buffer)?;
        self.writes += 1;
        Ok(())
    }

    // A block number must actually be on the disk before we let it near
    // the file.
    fn sanity_check(&self, block: usize) -> Result<(), DiskError> {
        if block >= self.blocks {
            return Err(DiskError::OutOfRange {
                block,
                blocks: self.blocks,
            });
        }
        Ok(())
    }
}

impl Drop for Disk {
    fn drop(&mut self) {
        // The close-time report. Observational only, like the counters.
        info!(
            "Disk closed: {} reads, {} writes ({})",
            self.reads,
            self.writes,
            self.path.display()
        );
    }
}

// Functions

fn open(path: &Path, blocks: usize) -> Result<Disk, DiskError> {
    debug!("Opening disk image {} with {} blocks...", path.display(), blocks);

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
        .map_err(|source| DiskError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    // Size the image to exactly the requested geometry. Pre-existing
    // files either already match or get grown/cut to fit.
    file.set_len((blocks as u64) * (BLOCK_SIZE as u64))
        .map_err(|source| DiskError::Truncate {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(Disk {
        file,
        path: path.to_path_buf(),
        blocks,
        reads: 0,
        writes: 0,
        mounted: false,
    })
}
