// Format, mount, unmount, debug: the lifecycle end of the filesystem.

// Imports

use log::{debug, error, info};

use crate::disk::block::block_structs::Block;
use crate::disk::disk_struct::Disk;
use crate::error_types::filesystem::{FilesystemError, MountError};
use crate::filesystem::allocate::free_map::FreeMap;
use crate::filesystem::filesystem_struct::FileSystem;
use crate::filesystem::layout::indirect::indirect_struct::IndirectBlock;
use crate::filesystem::layout::inode::inode_struct::Inode;
use crate::filesystem::layout::superblock::superblock_struct::SuperBlock;
use crate::filesystem::layout::{INODES_PER_BLOCK, INODE_TABLE_START, MAGIC_NUMBER};

// Implementations

impl FileSystem {
    /// Write a blank filesystem onto an unmounted disk: a fresh
    /// superblock at block 0 and zeros everywhere else.
    ///
    /// Not transactional. If a write fails partway, the image is in an
    /// undefined state and the only sensible next step is another format.
    pub fn format(disk: &mut Disk) -> Result<(), FilesystemError> {
        format(disk)
    }

    /// Mount a disk, consuming it.
    ///
    /// Validates the superblock, then rebuilds both free maps from what
    /// is actually on disk. On failure the untouched disk comes back
    /// inside the error.
    pub fn mount(disk: Disk) -> Result<Self, MountError> {
        mount(disk)
    }

    /// Unmount, clearing the disk's mount flag and handing the disk
    /// back. The free maps die with `self`.
    pub fn unmount(mut self) -> Disk {
        info!("Unmounting filesystem");
        self.disk.set_mounted(false);
        self.disk
    }

    /// Walk an unmounted (or any) disk and print what's on it: the
    /// superblock, then every valid inode with its pointers.
    ///
    /// Purely diagnostic. A bad magic number is reported, not an error.
    pub fn debug(disk: &mut Disk) -> Result<(), FilesystemError> {
        print_debug(disk)
    }

    /// The same report, for the disk this mount owns.
    pub fn debug_mounted(&mut self) -> Result<(), FilesystemError> {
        print_debug(&mut self.disk)
    }

    /// The superblock this mount is using.
    pub fn superblock(&self) -> &SuperBlock {
        &self.meta
    }

    /// How many inode records are free right now.
    pub fn free_inode_count(&self) -> usize {
        self.free_inodes.count_free()
    }

    /// How many blocks are free right now.
    pub fn free_block_count(&self) -> usize {
        self.free_blocks.count_free()
    }

    // Fetch inode `number`, requiring it to be valid. Returns the whole
    // table block too, since most callers are about to write it back.
    pub(super) fn load_valid_inode(
        &mut self,
        number: usize,
    ) -> Result<(Block, Inode), FilesystemError> {
        if number >= self.meta.inodes as usize {
            return Err(FilesystemError::InodeOutOfRange(number));
        }

        let mut block = Block::zeroed();
        self.disk.read(Inode::table_block(number), &mut block)?;

        let inode = Inode::decode(&block, Inode::table_slot(number));
        if !inode.valid {
            return Err(FilesystemError::InvalidInode(number));
        }

        Ok((block, inode))
    }
}

// Functions

fn format(disk: &mut Disk) -> Result<(), FilesystemError> {
    if disk.is_mounted() {
        return Err(FilesystemError::AlreadyMounted);
    }

    let meta = SuperBlock::for_disk(disk.size());
    // Catches disks too small to hold a superblock plus a table.
    meta.validate()?;

    info!(
        "Formatting: {} blocks, {} inode blocks, {} inodes",
        meta.blocks, meta.inode_blocks, meta.inodes
    );

    disk.write(0, &meta.to_block())?;

    // Zero every other block: table and data region both.
    let zeroes = Block::zeroed();
    for block in 1..disk.size() {
        disk.write(block, &zeroes)?;
    }

    Ok(())
}

fn mount(mut disk: Disk) -> Result<FileSystem, MountError> {
    match rebuild(&mut disk) {
        Ok((meta, free_inodes, free_blocks)) => {
            disk.set_mounted(true);
            info!(
                "Mounted: {} blocks, {} inodes, {} free blocks",
                meta.blocks,
                meta.inodes,
                free_blocks.count_free()
            );
            Ok(FileSystem {
                disk,
                meta,
                free_inodes,
                free_blocks,
            })
        }
        Err(source) => {
            // The flag was never set and the maps never escaped; the
            // caller gets the disk back exactly as it was.
            error!("Mount failed: {source}");
            Err(MountError { disk, source })
        }
    }
}

// Read the superblock and derive both free maps from disk contents.
//
// The free-block map comes from reachability through live inodes, never
// from block contents: an allocated block full of zero bytes is
// indistinguishable from a free one by looking at it.
fn rebuild(disk: &mut Disk) -> Result<(SuperBlock, FreeMap, FreeMap), FilesystemError> {
    if disk.is_mounted() {
        return Err(FilesystemError::AlreadyMounted);
    }

    let mut block = Block::zeroed();
    disk.read(0, &mut block)?;
    let meta = SuperBlock::from_block(&block);
    meta.validate()?;

    let mut free_inodes = FreeMap::all_used(meta.inodes as usize);
    let mut free_blocks = FreeMap::all_used(meta.blocks as usize);

    // Block 0 and the table stay used. Data blocks start free and lose
    // that status the moment any live inode is found pointing at them.
    for data_block in meta.data_region_start()..meta.blocks as usize {
        free_blocks.set_free(data_block);
    }

    let claim = |free_blocks: &mut FreeMap, inode: usize, pointer: u32| {
        let target = pointer as usize;
        if target < meta.data_region_start() || target >= meta.blocks as usize {
            return Err(FilesystemError::BadPointer {
                inode,
                block: pointer,
            });
        }
        free_blocks.set_used(target);
        Ok(())
    };

    for table_block in INODE_TABLE_START..=meta.inode_blocks as usize {
        disk.read(table_block, &mut block)?;

        for slot in 0..INODES_PER_BLOCK {
            let number = (table_block - INODE_TABLE_START) * INODES_PER_BLOCK + slot;
            let inode = Inode::decode(&block, slot);

            if !inode.valid {
                free_inodes.set_free(number);
                continue;
            }

            for pointer in inode.direct {
                if pointer != 0 {
                    claim(&mut free_blocks, number, pointer)?;
                }
            }

            if inode.indirect != 0 {
                claim(&mut free_blocks, number, inode.indirect)?;

                let mut pointers = Block::zeroed();
                disk.read(inode.indirect as usize, &mut pointers)?;
                for entry in IndirectBlock::from_block(&pointers).allocated() {
                    claim(&mut free_blocks, number, entry)?;
                }
            }
        }
    }

    debug!(
        "Rebuilt free maps: {} free inodes, {} free blocks",
        free_inodes.count_free(),
        free_blocks.count_free()
    );

    Ok((meta, free_inodes, free_blocks))
}

fn print_debug(disk: &mut Disk) -> Result<(), FilesystemError> {
    let mut block = Block::zeroed();
    disk.read(0, &mut block)?;
    let meta = SuperBlock::from_block(&block);

    println!("SuperBlock:");
    if meta.magic != MAGIC_NUMBER {
        println!("    Invalid magic number!");
        return Ok(());
    }

    println!("    {} blocks", meta.blocks);
    println!("    {} inode blocks", meta.inode_blocks);
    println!("    {} inodes", meta.inodes);

    for table_block in INODE_TABLE_START..=meta.inode_blocks as usize {
        disk.read(table_block, &mut block)?;

        for slot in 0..INODES_PER_BLOCK {
            let number = (table_block - INODE_TABLE_START) * INODES_PER_BLOCK + slot;
            let inode = Inode::decode(&block, slot);
            if !inode.valid {
                continue;
            }

            println!("Inode {number}:");
            println!("    Size: {} bytes", inode.size);
            // All five slots, zeros included; holes are information.
            let direct: Vec<String> = inode.direct.iter().map(u32::to_string).collect();
            println!("    Direct blocks: {}", direct.join(" "));

            if inode.indirect != 0 {
                println!("    Indirect block: {}", inode.indirect);
                let mut pointers = Block::zeroed();
                disk.read(inode.indirect as usize, &mut pointers)?;
                let entries: Vec<String> = IndirectBlock::from_block(&pointers)
                    .allocated()
                    .map(|entry| entry.to_string())
                    .collect();
                println!("    Indirect data blocks: {}", entries.join(" "));
            }
        }
    }

    Ok(())
}
