use pocket_fs::disk::block::block_structs::Block;
use pocket_fs::error_types::filesystem::FilesystemError;
use pocket_fs::filesystem::filesystem_struct::FileSystem;
use pocket_fs::filesystem::layout::superblock::superblock_struct::SuperBlockError;

// We want to see logs while testing.
use test_log::test;


#[test]
// The canonical 200-block geometry: a tenth of the disk becomes inode
// table, rounded up.
fn format_reports_geometry() {
    let (_dir, mut disk) = test_common::formatted_disk(200);

    // The debug walk reads the whole table; it must be happy too.
    FileSystem::debug(&mut disk).expect("debug of a formatted disk should work");

    let fs = FileSystem::mount(disk).expect("formatted disk should mount");
    let meta = fs.superblock();
    assert_eq!(meta.blocks, 200, "every block accounted for");
    assert_eq!(meta.inode_blocks, 20, "a tenth of 200");
    assert_eq!(meta.inodes, 2560, "20 table blocks of 128 inodes");
}

#[test]
// A formatted disk has everything free: the whole table and the whole
// data region.
fn format_starts_empty() {
    let (_dir, fs) = test_common::mounted_fs(200);

    assert_eq!(fs.free_inode_count(), 2560, "no inode is in use yet");
    // Block 0 and the 20 table blocks are reserved; the rest is free.
    assert_eq!(fs.free_block_count(), 200 - 21, "the data region is all free");
}

#[test]
// Formatting over a used filesystem erases it.
fn format_erases() {
    let (_dir, mut fs) = test_common::mounted_fs(50);

    let inode = fs.create().expect("create on a fresh filesystem should work");
    let written = fs
        .write(inode, &[7u8; 5000], 0)
        .expect("write on a fresh filesystem should work");
    assert_eq!(written, 5000, "both blocks of payload should land");

    let mut disk = fs.unmount();
    FileSystem::format(&mut disk).expect("reformat should work");

    let fs = FileSystem::mount(disk).expect("reformatted disk should mount");
    assert_eq!(
        fs.free_inode_count(),
        fs.superblock().inodes as usize,
        "reformat must free every inode"
    );
    assert_eq!(
        fs.free_block_count(),
        50 - fs.superblock().data_region_start(),
        "reformat must free every data block"
    );
}

#[test]
// Disks too small for a superblock plus a table refuse to format.
fn format_rejects_tiny_disks() {
    let (_dir, mut disk) = test_common::blank_disk(1);
    let result = FileSystem::format(&mut disk);
    assert!(
        matches!(
            result,
            Err(FilesystemError::SuperBlock(SuperBlockError::DoesNotFit { .. }))
        ),
        "one block cannot hold a filesystem"
    );
}

#[test]
// Zeroing block 0 of a good image must make mounting fail, and the
// failed mount must hand the disk back untouched.
fn invalid_magic_refuses_to_mount() {
    let (_dir, mut disk) = test_common::formatted_disk(50);

    disk.write(0, &Block::zeroed()).expect("clobbering block 0 should work");

    let failed = FileSystem::mount(disk).expect_err("a zeroed superblock must not mount");
    assert!(
        matches!(
            failed.source,
            FilesystemError::SuperBlock(SuperBlockError::BadMagic { found: 0 })
        ),
        "the failure is the magic number"
    );

    // The disk comes back out of the error, still unmounted and usable.
    let mut disk = failed.disk;
    assert!(!disk.is_mounted(), "failed mount must not leave the flag set");
    FileSystem::format(&mut disk).expect("the returned disk should still format");
}

#[test]
// An unformatted (all-zero) image behaves exactly like a bad magic.
fn mount_rejects_unformatted_disk() {
    let (_dir, disk) = test_common::blank_disk(50);
    let failed = FileSystem::mount(disk).expect_err("an unformatted image must not mount");
    assert!(
        matches!(
            failed.source,
            FilesystemError::SuperBlock(SuperBlockError::BadMagic { .. })
        ),
        "zeros are not a superblock"
    );
}
