use pocket_fs::disk::block::block_structs::BLOCK_SIZE;
use pocket_fs::error_types::filesystem::FilesystemError;

// We want to see logs while testing.
use test_log::test;


#[test]
// On a fresh filesystem, create hands out 0, 1, 2, ... with no gaps,
// then runs dry.
fn create_indices_are_dense() {
    // 11 blocks -> 2 table blocks -> 256 inodes. Small enough to fill.
    let (_dir, mut fs) = test_common::mounted_fs(11);
    let total = fs.superblock().inodes as usize;
    assert_eq!(total, 256, "two table blocks of 128 inodes");

    for expected in 0..total {
        let created = fs.create().expect("the table is not full yet");
        assert_eq!(created, expected, "create must hand out the lowest free inode");
    }

    let result = fs.create();
    assert!(
        matches!(result, Err(FilesystemError::InodeTableFull)),
        "a full table must refuse to create"
    );
}

#[test]
// A removed inode is the lowest free slot again.
fn create_reuses_removed_slots() {
    let (_dir, mut fs) = test_common::mounted_fs(20);

    assert_eq!(fs.create().expect("create should work"), 0, "first inode");
    assert_eq!(fs.create().expect("create should work"), 1, "second inode");
    assert_eq!(fs.create().expect("create should work"), 2, "third inode");

    fs.remove(1).expect("removing a valid inode should work");
    assert_eq!(fs.create().expect("create should work"), 1, "the hole gets reused");
}

#[test]
// New inodes are empty: no size, no data blocks claimed.
fn create_allocates_no_data() {
    let (_dir, mut fs) = test_common::mounted_fs(50);
    let free_before = fs.free_block_count();

    let inode = fs.create().expect("create should work");
    assert_eq!(fs.stat(inode).expect("a new inode must stat"), 0, "size starts at 0");
    assert_eq!(
        fs.free_block_count(),
        free_before,
        "create must not touch the data region"
    );
}

#[test]
// Removing a written file reclaims exactly the blocks it held: six data
// blocks plus the indirect block it took to address the sixth.
fn remove_reclaims_blocks() {
    let (_dir, mut fs) = test_common::mounted_fs(200);
    let free_before = fs.free_block_count();

    let inode = fs.create().expect("create should work");
    let payload = vec![0xabu8; 6 * BLOCK_SIZE];
    let written = fs.write(inode, &payload, 0).expect("write should work");
    assert_eq!(written, payload.len(), "the whole payload should land");
    assert_eq!(
        fs.free_block_count(),
        free_before - 7,
        "6 data blocks + 1 indirect block in use"
    );

    fs.remove(inode).expect("remove should work");
    assert_eq!(
        fs.free_block_count(),
        free_before,
        "remove must reclaim every block"
    );
    assert_eq!(
        fs.create().expect("create should work"),
        inode,
        "the inode slot is free again"
    );
}

#[test]
// The freed blocks really are usable, not just counted: the disk can be
// filled, emptied, and filled again.
fn remove_makes_space_reusable() {
    // 12 blocks: superblock + 2 table + 9 data.
    let (_dir, mut fs) = test_common::mounted_fs(12);

    let inode = fs.create().expect("create should work");
    let big = vec![1u8; 10 * BLOCK_SIZE];
    // 5 direct + 1 indirect + 3 indirect-addressed = all 9 data blocks,
    // 8 blocks worth of actual bytes.
    let written = fs.write(inode, &big, 0).expect("partial write is still a write");
    assert_eq!(written, 8 * BLOCK_SIZE, "write stops when the disk is full");
    assert_eq!(fs.free_block_count(), 0, "the data region is exhausted");

    fs.remove(inode).expect("remove should work");
    assert_eq!(fs.free_block_count(), 9, "everything is free again");

    let again = fs.create().expect("create should work");
    let written = fs.write(again, &big[..2 * BLOCK_SIZE], 0).expect("write should work");
    assert_eq!(written, 2 * BLOCK_SIZE, "reclaimed blocks are usable");
}

#[test]
fn remove_rejects_bad_inodes() {
    let (_dir, mut fs) = test_common::mounted_fs(20);
    let total = fs.superblock().inodes as usize;

    assert!(
        matches!(fs.remove(3), Err(FilesystemError::InvalidInode(3))),
        "removing a never-created inode must fail"
    );
    assert!(
        matches!(fs.remove(total), Err(FilesystemError::InodeOutOfRange(_))),
        "removing past the table must fail"
    );

    let inode = fs.create().expect("create should work");
    fs.remove(inode).expect("first remove should work");
    assert!(
        matches!(fs.remove(inode), Err(FilesystemError::InvalidInode(_))),
        "double remove must fail"
    );
}

#[test]
fn stat_rejects_bad_inodes() {
    let (_dir, mut fs) = test_common::mounted_fs(20);

    assert!(
        matches!(fs.stat(0), Err(FilesystemError::InvalidInode(0))),
        "stat of a free inode must fail"
    );
    assert!(
        matches!(fs.stat(99999), Err(FilesystemError::InodeOutOfRange(_))),
        "stat past the table must fail"
    );
}
