// The read-eval-print loop and its commands.

// Imports

use std::io::{stdin, stdout, Write};

use log::debug;

use pocket_fs::disk::block::block_structs::{Block, BLOCK_SIZE};
use pocket_fs::disk::disk_struct::Disk;
use pocket_fs::filesystem::filesystem_struct::FileSystem;
use pocket_fs::helpers::hex_view::hex_view;

// Structs, Enums, Flags

// The one piece of shell state: either we hold a bare disk, or a
// filesystem holds it for us.
enum Station {
    Unmounted(Disk),
    Mounted(FileSystem),
}

// Implementations

/// Run the shell until `exit`, `quit`, or end of input.
pub fn run(disk: Disk) {
    let mut station = Station::Unmounted(disk);

    loop {
        print!("pfs> ");
        let _ = stdout().flush();

        let mut line = String::new();
        match stdin().read_line(&mut line) {
            Ok(0) | Err(_) => break, // end of input counts as quitting
            Ok(_) => {}
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(command) = tokens.first() else {
            continue;
        };

        if *command == "exit" || *command == "quit" {
            break;
        }

        debug!("Running command: {line:?}");
        station = dispatch(station, &tokens);
    }
}

// One command in, the (possibly re-shuffled) state back out.
fn dispatch(station: Station, tokens: &[&str]) -> Station {
    match (tokens[0], &tokens[1..]) {
        ("help", _) => {
            do_help();
            station
        }
        ("debug", []) => do_debug(station),
        ("format", []) => do_format(station),
        ("mount", []) => do_mount(station),
        ("unmount", []) => do_unmount(station),
        ("create", []) => do_create(station),
        ("remove", [inode]) => do_remove(station, inode),
        ("stat", [inode]) => do_stat(station, inode),
        ("cat", [inode]) => do_cat(station, inode),
        ("copyin", [path, inode]) => do_copyin(station, path, inode),
        ("copyout", [inode, path]) => do_copyout(station, inode, path),
        ("dump", [block]) => do_dump(station, block),
        ("debug" | "format" | "mount" | "unmount" | "create", _) => {
            println!("Usage: {}", tokens[0]);
            station
        }
        ("remove" | "stat" | "cat", _) => {
            println!("Usage: {} <inode>", tokens[0]);
            station
        }
        ("copyin", _) => {
            println!("Usage: copyin <file> <inode>");
            station
        }
        ("copyout", _) => {
            println!("Usage: copyout <inode> <file>");
            station
        }
        ("dump", _) => {
            println!("Usage: dump <block>");
            station
        }
        (unknown, _) => {
            println!("Unknown command: {unknown}");
            do_help();
            station
        }
    }
}

fn do_help() {
    println!("Commands are:");
    println!("    format");
    println!("    mount");
    println!("    unmount");
    println!("    debug");
    println!("    create");
    println!("    remove  <inode>");
    println!("    stat    <inode>");
    println!("    cat     <inode>");
    println!("    copyin  <file> <inode>");
    println!("    copyout <inode> <file>");
    println!("    dump    <block>   (unmounted only)");
    println!("    help");
    println!("    exit");
    println!("    quit");
}

fn do_debug(station: Station) -> Station {
    // The report works either way; only where the disk lives differs.
    match station {
        Station::Unmounted(mut disk) => {
            if let Err(failed) = FileSystem::debug(&mut disk) {
                println!("debug failed: {failed}");
            }
            Station::Unmounted(disk)
        }
        Station::Mounted(mut fs) => {
            if let Err(failed) = fs.debug_mounted() {
                println!("debug failed: {failed}");
            }
            Station::Mounted(fs)
        }
    }
}

fn do_format(station: Station) -> Station {
    match station {
        Station::Unmounted(mut disk) => {
            match FileSystem::format(&mut disk) {
                Ok(()) => println!("disk formatted."),
                Err(failed) => println!("format failed: {failed}"),
            }
            Station::Unmounted(disk)
        }
        mounted => {
            println!("format failed: unmount first!");
            mounted
        }
    }
}

fn do_mount(station: Station) -> Station {
    match station {
        Station::Unmounted(disk) => match FileSystem::mount(disk) {
            Ok(fs) => {
                println!("disk mounted.");
                Station::Mounted(fs)
            }
            Err(failed) => {
                println!("mount failed: {}", failed.source);
                // The error hands the disk back; keep using it.
                Station::Unmounted(failed.disk)
            }
        },
        mounted => {
            println!("mount failed: already mounted!");
            mounted
        }
    }
}

fn do_unmount(station: Station) -> Station {
    match station {
        Station::Mounted(fs) => {
            let disk = fs.unmount();
            println!("disk unmounted.");
            Station::Unmounted(disk)
        }
        unmounted => {
            println!("unmount failed: nothing is mounted!");
            unmounted
        }
    }
}

fn do_create(station: Station) -> Station {
    let mut fs = match require_mounted(station) {
        Ok(fs) => fs,
        Err(station) => return station,
    };

    match fs.create() {
        Ok(number) => println!("created inode {number}."),
        Err(failed) => println!("create failed: {failed}"),
    }
    Station::Mounted(fs)
}

// The mounted-only commands all start the same way; this shares the
// complaint. On the error side the caller gets the station back as-is.
fn require_mounted(station: Station) -> Result<FileSystem, Station> {
    match station {
        Station::Mounted(fs) => Ok(fs),
        unmounted => {
            println!("no filesystem is mounted!");
            Err(unmounted)
        }
    }
}

fn do_remove(station: Station, inode: &str) -> Station {
    let Some(inode) = parse_number(inode, "inode") else {
        return station;
    };
    let mut fs = match require_mounted(station) {
        Ok(fs) => fs,
        Err(station) => return station,
    };

    match fs.remove(inode) {
        Ok(()) => println!("removed inode {inode}."),
        Err(failed) => println!("remove failed: {failed}"),
    }
    Station::Mounted(fs)
}

fn do_stat(station: Station, inode: &str) -> Station {
    let Some(inode) = parse_number(inode, "inode") else {
        return station;
    };
    let mut fs = match require_mounted(station) {
        Ok(fs) => fs,
        Err(station) => return station,
    };

    match fs.stat(inode) {
        Ok(size) => println!("inode {inode} has size {size} bytes."),
        Err(failed) => println!("stat failed: {failed}"),
    }
    Station::Mounted(fs)
}

fn do_cat(station: Station, inode: &str) -> Station {
    let Some(inode) = parse_number(inode, "inode") else {
        return station;
    };
    let mut fs = match require_mounted(station) {
        Ok(fs) => fs,
        Err(station) => return station,
    };

    let mut buffer = [0u8; BLOCK_SIZE];
    let mut offset = 0usize;
    loop {
        match fs.read(inode, &mut buffer, offset) {
            Ok(0) => break,
            Ok(n) => {
                let _ = stdout().write_all(&buffer[..n]);
                offset += n;
            }
            Err(failed) => {
                println!("cat failed: {failed}");
                break;
            }
        }
    }
    let _ = stdout().flush();
    Station::Mounted(fs)
}

fn do_copyin(station: Station, path: &str, inode: &str) -> Station {
    let Some(inode) = parse_number(inode, "inode") else {
        return station;
    };
    let mut fs = match require_mounted(station) {
        Ok(fs) => fs,
        Err(station) => return station,
    };

    let mut file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(failed) => {
            println!("unable to open {path}: {failed}");
            return Station::Mounted(fs);
        }
    };

    use std::io::Read;
    let mut buffer = [0u8; BLOCK_SIZE];
    let mut offset = 0usize;
    loop {
        let got = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(got) => got,
            Err(failed) => {
                println!("read from {path} failed: {failed}");
                break;
            }
        };

        match fs.write(inode, &buffer[..got], offset) {
            Ok(wrote) => {
                offset += wrote;
                if wrote != got {
                    // Out of space; everything written so far stays.
                    println!("disk is full, copy truncated.");
                    break;
                }
            }
            Err(failed) => {
                println!("copyin failed: {failed}");
                break;
            }
        }
    }
    println!("{offset} bytes copied.");
    Station::Mounted(fs)
}

fn do_copyout(station: Station, inode: &str, path: &str) -> Station {
    let Some(inode) = parse_number(inode, "inode") else {
        return station;
    };
    let mut fs = match require_mounted(station) {
        Ok(fs) => fs,
        Err(station) => return station,
    };

    let mut file = match std::fs::File::create(path) {
        Ok(file) => file,
        Err(failed) => {
            println!("unable to create {path}: {failed}");
            return Station::Mounted(fs);
        }
    };

    let mut buffer = [0u8; BLOCK_SIZE];
    let mut offset = 0usize;
    loop {
        match fs.read(inode, &mut buffer, offset) {
            Ok(0) => break,
            Ok(got) => {
                if let Err(failed) = file.write_all(&buffer[..got]) {
                    println!("write to {path} failed: {failed}");
                    break;
                }
                offset += got;
            }
            Err(failed) => {
                println!("copyout failed: {failed}");
                break;
            }
        }
    }
    println!("{offset} bytes copied.");
    Station::Mounted(fs)
}

fn do_dump(station: Station, block: &str) -> Station {
    let Some(block) = parse_number(block, "block") else {
        return station;
    };
    match station {
        Station::Unmounted(mut disk) => {
            let mut buffer = Block::zeroed();
            match disk.read(block, &mut buffer) {
                Ok(()) => print!("{}", hex_view(block, &buffer.data)),
                Err(failed) => println!("dump failed: {failed}"),
            }
            Station::Unmounted(disk)
        }
        mounted => {
            println!("dump works on unmounted disks only.");
            mounted
        }
    }
}

fn parse_number(token: &str, what: &str) -> Option<usize> {
    match token.parse() {
        Ok(number) => Some(number),
        Err(_) => {
            println!("`{token}` is not a valid {what} number.");
            None
        }
    }
}
