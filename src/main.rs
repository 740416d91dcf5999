// The shell. Everything in here is a collaborator of the core: it turns
// typed lines into library calls and prints what came back.

// Imports

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use pocket_fs::disk::disk_struct::Disk;

mod shell;

// Structs, Enums, Flags

#[derive(Parser)]
#[command(about = "A pocket-sized filesystem living inside a single image file.")]
struct Cli {
    /// Path to the disk image (created if missing)
    image: PathBuf,

    /// Number of 4096-byte blocks in the image
    blocks: usize,
}

// Implementations

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let disk = match Disk::open(&cli.image, cli.blocks) {
        Ok(disk) => disk,
        Err(failed) => {
            error!("{failed}");
            eprintln!("could not open {}: {failed}", cli.image.display());
            return ExitCode::FAILURE;
        }
    };

    shell::run(disk);
    ExitCode::SUCCESS
}
