mod headless;

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use headless::HeadlessHost;
use pixvm_core::config::{FRAME_INTERVAL, PROGRAM_LIMIT};
use pixvm_core::{Machine, MachineConfig, FATAL_EXIT_STATUS};

#[derive(Parser, Debug)]
#[command(about = "Assemble and run a pixel console program without a window")]
struct Args {
    /// Assembly source file
    file: PathBuf,

    /// Stop after this many presented frames
    #[arg(short, long)]
    max_frames: Option<u64>,

    /// Report logical button 0 or 1 as held for the whole run
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..2))]
    hold: Vec<u8>,

    /// Write the frame buffer to this path as a PPM image when the run ends
    #[arg(long)]
    dump_frame: Option<PathBuf>,

    /// Print the assembled bytecode and exit
    #[arg(short, long)]
    listing: bool,

    /// Minimum milliseconds between sync points
    #[arg(long, default_value_t = FRAME_INTERVAL.as_millis() as u64)]
    frame_interval: u64,

    /// Bytecode capacity in cells
    #[arg(long, default_value_t = PROGRAM_LIMIT)]
    capacity: usize,
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::builder()
        .format(|buf, record| {
            writeln!(buf, "{}: {}", record.level(), record.args())
        })
        .init();
    log::info!("env logger initialized");

    // Text past the last instruction is free-form and need not be UTF-8.
    let source = match fs::read(&args.file) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(err) => {
            log::error!("{}: {}", args.file.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let mut config = MachineConfig::default();
    config.asm.program_capacity = args.capacity;
    config.frame_interval = Duration::from_millis(args.frame_interval);

    let mut vm = match Machine::new_with_source(&source, config) {
        Ok(vm) => vm,
        Err(err) => {
            log::error!("{}: {}", args.file.display(), err);
            return ExitCode::from(FATAL_EXIT_STATUS as u8);
        }
    };

    if args.listing {
        print!("{}", vm.program());
        return ExitCode::SUCCESS;
    }

    let mut host = HeadlessHost::new(&args.hold, args.max_frames);
    let status = match vm.run(&mut host) {
        Ok(exit) => {
            log::info!("{:?} after {} frames", exit, host.frames);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("runtime error: {}", err);
            ExitCode::FAILURE
        }
    };

    if let Some(path) = &args.dump_frame {
        if let Err(err) = headless::write_ppm(path, &vm.screen) {
            log::error!("{}: {}", path.display(), err);
            return ExitCode::FAILURE;
        }
    }

    status
}
