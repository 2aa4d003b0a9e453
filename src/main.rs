//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use huffzip::compression::files::{compress_files, decompress_files, test_files};
use huffzip::tools::cli::{hufopts_init, Mode};
use huffzip::HuffError;

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> Result<(), HuffError> {
    // Log to stderr so compressed data on stdout stays clean. The real level is set by the cli.
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Could not start logging: {}", e);
    }

    let options = hufopts_init();

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Zip => compress_files(&options),
        Mode::Unzip => decompress_files(&options),
        Mode::Test => test_files(&options),
    };

    match &result {
        Ok(()) => info!("Done."),
        Err(e) => error!("{}", e),
    }
    result
}
