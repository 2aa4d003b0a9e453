use std::{fmt::Display, fmt::Formatter};

use clap::Parser;
use log::{info, LevelFilter};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Map the numeric -v setting onto a level. Anything above 5 is Trace.
    pub fn from_level(v: u8) -> Self {
        match v {
            0 => Verbosity::Quiet,
            1 => Verbosity::Errors,
            2 => Verbosity::Warnings,
            3 => Verbosity::Info,
            4 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Off,
            Verbosity::Errors => LevelFilter::Error,
            Verbosity::Warnings => LevelFilter::Warn,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Trace => LevelFilter::Trace,
        }
    }
}

/// Zip, Unzip, Test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Zip,
    Unzip,
    Test,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// All user settable options that control program behavior
#[derive(Debug, Clone)]
pub struct HufOpts {
    /// Names of files to read for input. Empty means stdin.
    pub files: Vec<String>,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Don't remove input files after processing
    pub keep_input_files: bool,
    /// Compress/Decompress/Test
    pub op_mode: Mode,
    /// Location where output is sent
    pub output: Output,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HufOpts {
    pub fn new() -> Self {
        Self {
            files: vec![],
            force_overwrite: false,
            keep_input_files: false,
            op_mode: Mode::Zip,
            output: Output::File,
            verbose: Verbosity::Warnings,
        }
    }
}

impl Default for HufOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Huffman compressor for byte streams",
    long_about = "
    Compresses each file with a Huffman code built from that file's own byte counts.
    The code tree is stored in front of the data, so the output is self-contained.
    With no file names, reads standard input and writes standard output."
)]
pub struct Args {
    /// Files to process
    #[clap()]
    files: Vec<String>,

    /// Compress the input files (default)
    #[clap(short = 'z', long = "compress")]
    compress: bool,

    /// Decompress the input files
    #[clap(short = 'd', long = "decompress", conflicts_with_all = &["compress", "test"])]
    decompress: bool,

    /// Test compressed file integrity
    #[clap(short = 't', long = "test", conflicts_with = "compress")]
    test: bool,

    /// Overwrite existing output files
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Keep (don't delete) input files
    #[clap(short = 'k', long = "keep")]
    keep: bool,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Sets verbosity. 0 is silent, 5 is chatty
    #[clap(short = 'v', long = "verbosity", default_value_t = 2)]
    v: u8,
}

impl Args {
    /// Put command line information from CLAP into our internal structure.
    pub fn into_opts(self) -> HufOpts {
        let mut opts = HufOpts::new();
        opts.files = self.files;
        if self.decompress {
            opts.op_mode = Mode::Unzip;
        }
        if self.test {
            opts.op_mode = Mode::Test;
        }
        opts.force_overwrite = self.force;
        opts.keep_input_files = self.keep;
        if self.stdout || opts.files.is_empty() {
            opts.output = Output::Stdout;
        }
        opts.verbose = Verbosity::from_level(self.v);
        opts
    }
}

/// Parse the command line, set the log level, and report what we are going to do.
pub fn hufopts_init() -> HufOpts {
    let opts = Args::parse().into_opts();

    // Set the log level
    log::set_max_level(opts.verbose.level_filter());

    info!("---- Initialization ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Sending output to {}", opts.output);
    if opts.files.is_empty() {
        info!("Reading from stdin");
    }
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.keep_input_files {
        info!("Keeping input files")
    };
    opts
}

#[cfg(test)]
mod test {
    use super::{Args, Mode, Output, Verbosity};
    use clap::Parser;
    use log::LevelFilter;

    fn opts(args: &[&str]) -> super::HufOpts {
        Args::try_parse_from(args).unwrap().into_opts()
    }

    #[test]
    fn defaults_test() {
        let o = opts(&["huffzip", "a.txt"]);
        assert_eq!(o.op_mode, Mode::Zip);
        assert_eq!(o.output, Output::File);
        assert_eq!(o.files, vec!["a.txt".to_string()]);
        assert_eq!(o.verbose, Verbosity::Warnings);
        assert!(!o.keep_input_files);
        assert!(!o.force_overwrite);
    }

    #[test]
    fn flags_test() {
        let o = opts(&["huffzip", "-d", "-k", "-f", "-v", "5", "a.huf", "b.huf"]);
        assert_eq!(o.op_mode, Mode::Unzip);
        assert!(o.keep_input_files);
        assert!(o.force_overwrite);
        assert_eq!(o.verbose, Verbosity::Trace);
        assert_eq!(o.files.len(), 2);
    }

    #[test]
    fn stdin_goes_to_stdout_test() {
        assert_eq!(opts(&["huffzip"]).output, Output::Stdout);
        assert_eq!(opts(&["huffzip", "-c", "x"]).output, Output::Stdout);
        assert_eq!(opts(&["huffzip", "-t", "x.huf"]).op_mode, Mode::Test);
    }

    #[test]
    fn conflicting_modes_test() {
        assert!(Args::try_parse_from(["huffzip", "-z", "-d", "x"]).is_err());
    }

    #[test]
    fn level_test() {
        assert_eq!(Verbosity::from_level(0).level_filter(), LevelFilter::Off);
        assert_eq!(Verbosity::from_level(3).level_filter(), LevelFilter::Info);
        assert_eq!(Verbosity::from_level(9), Verbosity::Trace);
    }
}
