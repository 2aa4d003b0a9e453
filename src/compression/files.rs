use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use super::compress::compress;
use super::decompress::decompress;
use crate::error::{HuffError, Result};
use crate::huffman_coding::tree_from_weights::tree_from_freqs;
use crate::tools::cli::{HufOpts, Output};
use crate::tools::freq_count::freqs;
use crate::tools::report::Report;

/// Extension given to compressed files.
pub const SUFFIX: &str = "huf";

/// Compress a buffer with a tree built from its own byte counts.
pub fn compress_data<W: Write>(data: &[u8], sink: W) -> Result<Report> {
    let tree = tree_from_freqs(&freqs(data))?;
    debug!(
        "Tree has {} leaves, longest code is {} bits",
        tree.leaf_count(),
        tree.depth()
    );
    let bytes_out = compress(&tree, data, sink)?;
    Ok(Report {
        bytes_in: data.len() as u64,
        bytes_out,
    })
}

/// Compress every input file named in opts, or stdin to stdout if there are none.
pub fn compress_files(opts: &HufOpts) -> Result<()> {
    if opts.files.is_empty() {
        let mut data = Vec::new();
        io::stdin().lock().read_to_end(&mut data)?;
        let report = compress_data(&data, io::stdout().lock())?;
        info!("stdin: {}", report);
        return Ok(());
    }

    for name in &opts.files {
        let input = Path::new(name);
        if is_compressed(input) {
            warn!("{} already has .{} suffix, skipping.", name, SUFFIX);
            continue;
        }
        // The whole file is needed twice: once to count, once to code
        let data = fs::read(input)?;
        let report = match opts.output {
            Output::Stdout => compress_data(&data, io::stdout().lock())?,
            Output::File => {
                let target = compressed_name(input);
                write_atomically(&target, opts.force_overwrite, |f| compress_data(&data, f))?
            }
        };
        info!("{}: {}", name, report);
        finish_input(opts, input)?;
    }
    Ok(())
}

/// Decompress every input file named in opts, or stdin to stdout if there are none.
pub fn decompress_files(opts: &HufOpts) -> Result<()> {
    if opts.files.is_empty() {
        let bytes_out = decompress(io::stdin().lock(), io::stdout().lock())?;
        info!("stdin: {} bytes", bytes_out);
        return Ok(());
    }

    for name in &opts.files {
        let input = Path::new(name);
        let bytes_in = fs::metadata(input)?.len();
        let bytes_out = match opts.output {
            Output::Stdout => decompress(File::open(input)?, io::stdout().lock())?,
            Output::File => {
                let target = decompressed_name(input);
                write_atomically(&target, opts.force_overwrite, |f| {
                    decompress(File::open(input)?, f)
                })?
            }
        };
        info!("{}: {}", name, Report { bytes_in, bytes_out });
        finish_input(opts, input)?;
    }
    Ok(())
}

/// Decode every input file (or stdin) without writing anything, and report which ones are
/// damaged. Every file is checked even if an earlier one fails; the last failure is returned.
pub fn test_files(opts: &HufOpts) -> Result<()> {
    if opts.files.is_empty() {
        decompress(io::stdin().lock(), io::sink())?;
        info!("stdin: ok");
        return Ok(());
    }

    let mut failure = None;
    for name in &opts.files {
        match File::open(name)
            .map_err(HuffError::from)
            .and_then(|f| decompress(f, io::sink()))
        {
            Ok(bytes) => info!("{}: ok ({} bytes)", name, bytes),
            Err(e) => {
                error!("{}: {}", name, e);
                failure = Some(e);
            }
        }
    }
    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// True if the file name carries the compressed suffix.
pub fn is_compressed(input: &Path) -> bool {
    input.extension().map_or(false, |ext| ext == SUFFIX)
}

/// name -> name.huf
pub fn compressed_name(input: &Path) -> PathBuf {
    append(input, &format!(".{}", SUFFIX))
}

/// name.huf -> name. Names without the suffix get ".out" added instead.
pub fn decompressed_name(input: &Path) -> PathBuf {
    if is_compressed(input) {
        input.with_extension("")
    } else {
        warn!(
            "{} has no .{} suffix, writing to {}.out",
            input.display(),
            SUFFIX,
            input.display()
        );
        append(input, ".out")
    }
}

fn append(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Run work against a temporary file next to target, and move it onto target only if work
/// succeeds. On failure the temporary file is removed and target is left untouched.
pub fn write_atomically<T, F>(target: &Path, force: bool, work: F) -> Result<T>
where
    F: FnOnce(&mut File) -> Result<T>,
{
    if target.exists() && !force {
        error!("Output file {} already exists.", target.display());
        return Err(HuffError::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} already exists (use --force to overwrite)", target.display()),
        )));
    }

    let temp = append(target, ".tmp");
    let mut file = File::create(&temp)?;
    let result = work(&mut file);
    drop(file);

    match result {
        Ok(value) => {
            fs::rename(&temp, target)?;
            debug!("Moved {} to {}", temp.display(), target.display());
            Ok(value)
        }
        Err(e) => {
            if let Err(rm) = fs::remove_file(&temp) {
                warn!("Could not remove {}: {}", temp.display(), rm);
            }
            Err(e)
        }
    }
}

/// Delete the input file after a successful run, unless asked to keep it.
fn finish_input(opts: &HufOpts, input: &Path) -> Result<()> {
    if opts.keep_input_files || opts.output == Output::Stdout {
        return Ok(());
    }
    fs::remove_file(input)?;
    debug!("Removed {}", input.display());
    Ok(())
}
