use std::{
    fs::File,
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use clap::Parser;
use rayon::prelude::*;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::{Error, Variant};

#[derive(Debug, Parser)]
#[command(name = "murmurhash", version, about = "Print MurmurHash3 digests of files")]
pub struct Args {
    /// Hash variant: 32x86 (also 32, or empty), 128x86 or 128x64.
    #[arg(short, long, default_value = "")]
    pub method: String,
    /// Seed value. The 32x86 and 128x86 variants use its low 32 bits.
    #[arg(short, long, default_value_t = 0)]
    pub seed: u64,
    /// Files to digest. Files that cannot be read are skipped.
    pub files: Vec<PathBuf>,
}

/// Logs to stderr, filtered by `RUST_LOG` (warnings only by default).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub fn digest_reader(mut reader: impl Read, variant: Variant, seed: u64) -> io::Result<Vec<u8>> {
    let mut hasher = variant.hasher(seed);
    io::copy(&mut reader, &mut hasher)?;
    Ok(hasher.digest())
}

pub fn digest_file(path: &Path, variant: Variant, seed: u64) -> Result<Vec<u8>, Error> {
    let to_error = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(to_error)?;
    let digest = digest_reader(file, variant, seed).map_err(to_error)?;
    debug!(path = %path.display(), %variant, seed, "digested file");
    Ok(digest)
}

pub fn format_line(digest: &[u8], path: &Path) -> String {
    format!("{}  {}", hex::encode(digest), path.display())
}

/// Writes one digest line per readable file, in argument order. An unknown
/// variant produces no lines at all.
pub fn run(args: &Args, out: &mut impl Write) -> io::Result<()> {
    let variant = match args.method.parse::<Variant>() {
        Ok(variant) => variant,
        Err(e) => {
            warn!("{e}; no files digested");
            return Ok(());
        }
    };

    let lines: Vec<Option<String>> = args
        .files
        .par_iter()
        .map(|path| match digest_file(path, variant, args.seed) {
            Ok(digest) => Some(format_line(&digest, path)),
            Err(e) => {
                warn!("skipping: {e}");
                None
            }
        })
        .collect();

    for line in lines.into_iter().flatten() {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
