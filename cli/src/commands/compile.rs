use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use compiler::Compiler;
use tracing::info;

use super::{read_source, PROGRAM_EXTENSION};

/// Compile the script at `path` and write the program to `output`, or next to
/// the working directory under the script's name. Returns where it was written.
pub fn compile_file(path: &Path, output: Option<&Path>, debug: bool) -> Result<PathBuf> {
    let source = read_source(path)?;

    let mut compiler = Compiler::new();
    let result = compiler.compile(&source);

    if debug {
        if let Some(stats) = compiler.stats {
            info!("compiled in {}us", stats.elapsed.as_micros());
            info!("tokens: {} | bytes: {}", stats.tokens, stats.bytes);
            info!("characters per token: {:.2}", stats.chars_per_token());
            info!("bytes per token: {:.2}", stats.bytes_per_token());
            info!("tokens per byte: {:.2}", stats.tokens_per_byte());
        }
    }

    let bytecode = result?;

    let out_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(path));
    fs::write(&out_path, &bytecode)
        .with_context(|| format!("failed to write {}", out_path.display()))?;

    info!("wrote {} bytes to {}", bytecode.len(), out_path.display());
    Ok(out_path)
}

/// `<script stem>.mcc` in the working directory.
pub fn default_output(path: &Path) -> PathBuf {
    let stem = path.file_stem().unwrap_or(OsStr::new("out"));
    PathBuf::from(stem).with_extension(PROGRAM_EXTENSION)
}
