pub mod compile;
pub mod disassemble;
pub mod run;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Extension of Macro source scripts.
pub const SOURCE_EXTENSION: &str = "mcs";
/// Extension of compiled programs.
pub const PROGRAM_EXTENSION: &str = "mcc";

pub fn is_script(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// Read a script as text, minus any UTF-8 byte order mark.
pub fn read_source(path: &Path) -> Result<String> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    match source.strip_prefix('\u{feff}') {
        Some(rest) => Ok(rest.to_string()),
        None => Ok(source),
    }
}

/// Read a program from `path`, compiling it first when it is a script.
pub fn load_program(path: &Path) -> Result<Vec<u8>> {
    if is_script(path) {
        return Ok(compiler::compile(&read_source(path)?)?);
    }
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}
