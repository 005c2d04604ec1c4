use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use vm::{Host, StdHost, VM};

use super::{is_script, read_source};

/// Run a script or a compiled program. Programs are streamed straight into
/// the VM; scripts are compiled in memory first.
pub fn run_file(path: &Path, memory_kb: usize) -> Result<()> {
    if is_script(path) {
        let program = compiler::compile(&read_source(path)?)?;
        info!("running {}", path.display());
        run_program(&program, memory_kb, StdHost)?;
        return Ok(());
    }

    let mut file =
        File::open(path).with_context(|| format!("failed to read {}", path.display()))?;
    let mut vm = VM::load_executable(&mut file, memory_budget(memory_kb)?, StdHost)?;
    info!("running {}", path.display());
    vm.interpret()?;
    Ok(())
}

/// Load `program` into `memory_kb` KiB of memory and run it to `HALT`.
/// Hands the host back so callers can inspect what it received.
pub fn run_program<H: Host>(program: &[u8], memory_kb: usize, host: H) -> Result<H> {
    let mut vm = VM::load(program, memory_budget(memory_kb)?, host)?;
    vm.interpret()?;
    Ok(vm.into_host())
}

fn memory_budget(memory_kb: usize) -> Result<usize> {
    memory_kb
        .checked_mul(1024)
        .with_context(|| format!("memory budget of {memory_kb} KiB is too large"))
}
