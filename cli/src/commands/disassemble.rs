use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;
use byteorder::{ByteOrder, LittleEndian};
use vm::instruction::decode_program;
use vm::specs::HEADER_LEN;

use super::load_program;

pub fn disassemble_file(path: &Path) -> Result<()> {
    let program = load_program(path)?;
    println!("== Disassembly of {} ==", path.display());
    print!("{}", disassemble(&program)?);
    Ok(())
}

/// One line per instruction, prefixed with its byte offset.
pub fn disassemble(program: &[u8]) -> Result<String> {
    let instructions = decode_program(program)?;

    let mut listing = String::new();
    let version = LittleEndian::read_i32(&program[..HEADER_LEN]);
    writeln!(listing, "version {version}")?;
    for (at, inst) in instructions {
        writeln!(listing, "{at:04} {inst}")?;
    }
    Ok(listing)
}
