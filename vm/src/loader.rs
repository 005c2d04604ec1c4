use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};
use thiserror::Error;

use crate::host::Host;
use crate::specs::{BYTECODE_VERSION, HEADER_LEN};
use crate::VM;

/// Startup faults: the program was rejected before any instruction ran.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("failed to read program: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid program: {len} bytes is shorter than the {HEADER_LEN}-byte header")]
    TooShort { len: usize },
    #[error("runtime supports bytecode version {expected} but program is version {found}")]
    VersionMismatch { expected: i32, found: i32 },
    #[error("program of {len} bytes does not fit in {budget} bytes of memory")]
    ProgramTooLarge { len: usize, budget: usize },
    #[error("memory budget of {0} bytes exceeds the 4 GiB address space")]
    BudgetTooLarge(usize),
}

impl<H: Host> VM<H> {
    /// Validate `program` and copy it into a fresh memory buffer of
    /// `memory_budget` bytes. Execution will start right after the version
    /// header.
    pub fn load(program: &[u8], memory_budget: usize, host: H) -> Result<Self, LoaderError> {
        if program.len() < HEADER_LEN {
            return Err(LoaderError::TooShort { len: program.len() });
        }

        let found = (&program[..HEADER_LEN]).read_i32::<LittleEndian>()?;
        if found != BYTECODE_VERSION {
            return Err(LoaderError::VersionMismatch {
                expected: BYTECODE_VERSION,
                found,
            });
        }

        if memory_budget < program.len() {
            return Err(LoaderError::ProgramTooLarge {
                len: program.len(),
                budget: memory_budget,
            });
        }
        if u32::try_from(memory_budget).is_err() {
            return Err(LoaderError::BudgetTooLarge(memory_budget));
        }

        let mut memory = vec![0u8; memory_budget].into_boxed_slice();
        memory[..program.len()].copy_from_slice(program);

        tracing::debug!(
            program_len = program.len(),
            memory_budget,
            "program loaded"
        );

        Ok(VM::with_memory(memory, program.len(), HEADER_LEN, host))
    }

    /// Read a whole executable (`.mcc`) from `reader` and load it.
    pub fn load_executable<R: Read>(
        reader: &mut R,
        memory_budget: usize,
        host: H,
    ) -> Result<Self, LoaderError> {
        let mut program = Vec::new();
        reader.read_to_end(&mut program)?;
        Self::load(&program, memory_budget, host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;

    fn header(version: i32) -> Vec<u8> {
        version.to_le_bytes().to_vec()
    }

    #[test]
    fn rejects_short_program() {
        let err = VM::load(&[1, 0], 64, RecordingHost::new()).err().unwrap();
        assert!(matches!(err, LoaderError::TooShort { len: 2 }));
    }

    #[test]
    fn rejects_wrong_version() {
        let err = VM::load(&header(2), 64, RecordingHost::new()).err().unwrap();
        assert!(matches!(
            err,
            LoaderError::VersionMismatch {
                expected: 1,
                found: 2
            }
        ));
    }

    #[test]
    fn rejects_program_larger_than_memory() {
        let mut program = header(1);
        program.extend([0x0A; 8]);
        let err = VM::load(&program, 8, RecordingHost::new()).err().unwrap();
        assert!(matches!(
            err,
            LoaderError::ProgramTooLarge { len: 12, budget: 8 }
        ));
    }

    #[test]
    fn copies_program_to_low_memory() {
        let mut program = header(1);
        program.push(0x0A);
        let vm = VM::load(&program, 64, RecordingHost::new()).unwrap();
        assert_eq!(vm.ip, HEADER_LEN);
        assert_eq!(vm.program(), &program[..]);
        assert_eq!(vm.stack.memory().len(), 64);
        assert_eq!(vm.stack.sp(), 64);
    }

    #[test]
    fn loads_from_reader() {
        let mut program = header(1);
        program.push(0x0A);
        let mut cursor = std::io::Cursor::new(program);
        let mut vm = VM::load_executable(&mut cursor, 64, RecordingHost::new()).unwrap();
        vm.interpret().unwrap();
        assert!(vm.is_halted());
    }
}
