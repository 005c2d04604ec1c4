use crate::error::RuntimeError;
use crate::host::{Host, Scalar};
use crate::instruction::Instruction;

/// Trait for stack load/store instruction handlers
pub trait DataOps {
    fn handle_data(&mut self, inst: Instruction) -> Result<(), RuntimeError>;
}

impl<H: Host> DataOps for super::vm::VM<H> {
    fn handle_data(&mut self, inst: Instruction) -> Result<(), RuntimeError> {
        match inst {
            Instruction::PushImm(word) => {
                self.stack.push(word)?;
                tracing::trace!("PUSH_IMM | value: {}", Scalar::from_word(self.mode, word));
            }

            Instruction::PushVar(offset) => {
                let word = self.stack.read_offset(offset)?;
                self.stack.push(word)?;
                tracing::trace!(
                    "PUSH_VAR | value: {} | offset: {offset}",
                    Scalar::from_word(self.mode, word)
                );
            }

            Instruction::StoreVar(offset) => {
                let word = self.stack.pop()?;
                self.stack.write_offset(offset, word)?;
                tracing::trace!(
                    "STORE_VAR | value: {} | offset: {offset}",
                    Scalar::from_word(self.mode, word)
                );
            }

            Instruction::Display(offset) => {
                let value = Scalar::from_word(self.mode, self.stack.read_offset(offset)?);
                self.host.display(offset, value);
            }

            _ => unreachable!(),
        }

        Ok(())
    }
}
