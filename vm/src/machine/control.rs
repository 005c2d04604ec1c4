use crate::error::RuntimeError;
use crate::host::Host;
use crate::instruction::Instruction;
use crate::opcode::OpCode;

/// Trait for frame and function instruction handlers
pub trait ControlFlowOps {
    fn handle_control(&mut self, inst: Instruction, at: usize) -> Result<(), RuntimeError>;

    /// Byte index just past the `END_FUNC` closing the function whose
    /// `START_FUNC` sits at `at`.
    fn function_end(&self, at: usize) -> Result<usize, RuntimeError>;
}

impl<H: Host> ControlFlowOps for super::vm::VM<H> {
    fn handle_control(&mut self, inst: Instruction, at: usize) -> Result<(), RuntimeError> {
        match inst {
            Instruction::SetupFrame(size) => {
                self.stack.setup_frame(size)?;
                tracing::debug!(size, bp = self.stack.bp(), "frame set up");
            }

            Instruction::FreeFrame => {
                self.stack.pop_frame()?;
                tracing::debug!(bp = self.stack.bp(), "frame freed");
            }

            // Function bodies only run when called. Falling into one skips it.
            Instruction::StartFunc => {
                self.ip = self.function_end(at)?;
            }

            Instruction::EndFunc => return Err(RuntimeError::StrayEndFunc(at)),

            Instruction::Call => return Err(RuntimeError::Reserved(OpCode::Call)),

            _ => unreachable!(),
        }

        Ok(())
    }

    fn function_end(&self, at: usize) -> Result<usize, RuntimeError> {
        let program = self.program();
        let mut cursor = at + OpCode::StartFunc.width();
        while cursor < program.len() {
            let inst = Instruction::decode(program, cursor)?;
            cursor += inst.width();
            if inst == Instruction::EndFunc {
                return Ok(cursor);
            }
        }
        Err(RuntimeError::UnterminatedFunction(at))
    }
}
