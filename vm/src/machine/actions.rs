use std::time::Duration;

use crate::error::RuntimeError;
use crate::host::Host;
use crate::instruction::Instruction;

/// Trait for instructions that reach the host: cursor movement and delays.
pub trait ActionOps {
    fn handle_action(&mut self, inst: Instruction) -> Result<(), RuntimeError>;
}

impl<H: Host> ActionOps for super::vm::VM<H> {
    fn handle_action(&mut self, inst: Instruction) -> Result<(), RuntimeError> {
        match inst {
            Instruction::Move => {
                let y = self.stack.pop_i32()?;
                let x = self.stack.pop_i32()?;
                tracing::trace!("MOVE | x: {x} | y: {y}");
                self.host.move_to(x, y);
            }

            Instruction::Delay => {
                let seconds = self.stack.pop_f32()?;
                let duration = Duration::try_from_secs_f32(seconds)
                    .map_err(|_| RuntimeError::InvalidDelay(seconds))?;
                tracing::trace!("DELAY | time: {seconds}s");
                self.host.delay(duration);
            }

            _ => unreachable!(),
        }

        Ok(())
    }
}
