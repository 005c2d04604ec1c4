use crate::error::RuntimeError;
use crate::host::{Host, OperationMode};
use crate::instruction::Instruction;

/// Trait for arithmetic instruction handlers
pub trait ArithmeticOps {
    fn handle_arithmetic(&mut self, inst: Instruction) -> Result<(), RuntimeError>;
}

impl<H: Host> ArithmeticOps for super::vm::VM<H> {
    fn handle_arithmetic(&mut self, inst: Instruction) -> Result<(), RuntimeError> {
        // The same opcode byte means integer or float arithmetic depending on
        // the last mode instruction, never on the operands.
        let word = match self.mode {
            OperationMode::Int => {
                let right = self.stack.pop_i32()?;
                let left = self.stack.pop_i32()?;
                let result = match inst {
                    Instruction::Add => left.wrapping_add(right),
                    Instruction::Sub => left.wrapping_sub(right),
                    Instruction::Mult => left.wrapping_mul(right),
                    Instruction::Div => {
                        if right == 0 {
                            return Err(RuntimeError::DivisionByZero);
                        }
                        left.wrapping_div(right)
                    }
                    _ => unreachable!(),
                };
                tracing::trace!("{} | {left}, {right} -> {result}", inst.opcode());
                result.to_le_bytes()
            }

            OperationMode::Float => {
                let right = self.stack.pop_f32()?;
                let left = self.stack.pop_f32()?;
                // IEEE semantics: division by zero yields an infinity or NaN.
                let result = match inst {
                    Instruction::Add => left + right,
                    Instruction::Sub => left - right,
                    Instruction::Mult => left * right,
                    Instruction::Div => left / right,
                    _ => unreachable!(),
                };
                tracing::trace!("{} | {left}, {right} -> {result}", inst.opcode());
                result.to_le_bytes()
            }
        };

        self.stack.push(word)
    }
}
