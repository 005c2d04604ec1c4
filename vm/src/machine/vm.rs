use crate::error::RuntimeError;
use crate::host::{Host, OperationMode, StdHost};
use crate::instruction::Instruction;

use super::actions::ActionOps;
use super::arithmetic::ArithmeticOps;
use super::control::ControlFlowOps;
use super::data::DataOps;
use super::stack::Stack;

/// The Virtual Machine struct
///
/// Owns one memory buffer: the program image at the bottom, the stack at the
/// top. Build one with [`VM::load`].
pub struct VM<H: Host = StdHost> {
    pub stack: Stack,
    /// Interpretation of the next typed instruction.
    pub mode: OperationMode,
    /// Byte index of the next instruction.
    pub ip: usize,
    pub(crate) program_len: usize,
    pub(crate) halted: bool,
    /// Receiver for move/delay/display effects (injected by CLI or host)
    pub host: H,
}

impl<H: Host> VM<H> {
    pub(crate) fn with_memory(memory: Box<[u8]>, program_len: usize, ip: usize, host: H) -> Self {
        Self {
            stack: Stack::new(memory, program_len),
            mode: OperationMode::default(),
            ip,
            program_len,
            halted: false,
            host,
        }
    }

    /// The program image, without the stack region above it.
    #[inline]
    pub fn program(&self) -> &[u8] {
        &self.stack.memory()[..self.program_len]
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Main interpretation loop. Runs until `HALT` or the first fault.
    pub fn interpret(&mut self) -> Result<(), RuntimeError> {
        while !self.halted {
            self.step()?;
        }
        Ok(())
    }

    /// Fetch, decode and execute a single instruction.
    pub fn step(&mut self) -> Result<(), RuntimeError> {
        let at = self.ip;
        let inst = Instruction::decode(self.program(), at)?;
        self.ip += inst.width();

        tracing::trace!(ip = at, sp = self.stack.sp(), bp = self.stack.bp(), "{inst}");

        use crate::instruction::Instruction::*;

        match inst {
            Halt => self.halted = true,

            IntOperation => self.mode = OperationMode::Int,
            FloatOperation => self.mode = OperationMode::Float,

            // Arithmetic (delegated to arithmetic.rs)
            Add | Sub | Mult | Div => self.handle_arithmetic(inst)?,

            // Loads, stores and display (delegated to data.rs)
            PushImm(_) | PushVar(_) | StoreVar(_) | Display(_) => self.handle_data(inst)?,

            // Frames and functions (delegated to control.rs)
            SetupFrame(_) | FreeFrame | StartFunc | EndFunc | Call => {
                self.handle_control(inst, at)?
            }

            // Host effects (delegated to actions.rs)
            Move | Delay => self.handle_action(inst)?,
        }

        Ok(())
    }
}
