use thiserror::Error;

use crate::instruction::DecodeError;
use crate::opcode::OpCode;

/// Fatal execution faults. The VM stops at the first one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    #[error("malformed bytecode: {0}")]
    Decode(#[from] DecodeError),
    #[error("stack overflow: pushing at {sp} would enter the program image (ends at {floor})")]
    StackOverflow { sp: usize, floor: usize },
    #[error("stack underflow: nothing to pop at {sp}")]
    StackUnderflow { sp: usize },
    #[error("variable offset {offset} is outside memory (base pointer {bp})")]
    OutOfBounds { offset: i32, bp: usize },
    #[error("invalid frame size {0}")]
    InvalidFrameSize(i32),
    #[error("integer division by zero")]
    DivisionByZero,
    #[error("invalid delay of {0} seconds")]
    InvalidDelay(f32),
    #[error("{0} is reserved and cannot be executed")]
    Reserved(OpCode),
    #[error("START_FUNC at {0} has no matching END_FUNC")]
    UnterminatedFunction(usize),
    #[error("END_FUNC at {0} reached outside of a function call")]
    StrayEndFunc(usize),
}
