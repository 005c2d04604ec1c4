//! Decoded form of a single bytecode instruction.
//!
//! The VM fetch loop and the disassembler share these decode rules, so every
//! opcode byte is interpreted exactly one way.

use std::fmt;

use thiserror::Error;

use crate::opcode::{instruction as codec, OpCode};
use crate::specs::HEADER_LEN;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instruction {
    PushVar(i32),
    PushImm([u8; 4]),
    StoreVar(i32),
    FloatOperation,
    IntOperation,
    Call,
    StartFunc,
    EndFunc,
    Halt,
    Display(i32),
    Move,
    Delay,
    Add,
    Sub,
    Mult,
    Div,
    SetupFrame(i32),
    FreeFrame,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("program is {len} bytes, shorter than its {HEADER_LEN}-byte header")]
    MissingHeader { len: usize },
    #[error("instruction pointer {at} ran past the end of the program")]
    EndOfProgram { at: usize },
    #[error("unknown opcode 0x{byte:02X} at {at}")]
    UnknownOpcode { byte: u8, at: usize },
    #[error("{op} at {at} is missing operand bytes")]
    TruncatedOperand { op: OpCode, at: usize },
}

impl Instruction {
    /// Decode the instruction starting at byte `at` of `program`.
    pub fn decode(program: &[u8], at: usize) -> Result<Self, DecodeError> {
        let byte = *program.get(at).ok_or(DecodeError::EndOfProgram { at })?;
        let op = OpCode::from_u8(byte).ok_or(DecodeError::UnknownOpcode { byte, at })?;

        let truncated = DecodeError::TruncatedOperand { op, at };
        let word = || codec::decode_word(program, at + 1).ok_or(truncated.clone());
        let int = || codec::decode_i32(program, at + 1).ok_or(truncated.clone());

        let inst = match op {
            OpCode::PushVar => Instruction::PushVar(int()?),
            OpCode::PushImm => Instruction::PushImm(word()?),
            OpCode::StoreVar => Instruction::StoreVar(int()?),
            OpCode::FloatOperation => Instruction::FloatOperation,
            OpCode::IntOperation => Instruction::IntOperation,
            OpCode::Call => Instruction::Call,
            OpCode::StartFunc => Instruction::StartFunc,
            OpCode::EndFunc => Instruction::EndFunc,
            OpCode::Halt => Instruction::Halt,
            OpCode::Display => Instruction::Display(int()?),
            OpCode::Move => Instruction::Move,
            OpCode::Delay => Instruction::Delay,
            OpCode::Add => Instruction::Add,
            OpCode::Sub => Instruction::Sub,
            OpCode::Mult => Instruction::Mult,
            OpCode::Div => Instruction::Div,
            OpCode::SetupFrame => Instruction::SetupFrame(int()?),
            OpCode::FreeFrame => Instruction::FreeFrame,
        };
        Ok(inst)
    }

    pub fn opcode(&self) -> OpCode {
        match self {
            Instruction::PushVar(_) => OpCode::PushVar,
            Instruction::PushImm(_) => OpCode::PushImm,
            Instruction::StoreVar(_) => OpCode::StoreVar,
            Instruction::FloatOperation => OpCode::FloatOperation,
            Instruction::IntOperation => OpCode::IntOperation,
            Instruction::Call => OpCode::Call,
            Instruction::StartFunc => OpCode::StartFunc,
            Instruction::EndFunc => OpCode::EndFunc,
            Instruction::Halt => OpCode::Halt,
            Instruction::Display(_) => OpCode::Display,
            Instruction::Move => OpCode::Move,
            Instruction::Delay => OpCode::Delay,
            Instruction::Add => OpCode::Add,
            Instruction::Sub => OpCode::Sub,
            Instruction::Mult => OpCode::Mult,
            Instruction::Div => OpCode::Div,
            Instruction::SetupFrame(_) => OpCode::SetupFrame,
            Instruction::FreeFrame => OpCode::FreeFrame,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.opcode().width()
    }

    pub fn encode(&self, out: &mut Vec<u8>) {
        match *self {
            Instruction::PushVar(operand)
            | Instruction::StoreVar(operand)
            | Instruction::Display(operand)
            | Instruction::SetupFrame(operand) => codec::encode_operand(out, self.opcode(), operand),
            Instruction::PushImm(word) => codec::encode_raw(out, OpCode::PushImm, word),
            _ => codec::encode(out, self.opcode()),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.opcode().name();
        match self {
            Instruction::PushVar(operand)
            | Instruction::StoreVar(operand)
            | Instruction::Display(operand)
            | Instruction::SetupFrame(operand) => write!(f, "{name:<12} {operand}"),
            Instruction::PushImm(word) => write!(
                f,
                "{name:<12} {:02x} {:02x} {:02x} {:02x} (int {}, float {})",
                word[0],
                word[1],
                word[2],
                word[3],
                i32::from_le_bytes(*word),
                f32::from_le_bytes(*word),
            ),
            _ => write!(f, "{name}"),
        }
    }
}

/// Decode every instruction after the version header, paired with its byte
/// offset. Stops at the first undecodable byte.
pub fn decode_program(program: &[u8]) -> Result<Vec<(usize, Instruction)>, DecodeError> {
    if program.len() < HEADER_LEN {
        return Err(DecodeError::MissingHeader { len: program.len() });
    }

    let mut listing = Vec::new();
    let mut at = HEADER_LEN;
    while at < program.len() {
        let inst = Instruction::decode(program, at)?;
        listing.push((at, inst));
        at += inst.width();
    }
    Ok(listing)
}
