//! OpCode definitions for the Macro VM
//!
//! Instructions are variable width: a one-byte opcode, optionally followed by
//! a 4-byte little-endian operand.
//!
//! Format N: [8-bit opcode]
//! Format W: [8-bit opcode][32-bit operand, little-endian]

use std::fmt;

/// Virtual machine instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    // ===== Data =====
    /// Push variable: push Mem[BP - W]
    PushVar = 0x02,
    /// Push immediate: push W verbatim
    PushImm = 0x03,
    /// Store variable: Mem[BP - W] = pop
    StoreVar = 0x04,

    // ===== Operation Mode =====
    /// Interpret following arithmetic and displays as f32
    FloatOperation = 0x05,
    /// Interpret following arithmetic and displays as i32
    IntOperation = 0x06,

    // ===== Functions =====
    /// Reserved. No code path emits it yet.
    Call = 0x07,
    StartFunc = 0x08,
    EndFunc = 0x09,

    // ===== Special =====
    Halt = 0x0A,
    /// Display variable: print Mem[BP - W]
    Display = 0x0B,

    // ===== Actions =====
    /// Move cursor: y = pop, x = pop
    Move = 0x0C,
    /// Sleep: seconds = pop (f32)
    Delay = 0x0D,

    // ===== Arithmetic =====
    /// right = pop, left = pop, push left + right
    Add = 0x20,
    Sub = 0x21,
    Mult = 0x22,
    Div = 0x23,

    // ===== Frames =====
    /// Push BP, BP = SP, SP -= W
    SetupFrame = 0x40,
    /// SP = BP, BP = pop
    FreeFrame = 0x41,
}

impl OpCode {
    /// Get opcode from byte value
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0x02 => Some(OpCode::PushVar),
            0x03 => Some(OpCode::PushImm),
            0x04 => Some(OpCode::StoreVar),
            0x05 => Some(OpCode::FloatOperation),
            0x06 => Some(OpCode::IntOperation),
            0x07 => Some(OpCode::Call),
            0x08 => Some(OpCode::StartFunc),
            0x09 => Some(OpCode::EndFunc),
            0x0A => Some(OpCode::Halt),
            0x0B => Some(OpCode::Display),
            0x0C => Some(OpCode::Move),
            0x0D => Some(OpCode::Delay),
            0x20 => Some(OpCode::Add),
            0x21 => Some(OpCode::Sub),
            0x22 => Some(OpCode::Mult),
            0x23 => Some(OpCode::Div),
            0x40 => Some(OpCode::SetupFrame),
            0x41 => Some(OpCode::FreeFrame),
            _ => None,
        }
    }

    /// Convert opcode to byte value
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether a 4-byte operand follows the opcode byte.
    pub fn has_operand(self) -> bool {
        matches!(
            self,
            OpCode::PushVar
                | OpCode::PushImm
                | OpCode::StoreVar
                | OpCode::Display
                | OpCode::SetupFrame
        )
    }

    /// Total encoded width in bytes, opcode included.
    #[inline]
    pub fn width(self) -> usize {
        if self.has_operand() {
            1 + crate::specs::WORD
        } else {
            1
        }
    }

    /// Get human-readable name
    pub fn name(self) -> &'static str {
        match self {
            OpCode::PushVar => "PUSH_VAR",
            OpCode::PushImm => "PUSH_IMM",
            OpCode::StoreVar => "STORE_VAR",
            OpCode::FloatOperation => "FLOAT_OP",
            OpCode::IntOperation => "INT_OP",
            OpCode::Call => "CALL",
            OpCode::StartFunc => "START_FUNC",
            OpCode::EndFunc => "END_FUNC",
            OpCode::Halt => "HALT",
            OpCode::Display => "DISPLAY",
            OpCode::Move => "MOVE",
            OpCode::Delay => "DELAY",
            OpCode::Add => "ADD",
            OpCode::Sub => "SUB",
            OpCode::Mult => "MULT",
            OpCode::Div => "DIV",
            OpCode::SetupFrame => "SETUP_FRAME",
            OpCode::FreeFrame => "FREE_FRAME",
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Instruction encoding/decoding utilities
pub mod instruction {
    use byteorder::{ByteOrder, LittleEndian};

    use super::OpCode;

    /// Append a bare opcode.
    #[inline]
    pub fn encode(out: &mut Vec<u8>, op: OpCode) {
        out.push(op.as_u8());
    }

    /// Append an opcode followed by an i32 operand.
    #[inline]
    pub fn encode_operand(out: &mut Vec<u8>, op: OpCode, operand: i32) {
        let mut word = [0u8; 4];
        LittleEndian::write_i32(&mut word, operand);
        encode_raw(out, op, word);
    }

    /// Append an opcode followed by four raw operand bytes.
    #[inline]
    pub fn encode_raw(out: &mut Vec<u8>, op: OpCode, word: [u8; 4]) {
        out.push(op.as_u8());
        out.extend_from_slice(&word);
    }

    /// Read the four bytes at `at`, if the program is long enough.
    #[inline]
    pub fn decode_word(program: &[u8], at: usize) -> Option<[u8; 4]> {
        let bytes = program.get(at..at.checked_add(4)?)?;
        let mut word = [0u8; 4];
        word.copy_from_slice(bytes);
        Some(word)
    }

    /// Read the little-endian i32 at `at`.
    #[inline]
    pub fn decode_i32(program: &[u8], at: usize) -> Option<i32> {
        decode_word(program, at).map(|w| LittleEndian::read_i32(&w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use instruction::*;

    #[test]
    fn test_opcode_conversion() {
        assert_eq!(OpCode::Add.as_u8(), 0x20);
        assert_eq!(OpCode::from_u8(0x20), Some(OpCode::Add));
        assert_eq!(OpCode::from_u8(0x41), Some(OpCode::FreeFrame));
        assert_eq!(OpCode::from_u8(0x00), None); // legacy register load, retired
        assert_eq!(OpCode::from_u8(0xFF), None);
    }

    #[test]
    fn test_every_opcode_round_trips() {
        for byte in 0..=u8::MAX {
            if let Some(op) = OpCode::from_u8(byte) {
                assert_eq!(op.as_u8(), byte, "{op}");
            }
        }
    }

    #[test]
    fn test_widths() {
        assert_eq!(OpCode::PushImm.width(), 5);
        assert_eq!(OpCode::SetupFrame.width(), 5);
        assert_eq!(OpCode::Add.width(), 1);
        assert_eq!(OpCode::Halt.width(), 1);
    }

    #[test]
    fn test_operand_encoding() {
        let mut out = Vec::new();
        encode_operand(&mut out, OpCode::StoreVar, 260);
        assert_eq!(out, vec![0x04, 0x04, 0x01, 0x00, 0x00]);
        assert_eq!(decode_i32(&out, 1), Some(260));
        assert_eq!(decode_i32(&out, 2), None);
    }
}
