use std::fmt;

use vm::opcode::OpCode;

/// Declared type of a variable. Every expression is compiled for the type of
/// the variable it is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarType {
    Int,
    Float,
}

impl VarType {
    /// Mode instruction that makes the VM interpret arithmetic as this type.
    pub fn mode_opcode(self) -> OpCode {
        match self {
            VarType::Int => OpCode::IntOperation,
            VarType::Float => OpCode::FloatOperation,
        }
    }

    /// Encode an integer literal as an immediate of this type.
    pub fn coerce_int(self, value: i32) -> [u8; 4] {
        match self {
            VarType::Int => value.to_le_bytes(),
            VarType::Float => (value as f32).to_le_bytes(),
        }
    }

    /// Encode a float literal as an immediate of this type. Conversion to
    /// int truncates toward zero.
    pub fn coerce_float(self, value: f32) -> [u8; 4] {
        match self {
            VarType::Int => (value as i32).to_le_bytes(),
            VarType::Float => value.to_le_bytes(),
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarType::Int => f.write_str("int"),
            VarType::Float => f.write_str("float"),
        }
    }
}

/// A declared variable: its type and its byte offset below the frame base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub ty: VarType,
    pub offset: u32,
}

impl Symbol {
    /// The offset as an instruction operand. Symbol tables never hand out
    /// offsets above `i32::MAX`.
    pub fn operand(&self) -> i32 {
        self.offset as i32
    }
}
