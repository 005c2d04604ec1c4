use macro_parser::{Token, TokenKind};
use vm::opcode::OpCode;

use crate::codegen::Compiler;
use crate::error::CompilerError;
use crate::types::{Symbol, VarType};

pub trait AtomCompiler {
    /// Emit the load for a literal or variable operand.
    fn compile_atom(&mut self, token: &Token, ty: VarType) -> Result<(), CompilerError>;

    fn resolve_variable(&self, name: &str, line: usize) -> Result<Symbol, CompilerError>;
}

impl AtomCompiler for Compiler {
    fn compile_atom(&mut self, token: &Token, ty: VarType) -> Result<(), CompilerError> {
        match &token.kind {
            // Literals take the target type where they appear; there is no
            // conversion instruction.
            TokenKind::Int(value) => self.emit_raw(OpCode::PushImm, ty.coerce_int(*value)),
            TokenKind::Float(value) => self.emit_raw(OpCode::PushImm, ty.coerce_float(*value)),

            TokenKind::Ident(name) => {
                let symbol = self.resolve_variable(name, token.line)?;
                if symbol.ty != ty {
                    return Err(CompilerError::TypeMismatch {
                        name: name.clone(),
                        expected: ty,
                        found: symbol.ty,
                        line: token.line,
                    });
                }
                self.emit_operand(OpCode::PushVar, symbol.operand());
            }

            other => {
                return Err(CompilerError::InvalidTerm {
                    found: other.to_string(),
                    line: token.line,
                })
            }
        }
        Ok(())
    }

    fn resolve_variable(&self, name: &str, line: usize) -> Result<Symbol, CompilerError> {
        if let Some(symbol) = self.scopes.current().resolve(name) {
            return Ok(symbol);
        }
        if self.functions.contains_key(name) {
            return Err(CompilerError::UnsupportedCall {
                name: name.to_string(),
                line,
            });
        }
        Err(CompilerError::UndeclaredName {
            name: name.to_string(),
            line,
        })
    }
}
