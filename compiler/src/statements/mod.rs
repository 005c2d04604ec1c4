use macro_parser::{Operator, Token, TokenKind};
use vm::opcode::OpCode;

use crate::codegen::Compiler;
use crate::error::CompilerError;
use crate::expressions::{AtomCompiler, ExpressionCompiler};

pub mod builtins;
pub mod declarations;

use builtins::BuiltinCompiler;

pub trait StatementCompiler {
    fn compile_statement(&mut self, token: &Token) -> Result<(), CompilerError>;

    /// `name <- expression`, with the current token on `name`.
    fn compile_assignment(&mut self, name: &str, line: usize) -> Result<(), CompilerError>;

    /// Require that nothing but the end of the line follows the current token.
    fn finish_statement(&mut self) -> Result<(), CompilerError>;
}

impl StatementCompiler for Compiler {
    fn compile_statement(&mut self, token: &Token) -> Result<(), CompilerError> {
        match &token.kind {
            TokenKind::Ident(name) => self.compile_assignment(name, token.line),
            TokenKind::Builtin(builtin) => self.compile_builtin(*builtin, token.line),
            other => Err(CompilerError::UnexpectedToken {
                found: other.to_string(),
                line: token.line,
            }),
        }
    }

    fn compile_assignment(&mut self, name: &str, line: usize) -> Result<(), CompilerError> {
        let symbol = self.resolve_variable(name, line)?;

        self.advance();
        let next = self.current();
        if next.kind != TokenKind::Operator(Operator::Assign) {
            return Err(CompilerError::ExpectedAssignment {
                name: name.to_string(),
                found: next.kind.to_string(),
                line: next.line,
            });
        }

        self.emit(symbol.ty.mode_opcode());
        self.compile_expression(symbol.ty)?;
        self.emit_operand(OpCode::StoreVar, symbol.operand());
        Ok(())
    }

    fn finish_statement(&mut self) -> Result<(), CompilerError> {
        if self.current().kind.ends_statement() {
            return Ok(());
        }
        self.advance();
        let token = self.current();
        if token.kind.ends_statement() {
            Ok(())
        } else {
            Err(CompilerError::UnexpectedToken {
                found: token.kind.to_string(),
                line: token.line,
            })
        }
    }
}
