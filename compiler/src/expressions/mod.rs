use macro_parser::{Operator, TokenKind};

use crate::codegen::Compiler;
use crate::error::CompilerError;
use crate::types::VarType;

pub mod atoms;
pub mod binary;

pub use atoms::AtomCompiler;
pub use binary::BinaryCompiler;

pub trait ExpressionCompiler {
    /// Compile the expression following the current token, coercing every
    /// operand to `ty`. Stops on the end of the statement, or, inside
    /// built-in arguments, one token before a value that follows a value.
    fn compile_expression(&mut self, ty: VarType) -> Result<(), CompilerError>;
}

impl ExpressionCompiler for Compiler {
    fn compile_expression(&mut self, ty: VarType) -> Result<(), CompilerError> {
        let start = self.current();
        if start.kind.ends_statement() {
            return Err(CompilerError::ExpectedValue {
                found: start.kind.to_string(),
                line: start.line,
            });
        }

        let mut pending: Vec<Operator> = Vec::new();
        let mut expect_operator = false;

        loop {
            self.advance();
            let token = self.current().clone();
            match &token.kind {
                kind if kind.ends_statement() => break,

                TokenKind::Operator(Operator::LeftParen) if expect_operator && self.in_call_args => {
                    self.retreat();
                    break;
                }

                TokenKind::Operator(op) => {
                    self.compile_operator(*op, &mut pending, expect_operator, token.line)?;
                    expect_operator = *op == Operator::RightParen;
                }

                TokenKind::Int(_) | TokenKind::Float(_) | TokenKind::Ident(_) => {
                    if expect_operator {
                        if self.in_call_args {
                            // Start of the next argument.
                            self.retreat();
                            break;
                        }
                        return Err(CompilerError::ExpectedOperator {
                            found: token.kind.to_string(),
                            line: token.line,
                        });
                    }
                    self.compile_atom(&token, ty)?;
                    expect_operator = true;
                }

                other => {
                    return Err(CompilerError::InvalidTerm {
                        found: other.to_string(),
                        line: token.line,
                    })
                }
            }
        }

        let end = self.current();
        let (found, line) = (end.kind.to_string(), end.line);
        if !expect_operator {
            return Err(CompilerError::ExpectedValue { found, line });
        }
        self.flush_operators(&mut pending, line)
    }
}
