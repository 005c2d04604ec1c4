use macro_parser::Operator;
use vm::opcode::OpCode;

use crate::codegen::Compiler;
use crate::error::CompilerError;

/// Operator handling for the shunting-yard scan. Pending operators wait on a
/// stack until an operator of lower or equal precedence (or the end of the
/// expression) forces them out.
pub trait BinaryCompiler {
    fn compile_operator(
        &mut self,
        op: Operator,
        pending: &mut Vec<Operator>,
        expect_operator: bool,
        line: usize,
    ) -> Result<(), CompilerError>;

    /// Emit everything still pending, innermost first.
    fn flush_operators(
        &mut self,
        pending: &mut Vec<Operator>,
        line: usize,
    ) -> Result<(), CompilerError>;

    fn emit_operator(&mut self, op: Operator);
}

impl BinaryCompiler for Compiler {
    fn compile_operator(
        &mut self,
        op: Operator,
        pending: &mut Vec<Operator>,
        expect_operator: bool,
        line: usize,
    ) -> Result<(), CompilerError> {
        match op {
            Operator::LeftParen => {
                if expect_operator {
                    return Err(CompilerError::ExpectedOperator {
                        found: format!("`{op}`"),
                        line,
                    });
                }
                pending.push(op);
            }

            Operator::RightParen => {
                if !expect_operator {
                    return Err(CompilerError::ExpectedValue {
                        found: format!("`{op}`"),
                        line,
                    });
                }
                loop {
                    match pending.pop() {
                        Some(Operator::LeftParen) => break,
                        Some(top) => self.emit_operator(top),
                        None => return Err(CompilerError::UnbalancedParentheses { line }),
                    }
                }
            }

            Operator::Assign => {
                return Err(CompilerError::InvalidTerm {
                    found: format!("`{op}`"),
                    line,
                })
            }

            Operator::Add | Operator::Subtract | Operator::Multiply | Operator::Divide => {
                if !expect_operator {
                    return Err(CompilerError::ExpectedValue {
                        found: format!("`{op}`"),
                        line,
                    });
                }
                // Equal precedence pops too: `a - b - c` is `(a - b) - c`.
                while let Some(&top) = pending.last() {
                    if top == Operator::LeftParen || op.precedence() > top.precedence() {
                        break;
                    }
                    pending.pop();
                    self.emit_operator(top);
                }
                pending.push(op);
            }
        }
        Ok(())
    }

    fn flush_operators(
        &mut self,
        pending: &mut Vec<Operator>,
        line: usize,
    ) -> Result<(), CompilerError> {
        while let Some(op) = pending.pop() {
            if op == Operator::LeftParen {
                return Err(CompilerError::UnbalancedParentheses { line });
            }
            self.emit_operator(op);
        }
        Ok(())
    }

    fn emit_operator(&mut self, op: Operator) {
        let opcode = match op {
            Operator::Add => OpCode::Add,
            Operator::Subtract => OpCode::Sub,
            Operator::Multiply => OpCode::Mult,
            Operator::Divide => OpCode::Div,
            // Only arithmetic operators and `(` are ever pending, and `(` is
            // consumed by its `)`.
            Operator::Assign | Operator::LeftParen | Operator::RightParen => unreachable!(),
        };
        self.emit(opcode);
    }
}
