use macro_parser::{Builtin, LexError};
use thiserror::Error;

use crate::types::VarType;

/// A statement the compiler refused. Every variant carries the line it was
/// found on so it can be reported next to the source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompilerError {
    #[error("line {line}: undeclared name `{name}`")]
    UndeclaredName { name: String, line: usize },

    #[error("line {line}: `{name}` is {found} but the expression is {expected}")]
    TypeMismatch {
        name: String,
        expected: VarType,
        found: VarType,
        line: usize,
    },

    #[error("line {line}: expected `<-` after `{name}`, found {found}")]
    ExpectedAssignment {
        name: String,
        found: String,
        line: usize,
    },

    #[error("line {line}: expected operator, found {found}")]
    ExpectedOperator { found: String, line: usize },

    #[error("line {line}: expected value, found {found}")]
    ExpectedValue { found: String, line: usize },

    #[error("line {line}: unbalanced parentheses")]
    UnbalancedParentheses { line: usize },

    #[error("line {line}: {found} cannot appear in an expression")]
    InvalidTerm { found: String, line: usize },

    #[error("line {line}: cannot define function inside of a function")]
    NestedFunction { line: usize },

    #[error("line {line}: `end` outside of a function")]
    EndOutsideFunction { line: usize },

    #[error("line {line}: expected identifier after `{keyword}`, found {found}")]
    ExpectedIdent {
        keyword: Builtin,
        found: String,
        line: usize,
    },

    #[error("line {line}: unexpected {found}")]
    UnexpectedToken { found: String, line: usize },

    #[error("line {line}: `{builtin}` is reserved and not supported yet")]
    ReservedBuiltin { builtin: Builtin, line: usize },

    #[error("line {line}: calling function `{name}` is not supported yet")]
    UnsupportedCall { name: String, line: usize },

    #[error("line {line}: function `{name}` is already defined")]
    DuplicateFunction { name: String, line: usize },

    #[error("line {line}: function `{name}` is missing `end`")]
    UnterminatedFunction { name: String, line: usize },

    #[error("line {line}: too many variables for one frame")]
    FrameTooLarge { line: usize },
}

impl CompilerError {
    /// Source line the error points at.
    pub fn line(&self) -> usize {
        match self {
            CompilerError::UndeclaredName { line, .. }
            | CompilerError::TypeMismatch { line, .. }
            | CompilerError::ExpectedAssignment { line, .. }
            | CompilerError::ExpectedOperator { line, .. }
            | CompilerError::ExpectedValue { line, .. }
            | CompilerError::UnbalancedParentheses { line }
            | CompilerError::InvalidTerm { line, .. }
            | CompilerError::NestedFunction { line }
            | CompilerError::EndOutsideFunction { line }
            | CompilerError::ExpectedIdent { line, .. }
            | CompilerError::UnexpectedToken { line, .. }
            | CompilerError::ReservedBuiltin { line, .. }
            | CompilerError::UnsupportedCall { line, .. }
            | CompilerError::DuplicateFunction { line, .. }
            | CompilerError::UnterminatedFunction { line, .. }
            | CompilerError::FrameTooLarge { line } => *line,
        }
    }
}

/// Why a whole compilation produced no program.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// Lexing failed; parsing was never attempted.
    #[error("lexing failed with {} error(s)", .0.len())]
    Lex(Vec<LexError>),
    /// Lexing succeeded but at least one statement was rejected.
    #[error("compilation failed with {} error(s)", .0.len())]
    Invalid(Vec<CompilerError>),
}

impl CompileError {
    /// Rendered diagnostics, one per line, in source order.
    pub fn diagnostics(&self) -> Vec<String> {
        match self {
            CompileError::Lex(errors) => errors.iter().map(ToString::to_string).collect(),
            CompileError::Invalid(errors) => errors.iter().map(ToString::to_string).collect(),
        }
    }
}
