/// Lexer errors with source location.
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("lex error at line {line}: {kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: usize,
}

impl LexError {
    pub fn new(kind: LexErrorKind, line: usize) -> Self {
        Self { kind, line }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unexpected end of file in {0}")]
    UnexpectedEof(&'static str),
    #[error("unknown symbol `{0}`")]
    UnknownSymbol(char),
    #[error("expected `-` after `<`, found `{0}`")]
    DanglingLessThan(char),
}
