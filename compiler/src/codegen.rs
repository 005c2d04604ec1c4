use std::collections::HashMap;
use std::time::{Duration, Instant};

use macro_parser::{Token, TokenKind};
use tracing::{error, info};
use vm::opcode::{instruction, OpCode};
use vm::specs::{BYTECODE_VERSION, GLOBAL_FRAME_SIZE_OFFSET};

use crate::error::{CompileError, CompilerError};
use crate::scopes::Scopes;
use crate::statements::StatementCompiler;

/// Returned by the cursor once it runs past the token list.
static END_OF_SOURCE: Token = Token {
    kind: TokenKind::EndOfSource,
    line: 0,
};

/// Size ratios of the last compilation, for `compile -d`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompileStats {
    pub source_chars: usize,
    pub tokens: usize,
    pub bytes: usize,
    pub elapsed: Duration,
}

impl CompileStats {
    pub fn chars_per_token(&self) -> f64 {
        self.source_chars as f64 / self.tokens.max(1) as f64
    }

    pub fn bytes_per_token(&self) -> f64 {
        self.bytes as f64 / self.tokens.max(1) as f64
    }

    pub fn tokens_per_byte(&self) -> f64 {
        self.tokens as f64 / self.bytes.max(1) as f64
    }
}

/// Function being defined between `start` and `end`.
#[derive(Debug, Clone)]
pub(crate) struct OpenFunction {
    pub name: String,
    pub line: usize,
}

/// Single-pass compiler: walks the token list once and appends bytecode as it
/// goes. Faulty statements are reported and skipped so one run surfaces every
/// error in the script.
pub struct Compiler {
    pub(crate) bytecode: Vec<u8>,
    pub(crate) tokens: Vec<Token>,
    pub(crate) pos: usize,
    pub scopes: Scopes,
    /// Function name -> byte offset of its `START_FUNC`.
    pub functions: HashMap<String, usize>,
    pub(crate) open_function: Option<OpenFunction>,
    /// Set while compiling the arguments of `move` or `delay`: a value where
    /// an operator was expected ends the current argument.
    pub(crate) in_call_args: bool,
    pub errors: Vec<CompilerError>,
    pub stats: Option<CompileStats>,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self {
            bytecode: Vec::new(),
            tokens: Vec::new(),
            pos: 0,
            scopes: Scopes::default(),
            functions: HashMap::new(),
            open_function: None,
            in_call_args: false,
            errors: Vec::new(),
            stats: None,
        }
    }

    /// Compile a whole script. Returns the program, or every error found.
    pub fn compile(&mut self, source: &str) -> Result<Vec<u8>, CompileError> {
        *self = Compiler::new();
        let started = Instant::now();

        info!("lexing input...");
        self.tokens = macro_parser::tokenize(source).map_err(CompileError::Lex)?;

        info!("parsing input...");
        self.emit_header();
        self.compile_statements();

        let stats = CompileStats {
            source_chars: source.chars().count(),
            tokens: self.tokens.len(),
            bytes: self.bytecode.len(),
            elapsed: started.elapsed(),
        };
        self.stats = Some(stats);

        if !self.errors.is_empty() {
            info!(errors = self.errors.len(), "compilation failed");
            self.bytecode.clear();
            return Err(CompileError::Invalid(self.errors.clone()));
        }

        info!("done in {}ms", stats.elapsed.as_millis());
        Ok(self.bytecode.clone())
    }

    fn compile_statements(&mut self) {
        loop {
            let token = self.current().clone();
            let result = match &token.kind {
                TokenKind::EndOfSource => break,
                TokenKind::EndOfStatement => {
                    self.in_call_args = false;
                    Ok(())
                }
                _ => self.compile_statement(&token),
            };

            if let Err(err) = result {
                self.report(err);
                self.synchronize();
            }
            self.advance();
        }

        self.finish();
    }

    /// Close out the program: `HALT`, then the global frame size.
    fn finish(&mut self) {
        if let Some(open) = self.open_function.take() {
            self.report(CompilerError::UnterminatedFunction {
                name: open.name,
                line: open.line,
            });
        }

        self.emit(OpCode::Halt);
        let frame_size = self.scopes.globals.frame_size();
        self.patch_word(GLOBAL_FRAME_SIZE_OFFSET, frame_size.to_le_bytes());
    }

    pub(crate) fn report(&mut self, err: CompilerError) {
        error!(line = err.line(), "{err}");
        self.errors.push(err);
    }

    /// Skip the rest of a faulty statement.
    fn synchronize(&mut self) {
        while !self.current().kind.ends_statement() {
            self.advance();
        }
    }

    // Token cursor

    pub(crate) fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&END_OF_SOURCE)
    }

    pub(crate) fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    pub(crate) fn retreat(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    // Emission

    fn emit_header(&mut self) {
        self.bytecode.extend_from_slice(&BYTECODE_VERSION.to_le_bytes());
        // Frame size is patched in once every global is known.
        self.emit_operand(OpCode::SetupFrame, 0);
    }

    pub(crate) fn emit(&mut self, op: OpCode) {
        instruction::encode(&mut self.bytecode, op);
    }

    pub(crate) fn emit_operand(&mut self, op: OpCode, operand: i32) {
        instruction::encode_operand(&mut self.bytecode, op, operand);
    }

    pub(crate) fn emit_raw(&mut self, op: OpCode, word: [u8; 4]) {
        instruction::encode_raw(&mut self.bytecode, op, word);
    }

    fn patch_word(&mut self, at: usize, word: [u8; 4]) {
        self.bytecode[at..at + 4].copy_from_slice(&word);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_script_is_header_frame_and_halt() {
        let program = Compiler::new().compile("").unwrap();
        assert_eq!(program, vec![1, 0, 0, 0, 0x40, 0, 0, 0, 0, 0x0A]);
    }

    #[test]
    fn frame_size_counts_globals() {
        let program = Compiler::new().compile("int a\nfloat b\nint c").unwrap();
        let patched = &program[GLOBAL_FRAME_SIZE_OFFSET..GLOBAL_FRAME_SIZE_OFFSET + 4];
        assert_eq!(patched, &12u32.to_le_bytes());
    }

    #[test]
    fn compiler_can_be_reused() {
        let mut compiler = Compiler::new();
        assert!(compiler.compile("x <- 1").is_err());
        let program = compiler.compile("int x").unwrap();
        assert!(compiler.errors.is_empty());
        assert_eq!(program.last(), Some(&OpCode::Halt.as_u8()));
    }

    #[test]
    fn stats_track_sizes() {
        let mut compiler = Compiler::new();
        compiler.compile("int x\nx <- 2").unwrap();
        let stats = compiler.stats.unwrap();
        assert_eq!(stats.source_chars, 12);
        // int x EOS x <- 2 EOS
        assert_eq!(stats.tokens, 7);
        assert_eq!(stats.bytes, compiler.bytecode.len());
        assert!(stats.bytes_per_token() > 1.0);
    }

    #[test]
    fn failed_compile_leaves_no_program_behind() {
        let mut compiler = Compiler::new();
        let err = compiler.compile("int x\ny <- 1\nx <- 2").unwrap_err();
        assert!(compiler.bytecode.is_empty());
        match err {
            CompileError::Invalid(errors) => assert_eq!(errors[0].line(), 2),
            other => panic!("expected invalid program, got {other:?}"),
        }
        assert!(compiler.stats.is_some());
    }
}
