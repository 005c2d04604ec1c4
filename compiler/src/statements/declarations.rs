use macro_parser::{Builtin, TokenKind};

use crate::codegen::Compiler;
use crate::error::CompilerError;
use crate::statements::StatementCompiler;
use crate::types::VarType;

pub trait DeclarationCompiler {
    /// `int name` / `float name`. Declarations emit no code; they only
    /// reserve a slot in the active frame.
    fn compile_declaration(&mut self, keyword: Builtin, ty: VarType) -> Result<(), CompilerError>;

    /// Consume the identifier after `keyword`.
    fn expect_ident(&mut self, keyword: Builtin) -> Result<(String, usize), CompilerError>;
}

impl DeclarationCompiler for Compiler {
    fn compile_declaration(&mut self, keyword: Builtin, ty: VarType) -> Result<(), CompilerError> {
        let (name, line) = self.expect_ident(keyword)?;
        let symbol = self
            .scopes
            .current_mut()
            .declare(&name, ty)
            .ok_or(CompilerError::FrameTooLarge { line })?;
        tracing::debug!(name = %name, offset = symbol.offset, "declared {ty}");
        self.finish_statement()
    }

    fn expect_ident(&mut self, keyword: Builtin) -> Result<(String, usize), CompilerError> {
        self.advance();
        let token = self.current();
        match &token.kind {
            TokenKind::Ident(name) => Ok((name.clone(), token.line)),
            other => Err(CompilerError::ExpectedIdent {
                keyword,
                found: other.to_string(),
                line: token.line,
            }),
        }
    }
}
