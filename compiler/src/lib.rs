pub mod codegen;
pub mod error;
mod expressions;
pub mod scopes;
mod statements;
pub mod types;

pub use codegen::{CompileStats, Compiler};
pub use error::{CompileError, CompilerError};
pub use types::{Symbol, VarType};

/// Compile `source` into a bytecode program in one go.
pub fn compile(source: &str) -> Result<Vec<u8>, CompileError> {
    Compiler::new().compile(source)
}
