pub mod error;
pub mod lexer;
pub mod token;

pub use error::{LexError, LexErrorKind};
pub use lexer::{tokenize, Lexer};
pub use token::{Builtin, Operator, Token, TokenKind};
