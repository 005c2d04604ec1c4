/// Token types for the Macro lexer.
use std::fmt;

/// A single token produced by the lexer.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based source line the token starts on.
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize) -> Self {
        Self { kind, line }
    }
}

/// All token variants recognized by the lexer.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Operator(Operator),
    /// Quoted text, stored verbatim without escape processing.
    Str(String),
    Builtin(Builtin),
    Ident(String),
    Int(i32),
    Float(f32),
    /// A newline. Statements are newline-terminated.
    EndOfStatement,
    EndOfSource,
}

impl TokenKind {
    /// True for the two tokens that terminate an expression.
    pub fn ends_statement(&self) -> bool {
        matches!(self, TokenKind::EndOfStatement | TokenKind::EndOfSource)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Operator(op) => write!(f, "`{op}`"),
            TokenKind::Str(text) => write!(f, "string \"{text}\""),
            TokenKind::Builtin(builtin) => write!(f, "keyword `{builtin}`"),
            TokenKind::Ident(name) => write!(f, "identifier `{name}`"),
            TokenKind::Int(value) => write!(f, "integer {value}"),
            TokenKind::Float(value) => write!(f, "float {value}"),
            TokenKind::EndOfStatement => write!(f, "end of line"),
            TokenKind::EndOfSource => write!(f, "end of file"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    /// `<-`
    Assign,
    LeftParen,
    RightParen,
}

impl Operator {
    /// Binding strength used by the expression compiler. Parentheses and
    /// assignment never win a comparison.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Multiply | Operator::Divide => 3,
            Operator::Add | Operator::Subtract => 2,
            Operator::Assign | Operator::LeftParen | Operator::RightParen => 0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Assign => "<-",
            Operator::LeftParen => "(",
            Operator::RightParen => ")",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Reserved keywords. The declaration types `int` and `float` share this
/// space with the action keywords.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    Move,
    Drag,
    Click,
    Type,
    Mod,
    Delay,
    Display,
    Start,
    End,
    Int,
    Float,
}

impl Builtin {
    pub fn from_keyword(word: &str) -> Option<Self> {
        let builtin = match word {
            "move" => Builtin::Move,
            "drag" => Builtin::Drag,
            "click" => Builtin::Click,
            "type" => Builtin::Type,
            "mod" => Builtin::Mod,
            "delay" => Builtin::Delay,
            "display" => Builtin::Display,
            "start" => Builtin::Start,
            "end" => Builtin::End,
            "int" => Builtin::Int,
            "float" => Builtin::Float,
            _ => return None,
        };
        Some(builtin)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Builtin::Move => "move",
            Builtin::Drag => "drag",
            Builtin::Click => "click",
            Builtin::Type => "type",
            Builtin::Mod => "mod",
            Builtin::Delay => "delay",
            Builtin::Display => "display",
            Builtin::Start => "start",
            Builtin::End => "end",
            Builtin::Int => "int",
            Builtin::Float => "float",
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
