/// Single-pass O(n) lexer for Macro scripts.
use crate::error::{LexError, LexErrorKind};
use crate::token::{Builtin, Operator, Token, TokenKind};

pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
}

/// Lex `source` into a token stream terminated by exactly one
/// [`TokenKind::EndOfSource`]. Lexing keeps going after a bad character so
/// that every fault is reported, but stops at the first unexpected end of
/// file. If anything was reported, no tokens are returned.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Vec<LexError>> {
    Lexer::tokenize(source)
}

impl<'a> Lexer<'a> {
    pub fn tokenize(source: &'a str) -> Result<Vec<Token>, Vec<LexError>> {
        let mut lexer = Lexer {
            source,
            pos: 0,
            line: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
        };
        lexer.run();
        if lexer.errors.is_empty() {
            Ok(lexer.tokens)
        } else {
            Err(lexer.errors)
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn push(&mut self, kind: TokenKind) {
        self.tokens.push(Token::new(kind, self.line));
    }

    fn error(&mut self, kind: LexErrorKind) {
        let err = LexError::new(kind, self.line);
        tracing::error!("{err}");
        self.errors.push(err);
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r') = self.peek() {
            self.advance();
        }
    }

    fn run(&mut self) {
        loop {
            self.skip_whitespace();

            let Some(ch) = self.advance() else {
                self.push(TokenKind::EndOfSource);
                return;
            };

            match ch {
                '\n' => {
                    self.push(TokenKind::EndOfStatement);
                    self.line += 1;
                }
                '+' => self.push(TokenKind::Operator(Operator::Add)),
                '-' => self.push(TokenKind::Operator(Operator::Subtract)),
                '*' => self.push(TokenKind::Operator(Operator::Multiply)),
                '/' => self.push(TokenKind::Operator(Operator::Divide)),
                '(' => self.push(TokenKind::Operator(Operator::LeftParen)),
                ')' => self.push(TokenKind::Operator(Operator::RightParen)),
                '<' => match self.peek() {
                    Some('-') => {
                        self.advance();
                        self.push(TokenKind::Operator(Operator::Assign));
                    }
                    // Leave the offending character for the next round.
                    Some(other) => self.error(LexErrorKind::DanglingLessThan(other)),
                    None => {
                        self.error(LexErrorKind::UnexpectedEof("`<-` operator"));
                        return;
                    }
                },
                '"' => {
                    if !self.lex_string() {
                        return;
                    }
                }
                c if c.is_alphanumeric() => self.lex_word(c),
                other => self.error(LexErrorKind::UnknownSymbol(other)),
            }
        }
    }

    /// Returns false when the file ended before the closing quote.
    fn lex_string(&mut self) -> bool {
        let start_line = self.line;
        let start = self.pos;
        loop {
            match self.advance() {
                Some('"') => break,
                Some('\n') => self.line += 1,
                Some(_) => {}
                None => {
                    self.error(LexErrorKind::UnexpectedEof("string literal"));
                    return false;
                }
            }
        }
        // The closing quote is a single byte.
        let text = self.source[start..self.pos - 1].to_string();
        self.tokens.push(Token::new(TokenKind::Str(text), start_line));
        true
    }

    fn lex_word(&mut self, first: char) {
        let start = self.pos - first.len_utf8();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '.' || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
        let kind = classify_word(&self.source[start..self.pos]);
        self.push(kind);
    }
}

fn classify_word(word: &str) -> TokenKind {
    if let Ok(value) = word.parse::<i32>() {
        return TokenKind::Int(value);
    }
    // `str::parse::<f32>` also accepts words like `inf` and `nan`, which must
    // stay identifiers.
    if word.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        if let Ok(value) = word.parse::<f32>() {
            return TokenKind::Float(value);
        }
    }
    match Builtin::from_keyword(word) {
        Some(builtin) => TokenKind::Builtin(builtin),
        None => TokenKind::Ident(word.to_string()),
    }
}
