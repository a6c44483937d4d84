// javastub_lexer - Tokenizer for machine-generated Java stub sources
//! Turns stub source text into a flat [`Token`] stream for the grammar.
//!
//! Comments are dropped here and never reach the parser. Numeric literals keep
//! their raw spelling, including a leading sign, a type suffix and the
//! parenthesized ratio form (`(1.0f/0.0f)`) that stubs use for constants such
//! as `Float.NaN`.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Token types of the stub dialect.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    // Literals
    Identifier(String),
    String(String),    // content between the quotes, escapes left as written
    Character(String), // content between the quotes
    Number(String),    // raw spelling, never evaluated

    // Keywords
    Package,
    Import,
    Public,
    Protected,
    Static,
    Final,
    Abstract,
    Synchronized,
    Default,
    Native,
    Volatile,
    Transient,
    Enum,
    Class,
    Interface,
    AtInterface, // @interface
    Extends,
    Implements,
    Throw,
    Throws,
    Null,
    Super,
    True,
    False,
    New,

    // Punctuation
    LeftParen,    // (
    RightParen,   // )
    LeftBrace,    // {
    RightBrace,   // }
    LeftBracket,  // [
    RightBracket, // ]
    Less,         // <
    Greater,      // >
    Comma,        // ,
    Semicolon,    // ;
    Dot,          // .
    Ellipsis,     // ...
    Assign,       // =
    Question,     // ?
    Ampersand,    // &
    At,           // @
    Star,         // *

    /// Any other operator character. Only valid inside bodies and initializers,
    /// where the grammar consumes it as noise.
    Operator(char),

    Eof,
}

impl TokenType {
    /// Keyword for `word`, if it is one.
    pub fn keyword(word: &str) -> Option<TokenType> {
        let token = match word {
            "package" => TokenType::Package,
            "import" => TokenType::Import,
            "public" => TokenType::Public,
            "protected" => TokenType::Protected,
            "static" => TokenType::Static,
            "final" => TokenType::Final,
            "abstract" => TokenType::Abstract,
            "synchronized" => TokenType::Synchronized,
            "default" => TokenType::Default,
            "native" => TokenType::Native,
            "volatile" => TokenType::Volatile,
            "transient" => TokenType::Transient,
            "enum" => TokenType::Enum,
            "class" => TokenType::Class,
            "interface" => TokenType::Interface,
            "extends" => TokenType::Extends,
            "implements" => TokenType::Implements,
            "throw" => TokenType::Throw,
            "throws" => TokenType::Throws,
            "null" => TokenType::Null,
            "super" => TokenType::Super,
            "true" => TokenType::True,
            "false" => TokenType::False,
            "new" => TokenType::New,
            _ => return None,
        };
        Some(token)
    }

    /// True for the keywords that may appear in modifier position.
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            TokenType::Public
                | TokenType::Protected
                | TokenType::Static
                | TokenType::Final
                | TokenType::Abstract
                | TokenType::Synchronized
                | TokenType::Default
                | TokenType::Native
                | TokenType::Volatile
                | TokenType::Transient
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.token_type {
            TokenType::Eof => f.write_str("end of input"),
            _ => write!(f, "`{}`", self.lexeme),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("Unexpected character '{0}' at line {1}, column {2}")]
    UnexpectedChar(char, usize, usize),
    #[error("Unterminated string at line {0}, column {1}")]
    UnterminatedString(usize, usize),
    #[error("Unterminated character literal at line {0}, column {1}")]
    UnterminatedChar(usize, usize),
    #[error("Unterminated block comment at line {0}, column {1}")]
    UnterminatedComment(usize, usize),
}

impl LexError {
    /// Line and column where the offending construct starts.
    pub fn position(&self) -> (usize, usize) {
        match *self {
            LexError::UnexpectedChar(_, line, column)
            | LexError::UnterminatedString(line, column)
            | LexError::UnterminatedChar(line, column)
            | LexError::UnterminatedComment(line, column) => (line, column),
        }
    }
}

pub struct Lexer {
    chars: Vec<char>,
    current: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// A leading byte-order mark is dropped.
    pub fn new(input: impl AsRef<str>) -> Self {
        let input = input.as_ref();
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        Self {
            chars: input.chars().collect(),
            current: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenizes the whole input. The last token is always [`TokenType::Eof`].
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek(0) {
            let start_line = self.line;
            let start_column = self.column;

            if let Some(end) = number_end(&self.chars, self.current) {
                tokens.push(self.number_token(end, start_line, start_column));
                continue;
            }

            match ch {
                ' ' | '\t' | '\u{000C}' => self.advance(),
                '\n' => self.newline(),
                '\r' => self.carriage_return(),

                '/' if self.peek(1) == Some('/') => self.skip_line_comment(),
                '/' if self.peek(1) == Some('*') => {
                    self.skip_block_comment(start_line, start_column)?
                }

                '"' => tokens.push(self.quoted('"', start_line, start_column)?),
                '\'' => tokens.push(self.quoted('\'', start_line, start_column)?),

                '(' => match ratio_end(&self.chars, self.current) {
                    Some(end) => tokens.push(self.number_token(end, start_line, start_column)),
                    None => tokens.push(self.single(TokenType::LeftParen, start_line, start_column)),
                },

                '.' if self.peek(1) == Some('.') && self.peek(2) == Some('.') => {
                    self.current += 3;
                    self.column += 3;
                    tokens.push(self.make_token(TokenType::Ellipsis, "...", start_line, start_column));
                }

                '@' if self.at_interface_keyword() => {
                    self.current += "@interface".len();
                    self.column += "@interface".len();
                    tokens.push(self.make_token(
                        TokenType::AtInterface,
                        "@interface",
                        start_line,
                        start_column,
                    ));
                }

                _ if is_identifier_start(ch) => tokens.push(self.identifier(start_line, start_column)),

                _ => {
                    let token_type = match ch {
                        ')' => TokenType::RightParen,
                        '{' => TokenType::LeftBrace,
                        '}' => TokenType::RightBrace,
                        '[' => TokenType::LeftBracket,
                        ']' => TokenType::RightBracket,
                        '<' => TokenType::Less,
                        '>' => TokenType::Greater,
                        ',' => TokenType::Comma,
                        ';' => TokenType::Semicolon,
                        '.' => TokenType::Dot,
                        '=' => TokenType::Assign,
                        '?' => TokenType::Question,
                        '&' => TokenType::Ampersand,
                        '@' => TokenType::At,
                        '*' => TokenType::Star,
                        '+' | '-' | '/' | '%' | '!' | '~' | '^' | '|' | ':' => {
                            TokenType::Operator(ch)
                        }
                        other => {
                            return Err(LexError::UnexpectedChar(other, start_line, start_column))
                        }
                    };
                    tokens.push(self.single(token_type, start_line, start_column));
                }
            }
        }

        tokens.push(self.make_token(TokenType::Eof, "", self.line, self.column));
        Ok(tokens)
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.current + offset).copied()
    }

    fn advance(&mut self) {
        self.current += 1;
        self.column += 1;
    }

    fn newline(&mut self) {
        self.current += 1;
        self.line += 1;
        self.column = 1;
    }

    fn make_token(&self, token_type: TokenType, lexeme: &str, line: usize, column: usize) -> Token {
        Token {
            token_type,
            lexeme: lexeme.to_string(),
            line,
            column,
        }
    }

    fn single(&mut self, token_type: TokenType, line: usize, column: usize) -> Token {
        let lexeme = self.chars[self.current].to_string();
        self.advance();
        self.make_token(token_type, &lexeme, line, column)
    }

    /// Consumes `[current, end)` as a numeric literal. Numbers never span lines.
    fn number_token(&mut self, end: usize, line: usize, column: usize) -> Token {
        let lexeme: String = self.chars[self.current..end].iter().collect();
        self.column += end - self.current;
        self.current = end;
        self.make_token(TokenType::Number(lexeme.clone()), &lexeme, line, column)
    }

    fn identifier(&mut self, line: usize, column: usize) -> Token {
        let start = self.current;
        while self.peek(0).is_some_and(is_identifier_continue) {
            self.advance();
        }
        let word: String = self.chars[start..self.current].iter().collect();
        let token_type =
            TokenType::keyword(&word).unwrap_or_else(|| TokenType::Identifier(word.clone()));
        self.make_token(token_type, &word, line, column)
    }

    fn quoted(&mut self, quote: char, line: usize, column: usize) -> Result<Token, LexError> {
        let unterminated = || {
            if quote == '"' {
                LexError::UnterminatedString(line, column)
            } else {
                LexError::UnterminatedChar(line, column)
            }
        };

        let start = self.current;
        self.advance();
        loop {
            match self.peek(0) {
                None | Some('\n') | Some('\r') => return Err(unterminated()),
                Some('\\') => {
                    self.advance();
                    match self.peek(0) {
                        None | Some('\n') | Some('\r') => return Err(unterminated()),
                        Some(_) => self.advance(),
                    }
                }
                Some(ch) if ch == quote => {
                    self.advance();
                    break;
                }
                Some(_) => self.advance(),
            }
        }

        let lexeme: String = self.chars[start..self.current].iter().collect();
        let content = lexeme[1..lexeme.len() - 1].to_string();
        let token_type = if quote == '"' {
            TokenType::String(content)
        } else {
            TokenType::Character(content)
        };
        Ok(self.make_token(token_type, &lexeme, line, column))
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek(0) {
            if ch == '\n' || ch == '\r' {
                break;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self, line: usize, column: usize) -> Result<(), LexError> {
        self.current += 2;
        self.column += 2;
        loop {
            match self.peek(0) {
                None => return Err(LexError::UnterminatedComment(line, column)),
                Some('*') if self.peek(1) == Some('/') => {
                    self.current += 2;
                    self.column += 2;
                    return Ok(());
                }
                Some('\n') => self.newline(),
                Some('\r') => self.carriage_return(),
                Some(_) => self.advance(),
            }
        }
    }

    /// `\r` or `\r\n`, counted as one line break.
    fn carriage_return(&mut self) {
        self.current += 1;
        if self.peek(0) == Some('\n') {
            self.current += 1;
        }
        self.line += 1;
        self.column = 1;
    }

    fn at_interface_keyword(&self) -> bool {
        let keyword: Vec<char> = "interface".chars().collect();
        let rest = &self.chars[self.current + 1..];
        rest.starts_with(&keyword)
            && !rest
                .get(keyword.len())
                .copied()
                .is_some_and(is_identifier_continue)
    }
}

/// Convenience wrapper around [`Lexer::tokenize`].
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_identifier_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// End index of a numeric literal starting at `start`, if one starts there.
///
/// Accepts an optional sign, decimal/hex digits, a fraction, an exponent and a
/// single `L`/`F`/`D` suffix in either case.
fn number_end(chars: &[char], start: usize) -> Option<usize> {
    let at = |index: usize| chars.get(index).copied();
    let mut index = start;

    if matches!(at(index), Some('+') | Some('-')) {
        index += 1;
    }

    let starts_number = match at(index) {
        Some(ch) if ch.is_ascii_digit() => true,
        Some('.') => at(index + 1).is_some_and(|ch| ch.is_ascii_digit()),
        _ => false,
    };
    if !starts_number {
        return None;
    }

    if at(index) == Some('0') && matches!(at(index + 1), Some('x') | Some('X')) {
        index += 2;
        while at(index).is_some_and(|ch| ch.is_ascii_hexdigit() || ch == '_') {
            index += 1;
        }
    } else {
        while at(index).is_some_and(|ch| ch.is_ascii_digit() || ch == '_') {
            index += 1;
        }
        if at(index) == Some('.') && at(index + 1) != Some('.') {
            index += 1;
            while at(index).is_some_and(|ch| ch.is_ascii_digit() || ch == '_') {
                index += 1;
            }
        }
        if matches!(at(index), Some('e') | Some('E')) {
            let mut exponent = index + 1;
            if matches!(at(exponent), Some('+') | Some('-')) {
                exponent += 1;
            }
            if at(exponent).is_some_and(|ch| ch.is_ascii_digit()) {
                index = exponent;
                while at(index).is_some_and(|ch| ch.is_ascii_digit()) {
                    index += 1;
                }
            }
        }
    }

    if matches!(
        at(index),
        Some('L') | Some('l') | Some('F') | Some('f') | Some('D') | Some('d')
    ) {
        index += 1;
    }

    Some(index)
}

/// End index (exclusive, past `)`) of a ratio literal `(a/b)` starting at `start`.
fn ratio_end(chars: &[char], start: usize) -> Option<usize> {
    let skip_blanks = |mut index: usize| {
        while matches!(chars.get(index), Some(' ') | Some('\t')) {
            index += 1;
        }
        index
    };

    let index = skip_blanks(start + 1);
    let index = skip_blanks(number_end(chars, index)?);
    if chars.get(index) != Some(&'/') || matches!(chars.get(index + 1), Some('/') | Some('*')) {
        return None;
    }
    let index = skip_blanks(index + 1);
    let index = skip_blanks(number_end(chars, index)?);
    (chars.get(index) == Some(&')')).then_some(index + 1)
}
