use chumsky::error::{Simple, SimpleReason};
use javastub_lexer::{LexError, Token};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

impl DiagnosticSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "Error",
            DiagnosticSeverity::Warning => "Warning",
        }
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}:{})", self.line, self.column)
    }
}

/// A lexical or syntax problem found while parsing one file.
///
/// Displays as `{severity} ({line}:{column}) {message}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    pub location: SourceLocation,
    pub message: String,
}

impl Diagnostic {
    pub fn error(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Error,
            location: SourceLocation { line, column },
            message: message.into(),
        }
    }

    pub fn from_lex_error(error: &LexError) -> Self {
        let (line, column) = error.position();
        let message = match error {
            LexError::UnexpectedChar(ch, _, _) => format!("unexpected character '{ch}'"),
            LexError::UnterminatedString(_, _) => "unterminated string literal".to_string(),
            LexError::UnterminatedChar(_, _) => "unterminated character literal".to_string(),
            LexError::UnterminatedComment(_, _) => "unterminated block comment".to_string(),
        };
        Self::error(line, column, message)
    }

    /// Converts a parser error whose span indexes into `tokens`.
    pub fn from_parser_error(error: &Simple<Token>, tokens: &[Token]) -> Self {
        let location = simple_error_location(error, tokens);
        let message = format_simple_error(error);
        match location {
            Some(location) => Self {
                severity: DiagnosticSeverity::Error,
                location,
                message,
            },
            None => Self {
                severity: DiagnosticSeverity::Warning,
                location: SourceLocation { line: 0, column: 0 },
                message,
            },
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.severity, self.location, self.message)
    }
}

fn simple_error_location(error: &Simple<Token>, tokens: &[Token]) -> Option<SourceLocation> {
    let last = tokens.last()?;
    let index = error.span().start.min(tokens.len() - 1);
    let token = tokens.get(index).unwrap_or(last);
    Some(SourceLocation {
        line: token.line,
        column: token.column,
    })
}

fn format_simple_error(error: &Simple<Token>) -> String {
    match error.reason() {
        SimpleReason::Custom(message) => message.clone(),
        SimpleReason::Unclosed { delimiter, .. } => format!("unclosed delimiter {delimiter}"),
        SimpleReason::Unexpected => {
            let found = error
                .found()
                .map(ToString::to_string)
                .unwrap_or_else(|| "end of input".to_string());
            match error.label() {
                Some(label) => format!("unexpected {found}, expected {label}"),
                None => format!("unexpected {found}"),
            }
        }
    }
}
