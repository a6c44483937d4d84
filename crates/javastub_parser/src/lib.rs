// javastub_parser - Grammar and AST construction for Java stub sources
//! Parses one stub source file into a [`CompileUnit`].
//!
//! [`StubGrammar`] builds the chumsky grammar once; every call to
//! [`StubGrammar::parse`] lexes and parses from fresh state. Failures carry
//! the full list of [`Diagnostic`]s for the file.

pub mod builder;
pub mod diagnostics;
pub mod syntax;

use chumsky::prelude::*;
use chumsky::Parser as ChumskyParser;
use javastub_lexer::{LexError, Token};
use thiserror::Error;

pub use builder::{is_type_parameter_entry, CompileUnit};
pub use diagnostics::{Diagnostic, DiagnosticSeverity, SourceLocation};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Lexical error: {0}")]
    Lex(#[from] LexError),
    #[error("Syntax error: {}", first_message(.0))]
    Syntax(Vec<Diagnostic>),
}

fn first_message(diagnostics: &[Diagnostic]) -> String {
    match diagnostics {
        [] => "no diagnostics".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}

impl ParseError {
    /// Diagnostics describing this failure, in reporting order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            ParseError::Lex(error) => vec![Diagnostic::from_lex_error(error)],
            ParseError::Syntax(diagnostics) => diagnostics.clone(),
        }
    }
}

/// The compiled stub grammar.
///
/// chumsky's boxed parsers are reference counted and not `Send`, so a grammar
/// belongs to one thread; [`parse_compile_unit`] keeps one per thread.
pub struct StubGrammar {
    compile_unit: BoxedParser<'static, Token, CompileUnit, Simple<Token>>,
}

impl StubGrammar {
    pub fn new() -> Self {
        Self {
            compile_unit: syntax::compile_unit().boxed(),
        }
    }

    pub fn parse(&self, source: &str) -> Result<CompileUnit, ParseError> {
        let tokens = javastub_lexer::tokenize(source)?;
        self.parse_tokens(tokens)
    }

    pub fn parse_tokens(&self, tokens: Vec<Token>) -> Result<CompileUnit, ParseError> {
        self.compile_unit.parse(tokens.clone()).map_err(|errors| {
            let mut diagnostics: Vec<Diagnostic> = errors
                .iter()
                .map(|error| Diagnostic::from_parser_error(error, &tokens))
                .collect();
            diagnostics.sort_by_key(|diagnostic| diagnostic.location);
            ParseError::Syntax(diagnostics)
        })
    }
}

impl Default for StubGrammar {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static GRAMMAR: StubGrammar = StubGrammar::new();
}

/// Parses `source` with this thread's shared grammar.
pub fn parse_compile_unit(source: &str) -> Result<CompileUnit, ParseError> {
    GRAMMAR.with(|grammar| grammar.parse(source))
}

#[cfg(test)]
mod tests;
