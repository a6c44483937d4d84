//! chumsky grammar for the stub dialect.
//!
//! Parsers are plain functions returning `impl Parser`, composed bottom-up:
//! tokens, types, annotations, bodies, then declarations.

pub mod annotations;
pub mod bodies;
pub mod declarations;
pub mod tokens;
pub mod types;

pub use declarations::{compile_unit, header, member, type_declaration};
pub use types::type_ref;
