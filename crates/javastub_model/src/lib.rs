// javastub_model - API model produced by the Java stub importer
//! Passive data structures describing a Java API surface: packages, types and
//! their members.
//!
//! The model is created by the parser (one [`Package`] per compile unit),
//! reshaped once by the importer's normalizer and then handed, immutable, to
//! the XML writer.

pub mod api;
pub mod members;
pub mod types;

pub use api::*;
pub use members::*;
pub use types::*;
