// javastub_importer - Batch import of Java stub sources
//! Reads stub sources from a zip/jar archive or a directory, parses each Java
//! file, normalizes the combined model and renders it as XML or JSON.
//!
//! ```no_run
//! use javastub_importer::{render, ImporterConfig, StubImporter};
//! use std::path::Path;
//!
//! let importer = StubImporter::new(ImporterConfig::default());
//! let outcome = importer.import_path(Path::new("android-stubs-src.jar"))?;
//! let xml = render(&outcome.api, importer.config().output_mode)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod importer;
pub mod normalize;
pub mod output;
pub mod source;
pub mod xml;

pub use config::{
    ConfigError, ImporterConfig, ImporterConfigLayer, OutputMode, DEFAULT_NON_FRAMEWORK_PREFIXES,
};
pub use error::ImportError;
pub use importer::{ImportOutcome, ImportReport, StubImporter};
pub use normalize::normalize;
pub use output::{render, RenderError};
pub use source::{directory_entries, is_java_source, ArchiveEntries, SourceEntry};
pub use xml::{ApiXmlError, ApiXmlWriter, XmlDetail};

#[cfg(test)]
mod tests;
