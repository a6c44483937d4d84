use javastub_parser::Diagnostic;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use zip::result::ZipError;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("IO error while reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("ZIP error while reading {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: ZipError,
    },
    #[error("Error while walking {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("{entry} is not valid UTF-8: {source}")]
    Encoding {
        entry: String,
        #[source]
        source: std::str::Utf8Error,
    },
    #[error("Failed to parse {entry}: {}", first_diagnostic(.diagnostics))]
    Syntax {
        entry: String,
        diagnostics: Vec<Diagnostic>,
    },
}

fn first_diagnostic(diagnostics: &[Diagnostic]) -> String {
    match diagnostics.first() {
        Some(first) if diagnostics.len() > 1 => {
            format!("{first} (and {} more)", diagnostics.len() - 1)
        }
        Some(first) => first.to_string(),
        None => "no diagnostics".to_string(),
    }
}

impl ImportError {
    /// Entry or path the error refers to.
    pub fn location(&self) -> String {
        match self {
            ImportError::Io { path, .. }
            | ImportError::Archive { path, .. }
            | ImportError::Walk { path, .. } => path.display().to_string(),
            ImportError::Encoding { entry, .. } | ImportError::Syntax { entry, .. } => {
                entry.clone()
            }
        }
    }
}
