// javastub_importer/source - Archive and directory entry sources
//! Both sources yield `Result<SourceEntry, ImportError>` lazily, so an import
//! that stops early never reads the remaining entries.

use std::fs::{self, File};
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::error::ImportError;

/// Returns true for names ending in `.java`, ignoring case.
pub fn is_java_source(name: &str) -> bool {
    name.len() >= 5
        && name
            .get(name.len() - 5..)
            .is_some_and(|suffix| suffix.eq_ignore_ascii_case(".java"))
}

/// One file of an input source.
///
/// `contents` is only read for Java sources; other entries carry an empty buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub name: String,
    pub contents: Vec<u8>,
}

impl SourceEntry {
    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    pub fn is_java_source(&self) -> bool {
        is_java_source(&self.name)
    }

    pub fn text(&self) -> Result<&str, ImportError> {
        std::str::from_utf8(&self.contents).map_err(|source| ImportError::Encoding {
            entry: self.name.clone(),
            source,
        })
    }
}

/// Entries of a zip archive in archive order. Directory entries are skipped.
pub struct ArchiveEntries<R> {
    path: PathBuf,
    archive: ZipArchive<R>,
    next: usize,
}

impl ArchiveEntries<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, ImportError> {
        let file = File::open(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(path, BufReader::new(file))
    }
}

impl<R: Read + Seek> ArchiveEntries<R> {
    /// `path` names the archive in errors; `reader` supplies its bytes.
    pub fn new(path: impl Into<PathBuf>, reader: R) -> Result<Self, ImportError> {
        let path = path.into();
        let archive = ZipArchive::new(reader).map_err(|source| ImportError::Archive {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            path,
            archive,
            next: 0,
        })
    }

    /// Number of entries in the archive, directories included.
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }
}

impl<R: Read + Seek> Iterator for ArchiveEntries<R> {
    type Item = Result<SourceEntry, ImportError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.archive.len() {
            let index = self.next;
            self.next += 1;

            let mut file = match self.archive.by_index(index) {
                Ok(file) => file,
                Err(source) => {
                    return Some(Err(ImportError::Archive {
                        path: self.path.clone(),
                        source,
                    }))
                }
            };

            if file.is_dir() {
                trace!(archive = %self.path.display(), entry = file.name(), "skipping directory entry");
                continue;
            }

            let name = file.name().to_string();
            let mut contents = Vec::new();
            if is_java_source(&name) {
                if let Err(source) = file.read_to_end(&mut contents) {
                    return Some(Err(ImportError::Io {
                        path: self.path.join(&name),
                        source,
                    }));
                }
            }
            return Some(Ok(SourceEntry { name, contents }));
        }
        None
    }
}

/// Regular files below `root`, sorted by file name at each level. Entry names
/// are relative to `root` with `/` separators.
pub fn directory_entries(root: &Path) -> impl Iterator<Item = Result<SourceEntry, ImportError>> {
    let root = root.to_path_buf();
    WalkDir::new(&root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    return Some(Err(ImportError::Walk {
                        path: root.clone(),
                        source,
                    }))
                }
            };
            if !entry.file_type().is_file() {
                return None;
            }
            Some(read_directory_entry(&root, entry.path()))
        })
}

fn read_directory_entry(root: &Path, path: &Path) -> Result<SourceEntry, ImportError> {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let name = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    let contents = if is_java_source(&name) {
        fs::read(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        Vec::new()
    };
    Ok(SourceEntry { name, contents })
}
