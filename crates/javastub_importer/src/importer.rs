// javastub_importer/importer - Fail-fast batch import of stub sources
use javastub_model::{ApiRoot, Package};
use javastub_parser::StubGrammar;
use std::collections::BTreeSet;
use std::io::{Read, Seek};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::config::ImporterConfig;
use crate::error::ImportError;
use crate::normalize::normalize;
use crate::source::{directory_entries, ArchiveEntries, SourceEntry};

/// Counters for one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub entries_visited: usize,
    pub files_parsed: usize,
    pub entries_skipped: usize,
    pub packages_filtered: usize,
    pub packages: usize,
    pub types: usize,
}

/// Normalized model of a successful import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub api: ApiRoot,
    pub report: ImportReport,
}

/// Parses every Java entry of a source into one normalized [`ApiRoot`].
///
/// Entries are parsed strictly in order. The first entry that cannot be read
/// or parsed aborts the import and later entries are never pulled from the
/// source. The grammar is built once per importer.
pub struct StubImporter {
    config: ImporterConfig,
    grammar: StubGrammar,
}

impl StubImporter {
    pub fn new(config: ImporterConfig) -> Self {
        Self {
            config,
            grammar: StubGrammar::new(),
        }
    }

    pub fn config(&self) -> &ImporterConfig {
        &self.config
    }

    /// Imports a directory tree of sources or a zip/jar archive.
    pub fn import_path(&self, path: &Path) -> Result<ImportOutcome, ImportError> {
        let metadata = path.metadata().map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if metadata.is_dir() {
            info!(directory = %path.display(), "importing stub sources");
            self.import_entries(directory_entries(path))
        } else {
            self.import_archive(path)
        }
    }

    pub fn import_archive(&self, path: &Path) -> Result<ImportOutcome, ImportError> {
        let entries = ArchiveEntries::open(path)?;
        info!(archive = %path.display(), entries = entries.len(), "importing stub archive");
        self.import_entries(entries)
    }

    /// Imports an archive from an in-memory or already opened reader; `name`
    /// identifies it in errors.
    pub fn import_reader<R>(
        &self,
        name: impl Into<PathBuf>,
        reader: R,
    ) -> Result<ImportOutcome, ImportError>
    where
        R: Read + Seek,
    {
        self.import_entries(ArchiveEntries::new(name, reader)?)
    }

    pub fn import_entries<I>(&self, entries: I) -> Result<ImportOutcome, ImportError>
    where
        I: IntoIterator<Item = Result<SourceEntry, ImportError>>,
    {
        let mut report = ImportReport::default();
        let mut fragments = Vec::new();

        for entry in entries {
            let entry = entry?;
            report.entries_visited += 1;

            if !entry.is_java_source() {
                debug!(entry = %entry.name, "skipping non-Java entry");
                report.entries_skipped += 1;
                continue;
            }

            debug!(entry = %entry.name, bytes = entry.contents.len(), "parsing");
            fragments.push(self.parse_entry(&entry)?);
            report.files_parsed += 1;
        }

        let fragments = self.filter_framework(fragments, &mut report);
        let api = normalize(fragments);
        report.packages = api.packages.len();
        report.types = api.type_count();

        info!(
            visited = report.entries_visited,
            parsed = report.files_parsed,
            skipped = report.entries_skipped,
            packages = report.packages,
            types = report.types,
            "import finished"
        );
        Ok(ImportOutcome { api, report })
    }

    fn parse_entry(&self, entry: &SourceEntry) -> Result<Package, ImportError> {
        let text = entry.text()?;
        match self.grammar.parse(text) {
            Ok(unit) => Ok(unit.package),
            Err(parse_error) => {
                let diagnostics = parse_error.diagnostics();
                for diagnostic in &diagnostics {
                    error!(entry = %entry.name, "{diagnostic}");
                }
                Err(ImportError::Syntax {
                    entry: entry.name.clone(),
                    diagnostics,
                })
            }
        }
    }

    fn filter_framework(
        &self,
        fragments: Vec<Package>,
        report: &mut ImportReport,
    ) -> Vec<Package> {
        if !self.config.framework_only {
            return fragments;
        }

        let mut dropped = BTreeSet::new();
        let kept = fragments
            .into_iter()
            .filter(|fragment| {
                let filtered = self.config.is_filtered_package(&fragment.name);
                if filtered {
                    dropped.insert(fragment.name.clone());
                }
                !filtered
            })
            .collect();

        for package in &dropped {
            warn!(package = %package, "dropping non-framework package");
        }
        report.packages_filtered = dropped.len();
        kept
    }
}

impl Default for StubImporter {
    fn default() -> Self {
        Self::new(ImporterConfig::default())
    }
}
