//! Orchestration of a whole run: discover files, parse and collect them,
//! build the catalog, then rewrite.
//!
//! Parsing and rewriting run on the rayon pool. The catalog is fully built
//! (and saved) between the two phases, so every rewrite sees the same frozen
//! lookup. A parse failure anywhere aborts the run before anything is
//! written.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use anyhow::Result;
use rayon::prelude::*;

use crate::{
    config::Config,
    core::{
        backup::{BACKUP_DIR_PREFIX, create_backup},
        catalog::{Catalog, InsertOutcome},
        classify::Classifier,
        collect::{CollectedFile, collect_file},
        file_scanner::scan_files,
        key::generate_key,
        parsers::jsx::{ParsedJSX, parse_file},
        rewrite::{ProjectInspector, Rewriter, directive_required},
        scaffold::ensure_i18n_setup,
    },
    error::PipelineError,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Compute everything, write nothing.
    pub dry_run: bool,
    /// Copy sources and catalog aside before mutating them.
    pub backup: bool,
    /// Keep only strings the rewriter will wire up, and drop catalog keys
    /// nothing references any more.
    pub cleanup: bool,
}

/// One extracted occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedString {
    pub value: String,
    pub key: String,
    pub file: PathBuf,
    pub line: usize,
    /// Whether the rewriter would replace this occurrence.
    pub was_transformed: bool,
}

/// Two different values that produced the same key. The later one wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCollision {
    pub key: String,
    pub previous: String,
    pub value: String,
    pub file: PathBuf,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewrittenFile {
    pub path: PathBuf,
    pub replaced: usize,
}

#[derive(Debug, Default)]
pub struct RewriteReport {
    /// Files that were (or, in a dry run, would be) changed.
    pub rewritten: Vec<RewrittenFile>,
    /// Files that could not be rewritten. They are left untouched.
    pub failures: Vec<PipelineError>,
}

impl RewriteReport {
    pub fn replaced(&self) -> usize {
        self.rewritten.iter().map(|f| f.replaced).sum()
    }
}

#[derive(Debug)]
pub struct ExtractReport {
    pub dry_run: bool,
    pub files_scanned: usize,
    pub strings: Vec<ExtractedString>,
    pub collisions: Vec<KeyCollision>,
    /// Catalog keys removed by cleanup.
    pub removed_keys: Vec<String>,
    pub catalog_path: PathBuf,
    pub catalog_entries: usize,
    pub scaffolded: Vec<PathBuf>,
    pub backup: Option<PathBuf>,
    pub rewrite: RewriteReport,
}

impl ExtractReport {
    pub fn strings_found(&self) -> usize {
        self.strings.len()
    }

    pub fn strings_transformed(&self) -> usize {
        self.strings.iter().filter(|s| s.was_transformed).count()
    }

    pub fn strings_skipped(&self) -> usize {
        self.strings_found() - self.strings_transformed()
    }
}

#[derive(Debug)]
pub struct TransformReport {
    pub dry_run: bool,
    pub files_scanned: usize,
    pub catalog_path: PathBuf,
    pub rewrite: RewriteReport,
}

/// A parsed and collected source file, owned for the duration of one run.
struct SourceUnit {
    path: PathBuf,
    parsed: ParsedJSX,
    collected: CollectedFile,
}

pub struct Pipeline<'a> {
    root: &'a Path,
    config: &'a Config,
    inspector: &'a dyn ProjectInspector,
    classifier: Classifier,
    verbose: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(root: &'a Path, config: &'a Config, inspector: &'a dyn ProjectInspector) -> Self {
        Self {
            root,
            config,
            inspector,
            classifier: Classifier::new(config),
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Extract strings under `source_dir` into the catalog, then rewrite the
    /// files to use it.
    pub fn extract(&self, source_dir: &Path, options: ExtractOptions) -> Result<ExtractReport> {
        let files = self.discover(source_dir);
        let units = self.load_units(&files)?;

        let catalog_path = self.config.catalog_path(self.root);
        let existing = Catalog::load_optional(&catalog_path)?;

        let backup = if options.backup && !options.dry_run {
            let locales = self.config.locales_path(self.root);
            Some(create_backup(self.root, &[source_dir, locales.as_path()])?)
        } else {
            None
        };

        let scaffolded = ensure_i18n_setup(source_dir, self.root, self.config, options.dry_run)?;

        let strings = self.extract_strings(&units);
        let mut catalog = existing.unwrap_or_default();
        let mut collisions = Vec::new();
        let mut produced: HashSet<&str> = HashSet::new();

        for s in &strings {
            if options.cleanup && !s.was_transformed {
                continue;
            }
            if let InsertOutcome::Collision { previous } = catalog.insert(&s.key, &s.value) {
                collisions.push(KeyCollision {
                    key: s.key.clone(),
                    previous,
                    value: s.value.clone(),
                    file: s.file.clone(),
                    line: s.line,
                });
            }
            produced.insert(&s.key);
        }

        let removed_keys = if options.cleanup {
            let referenced: HashSet<&str> = units
                .iter()
                .flat_map(|unit| unit.collected.referenced_keys.iter().map(String::as_str))
                .collect();
            catalog.retain(|key, _| produced.contains(key) || referenced.contains(key))
        } else {
            Vec::new()
        };

        if !options.dry_run {
            catalog.save(&catalog_path)?;
        }

        let rewrite = self.rewrite_units(&units, &catalog, options.dry_run)?;

        Ok(ExtractReport {
            dry_run: options.dry_run,
            files_scanned: units.len(),
            strings,
            collisions,
            removed_keys,
            catalog_path,
            catalog_entries: catalog.len(),
            scaffolded,
            backup,
            rewrite,
        })
    }

    /// Rewrite the files under `source_dir` against the existing catalog.
    pub fn transform(&self, source_dir: &Path, dry_run: bool) -> Result<TransformReport> {
        let catalog_path = self.config.catalog_path(self.root);
        let catalog = Catalog::load(&catalog_path)?;

        let files = self.discover(source_dir);
        let units = self.load_units(&files)?;
        let rewrite = self.rewrite_units(&units, &catalog, dry_run)?;

        Ok(TransformReport {
            dry_run,
            files_scanned: units.len(),
            catalog_path,
            rewrite,
        })
    }

    fn discover(&self, source_dir: &Path) -> Vec<PathBuf> {
        let mut files = scan_files(
            source_dir,
            self.root,
            &self.config.ignores,
            self.config.ignore_test_files,
            self.verbose,
        )
        .files;

        // Earlier backups may sit inside the scanned tree.
        files.retain(|path| {
            !path.components().any(|c| {
                c.as_os_str()
                    .to_string_lossy()
                    .starts_with(BACKUP_DIR_PREFIX)
            })
        });
        files
    }

    /// Parse and collect every file. The first failure in file order wins.
    fn load_units(&self, files: &[PathBuf]) -> Result<Vec<SourceUnit>, PipelineError> {
        let results: Vec<Result<SourceUnit, PipelineError>> = files
            .par_iter()
            .map(|path| {
                let parsed = parse_file(path)?;
                let collected = collect_file(&parsed, self.config);
                Ok(SourceUnit {
                    path: path.clone(),
                    parsed,
                    collected,
                })
            })
            .collect();

        results.into_iter().collect()
    }

    fn extract_strings(&self, units: &[SourceUnit]) -> Vec<ExtractedString> {
        units
            .iter()
            .flat_map(|unit| {
                unit.collected
                    .candidates
                    .iter()
                    .filter(|candidate| self.classifier.classify(candidate).is_extract())
                    .map(|candidate| ExtractedString {
                        value: candidate.node.value.clone(),
                        key: generate_key(&unit.path, &candidate.node.value),
                        file: unit.path.clone(),
                        line: candidate.node.line,
                        was_transformed: self.classifier.would_transform(candidate),
                    })
            })
            .collect()
    }

    fn rewrite_units(
        &self,
        units: &[SourceUnit],
        catalog: &Catalog,
        dry_run: bool,
    ) -> Result<RewriteReport> {
        let lookup = catalog.flatten_for_lookup();
        let rewriter = Rewriter::new(&lookup, &self.classifier, self.config);

        let results: Vec<Result<Option<RewrittenFile>, PipelineError>> = units
            .par_iter()
            .map(|unit| {
                if !rewriter.needs_rewrite(&unit.collected) {
                    return Ok(None);
                }
                let add_directive =
                    directive_required(self.config, self.inspector, &unit.path, self.root);
                let outcome = rewriter.rewrite_file(
                    &unit.path,
                    &unit.parsed,
                    &unit.collected,
                    add_directive,
                    dry_run,
                )?;
                Ok(outcome.changed.then(|| RewrittenFile {
                    path: unit.path.clone(),
                    replaced: outcome.replaced,
                }))
            })
            .collect();

        let mut report = RewriteReport::default();
        for result in results {
            match result {
                Ok(Some(file)) => report.rewritten.push(file),
                Ok(None) => {}
                Err(e) if e.is_file_scoped() => report.failures.push(e),
                Err(e) => return Err(e.into()),
            }
        }
        Ok(report)
    }
}
