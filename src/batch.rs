//! Batch descriptor generation.
//!
//! A [`BatchGenerator`] is built once per run: loading it compiles the
//! ignore patterns and reads the template, so every configuration problem
//! surfaces before any file is touched. [`BatchGenerator::run`] then walks
//! the inputs and writes one descriptor per texture, recording per-file
//! failures instead of stopping.

use crate::error::{Result, VmtError};
use crate::filter::IgnoreMatcher;
use crate::fs_utils::{Candidate, FolderWalker, extension_matcher};
use crate::metadata;
use crate::template::{SubstitutionMap, Template, TemplateSource, expand};
use globset::GlobMatcher;
use log::{info, warn};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// Default image extension searched for in folders
pub const DEFAULT_IMAGE_EXTENSION: &str = "vtf";
/// Default extension of generated descriptors
pub const DEFAULT_DESCRIPTOR_EXTENSION: &str = "vmt";

/// How descriptors are produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationMode {
    /// Expand a template for every texture
    Template(TemplateSource),
    /// Derive descriptors from texture metadata (not implemented)
    Metadata,
}

/// Options for a single batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Extension of the image files to pick up in folders
    pub image_extension: String,
    /// Extension of the descriptor written next to each image
    pub descriptor_extension: String,
    /// Queue sub-folders found while scanning
    pub recursive: bool,
    /// Log a line for every written or skipped file
    pub verbose: bool,
    /// Report what would be written without writing
    pub dry_run: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            image_extension: DEFAULT_IMAGE_EXTENSION.to_string(),
            descriptor_extension: DEFAULT_DESCRIPTOR_EXTENSION.to_string(),
            recursive: false,
            verbose: false,
            dry_run: false,
        }
    }
}

/// A file that could not be processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<Failure>,
}

impl BatchResult {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Written => self.written += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Failed(err) => self.record_failure(&err),
        }
    }

    fn record_failure(&mut self, err: &VmtError) {
        let path = match err {
            VmtError::CandidateWrite { path, .. } | VmtError::FolderRead { path, .. } => {
                path.clone()
            }
            _ => PathBuf::new(),
        };
        warn!("{err}");
        self.failed += 1;
        self.failures.push(Failure {
            path,
            reason: err.to_string(),
        });
    }

    /// Total number of candidates and folders accounted for
    #[must_use]
    pub fn total(&self) -> usize {
        self.written + self.skipped + self.failed
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

enum Outcome {
    Written,
    Skipped,
    Failed(VmtError),
}

/// Generates descriptors for a batch of textures
#[derive(Debug, Clone)]
pub struct BatchGenerator {
    template: Template,
    substitutions: SubstitutionMap,
    ignore: IgnoreMatcher,
    images: GlobMatcher,
    config: GeneratorConfig,
}

impl BatchGenerator {
    /// Validates the run configuration and loads the template.
    ///
    /// # Errors
    ///
    /// - `VmtError::UnimplementedMode` for `GenerationMode::Metadata`.
    /// - `VmtError::InvalidPattern` if an ignore pattern doesn't compile.
    /// - `VmtError::InvalidExtension` if the image extension isn't usable.
    /// - `VmtError::FileNotFound` or `VmtError::Io` if the template can't be read.
    pub fn load<I, S>(
        mode: &GenerationMode,
        substitutions: SubstitutionMap,
        ignore_patterns: I,
        config: GeneratorConfig,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let source = match mode {
            GenerationMode::Template(source) => source,
            GenerationMode::Metadata => return Err(metadata::unimplemented_mode()),
        };

        let ignore = IgnoreMatcher::new(ignore_patterns)?;
        let images = extension_matcher(&config.image_extension)?;
        let template = source.load()?;

        if substitutions.overrides_filename() {
            warn!("<filename> is overridden; every generated descriptor will be identical");
        }

        Ok(Self {
            template,
            substitutions,
            ignore,
            images,
            config,
        })
    }

    #[must_use]
    pub fn template(&self) -> &Template {
        &self.template
    }

    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Expanded descriptor text for `candidate`
    #[must_use]
    pub fn render(&self, candidate: &Candidate) -> String {
        expand(&self.template, &self.substitutions, &candidate.filename())
    }

    /// Processes every folder, then every standalone file, in input order.
    ///
    /// Files found in folders go through the ignore patterns; standalone
    /// files are taken as given, whatever their extension.
    pub fn run<F, P, G, Q>(&self, folders: F, files: G) -> BatchResult
    where
        F: IntoIterator<Item = P>,
        P: Into<PathBuf>,
        G: IntoIterator<Item = Q>,
        Q: Into<PathBuf>,
    {
        let mut result = BatchResult::default();

        let walker = FolderWalker::new(folders, self.images.clone(), self.config.recursive);
        for entry in walker {
            let outcome = match entry {
                Ok(path) => self.process(&Candidate::new(path), true),
                Err(err) => Outcome::Failed(err),
            };
            result.record(outcome);
        }

        for path in files {
            let outcome = self.process(&Candidate::new(path), false);
            result.record(outcome);
        }

        result
    }

    fn process(&self, candidate: &Candidate, filtered: bool) -> Outcome {
        if filtered && let Some(pattern) = self.ignore.matching_pattern(&candidate.stem) {
            if self.config.verbose {
                info!("Skipping {} (matches '{pattern}')", candidate.path.display());
            }
            return Outcome::Skipped;
        }

        let output = candidate.descriptor_path(&self.config.descriptor_extension);
        let text = self.render(candidate);

        if self.config.dry_run {
            if self.config.verbose {
                info!("Would write {}", output.display());
            }
            return Outcome::Written;
        }

        match fs::write(&output, text) {
            Ok(()) => {
                if self.config.verbose {
                    info!("Wrote {}", output.display());
                }
                Outcome::Written
            }
            Err(source) => Outcome::Failed(VmtError::CandidateWrite {
                path: output,
                source,
            }),
        }
    }
}

/// Loads a generator and runs it over `folders` and `files` in one call.
///
/// # Errors
///
/// Returns any configuration error from [`BatchGenerator::load`]. Per-file
/// failures are reported in the returned [`BatchResult`] instead.
pub fn generate<I, S, F, P, G, Q>(
    mode: &GenerationMode,
    substitutions: SubstitutionMap,
    ignore_patterns: I,
    config: GeneratorConfig,
    folders: F,
    files: G,
) -> Result<BatchResult>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: IntoIterator<Item = P>,
    P: Into<PathBuf>,
    G: IntoIterator<Item = Q>,
    Q: Into<PathBuf>,
{
    let generator = BatchGenerator::load(mode, substitutions, ignore_patterns, config)?;
    Ok(generator.run(folders, files))
}
