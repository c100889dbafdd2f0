//! # batch_vmt
//!
//! Generates Source engine material descriptors (`.vmt`) for folders of
//! textures (`.vtf`). A template containing `<keyword>` placeholders is
//! expanded once per texture and written next to it.
//!
//! ## Features
//!
//! - `<filename>` is bound to each texture's path without its extension
//! - Extra `<keyword>` placeholders are filled from a substitution map
//! - Regex ignore patterns to skip bump maps, editor textures and the like
//! - Optional recursion into sub-folders
//! - One failed file never stops the rest of the batch
//!
//! ## Usage
//!
//! ### As a Library
//!
//! ```no_run
//! use batch_vmt::{GenerationMode, GeneratorConfig, SubstitutionMap, TemplateSource, generate};
//!
//! let template = "LightmappedGeneric\n{\n\t$basetexture <filename>\n\t$bumpmap <bumpmap>\n}";
//! let mode = GenerationMode::Template(TemplateSource::Literal(template.to_string()));
//! let substitutions: SubstitutionMap = [("bumpmap", "<filename>_bump")].into_iter().collect();
//! let no_files: [&str; 0] = [];
//!
//! match generate(&mode, substitutions, [".*_bump"], GeneratorConfig::default(), ["materials/brick"], no_files) {
//!     Ok(result) => println!("{} written, {} skipped", result.written, result.skipped),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! ### As a CLI Tool
//!
//! ```bash
//! # Generate from base.vmt for every texture in a folder
//! batch_vmt materials/brick
//!
//! # Displacement materials, skipping the blend and bump textures
//! batch_vmt -t displacement_base.vmt -s bumpmap:<filename>_bump -i '.*_a' '.*_bump' -- materials/disp
//! ```

pub mod batch;
pub mod error;
pub mod filter;
pub mod fs_utils;
pub mod metadata;
pub mod template;

// Re-export main types and functions for convenience
pub use batch::{BatchGenerator, BatchResult, Failure, GenerationMode, GeneratorConfig, generate};
pub use error::{ErrorKind, Result, VmtError};
pub use filter::IgnoreMatcher;
pub use fs_utils::{Candidate, FolderWalker};
pub use metadata::{MetadataExtractor, PendingExtractor, TextureMetadata};
pub use template::{SubstitutionMap, Template, TemplateSource, expand, parse_substitution};
