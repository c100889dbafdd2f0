use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for batch_vmt operations
#[derive(Error, Debug)]
pub enum VmtError {
    /// IO error when reading files or directories
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Template file not found
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Ignore pattern that doesn't compile as a regular expression
    #[error("Invalid ignore pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Image extension that can't be turned into a glob
    #[error("Invalid image extension '{extension}': {source}")]
    InvalidExtension {
        extension: String,
        #[source]
        source: globset::Error,
    },

    /// Malformed `keyword:replacement` entry
    #[error("Invalid substitution '{entry}': {reason}")]
    InvalidSubstitution { entry: String, reason: String },

    /// Generation mode that has no working implementation yet
    #[error("The {mode} mode is not implemented")]
    UnimplementedMode { mode: String },

    /// Writing one descriptor failed
    #[error("Failed to write {}: {source}", .path.display())]
    CandidateWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Listing a folder, or one of its entries, failed. Recovered like
    /// `CandidateWrite`.
    #[error("Failed to read folder {}: {source}", .path.display())]
    FolderRead {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification used to decide whether an error is fatal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input to the run; raised before anything is written
    Configuration,
    /// One candidate or folder failed; recorded in the batch result and
    /// the batch keeps going
    Recoverable,
    /// The metadata mode was requested
    UnimplementedMode,
    /// Anything else coming from the filesystem or serialization
    Io,
}

impl VmtError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::FileNotFound { .. }
            | Self::InvalidPattern { .. }
            | Self::InvalidExtension { .. }
            | Self::InvalidSubstitution { .. } => ErrorKind::Configuration,
            Self::CandidateWrite { .. } | Self::FolderRead { .. } => ErrorKind::Recoverable,
            Self::UnimplementedMode { .. } => ErrorKind::UnimplementedMode,
            Self::Io(_) | Self::Json(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = std::result::Result<T, VmtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VmtError::FileNotFound {
            path: PathBuf::from("base.vmt"),
        };
        assert_eq!(format!("{err}"), "File not found: base.vmt");

        let err = VmtError::InvalidSubstitution {
            entry: "a:b:c".to_string(),
            reason: "expected exactly one ':'".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "Invalid substitution 'a:b:c': expected exactly one ':'"
        );

        let err = VmtError::UnimplementedMode {
            mode: "metadata".to_string(),
        };
        assert_eq!(format!("{err}"), "The metadata mode is not implemented");

        let err = VmtError::CandidateWrite {
            path: PathBuf::from("materials/wall.vmt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(format!("{err}").contains("materials/wall.vmt"));
        assert!(format!("{err}").contains("denied"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: VmtError = io_err.into();
        assert!(matches!(err, VmtError::Io(_)));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_error_kinds() {
        let pattern_err = regex::Regex::new("(").unwrap_err();
        let err = VmtError::InvalidPattern {
            pattern: "(".to_string(),
            source: pattern_err,
        };
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = VmtError::FileNotFound {
            path: PathBuf::from("missing.vmt"),
        };
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = VmtError::UnimplementedMode {
            mode: "metadata".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::UnimplementedMode);
    }

    #[test]
    fn test_per_item_errors_are_recoverable() {
        let err = VmtError::CandidateWrite {
            path: PathBuf::from("wall.vmt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.kind(), ErrorKind::Recoverable);

        let temp_dir = tempfile::TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");
        let walk_err = walkdir::WalkDir::new(&missing)
            .into_iter()
            .next()
            .unwrap()
            .unwrap_err();
        let err = VmtError::FolderRead {
            path: missing,
            source: walk_err,
        };
        assert_eq!(err.kind(), ErrorKind::Recoverable);
    }
}
