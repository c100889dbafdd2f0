use crate::error::{Result, VmtError};
use globset::{Glob, GlobMatcher};
use log::debug;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Reads the contents of a file at the given path
///
/// # Errors
///
/// - `VmtError::FileNotFound` if the path doesn't exist or isn't a file.
/// - `VmtError::Io` if there's an error reading the file.
pub fn read_file_contents(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(VmtError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    fs::read_to_string(path).map_err(std::convert::Into::into)
}

/// A texture file eligible for descriptor generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Path of the image file as discovered or given
    pub path: PathBuf,
    /// `path` with its extension removed
    pub stem: PathBuf,
}

impl Candidate {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stem = path.with_extension("");
        Self { path, stem }
    }

    /// Value bound to the `<filename>` placeholder
    #[must_use]
    pub fn filename(&self) -> String {
        self.stem.to_string_lossy().into_owned()
    }

    /// Sibling output path: the stem with `extension` appended.
    ///
    /// Appends rather than replaces so `a.b.vtf` maps to `a.b.vmt`.
    #[must_use]
    pub fn descriptor_path(&self, extension: &str) -> PathBuf {
        let mut path = OsString::from(self.stem.as_os_str());
        path.push(".");
        path.push(extension);
        PathBuf::from(path)
    }
}

/// Lazily yields image files found in a queue of folders.
///
/// Folders are visited in the order they were queued and each folder's
/// entries in directory-listing order. When recursing, every sub-folder
/// found is appended to the tail of the same queue, so nested folders are
/// only reached after all folders queued before them, inputs included.
#[derive(Debug)]
pub struct FolderWalker {
    queue: Vec<PathBuf>,
    cursor: usize,
    current: std::vec::IntoIter<Result<PathBuf>>,
    matcher: GlobMatcher,
    recursive: bool,
}

/// Compiles the case-sensitive `*.<extension>` glob used to pick image files.
///
/// A leading dot on `extension` is optional.
///
/// # Errors
///
/// Returns `VmtError::InvalidExtension` if the extension doesn't form a valid glob.
pub fn extension_matcher(extension: &str) -> Result<GlobMatcher> {
    let extension = extension.trim_start_matches('.');
    Glob::new(&format!("*.{extension}"))
        .map(|glob| glob.compile_matcher())
        .map_err(|source| VmtError::InvalidExtension {
            extension: extension.to_string(),
            source,
        })
}

impl FolderWalker {
    /// Creates a walker over `folders` yielding files whose name matches `matcher`
    pub fn new<I, P>(folders: I, matcher: GlobMatcher, recursive: bool) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            queue: folders.into_iter().map(Into::into).collect(),
            cursor: 0,
            current: Vec::new().into_iter(),
            matcher,
            recursive,
        }
    }

    /// Folders queued so far, including any discovered sub-folders
    #[must_use]
    pub fn queued(&self) -> &[PathBuf] {
        &self.queue
    }

    fn list_folder(&mut self, folder: &Path) -> Vec<Result<PathBuf>> {
        debug!("Scanning {}", folder.display());
        self.collect_entries(folder, WalkDir::new(folder).min_depth(1).max_depth(1))
    }

    /// Splits one folder's entries into candidate files and queued
    /// sub-folders. An unreadable entry becomes an error item in listing
    /// position; the rest of the folder is still listed.
    fn collect_entries<I>(&mut self, folder: &Path, entries: I) -> Vec<Result<PathBuf>>
    where
        I: IntoIterator<Item = walkdir::Result<DirEntry>>,
    {
        let mut items = Vec::new();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    items.push(Err(VmtError::FolderRead {
                        path: folder.to_path_buf(),
                        source,
                    }));
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                if self.recursive {
                    debug!("Queueing {}", entry.path().display());
                    self.queue.push(entry.into_path());
                }
            } else if self.matcher.is_match(entry.file_name()) {
                items.push(Ok(entry.into_path()));
            }
        }

        items
    }
}

impl Iterator for FolderWalker {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.current.next() {
                return Some(item);
            }

            let folder = self.queue.get(self.cursor)?.clone();
            self.cursor += 1;
            self.current = self.list_folder(&folder).into_iter();
        }
    }
}
