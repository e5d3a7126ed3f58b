//! Input directory listing.
//!
//! Lists the direct entries of the input directory (no recursion) and
//! separates regular files from everything else. Symlinks are followed, so
//! a link to a regular file counts as a file and a link to a directory or a
//! dangling link does not.

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

/// Direct entries of an input directory, in listing order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    /// Regular files (after following symlinks).
    pub files: Vec<PathBuf>,
    /// Directories, dangling links and other non-file entries.
    pub others: Vec<PathBuf>,
}

impl DirectoryListing {
    pub fn total(&self) -> usize {
        self.files.len() + self.others.len()
    }
}

/// Checks that `input_dir` exists and is a directory.
pub fn ensure_input_dir(input_dir: &Path) -> CoreResult<()> {
    if input_dir.is_dir() {
        Ok(())
    } else {
        Err(CoreError::InputDirectoryMissing(input_dir.to_path_buf()))
    }
}

/// Lists the direct entries of `input_dir`.
///
/// # Examples
///
/// ```rust,no_run
/// use mediaconv_core::discovery::list_input_dir;
/// use std::path::Path;
///
/// let listing = list_input_dir(Path::new("/path/to/uploads")).unwrap();
/// for file in &listing.files {
///     println!("{}", file.display());
/// }
/// ```
pub fn list_input_dir(input_dir: &Path) -> CoreResult<DirectoryListing> {
    ensure_input_dir(input_dir)?;

    let mut listing = DirectoryListing::default();
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        if path.is_file() {
            listing.files.push(path);
        } else {
            listing.others.push(path);
        }
    }

    log::debug!(
        "Listed {}: {} file(s), {} other entr(ies)",
        input_dir.display(),
        listing.files.len(),
        listing.others.len()
    );
    Ok(listing)
}
