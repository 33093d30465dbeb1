//! Recursive copy, move, and removal of cache directories
//!
//! Copies keep going past entries that fail and report them as warnings,
//! so one unreadable file does not throw away the rest of a cache.

use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// An entry that could not be transferred
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferWarning {
    pub path: PathBuf,
    pub reason: String,
}

impl TransferWarning {
    fn new(path: &Path, err: impl ToString) -> Self {
        Self {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }
}

/// Copy `src` to `dst` recursively, preserving permissions and symlinks
fn copy_entry(src: &Path, dst: &Path, warnings: &mut Vec<TransferWarning>) {
    let meta = match fs::symlink_metadata(src) {
        Ok(meta) => meta,
        Err(e) => {
            warnings.push(TransferWarning::new(src, e));
            return;
        }
    };

    let file_type = meta.file_type();
    if file_type.is_symlink() {
        if let Err(e) = copy_symlink(src, dst) {
            warnings.push(TransferWarning::new(src, e));
        }
    } else if file_type.is_dir() {
        if let Err(e) = fs::create_dir_all(dst) {
            warnings.push(TransferWarning::new(dst, e));
            return;
        }

        let entries = match fs::read_dir(src) {
            Ok(entries) => entries,
            Err(e) => {
                warnings.push(TransferWarning::new(src, e));
                return;
            }
        };
        for entry in entries {
            match entry {
                Ok(entry) => copy_entry(&entry.path(), &dst.join(entry.file_name()), warnings),
                Err(e) => warnings.push(TransferWarning::new(src, e)),
            }
        }

        // Permissions last, so a read-only directory can still be filled
        if let Err(e) = fs::set_permissions(dst, meta.permissions()) {
            warnings.push(TransferWarning::new(dst, e));
        }
    } else if file_type.is_file() {
        if let Err(e) = fs::copy(src, dst) {
            warnings.push(TransferWarning::new(src, e));
        }
    } else {
        // Sockets, FIFOs and device nodes would block or make no sense to cache
        warnings.push(TransferWarning::new(src, "not a regular file, skipped"));
    }
}

#[cfg(unix)]
fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    let target = fs::read_link(src)?;
    std::os::unix::fs::symlink(target, dst)
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, dst: &Path) -> io::Result<()> {
    fs::copy(src, dst).map(|_| ())
}

fn ensure_parent(dst: &Path) -> io::Result<()> {
    match dst.parent() {
        Some(parent) => fs::create_dir_all(parent),
        None => Ok(()),
    }
}

/// Copy a file or directory tree, creating parent directories of `dst`
pub fn copy_tree_blocking(src: &Path, dst: &Path) -> Vec<TransferWarning> {
    let mut warnings = Vec::new();
    if let Err(e) = ensure_parent(dst) {
        warnings.push(TransferWarning::new(dst, e));
        return warnings;
    }
    copy_entry(src, dst, &mut warnings);
    debug!(
        "Copied {} -> {} ({} warnings)",
        src.display(),
        dst.display(),
        warnings.len()
    );
    warnings
}

/// Move a file or directory tree, creating parent directories of `dst`
///
/// Tries a rename first. When that fails (e.g. across filesystems) it
/// copies and then removes the source, but only if the copy was complete.
pub fn move_tree_blocking(src: &Path, dst: &Path) -> Vec<TransferWarning> {
    if let Err(e) = ensure_parent(dst) {
        return vec![TransferWarning::new(dst, e)];
    }

    match fs::rename(src, dst) {
        Ok(()) => return Vec::new(),
        Err(e) => debug!("Rename {} failed ({}), copying instead", src.display(), e),
    }

    let mut warnings = copy_tree_blocking(src, dst);
    if warnings.is_empty() {
        if let Err(e) = remove_path_blocking(src) {
            warnings.push(TransferWarning::new(src, e));
        }
    }
    warnings
}

/// Remove a file or directory tree; a missing path is not an error
pub fn remove_path_blocking(path: &Path) -> io::Result<()> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };

    let result = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

async fn blocking<T, F>(f: F, on_panic: impl FnOnce(tokio::task::JoinError) -> T) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.unwrap_or_else(on_panic)
}

/// Async wrapper for [`copy_tree_blocking`]
pub async fn copy_tree(src: PathBuf, dst: PathBuf) -> Vec<TransferWarning> {
    let at = src.clone();
    blocking(move || copy_tree_blocking(&src, &dst), |e| {
        vec![TransferWarning::new(&at, e)]
    })
    .await
}

/// Async wrapper for [`move_tree_blocking`]
pub async fn move_tree(src: PathBuf, dst: PathBuf) -> Vec<TransferWarning> {
    let at = src.clone();
    blocking(move || move_tree_blocking(&src, &dst), |e| {
        vec![TransferWarning::new(&at, e)]
    })
    .await
}

/// Async wrapper for [`remove_path_blocking`]
pub async fn remove_path(path: PathBuf) -> io::Result<()> {
    blocking(move || remove_path_blocking(&path), |e| Err(io::Error::other(e.to_string()))).await
}

/// Whether anything (file, directory, or symlink) exists at `path`
pub async fn exists(path: &Path) -> bool {
    tokio::fs::symlink_metadata(path).await.is_ok()
}
