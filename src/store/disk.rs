//! Durable file primitives: atomic replace, append, read.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::store::StoreError;

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

fn ensure_parent(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Replace the contents of `path` with `content`, all-or-nothing.
///
/// The content is written to a sibling temporary file, forced to durable
/// storage, then renamed over the destination. A crash at any point leaves
/// `path` at either its old complete content or its new complete content.
/// On failure the temporary file is removed and the destination is left
/// untouched.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<(), StoreError> {
    ensure_parent(path)?;
    let temp = temp_sibling(path);

    let result = write_then_rename(&temp, path, content);
    if result.is_err() {
        let _ = fs::remove_file(&temp);
    }
    result
}

fn write_then_rename(temp: &Path, path: &Path, content: &[u8]) -> Result<(), StoreError> {
    let mut file = File::create(temp)?;
    file.write_all(content)?;
    file.sync_all()?;
    drop(file);

    if fs::rename(temp, path).is_err() {
        // Some platforms refuse to rename over an existing destination.
        let _ = fs::remove_file(path);
        fs::rename(temp, path)?;
    }
    Ok(())
}

/// Append `content` to `path`, creating the file if absent, and force it
/// to durable storage.
///
/// Appends are durable but not atomic: a crash can truncate the final
/// write, which is acceptable for an event log. A failed write is always
/// reported, never swallowed.
pub fn append(path: &Path, content: &[u8]) -> Result<(), StoreError> {
    ensure_parent(path)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(content)?;
    file.sync_all()?;
    Ok(())
}

/// Read a whole file as UTF-8 text, failing if it is absent or unreadable.
pub fn read(path: &Path) -> Result<String, StoreError> {
    Ok(fs::read_to_string(path)?)
}

/// Like [`read`], but a missing file is reported as `None` instead of an
/// error. Any other IO failure still fails loudly.
pub fn try_read(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}
