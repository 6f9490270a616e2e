//! Append-only line writer with numbered size-based rotation.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Rotate once the file would grow past this size (10 MB).
pub const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Backups kept after rotation.
pub const MAX_BACKUP_FILES: usize = 3;

#[derive(Debug, Default)]
struct Inner {
    file: Option<File>,
    size: u64,
}

/// Line writer rotating `name` → `name.1` → `name.2` → … when full.
///
/// The file is opened lazily on the first write, so construction never
/// fails. The oldest backup beyond the limit is deleted.
#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    inner: Mutex<Inner>,
}

impl RotatingFile {
    pub fn new(path: PathBuf) -> Self {
        Self::with_limits(path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    pub fn with_limits(path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            backups,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Appends `line` plus a newline and flushes.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from rotating, opening or writing, and an error if
    /// the lock was poisoned.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("mutex poisoned: {e}")))?;

        let incoming = line.len() as u64 + 1;

        if inner.file.is_none() {
            inner.size = fs::metadata(&self.path).map_or(0, |m| m.len());
        }
        if inner.size > 0 && inner.size + incoming > self.max_bytes {
            inner.file = None;
            self.rotate()?;
            inner.size = 0;
        }

        if inner.file.is_none() {
            inner.file = Some(OpenOptions::new().create(true).append(true).open(&self.path)?);
        }

        let Inner { file, size } = &mut *inner;
        let file = file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "no file available"))?;
        writeln!(file, "{line}")?;
        file.flush()?;
        *size += incoming;
        Ok(())
    }

    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return fs::remove_file(&self.path);
        }

        let oldest = backup_path(&self.path, self.backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }
        for n in (1..self.backups).rev() {
            let from = backup_path(&self.path, n);
            if from.exists() {
                fs::rename(&from, backup_path(&self.path, n + 1))?;
            }
        }
        if self.path.exists() {
            fs::rename(&self.path, backup_path(&self.path, 1))?;
        }
        Ok(())
    }
}

/// `path` with `.n` appended to the full file name.
pub fn backup_path(path: &Path, n: usize) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(format!(".{n}"));
    PathBuf::from(name)
}
