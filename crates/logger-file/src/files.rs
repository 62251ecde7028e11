//! Managed log files and size-triggered rotation

use crate::config::{ErrorLog, FileLoggerConfig};
use crate::error::{Error, Result};
use chrono::{DateTime, Local};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// `YYYYMMDDHHMMSSmmm`, appended to the original path on rotation
pub const BACKUP_SUFFIX_FORMAT: &str = "%Y%m%d%H%M%S%3f";

/// Backup path for `path` rotated at `at`
pub fn backup_path(path: &Path, at: DateTime<Local>) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(at.format(BACKUP_SUFFIX_FORMAT).to_string());
    PathBuf::from(name)
}

/// Like [`backup_path`], adding `.1`, `.2`, ... if that name is taken so
/// rotations within the same millisecond never overwrite a backup.
fn free_backup_path(path: &Path, at: DateTime<Local>) -> PathBuf {
    let base = backup_path(path, at);
    let mut candidate = base.clone();
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        let mut name = OsString::from(base.as_os_str());
        name.push(format!(".{counter}"));
        candidate = PathBuf::from(name);
    }
    candidate
}

fn open_append(path: &Path) -> Result<File> {
    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    options.open(path).map_err(|source| Error::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// One log file: its path plus the open append handle.
///
/// The handle is `None` only after a failed rotation or reopen; the next
/// append tries to reopen the path.
#[derive(Debug)]
pub struct ManagedFile {
    path: PathBuf,
    file: Option<File>,
}

impl ManagedFile {
    /// Open (or create) `path` for appending
    ///
    /// # Errors
    ///
    /// Returns [`Error::Open`] if the file cannot be opened.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = open_append(&path)?;
        Ok(Self {
            path,
            file: Some(file),
        })
    }

    /// Path of the active file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current size in bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be inspected.
    pub fn size(&self) -> Result<u64> {
        let metadata = match &self.file {
            Some(file) => file.metadata(),
            None => fs::metadata(&self.path),
        };
        metadata
            .map(|m| m.len())
            .map_err(|e| Error::Io("failed to read log file size", e))
    }

    /// Whether the file is larger than `max` bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be read.
    pub fn exceeds(&self, max: u64) -> Result<bool> {
        Ok(self.size()? > max)
    }

    /// Move the file aside and start a fresh one at the same path.
    ///
    /// Returns the backup path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Rotation`] if the rename fails (the original path is
    /// reopened so writes can continue) or [`Error::Open`] if the new file
    /// cannot be created.
    pub fn rotate(&mut self, now: DateTime<Local>) -> Result<PathBuf> {
        let backup = free_backup_path(&self.path, now);

        // Close before renaming
        drop(self.file.take());

        if let Err(source) = fs::rename(&self.path, &backup) {
            self.file = open_append(&self.path).ok();
            return Err(Error::Rotation {
                path: self.path.clone(),
                backup,
                source,
            });
        }

        self.file = Some(open_append(&self.path)?);
        Ok(backup)
    }

    /// Append raw bytes
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be reopened or written.
    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        let file = match self.file.take() {
            Some(file) => file,
            None => open_append(&self.path)?,
        };
        let file = self.file.insert(file);
        file.write_all(bytes)
            .map_err(|e| Error::Io("failed to write log file", e))
    }

    /// Flush the handle, if open
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    pub fn flush(&mut self) -> Result<()> {
        match self.file.as_mut() {
            Some(file) => file
                .flush()
                .map_err(|e| Error::Io("failed to flush log file", e)),
            None => Ok(()),
        }
    }
}

/// Which file of the set an operation targets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// Every record
    Main,
    /// ERROR and FATAL records
    Error,
}

/// The main and error files, owned by the single writer
#[derive(Debug)]
pub struct FileSet {
    max_file_size: u64,
    main: ManagedFile,
    /// `None` when error records go to the main file
    error: Option<ManagedFile>,
}

impl FileSet {
    /// Create the directory if needed and open both files
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or a file cannot
    /// be opened.
    pub fn open(config: &FileLoggerConfig) -> Result<Self> {
        fs::create_dir_all(&config.directory).map_err(|source| Error::CreateDirectory {
            path: config.directory.clone(),
            source,
        })?;

        let main = ManagedFile::open(config.main_path())?;
        let error = match config.error_log() {
            ErrorLog::Separate(name) => Some(ManagedFile::open(config.directory.join(name))?),
            ErrorLog::SameAsMain => None,
        };

        Ok(Self {
            max_file_size: config.max_file_size,
            main,
            error,
        })
    }

    /// The file a target resolves to
    pub fn file(&self, target: Target) -> &ManagedFile {
        match (target, &self.error) {
            (Target::Error, Some(error)) => error,
            _ => &self.main,
        }
    }

    fn file_mut(&mut self, target: Target) -> &mut ManagedFile {
        match (target, &mut self.error) {
            (Target::Error, Some(error)) => error,
            _ => &mut self.main,
        }
    }

    /// Rotate the target if it has grown past the limit.
    ///
    /// Returns the backup path when a rotation happened.
    ///
    /// # Errors
    ///
    /// Returns an error if the size check or the rotation fails.
    pub fn rotate_if_needed(
        &mut self,
        target: Target,
        now: DateTime<Local>,
    ) -> Result<Option<PathBuf>> {
        let max_file_size = self.max_file_size;
        let file = self.file_mut(target);
        if !file.exceeds(max_file_size)? {
            return Ok(None);
        }

        let backup = file.rotate(now)?;
        info!(
            path = %file.path().display(),
            backup = %backup.display(),
            "rotated log file"
        );
        Ok(Some(backup))
    }

    /// Append bytes to the target
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn append(&mut self, target: Target, bytes: &[u8]) -> Result<()> {
        self.file_mut(target).append(bytes)
    }

    /// Flush every open file
    ///
    /// # Errors
    ///
    /// Returns the first flush error.
    pub fn flush(&mut self) -> Result<()> {
        self.main.flush()?;
        if let Some(error) = self.error.as_mut() {
            error.flush()?;
        }
        Ok(())
    }
}
