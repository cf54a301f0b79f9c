use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{PropertiesError, Result};

/// Extension appended to the base name of every properties file.
pub const FILE_EXTENSION: &str = ".proper";

/// Prefix of the backup sibling created next to a properties file.
pub const BACKUP_PREFIX: &str = "copy-";

/// Whether a missing parent directory is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirectoryCreation {
    #[default]
    Create,
    Skip,
}

/// Whether an empty backup copy is created next to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileCreation {
    #[default]
    PlainOnly,
    WithBackupCopy,
}

/// Make sure `dir` exists. Returns true when it had to be created.
///
/// With `DirectoryCreation::Skip` a missing directory is left alone; opening
/// a file inside it then fails with an I/O error.
pub fn ensure_directory(dir: &Path, policy: DirectoryCreation) -> Result<bool> {
    if dir.is_dir() {
        debug!("lifecycle: directory {:?} exists, none created", dir);
        return Ok(false);
    }

    match policy {
        DirectoryCreation::Create => {
            fs::create_dir_all(dir).map_err(|e| PropertiesError::Io(e.to_string()))?;
            info!("lifecycle: directory {:?} has been created", dir);
            Ok(true)
        }
        DirectoryCreation::Skip => {
            debug!("lifecycle: directory {:?} missing, creation skipped", dir);
            Ok(false)
        }
    }
}

/// Make sure the file at `path` exists, plus its backup copy when asked,
/// and open it for reading.
pub fn ensure_file(path: &Path, policy: FileCreation) -> Result<File> {
    if create_if_missing(path)? {
        info!("lifecycle: file {:?} has been created", path);
    } else {
        debug!("lifecycle: file {:?} exists, none created", path);
    }

    if policy == FileCreation::WithBackupCopy {
        ensure_backup(path)?;
    }

    File::open(path).map_err(|e| PropertiesError::Io(format!("{:?}: {}", path, e)))
}

/// Make sure the `copy-<name>` sibling of `path` exists. Returns true when
/// it had to be created. The copy starts empty and is never read.
pub fn ensure_backup(path: &Path) -> Result<bool> {
    let backup = backup_path_for(path)?;
    let created = create_if_missing(&backup)?;
    if created {
        info!("lifecycle: copy file {:?} of {:?} has been created", backup, path);
    } else {
        debug!("lifecycle: copy file {:?} exists, none created", backup);
    }
    Ok(created)
}

/// Path of the backup sibling for `path`.
pub fn backup_path_for(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| PropertiesError::Io(format!("no file name in {:?}", path)))?;
    Ok(path.with_file_name(format!("{}{}", BACKUP_PREFIX, name)))
}

fn create_if_missing(path: &Path) -> Result<bool> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            if path.is_file() {
                Ok(false)
            } else {
                Err(PropertiesError::Io(format!("{:?} exists and is not a file", path)))
            }
        }
        Err(e) => Err(PropertiesError::Io(format!("{:?}: {}", path, e))),
    }
}

/// Where a properties file lives: a directory and a base name without the
/// extension.
///
/// ```text
/// dir/
/// ├── settings.proper         ← file_path()
/// └── copy-settings.proper    ← backup_path()
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertiesLocation {
    dir: PathBuf,
    base_name: String,
}

impl PropertiesLocation {
    pub fn new(dir: impl Into<PathBuf>, base_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            base_name: base_name.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// `<base name>.proper`
    pub fn file_name(&self) -> String {
        format!("{}{}", self.base_name, FILE_EXTENSION)
    }

    pub fn file_path(&self) -> PathBuf {
        self.dir.join(self.file_name())
    }

    pub fn backup_path(&self) -> PathBuf {
        self.dir.join(format!("{}{}", BACKUP_PREFIX, self.file_name()))
    }

    /// Run the full creation sequence and open the file for reading.
    pub fn ensure(&self, dir_policy: DirectoryCreation, file_policy: FileCreation) -> Result<File> {
        if self.base_name.is_empty() {
            return Err(PropertiesError::Config("base name must not be empty".to_string()));
        }
        ensure_directory(&self.dir, dir_policy)?;
        ensure_file(&self.file_path(), file_policy)
    }
}
