use std::path::PathBuf;

use crate::error::{PropertiesError, Result};
use crate::lifecycle::{DirectoryCreation, FileCreation, PropertiesLocation};
use crate::scanner::KeyMatch;
use crate::separator::KeyValueSeparator;

/// Everything needed to locate, create and read a properties file.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Directory holding the file.
    pub dir: PathBuf,

    /// Base name; `.proper` is appended.
    pub name: String,

    /// Separator between key and value on every line.
    pub separator: KeyValueSeparator,

    /// Create `dir` when it is missing.
    pub directory_creation: DirectoryCreation,

    /// Also create the empty `copy-<name>.proper` sibling.
    pub file_creation: FileCreation,

    /// How lines are matched against requested keys.
    pub key_match: KeyMatch,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            name: "properties".to_string(),
            separator: KeyValueSeparator::default(),
            directory_creation: DirectoryCreation::default(),
            file_creation: FileCreation::default(),
            key_match: KeyMatch::default(),
        }
    }
}

impl StoreConfig {
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse configuration from command-line arguments.
    ///
    /// Supported flags:
    /// - `--dir=PATH`
    /// - `--name=NAME`
    /// - `--separator=TOKEN|NAME` (e.g. `=`, `->`, `colon`)
    /// - `--create-dir=true|false`
    /// - `--backup`
    /// - `--key-match=prefix|exact`
    ///
    /// Other arguments are ignored.
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut config = StoreConfig::default();

        for arg in args {
            if let Some(val) = arg.strip_prefix("--dir=") {
                config.dir = PathBuf::from(val);
            } else if let Some(val) = arg.strip_prefix("--name=") {
                config.name = val.to_string();
            } else if let Some(val) = arg.strip_prefix("--separator=") {
                config.separator = val.parse()?;
            } else if let Some(val) = arg.strip_prefix("--create-dir=") {
                config.directory_creation = match val {
                    "true" => DirectoryCreation::Create,
                    "false" => DirectoryCreation::Skip,
                    other => {
                        return Err(PropertiesError::Config(format!(
                            "--create-dir expects true or false, got {:?}",
                            other
                        )));
                    }
                };
            } else if arg == "--backup" {
                config.file_creation = FileCreation::WithBackupCopy;
            } else if let Some(val) = arg.strip_prefix("--key-match=") {
                config.key_match = match val {
                    "prefix" => KeyMatch::Prefix,
                    "exact" => KeyMatch::Exact,
                    other => {
                        return Err(PropertiesError::Config(format!(
                            "--key-match expects prefix or exact, got {:?}",
                            other
                        )));
                    }
                };
            }
        }

        Ok(config)
    }

    pub fn location(&self) -> PropertiesLocation {
        PropertiesLocation::new(self.dir.clone(), self.name.clone())
    }
}
