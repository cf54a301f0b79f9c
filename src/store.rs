use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::config::StoreConfig;
use crate::dispatcher::EventDispatcher;
use crate::error::{PropertiesError, Result};
use crate::lifecycle::{DirectoryCreation, FileCreation};
use crate::listener::Listener;
use crate::scanner::{KeyMatch, LineScanner};
use crate::separator::KeyValueSeparator;
use crate::traits::PropertiesReader;
use crate::value::ValueKind;

/// PropertiesFile is the store handle over one `.proper` file.
///
/// It owns the only reader on the file, so every lookup takes `&mut self`.
/// Share a handle across threads behind a `Mutex`, or open one per thread.
/// Typed getters come from [`PropertiesReader`]; the `*_with_listener`
/// getters additionally notify the listeners of the attached
/// [`EventDispatcher`].
pub struct PropertiesFile {
    path: PathBuf,
    directory_creation: DirectoryCreation,
    file_creation: FileCreation,
    scanner: LineScanner<BufReader<File>>,
    dispatcher: Arc<EventDispatcher>,
}

impl PropertiesFile {
    /// Create the directory, file and backup copy as configured, then open
    /// the file.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let location = config.location();
        let file = location.ensure(config.directory_creation, config.file_creation)?;
        let mut store = Self::from_file(location.file_path(), file, config.separator)
            .with_key_match(config.key_match);
        store.directory_creation = config.directory_creation;
        store.file_creation = config.file_creation;
        Ok(store)
    }

    /// Open an existing file without creating anything. The handle reports
    /// `DirectoryCreation::Skip` and `FileCreation::PlainOnly`.
    pub fn open_path(path: &Path, separator: KeyValueSeparator) -> Result<Self> {
        let file =
            File::open(path).map_err(|e| PropertiesError::Io(format!("{:?}: {}", path, e)))?;
        Ok(Self::from_file(path.to_path_buf(), file, separator))
    }

    fn from_file(path: PathBuf, file: File, separator: KeyValueSeparator) -> Self {
        debug!("PropertiesFile: opened {:?} with separator {:?}", path, separator.token());
        Self {
            path,
            directory_creation: DirectoryCreation::Skip,
            file_creation: FileCreation::PlainOnly,
            scanner: LineScanner::new(BufReader::new(file), separator),
            dispatcher: Arc::new(EventDispatcher::new()),
        }
    }

    pub fn with_key_match(mut self, key_match: KeyMatch) -> Self {
        self.scanner = self.scanner.with_key_match(key_match);
        self
    }

    /// Replace the store's own dispatcher with a shared one.
    pub fn with_dispatcher(mut self, dispatcher: Arc<EventDispatcher>) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name including the `.proper` extension.
    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
    }

    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    pub fn directory_creation(&self) -> DirectoryCreation {
        self.directory_creation
    }

    pub fn file_creation(&self) -> FileCreation {
        self.file_creation
    }

    pub fn separator(&self) -> KeyValueSeparator {
        self.scanner.separator()
    }

    pub fn key_match(&self) -> KeyMatch {
        self.scanner.key_match()
    }

    pub fn dispatcher(&self) -> &Arc<EventDispatcher> {
        &self.dispatcher
    }

    /// Register a listener on the attached dispatcher.
    pub fn register(&self, listener: Listener) {
        self.dispatcher.register(listener);
    }

    /// Read a quoted string and notify the string listeners.
    pub fn get_string_with_listener(&mut self, key: &str) -> Result<()> {
        self.read_with_listener(key, ValueKind::String)
    }

    pub fn get_integer_with_listener(&mut self, key: &str) -> Result<()> {
        self.read_with_listener(key, ValueKind::Integer)
    }

    pub fn get_double_with_listener(&mut self, key: &str) -> Result<()> {
        self.read_with_listener(key, ValueKind::Double)
    }

    pub fn get_float_with_listener(&mut self, key: &str) -> Result<()> {
        self.read_with_listener(key, ValueKind::Float)
    }

    pub fn get_boolean_with_listener(&mut self, key: &str) -> Result<()> {
        self.read_with_listener(key, ValueKind::Boolean)
    }

    fn read_with_listener(&mut self, key: &str, kind: ValueKind) -> Result<()> {
        if self.dispatcher.is_empty() {
            return Err(PropertiesError::NoListenersRegistered);
        }
        let value = self.get_value(key, kind)?;
        self.dispatcher.dispatch(key, &value)?;
        Ok(())
    }
}

impl PropertiesReader for PropertiesFile {
    fn find_value(&mut self, key: &str) -> Result<String> {
        self.scanner.find_line(key)
    }
}
