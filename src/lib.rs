//! proper-kv — typed lookups over line-oriented `.proper` files.
//!
//! A properties file holds one `<key><separator><value>` record per line.
//! There is no index or cache: every lookup scans the file from the top and
//! the first line matching the key wins.
//!
//! # Pieces
//!
//! - [`KeyValueSeparator`] — the token between key and value, fixed per store
//! - [`LineScanner`] — finds the value segment for a key in any seekable reader
//! - [`PropertiesReader`] — typed getters (raw/quoted string, i32, f64, f32, bool)
//! - [`EventDispatcher`] — typed listeners notified by the `*_with_listener` reads
//! - [`PropertiesFile`] — the store handle tying a file to the above
//!
//! # Example
//!
//! ```no_run
//! use proper_kv::{PropertiesFile, PropertiesReader, StoreConfig};
//!
//! # fn main() -> proper_kv::Result<()> {
//! let mut store = PropertiesFile::open(&StoreConfig::new("conf", "app"))?;
//!
//! store.dispatcher().on_integer(|key, value| {
//!     println!("{} = {}", key, value);
//!     Ok(())
//! });
//!
//! let name = store.get_string_quoted("name")?;
//! store.get_integer_with_listener("age")?;
//! # let _ = name;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod lifecycle;
pub mod listener;
pub mod scanner;
pub mod separator;
pub mod store;
pub mod traits;
pub mod value;

pub use config::StoreConfig;
pub use dispatcher::EventDispatcher;
pub use error::{ListenerError, PropertiesError, Result};
pub use lifecycle::{
    BACKUP_PREFIX, DirectoryCreation, FILE_EXTENSION, FileCreation, PropertiesLocation,
};
pub use listener::{Listener, ListenerResult};
pub use scanner::{KeyMatch, LineScanner};
pub use separator::KeyValueSeparator;
pub use store::PropertiesFile;
pub use traits::PropertiesReader;
pub use value::{PropertyValue, ValueKind};
