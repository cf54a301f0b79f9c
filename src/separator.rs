use std::fmt;
use std::str::FromStr;

use crate::error::PropertiesError;

/// KeyValueSeparator is the token splitting a line into key and value.
///
/// Chosen once when a store is built and never auto-detected. There is no
/// escaping: a separator inside a key is indistinguishable from the split
/// point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyValueSeparator {
    /// `key=value`
    #[default]
    Equals,
    /// `key:value`
    Colon,
    /// `key->value`
    Arrow,
    /// `key value`
    Space,
    /// `key<TAB>value`
    Tab,
}

impl KeyValueSeparator {
    pub const ALL: [KeyValueSeparator; 5] = [
        KeyValueSeparator::Equals,
        KeyValueSeparator::Colon,
        KeyValueSeparator::Arrow,
        KeyValueSeparator::Space,
        KeyValueSeparator::Tab,
    ];

    /// The literal delimiter written between key and value.
    pub fn token(&self) -> &'static str {
        match self {
            KeyValueSeparator::Equals => "=",
            KeyValueSeparator::Colon => ":",
            KeyValueSeparator::Arrow => "->",
            KeyValueSeparator::Space => " ",
            KeyValueSeparator::Tab => "\t",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            KeyValueSeparator::Equals => "equals",
            KeyValueSeparator::Colon => "colon",
            KeyValueSeparator::Arrow => "arrow",
            KeyValueSeparator::Space => "space",
            KeyValueSeparator::Tab => "tab",
        }
    }
}

impl fmt::Display for KeyValueSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for KeyValueSeparator {
    type Err = PropertiesError;

    /// Accepts either the token itself (`"->"`) or the variant name (`"arrow"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sep| sep.token() == s || sep.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| PropertiesError::Config(format!("unknown separator: {:?}", s)))
    }
}
