use std::str::FromStr;

use crate::error::{PropertiesError, Result};
use crate::value::{PropertyValue, ValueKind};

/// PropertiesReader provides typed lookups over a line-oriented properties
/// source.
///
/// Implementors only supply `find_value`, which returns the raw value segment
/// of the first line matching `key`. Every getter re-scans the source from
/// the start, so repeated calls with the same key return the same result.
pub trait PropertiesReader {
    /// Find the raw value for a key. Fails with `KeyNotFound` when no line
    /// matches.
    fn find_value(&mut self, key: &str) -> Result<String>;

    /// Get the value exactly as written after the separator.
    fn get_string_raw(&mut self, key: &str) -> Result<String> {
        self.find_value(key)
    }

    /// Get a value wrapped in quotation marks, with exactly one leading and
    /// one trailing mark removed.
    fn get_string_quoted(&mut self, key: &str) -> Result<String> {
        let value = self.find_value(key)?;
        match value
            .strip_prefix('"')
            .and_then(|rest| rest.strip_suffix('"'))
        {
            Some(inner) => Ok(inner.to_string()),
            None => Err(PropertiesError::MalformedQuotedValue {
                key: key.to_string(),
                value,
            }),
        }
    }

    fn get_integer(&mut self, key: &str) -> Result<i32> {
        let value = self.find_value(key)?;
        parse_as(key, &value, &value, ValueKind::Integer)
    }

    /// Surrounding whitespace is ignored for floating-point values.
    fn get_double(&mut self, key: &str) -> Result<f64> {
        let value = self.find_value(key)?;
        parse_as(key, &value, value.trim(), ValueKind::Double)
    }

    /// Surrounding whitespace is ignored for floating-point values.
    fn get_float(&mut self, key: &str) -> Result<f32> {
        let value = self.find_value(key)?;
        parse_as(key, &value, value.trim(), ValueKind::Float)
    }

    /// `true` only when the value reads "true" in any letter case; any other
    /// text is `false`. Never fails on the value itself.
    fn get_boolean(&mut self, key: &str) -> Result<bool> {
        let value = self.find_value(key)?;
        Ok(value.eq_ignore_ascii_case("true"))
    }

    /// Read a value with the getter matching `kind`. Strings go through the
    /// quoted getter.
    fn get_value(&mut self, key: &str, kind: ValueKind) -> Result<PropertyValue> {
        let value = match kind {
            ValueKind::String => PropertyValue::String(self.get_string_quoted(key)?),
            ValueKind::Integer => PropertyValue::Integer(self.get_integer(key)?),
            ValueKind::Double => PropertyValue::Double(self.get_double(key)?),
            ValueKind::Float => PropertyValue::Float(self.get_float(key)?),
            ValueKind::Boolean => PropertyValue::Boolean(self.get_boolean(key)?),
        };
        Ok(value)
    }
}

fn parse_as<T>(key: &str, raw: &str, text: &str, kind: ValueKind) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    text.parse::<T>().map_err(|e| PropertiesError::Parse {
        key: key.to_string(),
        value: raw.to_string(),
        kind,
        message: e.to_string(),
    })
}
