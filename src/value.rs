use std::fmt;

/// Tag naming the type a value was read as, and the type a listener handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    String,
    Integer,
    Double,
    Float,
    Boolean,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Double => "double",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
        };
        f.write_str(name)
    }
}

/// A typed value produced by one of the typed getters.
///
/// Dispatch matches on the variant instead of inspecting runtime types, so
/// a listener only ever sees the exact type it was registered for.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    Integer(i32),
    Double(f64),
    Float(f32),
    Boolean(bool),
}

impl PropertyValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            PropertyValue::String(_) => ValueKind::String,
            PropertyValue::Integer(_) => ValueKind::Integer,
            PropertyValue::Double(_) => ValueKind::Double,
            PropertyValue::Float(_) => ValueKind::Float,
            PropertyValue::Boolean(_) => ValueKind::Boolean,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(v) => f.write_str(v),
            PropertyValue::Integer(v) => write!(f, "{}", v),
            PropertyValue::Double(v) => write!(f, "{}", v),
            PropertyValue::Float(v) => write!(f, "{}", v),
            PropertyValue::Boolean(v) => write!(f, "{}", v),
        }
    }
}
