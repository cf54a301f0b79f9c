use std::fmt;
use std::sync::Arc;

use crate::error::ListenerError;
use crate::value::{PropertyValue, ValueKind};

pub type ListenerResult = Result<(), ListenerError>;

pub type StringHandler = Arc<dyn Fn(&str, &str) -> ListenerResult + Send + Sync>;
pub type IntegerHandler = Arc<dyn Fn(&str, i32) -> ListenerResult + Send + Sync>;
pub type DoubleHandler = Arc<dyn Fn(&str, f64) -> ListenerResult + Send + Sync>;
pub type FloatHandler = Arc<dyn Fn(&str, f32) -> ListenerResult + Send + Sync>;
pub type BooleanHandler = Arc<dyn Fn(&str, bool) -> ListenerResult + Send + Sync>;

/// A callback invoked with `(key, value)` after a typed read.
///
/// The variant is the type the listener handles; it is called for every key
/// read through a "with listener" getter of that type.
#[derive(Clone)]
pub enum Listener {
    String(StringHandler),
    Integer(IntegerHandler),
    Double(DoubleHandler),
    Float(FloatHandler),
    Boolean(BooleanHandler),
}

impl Listener {
    pub fn string<F>(f: F) -> Self
    where
        F: Fn(&str, &str) -> ListenerResult + Send + Sync + 'static,
    {
        Listener::String(Arc::new(f))
    }

    pub fn integer<F>(f: F) -> Self
    where
        F: Fn(&str, i32) -> ListenerResult + Send + Sync + 'static,
    {
        Listener::Integer(Arc::new(f))
    }

    pub fn double<F>(f: F) -> Self
    where
        F: Fn(&str, f64) -> ListenerResult + Send + Sync + 'static,
    {
        Listener::Double(Arc::new(f))
    }

    pub fn float<F>(f: F) -> Self
    where
        F: Fn(&str, f32) -> ListenerResult + Send + Sync + 'static,
    {
        Listener::Float(Arc::new(f))
    }

    pub fn boolean<F>(f: F) -> Self
    where
        F: Fn(&str, bool) -> ListenerResult + Send + Sync + 'static,
    {
        Listener::Boolean(Arc::new(f))
    }

    /// The value type this listener handles.
    pub fn kind(&self) -> ValueKind {
        match self {
            Listener::String(_) => ValueKind::String,
            Listener::Integer(_) => ValueKind::Integer,
            Listener::Double(_) => ValueKind::Double,
            Listener::Float(_) => ValueKind::Float,
            Listener::Boolean(_) => ValueKind::Boolean,
        }
    }

    /// Call the handler if its type matches `value`. Returns whether it ran.
    pub fn notify(&self, key: &str, value: &PropertyValue) -> Result<bool, ListenerError> {
        match (self, value) {
            (Listener::String(h), PropertyValue::String(v)) => h(key, v.as_str())?,
            (Listener::Integer(h), PropertyValue::Integer(v)) => h(key, *v)?,
            (Listener::Double(h), PropertyValue::Double(v)) => h(key, *v)?,
            (Listener::Float(h), PropertyValue::Float(v)) => h(key, *v)?,
            (Listener::Boolean(h), PropertyValue::Boolean(v)) => h(key, *v)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener").field("kind", &self.kind()).finish()
    }
}
