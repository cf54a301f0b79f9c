use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::error::{PropertiesError, Result};
use crate::listener::{Listener, ListenerResult};
use crate::value::PropertyValue;

/// Ordered registry of typed listeners.
///
/// - `register(listener)` appends; entries are never removed or reordered.
/// - `dispatch(key, value)` calls every listener whose type matches the
///   value, in registration order, synchronously on the caller's thread.
///
/// A dispatcher is owned by a store (or shared between stores via `Arc`)
/// instead of living in process-wide state. Dispatch iterates a snapshot of
/// the registry, so a listener registering another listener does not
/// deadlock; the new one is seen from the next dispatch on.
pub struct EventDispatcher {
    listeners: RwLock<Vec<Listener>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
        }
    }

    pub fn register(&self, listener: Listener) {
        let mut listeners = self
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        listeners.push(listener);
    }

    pub fn on_string<F>(&self, f: F)
    where
        F: Fn(&str, &str) -> ListenerResult + Send + Sync + 'static,
    {
        self.register(Listener::string(f));
    }

    pub fn on_integer<F>(&self, f: F)
    where
        F: Fn(&str, i32) -> ListenerResult + Send + Sync + 'static,
    {
        self.register(Listener::integer(f));
    }

    pub fn on_double<F>(&self, f: F)
    where
        F: Fn(&str, f64) -> ListenerResult + Send + Sync + 'static,
    {
        self.register(Listener::double(f));
    }

    pub fn on_float<F>(&self, f: F)
    where
        F: Fn(&str, f32) -> ListenerResult + Send + Sync + 'static,
    {
        self.register(Listener::float(f));
    }

    pub fn on_boolean<F>(&self, f: F)
    where
        F: Fn(&str, bool) -> ListenerResult + Send + Sync + 'static,
    {
        self.register(Listener::boolean(f));
    }

    pub fn len(&self) -> usize {
        self.listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke the listeners matching `value`'s type with `(key, value)`.
    ///
    /// Returns the number of listeners invoked. The first listener error
    /// stops dispatch and is returned; panics are not caught.
    pub fn dispatch(&self, key: &str, value: &PropertyValue) -> Result<usize> {
        let snapshot: Vec<Listener> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut invoked = 0;
        for listener in &snapshot {
            let ran = listener
                .notify(key, value)
                .map_err(|source| PropertiesError::Listener {
                    key: key.to_string(),
                    source,
                })?;
            if ran {
                invoked += 1;
            }
        }

        debug!(
            "EventDispatcher: {} {} listener(s) notified for {:?}",
            invoked,
            value.kind(),
            key
        );
        Ok(invoked)
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
