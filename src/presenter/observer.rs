//! View notifications.
//!
//! A bound view subscribes a `ViewObserver` and re-renders whenever the
//! presenter reports a property change.

use std::fmt;

/// Presenter state a view can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// The game being edited.
    Current,
    /// The listed games.
    Games,
    /// Failures by field.
    Errors,
}

impl Property {
    pub fn name(&self) -> &'static str {
        match self {
            Property::Current => "current",
            Property::Games => "games",
            Property::Errors => "errors",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receives property-change notifications from a presenter.
pub trait ViewObserver: Send + Sync {
    fn property_changed(&self, property: Property);
}

impl<F> ViewObserver for F
where
    F: Fn(Property) + Send + Sync,
{
    fn property_changed(&self, property: Property) {
        self(property)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

#[cfg(feature = "emitter")]
pub use emitter::{EmitterObserver, PROPERTY_CHANGED};

#[cfg(feature = "emitter")]
mod emitter {
    use std::sync::{Mutex, PoisonError};

    use event_emitter_rs::EventEmitter;

    use super::{Property, ViewObserver};

    /// Event name used for every property change.
    pub const PROPERTY_CHANGED: &str = "PropertyChanged";

    /// Forwards property changes to an `EventEmitter`.
    ///
    /// Listeners receive the property name. Delivery is asynchronous: the
    /// emitter runs each listener on its own thread.
    pub struct EmitterObserver {
        emitter: Mutex<EventEmitter>,
    }

    impl Default for EmitterObserver {
        fn default() -> Self {
            Self::new()
        }
    }

    impl EmitterObserver {
        pub fn new() -> Self {
            Self {
                emitter: Mutex::new(EventEmitter::new()),
            }
        }

        /// Register a listener for property changes. Returns the listener id.
        pub fn on<F>(&self, listener: F) -> String
        where
            F: Fn(String) + Send + Sync + 'static,
        {
            self.emitter
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .on(PROPERTY_CHANGED, listener)
        }
    }

    impl ViewObserver for EmitterObserver {
        fn property_changed(&self, property: Property) {
            self.emitter
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .emit(PROPERTY_CHANGED, property.name().to_string());
        }
    }
}
