//! Request lifecycle events for embedding applications.

use crate::error::{Error, RequestError};
use crate::request::Request;
use parking_lot::RwLock;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::warn;

/// A lifecycle event.
///
/// `Request` and `Error` come from the executor, once per logical call.
/// The `Transport*` events mirror every physical attempt.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// A logical call is about to start.
    Request(&'a Request),
    /// A logical call failed for good.
    Error(&'a Error),
    /// The transport is sending one attempt.
    TransportRequest(&'a Request),
    /// One attempt failed at the transport.
    TransportError(&'a RequestError),
}

impl Event<'_> {
    /// Name of the event: `request`, `error`, `transport:request` or `transport:error`.
    pub fn name(&self) -> &'static str {
        match self {
            Event::Request(_) => "request",
            Event::Error(_) => "error",
            Event::TransportRequest(_) => "transport:request",
            Event::TransportError(_) => "transport:error",
        }
    }
}

type Listener = Arc<dyn Fn(&Event<'_>) + Send + Sync>;

/// Relays lifecycle events to registered listeners.
///
/// Emitting never blocks on, or fails because of, a listener: a panicking
/// listener is logged and skipped.
#[derive(Default)]
pub struct EventEmitter {
    listeners: RwLock<Vec<Listener>>,
}

impl EventEmitter {
    /// Create an emitter with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Receive every event.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(&Event<'_>) + Send + Sync + 'static,
    {
        self.listeners.write().push(Arc::new(listener));
    }

    /// Receive only events called `name`.
    pub fn on<F>(&self, name: &'static str, listener: F)
    where
        F: Fn(&Event<'_>) + Send + Sync + 'static,
    {
        self.subscribe(move |event| {
            if event.name() == name {
                listener(event);
            }
        });
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Deliver `event` to every listener.
    pub fn emit(&self, event: Event<'_>) {
        // Snapshot so listeners may subscribe from inside a callback.
        let listeners: Vec<Listener> = self.listeners.read().clone();
        for listener in listeners {
            if catch_unwind(AssertUnwindSafe(|| listener(&event))).is_err() {
                warn!(event = event.name(), "Event listener panicked");
            }
        }
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
