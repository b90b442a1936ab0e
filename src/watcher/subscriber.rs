// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::events::{Event, EventFilter};
use crate::observability::messages::queue::{CallbackFailed, CallbackPanicked};
use crate::observability::messages::StructuredLog;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// A subscriber callback.
///
/// Callbacks are identified by `Arc` pointer, so keep a clone of the `Arc`
/// passed to `add_callback` in order to remove it later.
pub type Callback = Arc<dyn Fn(&Event) -> anyhow::Result<()> + Send + Sync>;

/// Wraps a closure as a [`Callback`].
pub fn callback<F>(f: F) -> Callback
where
    F: Fn(&Event) -> anyhow::Result<()> + Send + Sync + 'static,
{
    Arc::new(f)
}

pub(crate) fn same_callback(a: &Callback, b: &Callback) -> bool {
    // compare data pointers only; vtable addresses are not unique
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

/// One `add_callback` registration.
#[derive(Clone)]
pub(crate) struct Subscriber {
    pub filter: EventFilter,
    pub callback: Callback,
    pub queue: Option<String>,
}

impl Subscriber {
    pub fn matches(&self, event: &Event) -> bool {
        self.filter.matches(event.event_type())
    }

    pub fn is_on(&self, queue: &str) -> bool {
        self.queue.as_deref() == Some(queue)
    }
}

/// Invokes `callback`, containing both errors and panics.
pub(crate) fn invoke(queue: &str, callback: &Callback, event: &Event) {
    match panic::catch_unwind(AssertUnwindSafe(|| callback(event))) {
        Ok(Ok(())) => {}
        Ok(Err(error)) => CallbackFailed {
            queue,
            event_type: event.event_type(),
            line: event.line(),
            error: error.as_ref(),
        }
        .log(),
        Err(payload) => CallbackPanicked {
            queue,
            event_type: event.event_type(),
            line: event.line(),
            message: &panic_message(payload.as_ref()),
        }
        .log(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_pointer_identity() {
        let a = callback(|_| Ok(()));
        let b = callback(|_| Ok(()));
        assert!(same_callback(&a, &a.clone()));
        assert!(!same_callback(&a, &b));
    }

    #[test]
    fn test_panic_message() {
        let payload = panic::catch_unwind(|| panic!("boom")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "boom");

        let payload = panic::catch_unwind(|| panic!("line {}", 7)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "line 7");

        let payload = panic::catch_unwind(|| std::panic::panic_any(42u8)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
