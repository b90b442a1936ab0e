// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Journal event model and schema lookup.
//!
//! * [`Event`] - one parsed record, shared read-only between subscribers
//! * [`EventFilter`] - which event types a subscriber receives
//! * [`EventTypeRegistry`] - event type -> version -> constructor
//! * [`MessageResolver`] - picks a constructor for a compatible version set

pub mod catalog;
mod event;
mod filter;
mod registry;
mod resolver;

pub use catalog::{Constructor, EventBody};
pub use event::Event;
pub use filter::EventFilter;
pub use registry::EventTypeRegistry;
pub use resolver::{MessageResolver, ResolvedSchema};
