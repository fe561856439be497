//! Owned handles to browser registrations (listeners, observers).
//!
//! A binding is released by dropping it: `gloo_events::EventListener` removes
//! itself on drop, and the observers in this crate disconnect in `Drop`.

use std::any::Any;

/// Type-erased registration kept alive by its owner until teardown.
pub type Binding = Box<dyn Any>;
