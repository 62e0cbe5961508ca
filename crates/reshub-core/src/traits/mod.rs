//! Core traits defined in `reshub-core` and implemented by other crates.

pub mod counter;

pub use counter::{CounterStore, DecrementOutcome};
