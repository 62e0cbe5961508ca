//! Reservation gates.
//!
//! A gate starts open and is closed by the worker the moment its counter
//! reaches zero. The API reads it to refuse new jobs without touching the
//! queue. There is no reopen: restocking is not supported.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dashmap::DashMap;

/// Open/closed flag for one counter.
#[derive(Debug)]
pub struct ReservationGate {
    open: AtomicBool,
}

impl ReservationGate {
    /// A new, open gate.
    pub fn new() -> Self {
        Self {
            open: AtomicBool::new(true),
        }
    }

    /// Whether new reservations are accepted.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Close the gate. Returns `true` if this call closed it.
    pub fn close(&self) -> bool {
        self.open.swap(false, Ordering::AcqRel)
    }
}

impl Default for ReservationGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Gates keyed by counter key, created open on first use.
#[derive(Debug, Default)]
pub struct GateSet {
    gates: DashMap<String, Arc<ReservationGate>>,
}

impl GateSet {
    /// An empty gate set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The gate for a counter key.
    pub fn gate(&self, key: &str) -> Arc<ReservationGate> {
        if let Some(gate) = self.gates.get(key) {
            return Arc::clone(gate.value());
        }
        Arc::clone(
            self.gates
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(ReservationGate::new()))
                .value(),
        )
    }

    /// Whether the gate for `key` is open.
    pub fn is_open(&self, key: &str) -> bool {
        self.gates.get(key).is_none_or(|gate| gate.is_open())
    }

    /// Close the gate for `key`. Returns `true` if this call closed it.
    pub fn close(&self, key: &str) -> bool {
        self.gate(key).close()
    }
}
