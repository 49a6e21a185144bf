//! Closed-loop tendon actuation.
//!
//! A [`TendonController`] drives one tendon's rest length toward a target
//! offset, reeling in or out at most at its maximum speed and never
//! holding more than its maximum force - when blocked it releases length
//! until the internal tension drops back to the force limit.
//!
//! A [`CoupledTendonController`] joins two controllers into a single
//! antagonist degree of freedom, the way an extensor/flexor muscle pair
//! drives a joint: one normalized target in [-1, 1] maps to opposite
//! length targets on the two sides.
//!
//! Everything here runs on the single-threaded simulation tick; change
//! notification is a synchronous observer list with no locking.

#![doc(html_root_url = "https://docs.rs/myo-control/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

mod controller;
mod coupled;

pub use controller::{
    TendonController, DEFAULT_LIMIT, DEFAULT_MAX_FORCE, DEFAULT_MAX_SPEED,
};
pub use coupled::CoupledTendonController;

/// A synchronous list of change observers.
///
/// Subscribers take no arguments; they re-read whatever state they care
/// about through the owner's accessors when notified.
#[derive(Default)]
pub struct ChangeHooks {
    subscribers: Vec<Box<dyn FnMut()>>,
}

impl ChangeHooks {
    /// Register an observer.
    pub fn subscribe(&mut self, f: impl FnMut() + 'static) {
        self.subscribers.push(Box::new(f));
    }

    /// Invoke every observer, in registration order.
    pub fn notify(&mut self) {
        for subscriber in &mut self.subscribers {
            subscriber();
        }
    }

    /// The number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Whether no observers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl std::fmt::Debug for ChangeHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ChangeHooks({} subscribers)", self.subscribers.len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_hooks_notify_in_order() {
        let calls = Rc::new(Cell::new(0));
        let mut hooks = ChangeHooks::default();
        assert!(hooks.is_empty());

        for _ in 0..3 {
            let calls = Rc::clone(&calls);
            hooks.subscribe(move || calls.set(calls.get() + 1));
        }

        hooks.notify();
        assert_eq!(calls.get(), 3);
        assert_eq!(hooks.len(), 3);
    }
}
