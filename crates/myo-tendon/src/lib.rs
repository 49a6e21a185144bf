//! Tendon and load force elements for tendon-driven arm simulation.
//!
//! # Tendon Model
//!
//! A tendon is a one-directional spring-damper: it pulls when stretched
//! and goes slack when shorter than its rest length.
//!
//! ```text
//! F = {
//!     k(L - L₀) + c·dL/dt    if L > L₀ (stretched)
//!     0                       if L ≤ L₀ (slack)
//! }
//! ```
//!
//! Where `k` is the stiffness, `L` the current path length, `L₀` the rest
//! length and `c` the damping coefficient. The strain rate `dL/dt` is a
//! backward difference against the extension cached on the previous tick.
//!
//! # Routing
//!
//! A tendon runs from an anchor on body A to an anchor on body B, passing
//! through zero or more frictionless contact points on intermediate
//! bodies:
//!
//! ```text
//!    Body A            contact           Body B
//!      ●─────────────────●─────────────────●
//!   anchor A         (redirect)        anchor B
//! ```
//!
//! The path length is the sum of the segment lengths, each point resolved
//! through its owning body's current pose. A threaded contact feels the
//! cable tension along the bisector of its two adjacent segments, scaled
//! by the tension component along that bisector.

#![doc(html_root_url = "https://docs.rs/myo-tendon/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::suboptimal_flops
)]

mod element;
mod load;

pub use element::{ContactPoint, TendonElement};
pub use load::LoadElement;

use myo_world::World;

/// A force element that pushes forces into the world once per sub-step.
///
/// Implementations may keep per-tick memory (such as the tendon's cached
/// extension); `update_forces` is the only place that memory advances, so
/// it must be called exactly once per sub-step per element.
pub trait ForceElement {
    /// Compute and apply this element's forces for the current sub-step.
    fn update_forces(&mut self, world: &mut World, delta_t: f64);
}
