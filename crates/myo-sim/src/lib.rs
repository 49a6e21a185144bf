//! Simulation aggregate for tendon-driven arm models.
//!
//! [`Simulation`] owns the rigid-body world together with the tendon and
//! load elements acting on it and the controllers driving them, and runs
//! the fixed-step tick loop:
//!
//! ```text
//! tick:
//!   repeat outer_iterations times:
//!     1. update every tendon controller
//!     2. apply forces: tendons, loads, active grab
//!     3. step the world by 1/fps
//!     4. clear accumulated forces (if configured)
//! ```
//!
//! Everything runs on the caller's thread; one tick completes before the
//! next begins and there is no background stepping. Pausing turns `tick`
//! into a no-op, leaving the world untouched while interactive and
//! rendering collaborators keep reading state.

#![doc(html_root_url = "https://docs.rs/myo-sim/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation
)]

mod simulation;

pub use simulation::Simulation;
