//! 2D rigid-body world for tendon-driven arm simulation.
//!
//! This crate wraps the [rapier2d](https://rapier.rs) constraint solver
//! behind the narrow contract the rest of the stack consumes:
//!
//! - Body creation (boxes and circles, static or dynamic, with material
//!   properties and optional explicit mass overrides)
//! - Revolute joints with angle limits and velocity motors
//! - Local/world point transforms per body
//! - Force application at world-space points
//! - Fixed-timestep stepping and force clearing
//! - The [`PointGrab`] spring-to-point constraint used for interactive
//!   dragging
//!
//! The world never removes bodies: a scene reset constructs a fresh
//! `World`, so every handle handed out stays valid for the life of the
//! world that issued it. Methods taking a handle rely on this invariant
//! and fail fast on a foreign handle.
//!
//! # Coordinate System
//!
//! X to the right, Y up, angles counterclockwise in radians.

#![doc(html_root_url = "https://docs.rs/myo-world/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

mod drag;
mod world;

pub use drag::PointGrab;
pub use world::{BodyShape, BodySpec, MassOverride, RevoluteMotor, RevoluteOpts, World};

// Re-export the handle and math types used throughout the stack.
pub use nalgebra::{Point2, Vector2};
pub use rapier2d_f64::prelude::{ImpulseJointHandle, RigidBodyHandle};
