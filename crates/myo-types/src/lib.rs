//! Core types for tendon-driven arm simulation.
//!
//! This crate provides the foundational types shared by the myosim stack:
//!
//! - Registry identifiers ([`ElasticId`], [`ControllerId`], [`LoadId`],
//!   [`CoupleId`]) handed out by the simulation aggregate
//! - [`SimulationConfig`] - timestep, solver iterations, tick structure
//! - [`BodyDefaults`] - material defaults applied to scene bodies
//! - [`SimError`] - the shared error type
//!
//! # Design Philosophy
//!
//! These types are **pure data**. They have no physics and no behavior
//! beyond validation. They are the common language between the world
//! wrapper, the force elements, the controllers, and the scene builder.
//!
//! # Coordinate System
//!
//! 2D, right-handed: X to the right, Y up, angles counterclockwise in
//! radians. Gravity points along -Y by default.

#![doc(html_root_url = "https://docs.rs/myo-types/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation
)]

mod config;
mod error;
mod id;

pub use config::{BodyDefaults, SimulationConfig};
pub use error::SimError;
pub use id::{ControllerId, CoupleId, ElasticId, LoadId};

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;
