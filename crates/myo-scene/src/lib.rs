//! Typed scene descriptions for tendon-driven arm simulations.
//!
//! A [`SceneDesc`] enumerates bodies, joints, elastic tendons, loads,
//! controllers, and antagonist couples, referencing entities by string
//! id. [`build_scene`] resolves those ids through a build-time symbol
//! table, constructs a fresh [`myo_sim::Simulation`], and returns it
//! together with name→handle maps for UI collaborators; the symbol table
//! itself is discarded after construction.
//!
//! Scene construction is all-or-nothing: any undefined or duplicate id
//! aborts the build with a [`SceneError`] before the caller's previous
//! scene is touched. File loading failures are reported the same way and
//! never panic.
//!
//! # Example
//!
//! ```
//! use myo_scene::{build_scene, load_scene_str};
//! use myo_types::SimulationConfig;
//!
//! let yaml = r#"
//! bodies:
//!   - id: post_a
//!     shape: { type: box, half_width: 0.1, half_height: 0.1 }
//!     position: [0.0, 0.0]
//!     static: true
//!   - id: post_b
//!     shape: { type: box, half_width: 0.1, half_height: 0.1 }
//!     position: [1.5, 0.0]
//!     static: true
//! elastics:
//!   - id: spring
//!     body_a: post_a
//!     body_b: post_b
//!     anchor_a: [0.0, 0.0]
//!     anchor_b: [1.5, 0.0]
//!     stiffness: 400.0
//!     rest_length: 1.0
//! "#;
//!
//! let desc = load_scene_str(yaml)?;
//! let built = build_scene(&desc, SimulationConfig::default())?;
//! assert_eq!(built.simulation.tendon_count(), 1);
//! # Ok::<(), myo_scene::SceneError>(())
//! ```

#![doc(html_root_url = "https://docs.rs/myo-scene/0.1.0")]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

mod builder;
pub mod demo;
mod desc;
mod error;

pub use builder::{build_scene, BuiltScene};
pub use desc::{
    BodyDesc, ContactDesc, ControllerDesc, CoupleDesc, ElasticDesc, JointDesc, LoadDesc,
    MotorDesc, SceneDesc, ShapeDesc,
};
pub use error::SceneError;

use std::path::Path;

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, SceneError>;

/// Parse a scene description from a YAML string.
pub fn load_scene_str(yaml: &str) -> Result<SceneDesc> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Read and parse a scene description file.
///
/// I/O and parse failures are reported as errors; the caller keeps its
/// current scene.
pub fn load_scene_file(path: impl AsRef<Path>) -> Result<SceneDesc> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    tracing::info!(path = %path.display(), "loading scene file");
    load_scene_str(&text)
}

/// Serialize a scene description to YAML.
pub fn save_scene_str(desc: &SceneDesc) -> Result<String> {
    Ok(serde_yaml::to_string(desc)?)
}
