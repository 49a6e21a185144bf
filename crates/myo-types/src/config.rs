//! Configuration types for the simulation.

use nalgebra::Vector2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Main configuration for a simulation.
///
/// A tick of the simulation loop runs `outer_iterations` iterations, each
/// of which updates all controllers, applies all element forces, advances
/// the rigid-body world by one fixed sub-step of `1 / fps` seconds, and
/// optionally clears the accumulated forces.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// Sub-step frequency in Hz. The physics timestep is `1 / fps`.
    pub fps: f64,
    /// Velocity and position iteration count for the constraint solver.
    pub solver_iterations: usize,
    /// Number of sub-steps executed per tick.
    pub outer_iterations: usize,
    /// Whether accumulated forces are cleared after each sub-step.
    pub clear_forces: bool,
    /// Gravity acceleration (m/s²).
    pub gravity: Vector2<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fps: 400.0,
            solver_iterations: 60,
            outer_iterations: 4,
            clear_forces: true,
            gravity: Vector2::new(0.0, -10.0),
        }
    }
}

impl SimulationConfig {
    /// Create a configuration with the given sub-step frequency.
    #[must_use]
    pub fn with_fps(fps: f64) -> Self {
        Self {
            fps,
            ..Default::default()
        }
    }

    /// Create a low-rate configuration for coarse interactive previews
    /// (60 Hz, one sub-step per tick).
    #[must_use]
    pub fn preview() -> Self {
        Self {
            fps: 60.0,
            solver_iterations: 8,
            outer_iterations: 1,
            ..Default::default()
        }
    }

    /// Set the gravity vector.
    #[must_use]
    pub fn gravity(mut self, gravity: Vector2<f64>) -> Self {
        self.gravity = gravity;
        self
    }

    /// Disable gravity.
    #[must_use]
    pub fn zero_gravity(mut self) -> Self {
        self.gravity = Vector2::zeros();
        self
    }

    /// Set the solver iteration count.
    #[must_use]
    pub fn solver_iterations(mut self, iterations: usize) -> Self {
        self.solver_iterations = iterations;
        self
    }

    /// Set the number of sub-steps per tick.
    #[must_use]
    pub fn outer_iterations(mut self, iterations: usize) -> Self {
        self.outer_iterations = iterations;
        self
    }

    /// Keep accumulated forces across sub-steps instead of clearing them.
    #[must_use]
    pub fn keep_forces(mut self) -> Self {
        self.clear_forces = false;
        self
    }

    /// The physics timestep in seconds.
    #[must_use]
    pub fn timestep(&self) -> f64 {
        1.0 / self.fps
    }

    /// Validate the configuration.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(crate::SimError::invalid_config(format!(
                "fps must be positive and finite, got {}",
                self.fps
            )));
        }

        if self.solver_iterations == 0 {
            return Err(crate::SimError::invalid_config(
                "solver_iterations must be at least 1",
            ));
        }

        if self.outer_iterations == 0 {
            return Err(crate::SimError::invalid_config(
                "outer_iterations must be at least 1",
            ));
        }

        if !self.gravity.iter().all(|x| x.is_finite()) {
            return Err(crate::SimError::invalid_config("gravity must be finite"));
        }

        Ok(())
    }
}

/// Material defaults applied to bodies that do not override them.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyDefaults {
    /// Collider density (kg/m²).
    pub density: f64,
    /// Coulomb friction coefficient.
    pub friction: f64,
    /// Coefficient of restitution.
    pub restitution: f64,
    /// Linear velocity damping.
    pub linear_damping: f64,
    /// Angular velocity damping.
    pub angular_damping: f64,
}

impl Default for BodyDefaults {
    fn default() -> Self {
        Self {
            density: 1.0,
            friction: 0.4,
            restitution: 0.1,
            linear_damping: 0.005,
            angular_damping: 0.04,
        }
    }
}
