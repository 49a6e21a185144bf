//! Spring-to-point grab constraint for interactive dragging.
//!
//! External interaction (for example a mouse drag in a viewer) is modeled
//! as a [`PointGrab`]: a soft spring between a grip point fixed on a body
//! and a freely movable world-space target. The collaborator driving the
//! interaction only updates the target; the grab applies its force during
//! the regular per-tick force pass, so there is no second mutation path
//! into the world.

use myo_types::{Result, SimError};
use nalgebra::{Point2, Vector2};
use rapier2d_f64::prelude::RigidBodyHandle;

use crate::world::World;

/// Soft-constraint response frequency in Hz.
const FREQUENCY_HZ: f64 = 5.0;

/// Soft-constraint damping ratio.
const DAMPING_RATIO: f64 = 0.7;

/// A force-limited spring pulling a grip point on a body toward a target.
///
/// Gains are derived from the grabbed body's mass so that the response is
/// the same regardless of how heavy the body is.
#[derive(Debug, Clone, PartialEq)]
pub struct PointGrab {
    body: RigidBodyHandle,
    local_point: Point2<f64>,
    target: Point2<f64>,
    max_force: f64,
    stiffness: f64,
    damping: f64,
    last_force: Vector2<f64>,
}

impl PointGrab {
    /// Grab a body at a world-space grip point.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is static.
    pub fn new(
        world: &World,
        body: RigidBodyHandle,
        grip: Point2<f64>,
        max_force: f64,
    ) -> Result<Self> {
        if world.is_static(body) {
            return Err(SimError::invalid_body("grab target is static"));
        }

        let mass = world.mass(body);
        let omega = 2.0 * std::f64::consts::PI * FREQUENCY_HZ;
        Ok(Self {
            body,
            local_point: world.local_point(body, &grip),
            target: grip,
            max_force,
            stiffness: mass * omega * omega,
            damping: 2.0 * mass * DAMPING_RATIO * omega,
            last_force: Vector2::zeros(),
        })
    }

    /// The grabbed body.
    #[must_use]
    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    /// The current target point.
    #[must_use]
    pub fn target(&self) -> Point2<f64> {
        self.target
    }

    /// Move the target point.
    pub fn set_target(&mut self, target: Point2<f64>) {
        self.target = target;
    }

    /// The grip point in world coordinates.
    #[must_use]
    pub fn grip_point(&self, world: &World) -> Point2<f64> {
        world.world_point(self.body, &self.local_point)
    }

    /// The force applied on the last update, for UI display.
    #[must_use]
    pub fn reaction_force(&self) -> Vector2<f64> {
        self.last_force
    }

    /// Apply the spring force for this tick.
    pub fn update_forces(&mut self, world: &mut World, _delta_t: f64) {
        let grip = world.world_point(self.body, &self.local_point);
        let velocity = world.velocity_at_point(self.body, &grip);

        let mut force = self.stiffness * (self.target - grip) - self.damping * velocity;
        let magnitude = force.norm();
        if magnitude > self.max_force {
            force *= self.max_force / magnitude;
        }

        self.last_force = force;
        world.apply_force_at_point(self.body, force, grip);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::world::BodySpec;
    use myo_types::SimulationConfig;

    #[test]
    fn test_grab_rejects_static_body() {
        let config = SimulationConfig::default();
        let mut world = World::new(&config).expect("config is valid");
        let ground = world.add_body(&BodySpec::box_at(Point2::new(0.0, 0.0), 1.0, 1.0).fixed());

        assert!(PointGrab::new(&world, ground, Point2::new(0.0, 0.0), 8000.0).is_err());
    }

    #[test]
    fn test_grab_pulls_body_toward_target() {
        let config = SimulationConfig::default().zero_gravity();
        let mut world = World::new(&config).expect("config is valid");
        let body = world.add_body(&BodySpec::box_at(Point2::new(0.0, 0.0), 0.5, 0.5));

        let mut grab =
            PointGrab::new(&world, body, Point2::new(0.0, 0.0), 8000.0).expect("body is dynamic");
        grab.set_target(Point2::new(2.0, 0.0));

        for _ in 0..200 {
            let dt = world.timestep();
            grab.update_forces(&mut world, dt);
            world.step();
            world.clear_forces();
        }

        assert!(
            world.position(body).x > 0.5,
            "body should move toward the target"
        );
    }

    #[test]
    fn test_grab_force_is_capped() {
        let config = SimulationConfig::default().zero_gravity();
        let mut world = World::new(&config).expect("config is valid");
        let body = world.add_body(&BodySpec::box_at(Point2::new(0.0, 0.0), 0.5, 0.5));

        let max_force = 100.0;
        let mut grab =
            PointGrab::new(&world, body, Point2::new(0.0, 0.0), max_force).expect("body is dynamic");
        grab.set_target(Point2::new(1000.0, 0.0));

        let dt = world.timestep();
        grab.update_forces(&mut world, dt);
        assert!(grab.reaction_force().norm() <= max_force + 1e-9);
    }
}
