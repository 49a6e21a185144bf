//! Constant external load element.

use myo_world::{Point2, RigidBodyHandle, Vector2, World};

use crate::ForceElement;

/// A constant external force applied at an anchor point on a body.
///
/// Unlike a tendon this is not a spring: the stored force vector is
/// applied unchanged on every tick until replaced. The maximum magnitude
/// is the bound a UI control should offer; it is advisory and not
/// enforced on [`LoadElement::set_force`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadElement {
    body: RigidBodyHandle,
    local_anchor: Point2<f64>,
    force: Vector2<f64>,
    max_magnitude: f64,
}

impl LoadElement {
    /// Create a load on a body at a world-space anchor, initially exerting
    /// no force.
    #[must_use]
    pub fn new(
        world: &World,
        body: RigidBodyHandle,
        anchor: Point2<f64>,
        max_magnitude: f64,
    ) -> Self {
        Self {
            body,
            local_anchor: world.local_point(body, &anchor),
            force: Vector2::zeros(),
            max_magnitude,
        }
    }

    /// The loaded body.
    #[must_use]
    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    /// The currently applied force.
    #[must_use]
    pub fn force(&self) -> Vector2<f64> {
        self.force
    }

    /// Replace the applied force.
    pub fn set_force(&mut self, force: Vector2<f64>) {
        self.force = force;
    }

    /// The advisory maximum force magnitude for UI controls.
    #[must_use]
    pub fn max_magnitude(&self) -> f64 {
        self.max_magnitude
    }

    /// The anchor point in world coordinates.
    #[must_use]
    pub fn anchor_world(&self, world: &World) -> Point2<f64> {
        world.world_point(self.body, &self.local_anchor)
    }
}

impl ForceElement for LoadElement {
    fn update_forces(&mut self, world: &mut World, _delta_t: f64) {
        let anchor = world.world_point(self.body, &self.local_anchor);
        world.apply_force_at_point(self.body, self.force, anchor);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use myo_types::SimulationConfig;
    use myo_world::BodySpec;

    #[test]
    fn test_load_applies_constant_force() {
        let config = SimulationConfig::default().zero_gravity();
        let mut world = World::new(&config).expect("config is valid");
        let body = world.add_body(&BodySpec::box_at(Point2::new(0.0, 0.0), 0.5, 0.5));

        let mut load = LoadElement::new(&world, body, Point2::new(0.0, 0.0), 300.0);
        load.set_force(Vector2::new(0.0, -50.0));

        for _ in 0..10 {
            let dt = world.timestep();
            load.update_forces(&mut world, dt);
            world.step();
            world.clear_forces();
        }

        assert!(world.linear_velocity(body).y < 0.0, "load pulls the body down");
        assert_relative_eq!(load.max_magnitude(), 300.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_force_is_inert() {
        let config = SimulationConfig::default().zero_gravity();
        let mut world = World::new(&config).expect("config is valid");
        let body = world.add_body(&BodySpec::box_at(Point2::new(0.0, 0.0), 0.5, 0.5));

        let mut load = LoadElement::new(&world, body, Point2::new(0.0, 0.0), 300.0);
        let dt = world.timestep();
        load.update_forces(&mut world, dt);
        world.step();

        assert_relative_eq!(world.linear_velocity(body).norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_set_force_replaces() {
        let config = SimulationConfig::default().zero_gravity();
        let mut world = World::new(&config).expect("config is valid");
        let body = world.add_body(&BodySpec::box_at(Point2::new(0.0, 0.0), 0.5, 0.5));

        let mut load = LoadElement::new(&world, body, Point2::new(0.0, 0.0), 300.0);
        load.set_force(Vector2::new(10.0, 0.0));
        load.set_force(Vector2::new(0.0, 20.0));

        assert_relative_eq!(load.force().x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(load.force().y, 20.0, epsilon = 1e-12);
    }
}
