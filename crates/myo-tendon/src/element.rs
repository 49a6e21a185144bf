//! Multi-segment elastic tendon element.

use myo_world::{RigidBodyHandle, World};
use nalgebra::{Point2, Vector2};

use crate::ForceElement;

/// Segments shorter than this are treated as degenerate: their direction
/// is undefined and they contribute no force.
const MIN_SEGMENT_LENGTH: f64 = 1e-10;

/// A frictionless routing point a tendon passes through.
///
/// The point is fixed in the owning body's local frame. Contacts are
/// stored in routing order, from the body-A side to the body-B side, and
/// are never reordered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoint {
    /// The body carrying the routing point.
    pub body: RigidBodyHandle,
    /// Position in the body's local frame.
    pub local_point: Point2<f64>,
}

/// An elastic tendon connecting two bodies through routing contacts.
///
/// The tendon resists stretching with a spring-damper law and goes slack
/// under compression. Its rest length is either auto-derived from the
/// geometry at the last topology change, or explicitly controlled once
/// [`TendonElement::set_rest_length`] (or `with_rest_length`) has been
/// called.
///
/// # Example
///
/// ```no_run
/// use myo_tendon::TendonElement;
/// use myo_world::{BodySpec, Point2, World};
/// use myo_types::SimulationConfig;
///
/// let mut world = World::new(&SimulationConfig::default())?;
/// let a = world.add_body(&BodySpec::box_at(Point2::new(0.0, 0.0), 0.5, 0.5).fixed());
/// let b = world.add_body(&BodySpec::box_at(Point2::new(2.0, 0.0), 0.5, 0.5));
///
/// let tendon = TendonElement::new(
///     &world,
///     a,
///     b,
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     400.0,
/// );
/// assert_eq!(tendon.rest_length(), 2.0);
/// # Ok::<(), myo_types::SimError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TendonElement {
    body_a: RigidBodyHandle,
    body_b: RigidBodyHandle,
    local_anchor_a: Point2<f64>,
    local_anchor_b: Point2<f64>,
    contacts: Vec<ContactPoint>,
    stiffness: f64,
    damping: f64,
    rest_length: f64,
    explicit_rest_length: bool,
    last_extension: f64,
}

impl TendonElement {
    /// Create a tendon between two bodies.
    ///
    /// The anchors are given in world coordinates and converted to each
    /// body's local frame; they stay fixed in the body frame afterwards.
    /// The rest length is auto-derived from the current geometry until
    /// explicitly set.
    #[must_use]
    pub fn new(
        world: &World,
        body_a: RigidBodyHandle,
        body_b: RigidBodyHandle,
        anchor_a: Point2<f64>,
        anchor_b: Point2<f64>,
        stiffness: f64,
    ) -> Self {
        let mut element = Self {
            body_a,
            body_b,
            local_anchor_a: world.local_point(body_a, &anchor_a),
            local_anchor_b: world.local_point(body_b, &anchor_b),
            contacts: Vec::new(),
            stiffness,
            damping: 1.0,
            rest_length: 0.0,
            explicit_rest_length: false,
            last_extension: 0.0,
        };
        element.rest_length = element.length(world);
        element
    }

    /// Set an explicit rest length, disabling auto-derivation.
    #[must_use]
    pub fn with_rest_length(mut self, rest_length: f64) -> Self {
        self.rest_length = rest_length;
        self.explicit_rest_length = true;
        self
    }

    /// Set the damping coefficient.
    #[must_use]
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// Append a routing contact at a world-space point.
    ///
    /// Contacts must be added in body-A to body-B routing order; the
    /// sequence is taken as-is. If the rest length is auto-derived it is
    /// recomputed to the new geometric length, so adding a contact never
    /// introduces instantaneous tension.
    pub fn add_contact(&mut self, world: &World, body: RigidBodyHandle, point: Point2<f64>) {
        self.contacts.push(ContactPoint {
            body,
            local_point: world.local_point(body, &point),
        });
        if !self.explicit_rest_length {
            self.rest_length = self.length(world);
        }
    }

    /// The first attached body.
    #[must_use]
    pub fn body_a(&self) -> RigidBodyHandle {
        self.body_a
    }

    /// The second attached body.
    #[must_use]
    pub fn body_b(&self) -> RigidBodyHandle {
        self.body_b
    }

    /// The routing contacts, in body-A to body-B order.
    #[must_use]
    pub fn contacts(&self) -> &[ContactPoint] {
        &self.contacts
    }

    /// The spring stiffness.
    #[must_use]
    pub fn stiffness(&self) -> f64 {
        self.stiffness
    }

    /// The damping coefficient.
    #[must_use]
    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// The current rest length.
    #[must_use]
    pub fn rest_length(&self) -> f64 {
        self.rest_length
    }

    /// Set the rest length directly.
    ///
    /// Marks the rest length as explicitly controlled: later topology
    /// changes will no longer recompute it.
    pub fn set_rest_length(&mut self, rest_length: f64) {
        self.rest_length = rest_length;
        self.explicit_rest_length = true;
    }

    /// The world-space polyline through anchor A, the routing contacts,
    /// and anchor B, for rendering.
    #[must_use]
    pub fn line_points(&self, world: &World) -> Vec<Point2<f64>> {
        let mut points = Vec::with_capacity(self.contacts.len() + 2);
        points.push(world.world_point(self.body_a, &self.local_anchor_a));
        for contact in &self.contacts {
            points.push(world.world_point(contact.body, &contact.local_point));
        }
        points.push(world.world_point(self.body_b, &self.local_anchor_b));
        points
    }

    /// The current geometric length: the sum of the segment lengths along
    /// the routing polyline.
    #[must_use]
    pub fn length(&self, world: &World) -> f64 {
        polyline_length(&self.line_points(world))
    }

    /// Current length minus rest length. Negative when slack.
    #[must_use]
    pub fn extension(&self, world: &World) -> f64 {
        self.length(world) - self.rest_length
    }

    /// Probe the internal tension without advancing any state.
    ///
    /// The strain rate is estimated against the extension cached by the
    /// last [`ForceElement::update_forces`] call; probing any number of
    /// times between updates returns consistent values. A slack tendon
    /// carries no force.
    #[must_use]
    pub fn internal_force(&self, world: &World, delta_t: f64) -> f64 {
        self.force_from_extension(self.extension(world), delta_t)
    }

    fn force_from_extension(&self, extension: f64, delta_t: f64) -> f64 {
        if extension <= 0.0 {
            return 0.0;
        }
        let strain_rate = (extension - self.last_extension) / delta_t;
        self.stiffness * extension + self.damping * strain_rate
    }
}

impl ForceElement for TendonElement {
    /// Apply the tendon forces for this sub-step.
    ///
    /// Advances the cached extension (the only place it advances), then
    /// pulls both anchors along the chain and applies the
    /// bisector-projected tension at every routing contact. Each attached
    /// body receives its contribution exactly once.
    fn update_forces(&mut self, world: &mut World, delta_t: f64) {
        let points = self.line_points(world);
        let extension = polyline_length(&points) - self.rest_length;
        let force = self.force_from_extension(extension, delta_t);
        self.last_extension = extension;

        let last = points.len() - 1;
        let direction_a = unit_or_zero(points[1] - points[0]);
        world.apply_force_at_point(self.body_a, force * direction_a, points[0]);
        let direction_b = unit_or_zero(points[last - 1] - points[last]);
        world.apply_force_at_point(self.body_b, force * direction_b, points[last]);

        for (i, contact) in self.contacts.iter().enumerate() {
            let at = points[i + 1];
            let toward_a = unit_or_zero(points[i] - at);
            let toward_b = unit_or_zero(points[i + 2] - at);
            // A straight chain has opposing adjacent directions and a zero
            // bisector: the contact feels no net force.
            let bisector = unit_or_zero(0.5 * (toward_a + toward_b));
            let projected = force * toward_a.dot(&bisector);
            world.apply_force_at_point(contact.body, projected * bisector, at);
        }
    }
}

fn polyline_length(points: &[Point2<f64>]) -> f64 {
    points
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).norm())
        .sum()
}

fn unit_or_zero(v: Vector2<f64>) -> Vector2<f64> {
    let norm = v.norm();
    if norm > MIN_SEGMENT_LENGTH {
        v / norm
    } else {
        Vector2::zeros()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use myo_types::SimulationConfig;
    use myo_world::BodySpec;

    fn world() -> World {
        World::new(&SimulationConfig::default().zero_gravity()).expect("config is valid")
    }

    fn fixed_box(world: &mut World, x: f64, y: f64) -> RigidBodyHandle {
        world.add_body(&BodySpec::box_at(Point2::new(x, y), 0.1, 0.1).fixed())
    }

    #[test]
    fn test_auto_rest_length() {
        let mut world = world();
        let a = fixed_box(&mut world, 0.0, 0.0);
        let b = fixed_box(&mut world, 2.0, 0.0);

        let tendon = TendonElement::new(
            &world,
            a,
            b,
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            400.0,
        );

        assert_relative_eq!(tendon.rest_length(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(tendon.extension(&world), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_length_with_contact() {
        let mut world = world();
        let a = fixed_box(&mut world, 0.0, 0.0);
        let b = fixed_box(&mut world, 2.0, 0.0);
        let post = fixed_box(&mut world, 1.0, 1.0);

        let mut tendon = TendonElement::new(
            &world,
            a,
            b,
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            400.0,
        );
        tendon.add_contact(&world, post, Point2::new(1.0, 1.0));

        // Two diagonal segments of sqrt(2) each.
        let expected = 2.0 * std::f64::consts::SQRT_2;
        assert_relative_eq!(tendon.length(&world), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_add_contact_keeps_zero_extension() {
        let mut world = world();
        let a = fixed_box(&mut world, 0.0, 0.0);
        let b = fixed_box(&mut world, 2.0, 0.0);
        let post = fixed_box(&mut world, 1.0, 1.0);

        let mut tendon = TendonElement::new(
            &world,
            a,
            b,
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            400.0,
        );
        tendon.add_contact(&world, post, Point2::new(1.0, 1.0));

        assert_relative_eq!(tendon.extension(&world), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_explicit_rest_length_survives_contacts() {
        let mut world = world();
        let a = fixed_box(&mut world, 0.0, 0.0);
        let b = fixed_box(&mut world, 2.0, 0.0);
        let post = fixed_box(&mut world, 1.0, 1.0);

        let mut tendon = TendonElement::new(
            &world,
            a,
            b,
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            400.0,
        )
        .with_rest_length(1.5);
        tendon.add_contact(&world, post, Point2::new(1.0, 1.0));

        assert_relative_eq!(tendon.rest_length(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_internal_force_linear_spring() {
        let mut world = world();
        let a = fixed_box(&mut world, 0.0, 0.0);
        let b = fixed_box(&mut world, 1.5, 0.0);

        // k = 400, rest length 1.0, anchors 1.5 apart: extension 0.5.
        let tendon = TendonElement::new(
            &world,
            a,
            b,
            Point2::new(0.0, 0.0),
            Point2::new(1.5, 0.0),
            400.0,
        )
        .with_rest_length(1.0)
        .with_damping(0.0);

        assert_relative_eq!(tendon.internal_force(&world, 0.0025), 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_slack_tendon_carries_no_force() {
        let mut world = world();
        let a = fixed_box(&mut world, 0.0, 0.0);
        let b = fixed_box(&mut world, 1.0, 0.0);

        let tendon = TendonElement::new(
            &world,
            a,
            b,
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            400.0,
        )
        .with_rest_length(2.0)
        .with_damping(50.0);

        assert_relative_eq!(tendon.internal_force(&world, 0.0025), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_extension_no_force_with_damping() {
        let mut world = world();
        let a = fixed_box(&mut world, 0.0, 0.0);
        let b = fixed_box(&mut world, 1.0, 0.0);

        let tendon = TendonElement::new(
            &world,
            a,
            b,
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            400.0,
        )
        .with_damping(100.0);

        // Auto-derived rest length means zero extension exactly.
        assert_relative_eq!(tendon.internal_force(&world, 0.0025), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_probe_does_not_advance_strain_memory() {
        let mut world = world();
        let a = fixed_box(&mut world, 0.0, 0.0);
        let b = fixed_box(&mut world, 1.5, 0.0);

        let tendon = TendonElement::new(
            &world,
            a,
            b,
            Point2::new(0.0, 0.0),
            Point2::new(1.5, 0.0),
            400.0,
        )
        .with_rest_length(1.0)
        .with_damping(10.0);

        let first = tendon.internal_force(&world, 0.0025);
        let second = tendon.internal_force(&world, 0.0025);
        assert_relative_eq!(first, second, epsilon = 1e-12);
    }

    #[test]
    fn test_update_advances_strain_memory() {
        let mut world = world();
        let a = fixed_box(&mut world, 0.0, 0.0);
        let b = fixed_box(&mut world, 1.5, 0.0);

        let mut tendon = TendonElement::new(
            &world,
            a,
            b,
            Point2::new(0.0, 0.0),
            Point2::new(1.5, 0.0),
            400.0,
        )
        .with_rest_length(1.0)
        .with_damping(10.0);

        let dt = 0.0025;
        // Before any update the full extension reads as fresh strain.
        let probed = tendon.internal_force(&world, dt);
        assert!(probed > 400.0 * 0.5);

        tendon.update_forces(&mut world, dt);

        // Geometry is static, so after the update the strain rate is zero.
        assert_relative_eq!(tendon.internal_force(&world, dt), 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_endpoint_forces_pull_bodies_together() {
        let mut world = world();
        let a = world.add_body(&BodySpec::box_at(Point2::new(0.0, 0.0), 0.1, 0.1));
        let b = world.add_body(&BodySpec::box_at(Point2::new(3.0, 0.0), 0.1, 0.1));

        let mut tendon = TendonElement::new(
            &world,
            a,
            b,
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 0.0),
            400.0,
        )
        .with_rest_length(1.0)
        .with_damping(0.0);

        let dt = world.timestep();
        tendon.update_forces(&mut world, dt);
        world.step();

        assert!(world.linear_velocity(a).x > 0.0, "a pulled toward b");
        assert!(world.linear_velocity(b).x < 0.0, "b pulled toward a");
    }

    #[test]
    fn test_contact_force_along_bisector() {
        let mut world = world();
        let a = fixed_box(&mut world, 0.0, 0.0);
        let b = fixed_box(&mut world, 2.0, 0.0);
        let ball = world.add_body(&BodySpec::circle_at(Point2::new(1.0, 1.0), 0.1));

        // Symmetric V through the ball: the bisector points straight down.
        let mut tendon = TendonElement::new(
            &world,
            a,
            b,
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            400.0,
        );
        tendon.add_contact(&world, ball, Point2::new(1.0, 1.0));
        tendon.set_rest_length(1.0);

        let dt = world.timestep();
        tendon.update_forces(&mut world, dt);
        world.step();

        let velocity = world.linear_velocity(ball);
        assert!(velocity.y < 0.0, "ball pushed along the bisector");
        assert_relative_eq!(velocity.x, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_straight_chain_contact_feels_nothing() {
        let mut world = world();
        let a = fixed_box(&mut world, 0.0, 0.0);
        let b = fixed_box(&mut world, 2.0, 0.0);
        let mid = world.add_body(&BodySpec::circle_at(Point2::new(1.0, 0.0), 0.1));

        let mut tendon = TendonElement::new(
            &world,
            a,
            b,
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            400.0,
        );
        tendon.add_contact(&world, mid, Point2::new(1.0, 0.0));
        tendon.set_rest_length(1.0);

        let dt = world.timestep();
        tendon.update_forces(&mut world, dt);
        world.step();

        // Opposing adjacent directions cancel: no bisector, no force.
        assert_relative_eq!(world.linear_velocity(mid).norm(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_coincident_points_yield_zero_not_nan() {
        let mut world = world();
        let a = fixed_box(&mut world, 0.0, 0.0);
        let b = fixed_box(&mut world, 0.0, 0.0);

        let mut tendon = TendonElement::new(
            &world,
            a,
            b,
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 0.0),
            400.0,
        )
        .with_rest_length(-1.0);

        // Rest length below zero forces tension on a zero-length chain.
        let dt = world.timestep();
        tendon.update_forces(&mut world, dt);
        assert!(world.validate().is_ok());
    }

    #[test]
    fn test_line_points_order() {
        let mut world = world();
        let a = fixed_box(&mut world, 0.0, 0.0);
        let b = fixed_box(&mut world, 2.0, 0.0);
        let post = fixed_box(&mut world, 1.0, 1.0);

        let mut tendon = TendonElement::new(
            &world,
            a,
            b,
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            400.0,
        );
        tendon.add_contact(&world, post, Point2::new(1.0, 1.0));

        let points = tendon.line_points(&world);
        assert_eq!(points.len(), 3);
        assert_relative_eq!(points[0].x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(points[1].y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(points[2].x, 2.0, epsilon = 1e-12);
    }
}
