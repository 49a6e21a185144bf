//! Force- and speed-limited tendon length controller.

use myo_tendon::TendonElement;
use myo_types::ElasticId;
use myo_world::World;

use crate::ChangeHooks;

/// Default admissible magnitude of the length offset.
pub const DEFAULT_LIMIT: f64 = 100.0;

/// Default maximum force the motor can hold (N).
pub const DEFAULT_MAX_FORCE: f64 = 5000.0;

/// Default maximum reel speed (m/s).
pub const DEFAULT_MAX_SPEED: f64 = 50.0;

/// Force tolerance for the reel-out search.
const FORCE_TOLERANCE: f64 = 1e-3;

/// Iteration cap for the reel-out search.
const MAX_REEL_ITERATIONS: usize = 20;

/// A closed-loop actuator driving one tendon's rest length.
///
/// The controller tracks a target length offset relative to the rest
/// length captured at construction (the "zero" of the motor). Each update
/// it either:
///
/// - **tracks**: moves its position toward the target, at most
///   `max_speed · Δt` per update, committing the move only if the
///   resulting tension stays below `max_force`; or
/// - **reels out**: when overloaded, searches for the length offset at
///   which the tension equals `max_force` and settles there. The target
///   is ignored for that update.
///
/// The search is a bisection over `[position, limit]`: tension decreases
/// monotonically with released length for a stretched tendon, so the
/// bracket converges without a closed-form inverse of the force law.
#[derive(Debug)]
pub struct TendonController {
    elastic: ElasticId,
    name: Option<String>,
    limit: f64,
    target: f64,
    position: f64,
    rest: f64,
    max_force: f64,
    max_speed: f64,
    hooks: ChangeHooks,
}

impl TendonController {
    /// Create a controller for the given tendon.
    ///
    /// The tendon's current rest length becomes the zero-offset baseline
    /// for the life of the controller.
    #[must_use]
    pub fn new(elastic: ElasticId, element: &TendonElement) -> Self {
        Self {
            elastic,
            name: None,
            limit: DEFAULT_LIMIT,
            target: 0.0,
            position: 0.0,
            rest: element.rest_length(),
            max_force: DEFAULT_MAX_FORCE,
            max_speed: DEFAULT_MAX_SPEED,
            hooks: ChangeHooks::default(),
        }
    }

    /// Set a display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the admissible offset magnitude.
    #[must_use]
    pub fn with_limit(mut self, limit: f64) -> Self {
        self.limit = limit;
        self
    }

    /// Set the maximum holding force.
    #[must_use]
    pub fn with_max_force(mut self, max_force: f64) -> Self {
        self.max_force = max_force;
        self
    }

    /// Set the maximum reel speed.
    #[must_use]
    pub fn with_max_speed(mut self, max_speed: f64) -> Self {
        self.max_speed = max_speed;
        self
    }

    /// The controlled tendon's registry id.
    #[must_use]
    pub fn elastic(&self) -> ElasticId {
        self.elastic
    }

    /// The display name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The admissible offset magnitude.
    #[must_use]
    pub fn limit(&self) -> f64 {
        self.limit
    }

    /// Set the admissible offset magnitude.
    pub fn set_limit(&mut self, limit: f64) {
        self.limit = limit;
    }

    /// The desired length offset.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Set the desired length offset and notify subscribers.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
        self.hooks.notify();
    }

    /// The actual feed position of the motor.
    #[must_use]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// The zero-offset rest length captured at construction.
    #[must_use]
    pub fn rest(&self) -> f64 {
        self.rest
    }

    /// The maximum holding force.
    #[must_use]
    pub fn max_force(&self) -> f64 {
        self.max_force
    }

    /// The maximum reel speed.
    #[must_use]
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Register an observer invoked on every target change.
    pub fn subscribe_change(&mut self, f: impl FnMut() + 'static) {
        self.hooks.subscribe(f);
    }

    /// Reel in or out, up to the maximum speed and force.
    ///
    /// Probes the tendon at the current rest length first; an overloaded
    /// tendon is released via [`Self::reel_out`] and the target is not
    /// pursued this update.
    pub fn update(&mut self, element: &mut TendonElement, world: &World, delta_t: f64) {
        if element.internal_force(world, delta_t) > self.max_force {
            tracing::debug!(
                name = self.name.as_deref().unwrap_or("unnamed"),
                position = self.position,
                "force limit exceeded, reeling out"
            );
            self.reel_out(element, world, delta_t);
            return;
        }

        // Cap the move to the maximum speed, then commit it only if the
        // tension stays under the motor's force limit.
        let step = self.max_speed * delta_t;
        let capped_target = self
            .target
            .clamp(self.position - step, self.position + step);

        element.set_rest_length(self.rest + capped_target);
        if element.internal_force(world, delta_t) < self.max_force {
            self.position = capped_target;
        } else {
            self.reel_out(element, world, delta_t);
        }
    }

    /// Settle on the position where the tension equals the force limit.
    ///
    /// Bisection over `[position, limit]`, stopping when the probed force
    /// is within `1e-3` of the limit or after 20 iterations. The final
    /// midpoint becomes the committed position.
    pub fn reel_out(&mut self, element: &mut TendonElement, world: &World, delta_t: f64) {
        let mut low = self.position;
        let mut high = self.limit;
        let mut mid = self.position;

        for _ in 0..MAX_REEL_ITERATIONS {
            mid = 0.5 * (low + high);
            element.set_rest_length(self.rest + mid);
            let force = element.internal_force(world, delta_t);
            if (force - self.max_force).abs() < FORCE_TOLERANCE {
                break;
            }
            if force < self.max_force {
                high = mid;
            } else {
                low = mid;
            }
        }

        self.position = mid;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use myo_types::SimulationConfig;
    use myo_world::{BodySpec, Point2, World};

    fn world() -> World {
        World::new(&SimulationConfig::default().zero_gravity()).expect("config is valid")
    }

    /// Two fixed anchors `distance` apart with a tendon between them.
    fn stretched_tendon(world: &mut World, distance: f64, rest: f64) -> TendonElement {
        let a = world.add_body(&BodySpec::box_at(Point2::new(0.0, 0.0), 0.1, 0.1).fixed());
        let b = world.add_body(&BodySpec::box_at(Point2::new(distance, 0.0), 0.1, 0.1).fixed());
        TendonElement::new(
            world,
            a,
            b,
            Point2::new(0.0, 0.0),
            Point2::new(distance, 0.0),
            400.0,
        )
        .with_rest_length(rest)
        .with_damping(0.0)
    }

    #[test]
    fn test_rate_limited_tracking() {
        let mut world = world();
        // Slack tendon: no force resists the motor.
        let mut element = stretched_tendon(&mut world, 1.0, 1.0);
        let mut controller = TendonController::new(ElasticId::new(0), &element)
            .with_limit(100.0)
            .with_max_force(5000.0)
            .with_max_speed(50.0);

        controller.set_target(200.0);
        controller.update(&mut element, &world, 0.01);

        // One update moves at most max_speed * delta_t = 0.5.
        assert_relative_eq!(controller.position(), 0.5, epsilon = 1e-9);
        assert_relative_eq!(element.rest_length(), 1.5, epsilon = 1e-9);
    }

    #[test]
    fn test_tracking_reaches_target() {
        let mut world = world();
        let mut element = stretched_tendon(&mut world, 1.0, 1.0);
        let mut controller = TendonController::new(ElasticId::new(0), &element)
            .with_max_speed(50.0);

        controller.set_target(-0.2);
        for _ in 0..100 {
            controller.update(&mut element, &world, 0.01);
        }

        assert_relative_eq!(controller.position(), -0.2, epsilon = 1e-9);
        assert_relative_eq!(element.rest_length(), 0.8, epsilon = 1e-9);
    }

    #[test]
    fn test_step_never_exceeds_speed() {
        let mut world = world();
        let mut element = stretched_tendon(&mut world, 1.0, 1.0);
        let mut controller = TendonController::new(ElasticId::new(0), &element)
            .with_max_speed(50.0);

        controller.set_target(3.0);
        let delta_t = 0.01;
        for _ in 0..20 {
            let before = controller.position();
            controller.update(&mut element, &world, delta_t);
            let moved = (controller.position() - before).abs();
            assert!(
                moved <= controller.max_speed() * delta_t + 1e-9,
                "moved {moved} in one update"
            );
        }
    }

    #[test]
    fn test_reel_out_converges_to_force_limit() {
        let mut world = world();
        // Anchors 3.0 apart, rest 1.0, k = 400: tension 800 N.
        let mut element = stretched_tendon(&mut world, 3.0, 1.0);
        let mut controller = TendonController::new(ElasticId::new(0), &element)
            .with_limit(10.0)
            .with_max_force(100.0);

        controller.update(&mut element, &world, 0.01);

        let force = element.internal_force(&world, 0.01);
        assert!(
            (force - 100.0).abs() < 0.01,
            "force should settle at the limit, got {force}"
        );
        // 400 * (2 - position) == 100 at position 1.75.
        assert_relative_eq!(controller.position(), 1.75, epsilon = 1e-3);
    }

    #[test]
    fn test_blocked_commit_falls_back_to_reel_out() {
        let mut world = world();
        // Already at the force limit boundary: extension 0.2 -> 80 N.
        let mut element = stretched_tendon(&mut world, 1.2, 1.0);
        let mut controller = TendonController::new(ElasticId::new(0), &element)
            .with_limit(10.0)
            .with_max_force(100.0)
            .with_max_speed(50.0);

        // Reeling in by 0.5 would raise the tension to 400 * 0.7 = 280 N,
        // over the limit, so the controller must release instead.
        controller.set_target(-5.0);
        controller.update(&mut element, &world, 0.01);

        let force = element.internal_force(&world, 0.01);
        assert!(force <= 100.0 + 0.01, "force stayed within the limit: {force}");
        assert!(controller.position() > -0.5, "move was not committed");
    }

    #[test]
    fn test_set_target_notifies_subscribers() {
        use std::cell::Cell;
        use std::rc::Rc;

        let mut world = world();
        let element = stretched_tendon(&mut world, 1.0, 1.0);
        let mut controller = TendonController::new(ElasticId::new(0), &element);

        let notified = Rc::new(Cell::new(0));
        let observer = Rc::clone(&notified);
        controller.subscribe_change(move || observer.set(observer.get() + 1));

        controller.set_target(1.0);
        controller.set_target(2.0);
        assert_eq!(notified.get(), 2);
        assert_relative_eq!(controller.target(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_defaults() {
        let mut world = world();
        let element = stretched_tendon(&mut world, 1.0, 1.0);
        let controller = TendonController::new(ElasticId::new(3), &element);

        assert_eq!(controller.elastic(), ElasticId::new(3));
        assert_relative_eq!(controller.limit(), DEFAULT_LIMIT, epsilon = 1e-12);
        assert_relative_eq!(controller.max_force(), DEFAULT_MAX_FORCE, epsilon = 1e-12);
        assert_relative_eq!(controller.max_speed(), DEFAULT_MAX_SPEED, epsilon = 1e-12);
        assert_relative_eq!(controller.rest(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(controller.position(), 0.0, epsilon = 1e-12);
    }
}
