//! World container over the rapier2d constraint solver.

use myo_types::{BodyDefaults, Result, SimError, SimulationConfig};
use nalgebra::{Point2, Vector2};
use rapier2d_f64::prelude::{
    BroadPhase, CCDSolver, ColliderBuilder, ColliderSet, ImpulseJointHandle, ImpulseJointSet,
    IntegrationParameters, IslandManager, MassProperties, MultibodyJointSet, NarrowPhase,
    PhysicsPipeline, RevoluteJointBuilder, RigidBodyBuilder, RigidBodyHandle, RigidBodySet,
};

/// Collision shape of a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    /// Axis-aligned box given by half-extents.
    Box {
        /// Half-width along the local X axis.
        half_width: f64,
        /// Half-height along the local Y axis.
        half_height: f64,
    },
    /// Circle given by its radius.
    Circle {
        /// Circle radius.
        radius: f64,
    },
}

/// Explicit mass properties overriding the collider-derived ones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassOverride {
    /// Total mass in kg.
    pub mass: f64,
    /// Center of mass in the body's local frame.
    pub center_of_mass: Point2<f64>,
    /// Angular inertia about the center of mass (kg·m²).
    pub angular_inertia: f64,
}

/// Parameters for creating a body.
#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    /// Collision shape.
    pub shape: BodyShape,
    /// Initial position of the body origin in world coordinates.
    pub position: Point2<f64>,
    /// Whether the body is static (immovable).
    pub is_static: bool,
    /// Collider density (kg/m²). Ignored when `mass_override` is set.
    pub density: f64,
    /// Coulomb friction coefficient.
    pub friction: f64,
    /// Coefficient of restitution.
    pub restitution: f64,
    /// Linear velocity damping.
    pub linear_damping: f64,
    /// Angular velocity damping.
    pub angular_damping: f64,
    /// Explicit mass properties replacing the collider-derived ones.
    pub mass_override: Option<MassOverride>,
}

impl BodySpec {
    /// Create a dynamic box spec with default material properties.
    #[must_use]
    pub fn box_at(position: Point2<f64>, half_width: f64, half_height: f64) -> Self {
        Self::new(
            BodyShape::Box {
                half_width,
                half_height,
            },
            position,
        )
    }

    /// Create a dynamic circle spec with default material properties.
    #[must_use]
    pub fn circle_at(position: Point2<f64>, radius: f64) -> Self {
        Self::new(BodyShape::Circle { radius }, position)
    }

    /// Create a spec with default material properties.
    #[must_use]
    pub fn new(shape: BodyShape, position: Point2<f64>) -> Self {
        let defaults = BodyDefaults::default();
        Self {
            shape,
            position,
            is_static: false,
            density: defaults.density,
            friction: defaults.friction,
            restitution: defaults.restitution,
            linear_damping: defaults.linear_damping,
            angular_damping: defaults.angular_damping,
            mass_override: None,
        }
    }

    /// Make the body static.
    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Set the collider density.
    #[must_use]
    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    /// Set the friction coefficient.
    #[must_use]
    pub fn with_friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    /// Set the restitution coefficient.
    #[must_use]
    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set linear and angular velocity damping.
    #[must_use]
    pub fn with_damping(mut self, linear: f64, angular: f64) -> Self {
        self.linear_damping = linear;
        self.angular_damping = angular;
        self
    }

    /// Replace the collider-derived mass properties.
    #[must_use]
    pub fn with_mass_override(mut self, mass_override: MassOverride) -> Self {
        self.mass_override = Some(mass_override);
        self
    }
}

/// Velocity motor parameters for a revolute joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevoluteMotor {
    /// Target angular velocity (rad/s).
    pub target_velocity: f64,
    /// Maximum torque the motor can exert.
    pub max_torque: f64,
}

/// Options for creating a revolute joint.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RevoluteOpts {
    /// Angle limits `[lower, upper]` in radians, relative to the initial
    /// configuration.
    pub limits: Option<[f64; 2]>,
    /// Optional velocity motor.
    pub motor: Option<RevoluteMotor>,
}

impl RevoluteOpts {
    /// Set the angle limits.
    #[must_use]
    pub fn with_limits(mut self, lower: f64, upper: f64) -> Self {
        self.limits = Some([lower, upper]);
        self
    }

    /// Set a velocity motor.
    #[must_use]
    pub fn with_motor(mut self, target_velocity: f64, max_torque: f64) -> Self {
        self.motor = Some(RevoluteMotor {
            target_velocity,
            max_torque,
        });
        self
    }
}

/// The rigid-body world.
///
/// Owns the rapier body/collider/joint sets and the solver pipeline, and
/// steps them with a fixed timestep taken from [`SimulationConfig`].
pub struct World {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    islands: IslandManager,
    broad_phase: BroadPhase,
    narrow_phase: NarrowPhase,
    ccd: CCDSolver,
    pipeline: PhysicsPipeline,
    params: IntegrationParameters,
    gravity: Vector2<f64>,
}

impl World {
    /// Create an empty world from a simulation configuration.
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;

        let params = IntegrationParameters {
            dt: config.timestep(),
            max_velocity_iterations: config.solver_iterations,
            max_stabilization_iterations: config.solver_iterations,
            ..Default::default()
        };

        Ok(Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd: CCDSolver::new(),
            pipeline: PhysicsPipeline::new(),
            params,
            gravity: config.gravity,
        })
    }

    /// The fixed sub-step duration in seconds.
    #[must_use]
    pub fn timestep(&self) -> f64 {
        self.params.dt
    }

    /// The number of bodies in the world.
    #[must_use]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    // =========================================================================
    // Body Management
    // =========================================================================

    /// Add a body to the world and return its handle.
    pub fn add_body(&mut self, spec: &BodySpec) -> RigidBodyHandle {
        let builder = if spec.is_static {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic()
        }
        .translation(spec.position.coords)
        .linear_damping(spec.linear_damping)
        .angular_damping(spec.angular_damping);

        let builder = match spec.mass_override {
            Some(m) => builder.additional_mass_properties(MassProperties::new(
                m.center_of_mass,
                m.mass,
                m.angular_inertia,
            )),
            None => builder,
        };

        let handle = self.bodies.insert(builder.build());

        let collider = match spec.shape {
            BodyShape::Box {
                half_width,
                half_height,
            } => ColliderBuilder::cuboid(half_width, half_height),
            BodyShape::Circle { radius } => ColliderBuilder::ball(radius),
        }
        .density(if spec.mass_override.is_some() {
            0.0
        } else {
            spec.density
        })
        .friction(spec.friction)
        .restitution(spec.restitution)
        .build();

        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        handle
    }

    // =========================================================================
    // Joints
    // =========================================================================

    /// Connect two bodies with a revolute joint at a world-space anchor.
    ///
    /// # Errors
    ///
    /// Returns an error if either handle does not belong to this world.
    pub fn add_revolute_joint(
        &mut self,
        parent: RigidBodyHandle,
        child: RigidBodyHandle,
        world_anchor: Point2<f64>,
        opts: RevoluteOpts,
    ) -> Result<ImpulseJointHandle> {
        let parent_anchor = self
            .bodies
            .get(parent)
            .ok_or_else(|| SimError::invalid_body("revolute joint parent"))?
            .position()
            .inverse_transform_point(&world_anchor);
        let child_anchor = self
            .bodies
            .get(child)
            .ok_or_else(|| SimError::invalid_body("revolute joint child"))?
            .position()
            .inverse_transform_point(&world_anchor);

        let mut joint = RevoluteJointBuilder::new()
            .local_anchor1(parent_anchor)
            .local_anchor2(child_anchor);

        if let Some(limits) = opts.limits {
            joint = joint.limits(limits);
        }
        if let Some(motor) = opts.motor {
            joint = joint
                .motor_velocity(motor.target_velocity, 1.0)
                .motor_max_force(motor.max_torque);
        }

        Ok(self
            .impulse_joints
            .insert(parent, child, joint.build(), true))
    }

    // =========================================================================
    // Point Transforms
    // =========================================================================

    /// Transform a body-local point to world coordinates.
    ///
    /// Panics on a handle that does not belong to this world.
    #[must_use]
    pub fn world_point(&self, body: RigidBodyHandle, local: &Point2<f64>) -> Point2<f64> {
        self.bodies[body].position().transform_point(local)
    }

    /// Transform a world-space point to the body's local frame.
    ///
    /// Panics on a handle that does not belong to this world.
    #[must_use]
    pub fn local_point(&self, body: RigidBodyHandle, world: &Point2<f64>) -> Point2<f64> {
        self.bodies[body].position().inverse_transform_point(world)
    }

    // =========================================================================
    // Kinematic Accessors
    // =========================================================================

    /// The body origin position in world coordinates.
    #[must_use]
    pub fn position(&self, body: RigidBodyHandle) -> Point2<f64> {
        Point2::from(*self.bodies[body].translation())
    }

    /// The body rotation angle in radians.
    #[must_use]
    pub fn rotation(&self, body: RigidBodyHandle) -> f64 {
        self.bodies[body].rotation().angle()
    }

    /// The body's linear velocity.
    #[must_use]
    pub fn linear_velocity(&self, body: RigidBodyHandle) -> Vector2<f64> {
        *self.bodies[body].linvel()
    }

    /// The body's angular velocity (rad/s).
    #[must_use]
    pub fn angular_velocity(&self, body: RigidBodyHandle) -> f64 {
        self.bodies[body].angvel()
    }

    /// The velocity of a world-space point attached to the body.
    #[must_use]
    pub fn velocity_at_point(&self, body: RigidBodyHandle, world: &Point2<f64>) -> Vector2<f64> {
        self.bodies[body].velocity_at_point(world)
    }

    /// The body's mass in kg.
    #[must_use]
    pub fn mass(&self, body: RigidBodyHandle) -> f64 {
        self.bodies[body].mass()
    }

    /// Whether the body is static.
    #[must_use]
    pub fn is_static(&self, body: RigidBodyHandle) -> bool {
        self.bodies[body].is_fixed()
    }

    // =========================================================================
    // Forces and Stepping
    // =========================================================================

    /// Apply a force at a world-space point, waking the body.
    ///
    /// Forces accumulate until [`World::clear_forces`] is called. Static
    /// bodies ignore applied forces.
    pub fn apply_force_at_point(
        &mut self,
        body: RigidBodyHandle,
        force: Vector2<f64>,
        point: Point2<f64>,
    ) {
        if let Some(rb) = self.bodies.get_mut(body) {
            rb.add_force_at_point(force, point, true);
        }
    }

    /// Clear the accumulated forces on every body.
    pub fn clear_forces(&mut self) {
        for (_, rb) in self.bodies.iter_mut() {
            rb.reset_forces(false);
        }
    }

    /// Advance the world by one fixed sub-step.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None,
            &(),
            &(),
        );
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Validate that every body state is finite.
    ///
    /// # Errors
    ///
    /// Returns a divergence error naming the first non-finite body.
    pub fn validate(&self) -> Result<()> {
        for (handle, rb) in self.bodies.iter() {
            let finite = rb.translation().iter().all(|x| x.is_finite())
                && rb.rotation().angle().is_finite()
                && rb.linvel().iter().all(|x| x.is_finite())
                && rb.angvel().is_finite();
            if !finite {
                return Err(SimError::diverged(format!(
                    "body {handle:?} has non-finite state"
                )));
            }
        }
        Ok(())
    }

    /// Total kinetic energy of all dynamic bodies.
    #[must_use]
    pub fn total_kinetic_energy(&self) -> f64 {
        self.bodies
            .iter()
            .filter(|(_, rb)| rb.is_dynamic())
            .map(|(_, rb)| {
                let linear = 0.5 * rb.mass() * rb.linvel().norm_squared();
                let inv_inertia_sqrt = rb.mass_properties().local_mprops.inv_principal_inertia_sqrt;
                let angular = if inv_inertia_sqrt > 0.0 {
                    let inertia = 1.0 / (inv_inertia_sqrt * inv_inertia_sqrt);
                    0.5 * inertia * rb.angvel() * rb.angvel()
                } else {
                    0.0
                };
                linear + angular
            })
            .sum()
    }
}
