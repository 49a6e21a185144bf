//! Scene description types.
//!
//! These types mirror the on-disk scene schema and use string ids for
//! cross-references; [`crate::build_scene`] resolves them into typed
//! handles. They round-trip through serde without loss.

use myo_control::{DEFAULT_LIMIT, DEFAULT_MAX_FORCE, DEFAULT_MAX_SPEED};
use myo_types::BodyDefaults;
use serde::{Deserialize, Serialize};

/// A complete scene: bodies, joints, force elements, and controllers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDesc {
    /// Rigid bodies.
    #[serde(default)]
    pub bodies: Vec<BodyDesc>,
    /// Joints between bodies.
    #[serde(default)]
    pub joints: Vec<JointDesc>,
    /// Elastic tendon elements.
    #[serde(default)]
    pub elastics: Vec<ElasticDesc>,
    /// Constant load elements.
    #[serde(default)]
    pub loads: Vec<LoadDesc>,
    /// Tendon controllers.
    #[serde(default)]
    pub controllers: Vec<ControllerDesc>,
    /// Antagonist controller couples.
    #[serde(default)]
    pub couples: Vec<CoupleDesc>,
}

/// Collision shape of a body.
///
/// The `type` tag selects the variant; an unknown tag fails
/// deserialization, which makes a misspelled shape a fatal configuration
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeDesc {
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

/// A rigid body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDesc {
    /// Id other scene entries use to reference this body.
    #[serde(default)]
    pub id: Option<String>,
    /// Collision shape.
    pub shape: ShapeDesc,
    /// Initial position of the body origin.
    pub position: [f64; 2],
    /// Whether the body is static.
    #[serde(rename = "static", default)]
    pub is_static: bool,
    /// Collider density (kg/m²).
    #[serde(default = "default_density")]
    pub density: f64,
    /// Coulomb friction coefficient.
    #[serde(default = "default_friction")]
    pub friction: f64,
    /// Coefficient of restitution.
    #[serde(default = "default_restitution")]
    pub restitution: f64,
    /// Linear velocity damping.
    #[serde(default = "default_linear_damping")]
    pub linear_damping: f64,
    /// Angular velocity damping.
    #[serde(default = "default_angular_damping")]
    pub angular_damping: f64,
    /// Explicit mass in kg, replacing the collider-derived mass.
    #[serde(default)]
    pub mass: Option<f64>,
    /// Center of mass in the body's local frame. Only used with `mass`.
    #[serde(default)]
    pub center_of_mass: Option<[f64; 2]>,
    /// Angular inertia about the center of mass. Only used with `mass`.
    #[serde(default)]
    pub angular_inertia: Option<f64>,
    /// Display label for rendering collaborators.
    #[serde(default)]
    pub label: Option<String>,
}

/// A joint between two bodies.
///
/// The `type` tag selects the variant; an unknown joint type is a fatal
/// configuration error surfaced at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum JointDesc {
    /// A revolute (hinge) joint.
    Revolute {
        /// Id of the first attached body.
        body_a: String,
        /// Id of the second attached body.
        body_b: String,
        /// World-space anchor the two bodies rotate about.
        anchor: [f64; 2],
        /// Angle limits `[lower, upper]` in radians.
        #[serde(default)]
        limits: Option<[f64; 2]>,
        /// Optional velocity motor.
        #[serde(default)]
        motor: Option<MotorDesc>,
    },
}

/// Velocity motor parameters for a revolute joint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotorDesc {
    /// Target angular velocity (rad/s).
    pub speed: f64,
    /// Maximum torque the motor can exert.
    pub max_torque: f64,
}

/// A routing contact on an elastic tendon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactDesc {
    /// Id of the body carrying the routing point.
    pub body: String,
    /// World-space position of the routing point at scene construction.
    pub point: [f64; 2],
}

/// An elastic tendon element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElasticDesc {
    /// Id controllers use to reference this tendon.
    #[serde(default)]
    pub id: Option<String>,
    /// Id of the first attached body.
    pub body_a: String,
    /// Id of the second attached body.
    pub body_b: String,
    /// World-space anchor on body A at scene construction.
    pub anchor_a: [f64; 2],
    /// World-space anchor on body B at scene construction.
    pub anchor_b: [f64; 2],
    /// Spring stiffness.
    pub stiffness: f64,
    /// Damping coefficient.
    #[serde(default = "default_elastic_damping")]
    pub damping: f64,
    /// Explicit rest length. Auto-derived from the geometry when absent.
    #[serde(default)]
    pub rest_length: Option<f64>,
    /// Routing contacts in body-A to body-B order.
    #[serde(default)]
    pub contacts: Vec<ContactDesc>,
}

/// A constant load element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadDesc {
    /// Id UI collaborators use to reference this load.
    #[serde(default)]
    pub id: Option<String>,
    /// Id of the loaded body.
    pub body: String,
    /// World-space anchor the load pulls on at scene construction.
    pub anchor: [f64; 2],
    /// Advisory maximum force magnitude for UI controls.
    pub max: f64,
}

/// A tendon controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerDesc {
    /// Id couples use to reference this controller.
    #[serde(default)]
    pub id: Option<String>,
    /// Id of the controlled elastic.
    pub elastic: String,
    /// Admissible offset magnitude.
    #[serde(default = "default_limit")]
    pub limit: f64,
    /// Maximum holding force.
    #[serde(default = "default_max_force")]
    pub max_force: f64,
    /// Maximum reel speed.
    #[serde(default = "default_max_speed")]
    pub max_speed: f64,
}

/// An antagonist controller couple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoupleDesc {
    /// Id UI collaborators use to reference this couple.
    #[serde(default)]
    pub id: Option<String>,
    /// Id of the extensor-side controller.
    pub extensor: String,
    /// Id of the flexor-side controller.
    pub flexor: String,
}

fn default_density() -> f64 {
    BodyDefaults::default().density
}

fn default_friction() -> f64 {
    BodyDefaults::default().friction
}

fn default_restitution() -> f64 {
    BodyDefaults::default().restitution
}

fn default_linear_damping() -> f64 {
    BodyDefaults::default().linear_damping
}

fn default_angular_damping() -> f64 {
    BodyDefaults::default().angular_damping
}

fn default_elastic_damping() -> f64 {
    1.0
}

fn default_limit() -> f64 {
    DEFAULT_LIMIT
}

fn default_max_force() -> f64 {
    DEFAULT_MAX_FORCE
}

fn default_max_speed() -> f64 {
    DEFAULT_MAX_SPEED
}
