//! Scene construction: string ids to typed handles.

use hashbrown::HashMap;
use myo_control::{CoupledTendonController, TendonController};
use myo_sim::Simulation;
use myo_tendon::{LoadElement, TendonElement};
use myo_types::{ControllerId, CoupleId, ElasticId, LoadId, SimulationConfig};
use myo_world::{
    BodyShape, BodySpec, MassOverride, Point2, RevoluteOpts, RigidBodyHandle,
};

use crate::desc::{BodyDesc, JointDesc, SceneDesc, ShapeDesc};
use crate::error::SceneError;
use crate::Result;

/// A scene resolved into a running simulation.
///
/// The maps translate the description's string ids into the handles and
/// registry ids of the simulation, for UI and rendering collaborators.
/// Entries without an id in the description are built but unnamed.
pub struct BuiltScene {
    /// The constructed simulation.
    pub simulation: Simulation,
    /// Body id to world handle.
    pub bodies: HashMap<String, RigidBodyHandle>,
    /// Elastic id to registry id.
    pub elastics: HashMap<String, ElasticId>,
    /// Load id to registry id.
    pub loads: HashMap<String, LoadId>,
    /// Controller id to registry id.
    pub controllers: HashMap<String, ControllerId>,
    /// Couple id to registry id.
    pub couples: HashMap<String, CoupleId>,
}

/// Build a simulation from a scene description.
///
/// Resolves every string reference through a symbol table built on the
/// fly; the table is dropped when this function returns. Construction is
/// all-or-nothing: the first undefined or duplicate id aborts with an
/// error and no partially built scene escapes.
pub fn build_scene(desc: &SceneDesc, config: SimulationConfig) -> Result<BuiltScene> {
    let mut simulation = Simulation::new(config)?;

    let mut bodies: HashMap<String, RigidBodyHandle> = HashMap::new();
    for body in &desc.bodies {
        let handle = simulation.world_mut().add_body(&body_spec(body));
        if let Some(id) = &body.id {
            if bodies.insert(id.clone(), handle).is_some() {
                return Err(SceneError::duplicate_id("body", id));
            }
        }
    }

    for (i, joint) in desc.joints.iter().enumerate() {
        let JointDesc::Revolute {
            body_a,
            body_b,
            anchor,
            limits,
            motor,
        } = joint;
        let context = format!("joint #{i}");
        let a = resolve_body(&bodies, body_a, &context)?;
        let b = resolve_body(&bodies, body_b, &context)?;

        let mut opts = RevoluteOpts::default();
        if let Some([lower, upper]) = limits {
            opts = opts.with_limits(*lower, *upper);
        }
        if let Some(motor) = motor {
            opts = opts.with_motor(motor.speed, motor.max_torque);
        }
        simulation
            .world_mut()
            .add_revolute_joint(a, b, point(*anchor), opts)?;
    }

    let mut elastics: HashMap<String, ElasticId> = HashMap::new();
    for elastic in &desc.elastics {
        let context = match &elastic.id {
            Some(id) => format!("elastic '{id}'"),
            None => "unnamed elastic".to_string(),
        };
        let a = resolve_body(&bodies, &elastic.body_a, &context)?;
        let b = resolve_body(&bodies, &elastic.body_b, &context)?;

        let mut element = TendonElement::new(
            simulation.world(),
            a,
            b,
            point(elastic.anchor_a),
            point(elastic.anchor_b),
            elastic.stiffness,
        )
        .with_damping(elastic.damping);
        if let Some(rest_length) = elastic.rest_length {
            element = element.with_rest_length(rest_length);
        }
        for contact in &elastic.contacts {
            let body = resolve_body(&bodies, &contact.body, &context)?;
            element.add_contact(simulation.world(), body, point(contact.point));
        }

        let elastic_id = simulation.add_tendon(element);
        if let Some(id) = &elastic.id {
            if elastics.insert(id.clone(), elastic_id).is_some() {
                return Err(SceneError::duplicate_id("elastic", id));
            }
        }
    }

    let mut loads: HashMap<String, LoadId> = HashMap::new();
    for load in &desc.loads {
        let context = match &load.id {
            Some(id) => format!("load '{id}'"),
            None => "unnamed load".to_string(),
        };
        let body = resolve_body(&bodies, &load.body, &context)?;
        let element = LoadElement::new(simulation.world(), body, point(load.anchor), load.max);
        let load_id = simulation.add_load(element);
        if let Some(id) = &load.id {
            if loads.insert(id.clone(), load_id).is_some() {
                return Err(SceneError::duplicate_id("load", id));
            }
        }
    }

    let mut controllers: HashMap<String, ControllerId> = HashMap::new();
    for controller in &desc.controllers {
        let context = match &controller.id {
            Some(id) => format!("controller '{id}'"),
            None => "unnamed controller".to_string(),
        };
        let elastic_id = *elastics
            .get(&controller.elastic)
            .ok_or_else(|| SceneError::undefined_elastic(&controller.elastic, &context))?;
        let element = simulation
            .tendon(elastic_id)
            .ok_or(myo_types::SimError::UnknownElastic(elastic_id.raw()))?;

        let mut built = TendonController::new(elastic_id, element)
            .with_limit(controller.limit)
            .with_max_force(controller.max_force)
            .with_max_speed(controller.max_speed);
        if let Some(id) = &controller.id {
            built = built.with_name(id.clone());
        }

        let controller_id = simulation.add_controller(built)?;
        if let Some(id) = &controller.id {
            if controllers.insert(id.clone(), controller_id).is_some() {
                return Err(SceneError::duplicate_id("controller", id));
            }
        }
    }

    let mut couples: HashMap<String, CoupleId> = HashMap::new();
    for couple in &desc.couples {
        let context = match &couple.id {
            Some(id) => format!("couple '{id}'"),
            None => "unnamed couple".to_string(),
        };
        let extensor = *controllers
            .get(&couple.extensor)
            .ok_or_else(|| SceneError::undefined_controller(&couple.extensor, &context))?;
        let flexor = *controllers
            .get(&couple.flexor)
            .ok_or_else(|| SceneError::undefined_controller(&couple.flexor, &context))?;

        let couple_id = simulation.add_couple(CoupledTendonController::new(extensor, flexor))?;
        if let Some(id) = &couple.id {
            if couples.insert(id.clone(), couple_id).is_some() {
                return Err(SceneError::duplicate_id("couple", id));
            }
        }
    }

    tracing::info!(
        bodies = desc.bodies.len(),
        joints = desc.joints.len(),
        elastics = desc.elastics.len(),
        loads = desc.loads.len(),
        controllers = desc.controllers.len(),
        couples = desc.couples.len(),
        "scene built"
    );

    Ok(BuiltScene {
        simulation,
        bodies,
        elastics,
        loads,
        controllers,
        couples,
    })
}

fn resolve_body(
    bodies: &HashMap<String, RigidBodyHandle>,
    id: &str,
    context: &str,
) -> Result<RigidBodyHandle> {
    bodies
        .get(id)
        .copied()
        .ok_or_else(|| SceneError::undefined_body(id, context))
}

fn body_spec(body: &BodyDesc) -> BodySpec {
    let shape = match body.shape {
        ShapeDesc::Box {
            half_width,
            half_height,
        } => BodyShape::Box {
            half_width,
            half_height,
        },
        ShapeDesc::Circle { radius } => BodyShape::Circle { radius },
    };

    let mut spec = BodySpec::new(shape, point(body.position))
        .with_density(body.density)
        .with_friction(body.friction)
        .with_restitution(body.restitution)
        .with_damping(body.linear_damping, body.angular_damping);
    if body.is_static {
        spec = spec.fixed();
    }
    if let Some(mass) = body.mass {
        spec = spec.with_mass_override(MassOverride {
            mass,
            center_of_mass: point(body.center_of_mass.unwrap_or([0.0, 0.0])),
            angular_inertia: body.angular_inertia.unwrap_or(0.0),
        });
    }
    spec
}

fn point(p: [f64; 2]) -> Point2<f64> {
    Point2::new(p[0], p[1])
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::load_scene_str;

    #[test]
    fn test_undefined_body_reference() {
        let yaml = r"
bodies:
  - id: ground
    shape: { type: box, half_width: 1.0, half_height: 1.0 }
    position: [0.0, 0.0]
    static: true
elastics:
  - body_a: ground
    body_b: missing
    anchor_a: [0.0, 0.0]
    anchor_b: [1.0, 0.0]
    stiffness: 100.0
";
        let desc = load_scene_str(yaml).expect("parses");
        let err = build_scene(&desc, SimulationConfig::default());
        assert!(matches!(err, Err(SceneError::UndefinedBody { .. })));
    }

    #[test]
    fn test_duplicate_body_id() {
        let yaml = r"
bodies:
  - id: ground
    shape: { type: box, half_width: 1.0, half_height: 1.0 }
    position: [0.0, 0.0]
  - id: ground
    shape: { type: circle, radius: 0.5 }
    position: [2.0, 0.0]
";
        let desc = load_scene_str(yaml).expect("parses");
        let err = build_scene(&desc, SimulationConfig::default());
        assert!(matches!(err, Err(SceneError::DuplicateId { kind: "body", .. })));
    }

    #[test]
    fn test_undefined_controller_in_couple() {
        let yaml = r"
couples:
  - extensor: nope
    flexor: nope
";
        let desc = load_scene_str(yaml).expect("parses");
        let err = build_scene(&desc, SimulationConfig::default());
        assert!(matches!(err, Err(SceneError::UndefinedController { .. })));
    }
}
