//! Built-in demonstration scenes.

use std::f64::consts::PI;

use crate::desc::{
    BodyDesc, ContactDesc, ControllerDesc, CoupleDesc, ElasticDesc, JointDesc, LoadDesc,
    SceneDesc, ShapeDesc,
};

fn body(id: &str, shape: ShapeDesc, position: [f64; 2]) -> BodyDesc {
    BodyDesc {
        id: Some(id.to_string()),
        shape,
        position,
        is_static: false,
        density: 1.0,
        friction: 0.4,
        restitution: 0.1,
        linear_damping: 0.005,
        angular_damping: 0.04,
        mass: None,
        center_of_mass: None,
        angular_inertia: None,
        label: None,
    }
}

fn fixed(id: &str, shape: ShapeDesc, position: [f64; 2]) -> BodyDesc {
    BodyDesc {
        is_static: true,
        ..body(id, shape, position)
    }
}

fn rect(half_width: f64, half_height: f64) -> ShapeDesc {
    ShapeDesc::Box {
        half_width,
        half_height,
    }
}

/// A two-segment elastic-supported arm.
///
/// The upper arm pivots on the ground on a limited hinge, the forearm on
/// the upper arm. Each segment is held by an antagonist pair of tendons
/// (stiffness 400) routed through contact points, driven by two coupled
/// controllers. A load element hangs on the forearm tip, and a slack rope
/// strung between two poles over a loose ball demonstrates routing
/// through a dynamic body.
#[must_use]
pub fn arm_scene() -> SceneDesc {
    let arm_k = 400.0;

    let bodies = vec![
        fixed("ground", rect(10.0, 3.0), [0.0, -4.0]),
        fixed("left_wall", rect(1.0, 10.0), [-10.0, 5.0]),
        fixed("right_wall", rect(1.0, 10.0), [10.0, 5.0]),
        BodyDesc {
            label: Some("A".to_string()),
            ..body("upper_arm", rect(0.2, 1.5), [0.0, 1.5])
        },
        BodyDesc {
            label: Some("B".to_string()),
            ..body("forearm", rect(2.0, 0.1), [1.0, 3.0])
        },
        fixed("left_pole", rect(0.2, 0.2), [-3.0, 7.0]),
        fixed("right_pole", rect(0.2, 0.2), [1.0, 5.0]),
        body("ball", ShapeDesc::Circle { radius: 0.2 }, [0.0, 4.85]),
    ];

    let joints = vec![
        JointDesc::Revolute {
            body_a: "ground".to_string(),
            body_b: "upper_arm".to_string(),
            anchor: [0.0, 0.0],
            limits: Some([-0.3 * PI, 0.2 * PI]),
            motor: None,
        },
        JointDesc::Revolute {
            body_a: "upper_arm".to_string(),
            body_b: "forearm".to_string(),
            anchor: [0.0, 3.0],
            limits: Some([-0.4 * PI, 0.1 * PI]),
            motor: None,
        },
    ];

    let elastics = vec![
        // Upper arm pair, anchored on the ground and routed around the
        // hinge through ground contacts.
        ElasticDesc {
            id: Some("a1".to_string()),
            body_a: "ground".to_string(),
            body_b: "upper_arm".to_string(),
            anchor_a: [0.0, -1.0],
            anchor_b: [-1.0, 0.0],
            stiffness: arm_k,
            damping: 1.0,
            rest_length: None,
            contacts: vec![ContactDesc {
                body: "ground".to_string(),
                point: [-0.6, -0.7],
            }],
        },
        ElasticDesc {
            id: Some("a2".to_string()),
            body_a: "ground".to_string(),
            body_b: "upper_arm".to_string(),
            anchor_a: [0.0, -1.0],
            anchor_b: [1.0, 0.0],
            stiffness: arm_k,
            damping: 1.0,
            rest_length: None,
            contacts: vec![ContactDesc {
                body: "ground".to_string(),
                point: [0.6, -0.7],
            }],
        },
        // Forearm pair, routed over the upper arm.
        ElasticDesc {
            id: Some("b1".to_string()),
            body_a: "ground".to_string(),
            body_b: "forearm".to_string(),
            anchor_a: [-1.0, -1.0],
            anchor_b: [-0.6, 3.0],
            stiffness: arm_k,
            damping: 1.0,
            rest_length: None,
            contacts: vec![ContactDesc {
                body: "upper_arm".to_string(),
                point: [-0.6, 0.5],
            }],
        },
        ElasticDesc {
            id: Some("b2".to_string()),
            body_a: "ground".to_string(),
            body_b: "forearm".to_string(),
            anchor_a: [1.0, -1.0],
            anchor_b: [0.6, 3.0],
            stiffness: arm_k,
            damping: 1.0,
            rest_length: None,
            contacts: vec![ContactDesc {
                body: "upper_arm".to_string(),
                point: [0.6, 0.5],
            }],
        },
        // Slack rope over the ball.
        ElasticDesc {
            id: Some("rope".to_string()),
            body_a: "left_pole".to_string(),
            body_b: "right_pole".to_string(),
            anchor_a: [-3.0, 7.0],
            anchor_b: [1.0, 5.0],
            stiffness: 1.0,
            damping: 1.0,
            rest_length: None,
            contacts: vec![ContactDesc {
                body: "ball".to_string(),
                point: [0.0, 5.0],
            }],
        },
    ];

    let loads = vec![LoadDesc {
        id: Some("arm_load".to_string()),
        body: "forearm".to_string(),
        anchor: [3.0, 3.0],
        max: 300.0,
    }];

    let controllers = ["a1", "a2", "b1", "b2"]
        .iter()
        .map(|elastic| ControllerDesc {
            id: Some(format!("c_{elastic}")),
            elastic: (*elastic).to_string(),
            limit: 1.0,
            max_force: 5000.0,
            max_speed: 50.0,
        })
        .collect();

    let couples = vec![
        CoupleDesc {
            id: Some("shoulder".to_string()),
            extensor: "c_a1".to_string(),
            flexor: "c_a2".to_string(),
        },
        CoupleDesc {
            id: Some("elbow".to_string()),
            extensor: "c_b1".to_string(),
            flexor: "c_b2".to_string(),
        },
    ];

    SceneDesc {
        bodies,
        joints,
        elastics,
        loads,
        controllers,
        couples,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_scene_is_well_formed() {
        let scene = arm_scene();
        assert_eq!(scene.bodies.len(), 8);
        assert_eq!(scene.joints.len(), 2);
        assert_eq!(scene.elastics.len(), 5);
        assert_eq!(scene.controllers.len(), 4);
        assert_eq!(scene.couples.len(), 2);
    }
}
