//! Headless run of the demonstration arm scene.
//!
//! Builds the two-segment arm, hangs a load on the forearm, flexes the
//! elbow couple, and prints tendon state while the simulation settles.

use myo_scene::{build_scene, demo};
use myo_types::SimulationConfig;
use myo_world::Vector2;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let scene = demo::arm_scene();
    let mut built = build_scene(&scene, SimulationConfig::default())?;

    let load = built.loads["arm_load"];
    let elbow = built.couples["elbow"];
    let b1 = built.elastics["b1"];
    let b2 = built.elastics["b2"];

    // 150 N hanging from the forearm tip, elbow flexed halfway.
    built
        .simulation
        .load_mut(load)
        .ok_or("missing load")?
        .set_force(Vector2::new(0.0, -150.0));
    built.simulation.set_couple_target(elbow, 0.5)?;

    let dt = built.simulation.config().timestep();
    for frame in 0..400 {
        built.simulation.tick()?;

        if frame % 100 == 0 {
            let sim = &built.simulation;
            let f1 = sim.tendon(b1).ok_or("missing tendon")?.internal_force(sim.world(), dt);
            let f2 = sim.tendon(b2).ok_or("missing tendon")?.internal_force(sim.world(), dt);
            println!(
                "frame {frame:4}  elbow tendons: {f1:8.1} N / {f2:8.1} N  kinetic energy: {:.3} J",
                sim.world().total_kinetic_energy()
            );
        }
    }

    Ok(())
}
