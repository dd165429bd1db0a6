use anyhow::{ensure, Context, Result};
use tracing::info;

use atveria::frame_loop::{FrameLoop, FIXED_DT};
use atveria::logging;
use atveria::model::Scene;
use atveria::InputEvent;
use atveria::VehicleTuning;

/// Headless demo drive: builds the test arena and runs a scripted 30 second
/// session through the same loop an interactive frontend would drive.
fn main() -> Result<()> {
    logging::init();

    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading tuning file {path}"))?;
            VehicleTuning::from_json_str(&text)
                .with_context(|| format!("parsing tuning file {path}"))?
        }
        None => VehicleTuning::default(),
    };

    let scene = Scene::build_test_arena();
    ensure!(
        scene.props.iter().any(|p| p.name == "ground"),
        "arena has no ground plane"
    );

    let mut sim = FrameLoop::new(scene, tuning);
    info!("starting scripted drive");

    // (sim seconds, keys pressed during that window)
    let script: &[(f32, &[&str])] = &[
        (3.0, &["w"]),           // pull away
        (3.0, &["w", "d"]),      // sweep right
        (2.0, &["w", "a"]),      // sweep left
        (4.0, &["w"]),           // straight run at the ramps
        (2.0, &[" "]),           // brake to a stop
        (3.0, &["s"]),           // back up
        (1.0, &["r"]),           // reset to spawn
        (6.0, &["w"]),           // second run
        (6.0, &[]),              // coast and settle
    ];

    for (duration, keys) in script {
        for key in *keys {
            sim.handle_event(&InputEvent::KeyDown(key.to_string()));
        }
        let steps = (duration / FIXED_DT).round() as u32;
        for _ in 0..steps {
            sim.advance(FIXED_DT);
        }
        for key in *keys {
            sim.handle_event(&InputEvent::KeyUp(key.to_string()));
        }
    }

    info!(
        sim_time = sim.sim_time(),
        position = ?sim.body.position,
        speed = sim.body.speed(),
        sleeping = sim.body.is_sleeping(),
        camera = ?sim.camera.eye,
        "scripted drive finished"
    );
    Ok(())
}
