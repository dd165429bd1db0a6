use glam::Vec3;
use tracing::info;

use crate::controller::{
    InputEvent, InputHandler, InputState, KeyBindings, PhysicsWorld, StepTelemetry, VehicleController,
    VehicleTuning,
};
use crate::model::body::RigidBody;
use crate::model::camera::ChaseCamera;
use crate::model::scene::{Scene, GRAVITY, SPAWN_POSITION};

/// The ATV body is 2 x 1 x 3 units and weighs 300 kg.
const VEHICLE_MASS: f32 = 300.0;

/// Fixed physics timestep, 50 Hz.
pub const FIXED_DT: f32 = 1.0 / 50.0;

/// Telemetry flush interval in simulated seconds.
const TELEMETRY_INTERVAL: f32 = 1.0;

/// Main simulation loop state and update logic.
///
/// Owns the whole headless sim: scene, vehicle body, input smoothing, control
/// loop, physics stepper, chase camera, and telemetry. `advance` consumes
/// variable wall-clock frames and runs fixed steps off an accumulator; the
/// camera updates once per frame after all fixed steps so it sees final poses.
pub struct FrameLoop {
    pub scene: Scene,
    pub body: RigidBody,
    pub input_state: InputState,
    pub input_handler: InputHandler,
    pub controller: VehicleController,
    pub physics: PhysicsWorld,
    pub camera: ChaseCamera,
    pub telemetry: StepTelemetry,

    accumulator: f32,
    sim_time: f32,
    last_flush: f32,
}

impl FrameLoop {
    pub fn new(scene: Scene, tuning: VehicleTuning) -> Self {
        let body = {
            let mut b = RigidBody::new(SPAWN_POSITION, VEHICLE_MASS);
            // Low center of mass keeps the arcade heuristics believable
            b.center_of_mass = Vec3::new(0.0, -0.3, 0.0);
            b
        };
        let mut camera = ChaseCamera::new(1280, 720);
        camera.snap_to(body.position, body.orientation);

        Self {
            scene,
            body,
            input_state: InputState::new(),
            input_handler: InputHandler::new(KeyBindings::default()),
            controller: VehicleController::new(tuning),
            physics: PhysicsWorld::new(GRAVITY),
            camera,
            telemetry: StepTelemetry::new(),
            accumulator: 0.0,
            sim_time: 0.0,
            last_flush: 0.0,
        }
    }

    pub fn sim_time(&self) -> f32 {
        self.sim_time
    }

    pub fn handle_event(&mut self, event: &InputEvent) {
        self.input_state.process_event(event);
    }

    /// Advance by one wall-clock frame.
    pub fn advance(&mut self, frame_dt: f32) {
        // Cap so a stall does not trigger a spiral of fixed steps
        self.accumulator += frame_dt.clamp(0.0, 0.25);

        self.input_handler.read_keys(&self.input_state);
        if self.input_handler.wants_reset(&self.input_state) {
            self.reset();
        }

        while self.accumulator >= FIXED_DT {
            self.accumulator -= FIXED_DT;
            self.fixed_step();
        }

        self.camera
            .follow(self.body.position, self.body.orientation, frame_dt);
    }

    fn fixed_step(&mut self) {
        let input = self.input_handler.sample(FIXED_DT);
        self.controller.fixed_step(
            &mut self.body,
            input,
            &self.scene,
            FIXED_DT,
            &mut self.telemetry,
        );
        self.physics.step(&mut self.body, &self.scene, FIXED_DT);
        self.sim_time += FIXED_DT;

        if self.sim_time - self.last_flush >= TELEMETRY_INTERVAL {
            self.last_flush = self.sim_time;
            self.telemetry.flush(self.sim_time);
        }
    }

    /// Put the vehicle back at spawn, upright and at rest, camera snapped.
    pub fn reset(&mut self) {
        info!(position = ?self.body.position, "vehicle reset");
        self.body.reset(Some(SPAWN_POSITION));
        self.camera.snap_to(self.body.position, self.body.orientation);
    }
}
