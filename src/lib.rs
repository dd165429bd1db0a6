// Re-export all public modules so they can be used from main.rs
pub mod frame_loop;
pub mod logging;
pub mod utils;

// MVC Architecture
pub mod controller;
pub mod model;

pub use controller::{
    InputEvent, InputHandler, InputSample, InputState, KeyBindings, PhysicsWorld, StepTelemetry,
    VehicleController, VehicleTuning,
};
pub use frame_loop::{FrameLoop, FIXED_DT};
pub use model::{ChaseCamera, GroundHit, GroundProbe, RigidBody, Scene};
