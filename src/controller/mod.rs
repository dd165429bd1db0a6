// CONTROLLER: Input, vehicle control loop, physics stepping, telemetry
pub mod input;
pub mod physics;
pub mod telemetry;
pub mod tuning;
pub mod vehicle;

pub use input::{InputEvent, InputHandler, InputSample, InputState, KeyBindings};
pub use physics::PhysicsWorld;
pub use telemetry::StepTelemetry;
pub use tuning::VehicleTuning;
pub use vehicle::VehicleController;
