// MODEL: Simulation state and data
pub mod body;
pub mod camera;
pub mod scene;

pub use body::RigidBody;
pub use camera::ChaseCamera;
pub use scene::{GroundHit, GroundProbe, Prop, Scene, Shape};
