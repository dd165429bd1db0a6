use glam::{Quat, Vec3};

/// Rigid body driven by the physics world.
///
/// The vehicle controller only appends to the force/torque accumulators (or
/// applies its documented direct-velocity heuristics); integration and
/// collision are the physics world's job. A full state overwrite happens only
/// through [`RigidBody::reset`].
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub position: Vec3,
    pub orientation: Quat,
    pub linear_velocity: Vec3,
    pub angular_velocity: Vec3,
    pub mass: f32,
    /// Local-space center of mass offset (kept low for stability).
    pub center_of_mass: Vec3,

    // Accumulated this step, cleared by integration
    pub force: Vec3,
    pub torque: Vec3,

    sleeping: bool,
}

impl RigidBody {
    pub fn new(position: Vec3, mass: f32) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass,
            center_of_mass: Vec3::ZERO,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
            sleeping: false,
        }
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::Z
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.orientation * Vec3::Y
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.orientation * Vec3::X
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.linear_velocity.length()
    }

    /// Continuous force in Newtons, accumulated for this step.
    #[inline]
    pub fn add_force(&mut self, force: Vec3) {
        self.force += force;
    }

    /// World-space torque, accumulated for this step.
    #[inline]
    pub fn add_torque(&mut self, torque: Vec3) {
        self.torque += torque;
    }

    #[inline]
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    pub fn wake(&mut self) {
        self.sleeping = false;
    }

    pub fn sleep(&mut self) {
        self.sleeping = true;
        self.linear_velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
    }

    /// Recovery from stuck/flipped states: identity orientation, zero
    /// velocities, optional reposition. Externally triggered only.
    pub fn reset(&mut self, position: Option<Vec3>) {
        self.orientation = Quat::IDENTITY;
        self.linear_velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
        self.force = Vec3::ZERO;
        self.torque = Vec3::ZERO;
        self.sleeping = false;
        if let Some(position) = position {
            self.position = position;
        }
    }
}
