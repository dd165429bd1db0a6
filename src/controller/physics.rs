use glam::{Quat, Vec3};
use tracing::debug;

use crate::model::body::RigidBody;
use crate::model::scene::{GroundProbe, ARENA_HALF_EXTENT};

/// Minimal rigid-body stepper standing in for a full physics engine.
///
/// Semi-implicit Euler with an isotropic inverse-inertia fallback for
/// rotation. Ground contact reuses the same downward probe as the vehicle
/// controller and simply holds the body at ride height. Gravity is injected
/// here, never read from ambient state.
pub struct PhysicsWorld {
    pub gravity: Vec3,
    /// Distance the body center rides above the contact surface.
    pub ride_height: f32,
    /// The ground hold casts from this far above the body center so a fast
    /// fall cannot step the center past the surface between probes.
    pub ground_cast_lift: f32,
    pub bounds_half_extent: f32,

    /// Forces below this are discarded while the body sleeps, so the resting
    /// downforce and settle force do not keep it awake.
    pub wake_force: f32,
    rest_linear_eps: f32,
    rest_angular_eps: f32,
    rest_steps_to_sleep: u32,
    rest_steps: u32,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity,
            ride_height: 0.5,
            ground_cast_lift: 2.0,
            bounds_half_extent: ARENA_HALF_EXTENT - 2.0,
            wake_force: 2_000.0,
            rest_linear_eps: 0.05,
            rest_angular_eps: 0.05,
            rest_steps_to_sleep: 25,
            rest_steps: 0,
        }
    }

    pub fn step(&mut self, body: &mut RigidBody, probe: &dyn GroundProbe, dt: f32) {
        if body.is_sleeping() {
            if body.force.length() > self.wake_force || body.torque.length() > self.wake_force {
                body.wake();
                self.rest_steps = 0;
            } else {
                body.force = Vec3::ZERO;
                body.torque = Vec3::ZERO;
                return;
            }
        }

        let inv_mass = 1.0 / body.mass;

        // Gravity acts at the center of mass; with the offset below the body
        // origin a rolled body gets a pendulum righting torque
        let com = body.orientation * body.center_of_mass;
        if com.length_squared() > 1e-9 {
            body.torque += com.cross(self.gravity * body.mass);
        }

        // Velocities first, then pose
        body.linear_velocity += (body.force * inv_mass + self.gravity) * dt;
        body.angular_velocity += body.torque * inv_mass * dt;

        body.position += body.linear_velocity * dt;
        if body.angular_velocity.length_squared() > 1e-12 {
            let delta = Quat::from_scaled_axis(body.angular_velocity * dt);
            body.orientation = (delta * body.orientation).normalize();
        }

        self.resolve_ground(body, probe);
        self.clamp_to_bounds(body);
        self.update_rest(body);

        body.force = Vec3::ZERO;
        body.torque = Vec3::ZERO;
    }

    /// Hold the body at ride height over whatever the probe finds. The cast
    /// starts above the center so one fast step below the surface still hits.
    fn resolve_ground(&self, body: &mut RigidBody, probe: &dyn GroundProbe) {
        let hold = self.ground_cast_lift + self.ride_height;
        let origin = body.position + Vec3::Y * self.ground_cast_lift;
        let Some(hit) = probe.cast_down(origin, hold) else {
            return;
        };
        if hit.distance < hold {
            body.position.y += hold - hit.distance;
            if body.linear_velocity.y < 0.0 {
                body.linear_velocity.y = 0.0;
            }
        }
    }

    fn clamp_to_bounds(&self, body: &mut RigidBody) {
        let half = self.bounds_half_extent;
        for axis in [0, 2] {
            if body.position[axis].abs() > half {
                body.position[axis] = body.position[axis].clamp(-half, half);
                body.linear_velocity[axis] = 0.0;
            }
        }
    }

    fn update_rest(&mut self, body: &mut RigidBody) {
        let at_rest = body.linear_velocity.length() < self.rest_linear_eps
            && body.angular_velocity.length() < self.rest_angular_eps;
        if at_rest {
            self.rest_steps += 1;
            if self.rest_steps >= self.rest_steps_to_sleep {
                debug!(position = ?body.position, "body went to sleep");
                body.sleep();
            }
        } else {
            self.rest_steps = 0;
        }
    }
}
