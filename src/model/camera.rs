use glam::{Mat4, Quat, Vec3};

use crate::utils::{angle_delta, smooth_damp, smooth_damp_vec3};

/// Third-person chase camera.
///
/// Follows a target from a fixed local offset behind and above, turning with
/// the target's yaw but ignoring its pitch and roll so ramps and crashes do
/// not throw the view around. Position and heading are smoothed separately;
/// heading lags slightly more so quick flicks of the vehicle read as motion
/// rather than a camera cut.
pub struct ChaseCamera {
    pub eye: Vec3,
    /// Follow offset in the target's yaw frame.
    pub offset: Vec3,
    /// Extra downward look angle onto the target, radians.
    pub pitch: f32,
    /// Smoothed follow heading, radians about world Y.
    heading: f32,
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,

    position_velocity: Vec3,
    heading_velocity: f32,
    /// Smoothing times for position and heading, seconds.
    pub position_smooth: f32,
    pub heading_smooth: f32,
}

impl ChaseCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            eye: Vec3::new(0.0, 4.0, -6.0),
            offset: Vec3::new(0.0, 4.0, -6.0),
            pitch: 12f32.to_radians(),
            heading: 0.0,
            fov_y: 60f32.to_radians(),
            aspect: width as f32 / height as f32,
            z_near: 0.1,
            z_far: 1000.0,
            position_velocity: Vec3::ZERO,
            heading_velocity: 0.0,
            position_smooth: 0.05,
            heading_smooth: 0.1,
        }
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    /// Runs after all fixed steps of a frame so it sees final positions.
    pub fn follow(&mut self, target_position: Vec3, target_orientation: Quat, dt: f32) {
        // Yaw only: project the target's forward onto the ground plane
        let fwd = target_orientation * Vec3::Z;
        let flat = Vec3::new(fwd.x, 0.0, fwd.z);
        if flat.length_squared() > 1e-6 {
            let target_heading = flat.x.atan2(flat.z);
            let delta = angle_delta(self.heading, target_heading);
            self.heading += smooth_damp(
                0.0,
                delta,
                &mut self.heading_velocity,
                self.heading_smooth,
                dt,
            );
        }

        let rotated_offset = Quat::from_rotation_y(self.heading) * self.offset;
        let mut desired = target_position + rotated_offset;

        // Keep a sane view if the target falls out of the world
        if target_position.y < -10.0 {
            desired.y = 5.0;
        }
        desired.y = desired.y.max(0.5);

        self.eye = smooth_damp_vec3(
            self.eye,
            desired,
            &mut self.position_velocity,
            self.position_smooth,
            dt,
        );
    }

    fn look_target(&self) -> Vec3 {
        let ahead = Quat::from_rotation_y(self.heading) * Vec3::Z;
        let down = -self.pitch.tan();
        self.eye + ahead + Vec3::new(0.0, down, 0.0)
    }

    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.look_target(), Vec3::Y);
        let proj = Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far);
        proj * view
    }

    /// Teleports behind the target with no smoothing lag. Used on reset.
    pub fn snap_to(&mut self, target_position: Vec3, target_orientation: Quat) {
        let fwd = target_orientation * Vec3::Z;
        let flat = Vec3::new(fwd.x, 0.0, fwd.z);
        self.heading = if flat.length_squared() > 1e-6 {
            flat.x.atan2(flat.z)
        } else {
            0.0
        };
        self.eye = target_position + Quat::from_rotation_y(self.heading) * self.offset;
        self.position_velocity = Vec3::ZERO;
        self.heading_velocity = 0.0;
    }
}
