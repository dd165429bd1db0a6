use serde::{Deserialize, Serialize};

/// Every threshold and magnitude of the arcade control loop, in one place.
///
/// These are feel-tuned policy numbers, not derived from a dynamics model;
/// some bands deliberately overlap (ramp detection 10-45 degrees vs tilt
/// correction tiers at 10/30 degrees). Load overrides from JSON to experiment:
///
///   let mut tuning = VehicleTuning::default();
///   tuning.steer_speed_deg = 240.0;
///   // or: VehicleTuning::from_json_str(&fs::read_to_string(path)?)?
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleTuning {
    // Drive
    /// Forward motor force, N. Sized for a 300 kg body under 20 m/s^2 gravity.
    pub acceleration_force: f32,
    /// Reverse motor force, N.
    pub reverse_force: f32,
    /// Speed cap above which the motor stops adding force, m/s.
    pub max_speed: f32,
    /// Direct steering rate, degrees per second at full authority.
    pub steer_speed_deg: f32,
    /// Braking force at full brake input, N.
    pub brake_force: f32,
    /// Braking needs at least this much speed to have a direction, m/s.
    pub brake_min_speed: f32,

    // Input gating
    /// Motor/steer/brake inputs below this are treated as zero.
    pub input_deadzone: f32,
    /// dot(body up, world up) below this counts as upside-down: motor cut.
    pub upside_down_dot: f32,

    // Steering shape
    /// Steering needs at least this much speed, m/s.
    pub steer_min_speed: f32,
    /// Speed at which steering authority saturates, m/s.
    pub steer_full_authority_speed: f32,

    // Grounding
    /// Downward probe ray length, m.
    pub ground_ray_length: f32,
    /// Probe origin is lifted this far above body center, m.
    pub ground_ray_lift: f32,

    // Stability heuristics
    /// Lateral slip above this triggers the traction force, m/s.
    pub traction_slip_threshold: f32,
    /// Traction scale; applied force is traction * 3000 N against the slide.
    pub traction: f32,
    /// Minimum speed for lateral traction to engage, m/s.
    pub traction_min_speed: f32,
    /// Landing settle force, N, when low and nearly vertical-still.
    pub landing_force: f32,
    /// Probe distance below which landing settle can fire, m.
    pub landing_height: f32,
    /// |vertical velocity| band for landing settle, m/s.
    pub landing_settle_band: f32,

    // Damping
    /// Velocity multiplier per step while grounded and slow.
    pub slow_drag: f32,
    /// Speed under which the aggressive slow drag applies, m/s.
    pub slow_speed_threshold: f32,
    /// Velocity multiplier per step otherwise; near 1 to preserve ramp momentum.
    pub drag_coefficient: f32,
    /// Constant downward force every step, N.
    pub downforce: f32,

    // Tilt correction
    /// Angular velocity multiplier per grounded step.
    pub grounded_angular_damp: f32,
    /// Roll beyond this gets a gentle corrective torque, degrees.
    pub tilt_gentle_deg: f32,
    /// Roll beyond this gets the strong tier, degrees.
    pub tilt_strong_deg: f32,
    pub tilt_torque_gentle: f32,
    pub tilt_torque_strong: f32,
    /// Airborne roll rate multiplier per step.
    pub air_roll_damp: f32,
    /// Airborne pitch rate multiplier per step.
    pub air_pitch_damp: f32,
    /// Airborne roll beyond this gets an upward righting force, degrees.
    pub air_righting_roll_deg: f32,
    /// The righting force itself, N.
    pub air_righting_force: f32,

    // Ramp anti-faceplant
    /// Slope band (from vertical) that counts as a ramp, degrees.
    pub ramp_slope_min_deg: f32,
    pub ramp_slope_max_deg: f32,
    /// Minimum speed for the ramp assist, m/s.
    pub ramp_min_speed: f32,
    /// Forward push while cresting, N.
    pub ramp_assist_force: f32,
    /// Downward velocity is clamped to at least this while cresting, m/s.
    pub ramp_max_sink_rate: f32,
}

impl Default for VehicleTuning {
    fn default() -> Self {
        Self {
            acceleration_force: 45_000.0,
            reverse_force: 25_000.0,
            max_speed: 40.0,
            steer_speed_deg: 200.0,
            brake_force: 30_000.0,
            brake_min_speed: 0.1,

            input_deadzone: 0.1,
            upside_down_dot: 0.3,

            steer_min_speed: 0.5,
            steer_full_authority_speed: 15.0,

            ground_ray_length: 2.0,
            ground_ray_lift: 0.1,

            traction_slip_threshold: 0.5,
            traction: 1.0,
            traction_min_speed: 1.0,
            landing_force: 1_000.0,
            landing_height: 1.5,
            landing_settle_band: 0.5,

            slow_drag: 0.8,
            slow_speed_threshold: 2.0,
            drag_coefficient: 0.99,
            downforce: 20.0,

            grounded_angular_damp: 0.85,
            tilt_gentle_deg: 10.0,
            tilt_strong_deg: 30.0,
            tilt_torque_gentle: 3_000.0,
            tilt_torque_strong: 8_000.0,
            air_roll_damp: 0.7,
            air_pitch_damp: 0.95,
            air_righting_roll_deg: 45.0,
            air_righting_force: 4_000.0,

            ramp_slope_min_deg: 10.0,
            ramp_slope_max_deg: 45.0,
            ramp_min_speed: 5.0,
            ramp_assist_force: 2_000.0,
            ramp_max_sink_rate: -2.0,
        }
    }
}

impl VehicleTuning {
    /// Parses tuning overrides from JSON. Missing fields keep their defaults.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}
