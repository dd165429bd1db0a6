use glam::{Quat, Vec3};

use crate::controller::telemetry::StepTelemetry;
use crate::controller::tuning::VehicleTuning;
use crate::model::body::RigidBody;
use crate::model::scene::GroundProbe;

/// Arcade vehicle control loop, run once per fixed physics step.
///
/// Stability here is manufactured, not modeled: a stack of small corrective
/// heuristics (traction, landing settle, tilt tiers, ramp assist) each fires
/// behind its own threshold from [`VehicleTuning`]. The loop only appends to
/// the body's force/torque accumulators, except for the documented
/// direct-velocity damping and the ramp sink-rate clamp.
pub struct VehicleController {
    pub tuning: VehicleTuning,
}

impl VehicleController {
    pub fn new(tuning: VehicleTuning) -> Self {
        Self { tuning }
    }

    /// Steering authority ramps with speed and saturates at 1.
    pub fn steer_authority(&self, speed: f32) -> f32 {
        (speed / self.tuning.steer_full_authority_speed).clamp(0.0, 1.0)
    }

    pub fn fixed_step(
        &self,
        body: &mut RigidBody,
        input: crate::controller::input::InputSample,
        probe: &dyn GroundProbe,
        dt: f32,
        telemetry: &mut StepTelemetry,
    ) {
        let t = &self.tuning;
        telemetry.steps += 1;

        // 1. Ground check, recomputed fresh every step
        let ray_origin = body.position + Vec3::Y * t.ground_ray_lift;
        let hit = probe.cast_down(ray_origin, t.ground_ray_length);
        let grounded = hit.is_some();
        if !grounded {
            telemetry.airborne_steps += 1;
        }

        // 2. Orientation guard
        let upside_down = body.up().dot(Vec3::Y) < t.upside_down_dot;
        if upside_down {
            telemetry.upside_down_steps += 1;
        }

        let speed = body.speed();
        telemetry.record_speed(speed);
        let forward = body.forward();

        // 3. Motor force
        if input.motor.abs() > t.input_deadzone && speed < t.max_speed && !upside_down {
            body.wake();
            telemetry.motor_steps += 1;
            if input.motor > 0.0 {
                body.add_force(forward * input.motor * t.acceleration_force);
            } else {
                // Reverse along the ground-projected backward axis so a tilted
                // body backs up level instead of digging in
                let flat_back = Vec3::new(-forward.x, 0.0, -forward.z);
                if flat_back.length_squared() > 1e-6 {
                    body.add_force(flat_back.normalize() * input.motor.abs() * t.reverse_force);
                }
            }
        }

        // 4. Steering: direct rotation, never torque. Grounded only, scales
        // with speed, sign flips in reverse so it stays car-like.
        if grounded && speed > t.steer_min_speed && input.steer.abs() > t.input_deadzone {
            telemetry.steer_steps += 1;
            let reverse_sign = if body.linear_velocity.dot(forward) < 0.0 {
                -1.0
            } else {
                1.0
            };
            let delta = input.steer
                * t.steer_speed_deg.to_radians()
                * dt
                * self.steer_authority(speed)
                * reverse_sign;
            body.orientation = (body.orientation * Quat::from_rotation_y(delta)).normalize();
        }

        // 5. Braking
        if grounded && input.brake > t.input_deadzone && speed > t.brake_min_speed {
            telemetry.brake_steps += 1;
            let against = -body.linear_velocity / speed;
            body.add_force(against * t.brake_force * input.brake);
        }

        // 6. Lateral traction and landing settle
        if grounded && speed > t.traction_min_speed {
            let lateral = body.linear_velocity.dot(body.right());
            if lateral.abs() > t.traction_slip_threshold {
                telemetry.traction_corrections += 1;
                body.add_force(-body.right() * lateral.signum() * t.traction * 3000.0);
            }
        }
        if let Some(hit) = hit {
            if hit.distance < t.landing_height
                && body.linear_velocity.y.abs() < t.landing_settle_band
            {
                telemetry.landing_settles += 1;
                body.add_force(Vec3::NEG_Y * t.landing_force);
            }
        }

        // 7. Speed-dependent damping, aggressive only when grounded and slow
        if grounded && speed < t.slow_speed_threshold {
            body.linear_velocity *= t.slow_drag;
        } else {
            body.linear_velocity *= t.drag_coefficient;
        }

        // 8. Downforce
        body.add_force(Vec3::NEG_Y * t.downforce);

        // 9. Tilt correction
        let roll_deg = body.right().y.clamp(-1.0, 1.0).asin().to_degrees();
        if grounded {
            body.angular_velocity *= t.grounded_angular_damp;
            if roll_deg.abs() > t.tilt_gentle_deg {
                telemetry.tilt_corrections += 1;
                let magnitude = if roll_deg.abs() > t.tilt_strong_deg {
                    t.tilt_torque_strong
                } else {
                    t.tilt_torque_gentle
                };
                body.add_torque(forward * -roll_deg.signum() * magnitude);
            }
        } else {
            let right = body.right();
            let roll_rate = body.angular_velocity.dot(forward);
            let pitch_rate = body.angular_velocity.dot(right);
            body.angular_velocity += forward * roll_rate * (t.air_roll_damp - 1.0)
                + right * pitch_rate * (t.air_pitch_damp - 1.0);
            if roll_deg.abs() > t.air_righting_roll_deg {
                telemetry.tilt_corrections += 1;
                body.add_force(Vec3::Y * t.air_righting_force);
            }
        }

        // 10. Ramp anti-faceplant
        if let Some(hit) = hit {
            if grounded && speed > t.ramp_min_speed {
                let slope_deg = hit.normal.dot(Vec3::Y).clamp(-1.0, 1.0).acos().to_degrees();
                if slope_deg > t.ramp_slope_min_deg && slope_deg < t.ramp_slope_max_deg {
                    telemetry.ramp_assists += 1;
                    body.add_force(forward * t.ramp_assist_force);
                    if body.linear_velocity.y < t.ramp_max_sink_rate {
                        body.linear_velocity.y = t.ramp_max_sink_rate;
                    }
                }
            }
        }
    }
}
