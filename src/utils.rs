use glam::Vec3;

/// Critically damped spring smoothing toward a target value.
///
/// Same semantics as the classic `SmoothDamp`: `current` chases `target` with
/// roughly `smooth_time` seconds of lag, overshoot-free. `velocity` is the
/// caller-owned rate state carried between calls. Returns the new value; the
/// new rate is written back through `velocity`.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;

    // Padé approximation of exp(-omega * dt)
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Clamp to prevent overshooting past the target
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = (output - target) / dt.max(1e-6);
    }
    output
}

/// Component-wise [`smooth_damp`] for vectors.
pub fn smooth_damp_vec3(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    Vec3::new(
        smooth_damp(current.x, target.x, &mut velocity.x, smooth_time, dt),
        smooth_damp(current.y, target.y, &mut velocity.y, smooth_time, dt),
        smooth_damp(current.z, target.z, &mut velocity.z, smooth_time, dt),
    )
}

/// Shortest signed difference between two angles, in radians.
pub fn angle_delta(from: f32, to: f32) -> f32 {
    use std::f32::consts::TAU;
    let mut d = (to - from) % TAU;
    if d > TAU / 2.0 {
        d -= TAU;
    } else if d < -TAU / 2.0 {
        d += TAU;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooth_damp_converges() {
        let mut value = 0.0;
        let mut vel = 0.0;
        for _ in 0..200 {
            value = smooth_damp(value, 1.0, &mut vel, 0.1, 1.0 / 60.0);
        }
        assert!((value - 1.0).abs() < 1e-3, "value {value} should settle at target");
    }

    #[test]
    fn smooth_damp_does_not_overshoot() {
        let mut value = 0.0;
        let mut vel = 0.0;
        for _ in 0..500 {
            value = smooth_damp(value, 1.0, &mut vel, 0.1, 1.0 / 60.0);
            assert!(value <= 1.0 + 1e-4, "overshoot at {value}");
        }
    }

    #[test]
    fn smooth_damp_tracks_faster_with_shorter_time() {
        let mut slow = 0.0;
        let mut slow_vel = 0.0;
        let mut fast = 0.0;
        let mut fast_vel = 0.0;
        for _ in 0..10 {
            slow = smooth_damp(slow, 1.0, &mut slow_vel, 0.1, 1.0 / 60.0);
            fast = smooth_damp(fast, 1.0, &mut fast_vel, 0.05, 1.0 / 60.0);
        }
        assert!(fast > slow, "brake-style smoothing should respond quicker");
    }

    #[test]
    fn angle_delta_wraps() {
        use std::f32::consts::PI;
        let d = angle_delta(PI - 0.1, -PI + 0.1);
        assert!((d - 0.2).abs() < 1e-5, "wrap-around delta was {d}");
    }
}
