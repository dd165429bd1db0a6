use tracing::info;

/// Per-step counters and gauges in place of hot-path log lines.
///
/// The control loop bumps these as its heuristics fire; the frame loop flushes
/// one structured event about once per simulated second and resets the window.
#[derive(Debug, Default, Clone)]
pub struct StepTelemetry {
    pub steps: u64,
    pub motor_steps: u64,
    pub steer_steps: u64,
    pub brake_steps: u64,
    pub airborne_steps: u64,
    pub upside_down_steps: u64,
    pub traction_corrections: u64,
    pub landing_settles: u64,
    pub tilt_corrections: u64,
    pub ramp_assists: u64,
    pub peak_speed: f32,
}

impl StepTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_speed(&mut self, speed: f32) {
        if speed > self.peak_speed {
            self.peak_speed = speed;
        }
    }

    /// Emit the window as one event and start a fresh window.
    pub fn flush(&mut self, sim_time: f32) {
        if self.steps == 0 {
            return;
        }
        info!(
            sim_time,
            steps = self.steps,
            motor = self.motor_steps,
            steer = self.steer_steps,
            brake = self.brake_steps,
            airborne = self.airborne_steps,
            upside_down = self.upside_down_steps,
            traction = self.traction_corrections,
            landing = self.landing_settles,
            tilt = self.tilt_corrections,
            ramp_assist = self.ramp_assists,
            peak_speed = self.peak_speed,
            "vehicle telemetry"
        );
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_resets_window() {
        let mut t = StepTelemetry::new();
        t.steps = 50;
        t.ramp_assists = 3;
        t.record_speed(12.5);
        t.flush(1.0);
        assert_eq!(t.steps, 0);
        assert_eq!(t.ramp_assists, 0);
        assert_eq!(t.peak_speed, 0.0);
    }

    #[test]
    fn peak_speed_is_monotonic_within_window() {
        let mut t = StepTelemetry::new();
        t.record_speed(5.0);
        t.record_speed(3.0);
        assert_eq!(t.peak_speed, 5.0);
    }
}
