/// Platform-agnostic input handling for the vehicle
use std::collections::HashSet;

use crate::utils::smooth_damp;

/// Platform-independent input events
#[derive(Debug, Clone)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),
    FocusLost,
}

/// Raw key state, fed by whatever platform layer hosts the sim.
pub struct InputState {
    pub pressed_keys: HashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
        }
    }

    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.pressed_keys.insert(key.clone());
            }
            InputEvent::KeyUp(key) => {
                self.pressed_keys.remove(key.as_str());
            }
            InputEvent::FocusLost => {
                self.clear_keys();
            }
        }
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(key)
    }

    pub fn clear_keys(&mut self) {
        self.pressed_keys.clear();
    }
}

/// Key mapping configuration
#[derive(Clone)]
pub struct KeyBindings {
    pub forward: String,
    pub backward: String,
    pub left: String,
    pub right: String,
    pub brake: String,
    pub reset: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: "w".to_string(),
            backward: "s".to_string(),
            left: "a".to_string(),
            right: "d".to_string(),
            brake: " ".to_string(),
            reset: "r".to_string(),
        }
    }
}

/// Smoothed driving inputs for one fixed step, each in [-1, 1] (brake [0, 1]).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSample {
    pub motor: f32,
    pub steer: f32,
    pub brake: f32,
}

/// Turns raw key state into smoothed axis values.
///
/// Motor and steer chase their key-derived targets with ~0.1 s of spring lag
/// so taps do not kick the body; brake responds twice as fast. Targets can
/// also be set programmatically (scripted drives, recorded runs), which wins
/// over keys until the next `read_keys`.
pub struct InputHandler {
    bindings: KeyBindings,
    enabled: bool,

    motor_target: f32,
    steer_target: f32,
    brake_target: f32,

    motor: f32,
    steer: f32,
    brake: f32,
    motor_velocity: f32,
    steer_velocity: f32,
    brake_velocity: f32,

    pub motor_smooth: f32,
    pub brake_smooth: f32,
}

impl InputHandler {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            enabled: true,
            motor_target: 0.0,
            steer_target: 0.0,
            brake_target: 0.0,
            motor: 0.0,
            steer: 0.0,
            brake: 0.0,
            motor_velocity: 0.0,
            steer_velocity: 0.0,
            brake_velocity: 0.0,
            motor_smooth: 0.1,
            brake_smooth: 0.05,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disabling zeroes everything immediately so the vehicle coasts rather
    /// than holding the last command.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.motor_target = 0.0;
            self.steer_target = 0.0;
            self.brake_target = 0.0;
            self.motor = 0.0;
            self.steer = 0.0;
            self.brake = 0.0;
            self.motor_velocity = 0.0;
            self.steer_velocity = 0.0;
            self.brake_velocity = 0.0;
        }
    }

    /// Derive axis targets from currently pressed keys.
    pub fn read_keys(&mut self, state: &InputState) {
        if !self.enabled {
            return;
        }
        let axis = |neg: bool, pos: bool| match (neg, pos) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        self.motor_target = axis(
            state.is_key_pressed(&self.bindings.backward) || state.is_key_pressed("ArrowDown"),
            state.is_key_pressed(&self.bindings.forward) || state.is_key_pressed("ArrowUp"),
        );
        self.steer_target = axis(
            state.is_key_pressed(&self.bindings.left) || state.is_key_pressed("ArrowLeft"),
            state.is_key_pressed(&self.bindings.right) || state.is_key_pressed("ArrowRight"),
        );
        self.brake_target = if state.is_key_pressed(&self.bindings.brake) {
            1.0
        } else {
            0.0
        };
    }

    pub fn wants_reset(&self, state: &InputState) -> bool {
        state.is_key_pressed(&self.bindings.reset)
    }

    pub fn set_motor(&mut self, value: f32) {
        if self.enabled {
            self.motor_target = value.clamp(-1.0, 1.0);
        }
    }

    pub fn set_steer(&mut self, value: f32) {
        if self.enabled {
            self.steer_target = value.clamp(-1.0, 1.0);
        }
    }

    pub fn set_brake(&mut self, value: f32) {
        if self.enabled {
            self.brake_target = value.clamp(0.0, 1.0);
        }
    }

    /// Advance the smoothing springs and return this step's sample.
    pub fn sample(&mut self, dt: f32) -> InputSample {
        self.motor = smooth_damp(
            self.motor,
            self.motor_target,
            &mut self.motor_velocity,
            self.motor_smooth,
            dt,
        );
        self.steer = smooth_damp(
            self.steer,
            self.steer_target,
            &mut self.steer_velocity,
            self.motor_smooth,
            dt,
        );
        self.brake = smooth_damp(
            self.brake,
            self.brake_target,
            &mut self.brake_velocity,
            self.brake_smooth,
            dt,
        );
        InputSample {
            motor: self.motor,
            steer: self.steer,
            brake: self.brake.clamp(0.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 50.0;

    #[test]
    fn keys_map_to_axis_targets() {
        let mut state = InputState::new();
        state.process_event(&InputEvent::KeyDown("w".to_string()));
        state.process_event(&InputEvent::KeyDown("a".to_string()));

        let mut handler = InputHandler::new(KeyBindings::default());
        handler.read_keys(&state);
        let mut sample = InputSample::default();
        for _ in 0..100 {
            sample = handler.sample(DT);
        }
        assert!(sample.motor > 0.99, "motor {}", sample.motor);
        assert!(sample.steer < -0.99, "steer {}", sample.steer);
        assert_eq!(sample.brake, 0.0);
    }

    #[test]
    fn motor_ramps_instead_of_stepping() {
        let mut handler = InputHandler::new(KeyBindings::default());
        handler.set_motor(1.0);
        let first = handler.sample(DT);
        assert!(first.motor > 0.0 && first.motor < 0.5, "motor {}", first.motor);
    }

    #[test]
    fn brake_responds_faster_than_motor() {
        let mut handler = InputHandler::new(KeyBindings::default());
        handler.set_motor(1.0);
        handler.set_brake(1.0);
        let mut sample = InputSample::default();
        for _ in 0..5 {
            sample = handler.sample(DT);
        }
        assert!(sample.brake > sample.motor, "brake {} motor {}", sample.brake, sample.motor);
    }

    #[test]
    fn disable_zeroes_outputs_immediately() {
        let mut handler = InputHandler::new(KeyBindings::default());
        handler.set_motor(1.0);
        for _ in 0..50 {
            handler.sample(DT);
        }
        handler.set_enabled(false);
        let sample = handler.sample(DT);
        assert_eq!(sample, InputSample::default());
        handler.set_motor(1.0);
        assert_eq!(handler.sample(DT), InputSample::default());
    }

    #[test]
    fn focus_loss_releases_keys() {
        let mut state = InputState::new();
        state.process_event(&InputEvent::KeyDown("w".to_string()));
        state.process_event(&InputEvent::FocusLost);
        assert!(!state.is_key_pressed("w"));
    }

    #[test]
    fn programmatic_targets_are_clamped() {
        let mut handler = InputHandler::new(KeyBindings::default());
        handler.set_motor(5.0);
        handler.set_brake(-3.0);
        let mut sample = InputSample::default();
        for _ in 0..200 {
            sample = handler.sample(DT);
        }
        assert!(sample.motor <= 1.0 + 1e-5);
        assert_eq!(sample.brake, 0.0);
    }
}
