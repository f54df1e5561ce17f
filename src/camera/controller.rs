use super::camera::{Camera, Movement};
use crate::constants::{CAMERA_TIME_SCALE, MOUSE_SENS_ENV};

/// FPS-style camera controller (WASD + mouse look + scroll zoom).
pub struct CameraController {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub mouse_captured: bool,
    /// Multiplier on frame time for movement.
    pub time_scale: f32,
    mouse_delta: (f32, f32),
    scroll_delta: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new(CAMERA_TIME_SCALE)
    }
}

impl CameraController {
    pub fn new(time_scale: f32) -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            mouse_captured: false,
            time_scale,
            mouse_delta: (0.0, 0.0),
            scroll_delta: 0.0,
        }
    }

    /// Mouse sensitivity from the environment, if set to something usable.
    pub fn sensitivity_override() -> Option<f32> {
        let val = std::env::var(MOUSE_SENS_ENV).ok()?;
        parse_sensitivity(&val)
    }

    /// Returns true if the camera moved.
    pub fn update(&mut self, camera: &mut Camera, dt: f32) -> bool {
        let dt = dt * self.time_scale;
        let held = [
            (self.forward, Movement::Forward),
            (self.backward, Movement::Backward),
            (self.left, Movement::Left),
            (self.right, Movement::Right),
        ];

        let mut moved = false;
        for (pressed, direction) in held {
            if pressed {
                camera.process_movement(direction, dt);
                moved = true;
            }
        }
        moved
    }

    /// Accumulate mouse movement from `DeviceEvent::MouseMotion`.
    pub fn accumulate_raw_delta(&mut self, dx: f64, dy: f64) {
        if self.mouse_captured {
            self.mouse_delta.0 += dx as f32;
            self.mouse_delta.1 += dy as f32;
        }
    }

    pub fn accumulate_scroll(&mut self, delta: f32) {
        self.scroll_delta += delta;
    }

    /// Apply accumulated mouse delta to camera rotation (called once per frame).
    /// Returns true if camera rotated.
    pub fn apply_mouse_look(&mut self, camera: &mut Camera) -> bool {
        let (dx, dy) = self.mouse_delta;
        self.mouse_delta = (0.0, 0.0);
        if dx == 0.0 && dy == 0.0 {
            return false;
        }
        // Window y grows downward; the camera expects positive = look up.
        camera.process_look(dx, -dy);
        log::debug!(
            "[mouse] frame delta: ({dx:.2}, {dy:.2}), yaw: {:.2}, pitch: {:.2}",
            camera.yaw(),
            camera.pitch(),
        );
        true
    }

    /// Returns true if the zoom changed.
    pub fn apply_scroll(&mut self, camera: &mut Camera) -> bool {
        let delta = std::mem::take(&mut self.scroll_delta);
        if delta == 0.0 {
            return false;
        }
        let before = camera.zoom();
        camera.process_zoom(delta);
        camera.zoom() != before
    }

    /// Toggle capture; any buffered delta is dropped so re-capturing never jumps.
    /// Returns true if the capture state changed.
    pub fn set_mouse_captured(&mut self, captured: bool) -> bool {
        if self.mouse_captured == captured {
            return false;
        }
        self.mouse_captured = captured;
        self.clear_mouse_delta();
        true
    }

    /// Discard buffered mouse delta (call when toggling mouse capture to avoid a jump).
    pub fn clear_mouse_delta(&mut self) {
        self.mouse_delta = (0.0, 0.0);
    }

    /// Reset all movement flags (call on focus loss to prevent runaway movement).
    pub fn clear_movement(&mut self) {
        self.forward = false;
        self.backward = false;
        self.left = false;
        self.right = false;
    }
}

fn parse_sensitivity(val: &str) -> Option<f32> {
    match val.parse::<f32>() {
        Ok(sens) if sens > 0.0 && sens.is_finite() => {
            log::info!("{MOUSE_SENS_ENV}={sens}");
            Some(sens)
        }
        _ => {
            log::warn!("{MOUSE_SENS_ENV}={val:?} invalid, using default");
            None
        }
    }
}
