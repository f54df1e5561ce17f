use winit::event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::camera::CameraController;
use crate::constants::SCROLL_PIXELS_PER_LINE;
use crate::scene::pusher::CubePusher;

/// Input state the viewer routes key and wheel events into.
pub struct InputTargets<'a> {
    pub controller: &'a mut CameraController,
    pub pusher: Option<&'a mut CubePusher>,
    pub wireframe: &'a mut bool,
}

/// Returns true if the event was consumed.
pub fn handle_window_event(event: &WindowEvent, targets: &mut InputTargets) -> bool {
    match event {
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(key),
                    state,
                    ..
                },
            ..
        } => handle_key(*key, *state == ElementState::Pressed, targets),
        WindowEvent::MouseWheel { delta, .. } => {
            let lines = match delta {
                MouseScrollDelta::LineDelta(_, y) => *y,
                MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / SCROLL_PIXELS_PER_LINE,
            };
            targets.controller.accumulate_scroll(lines);
            true
        }
        _ => false,
    }
}

pub fn handle_key(key: KeyCode, pressed: bool, targets: &mut InputTargets) -> bool {
    let controller = &mut *targets.controller;
    match key {
        KeyCode::KeyW => controller.forward = pressed,
        KeyCode::KeyS => controller.backward = pressed,
        KeyCode::KeyA => controller.left = pressed,
        KeyCode::KeyD => controller.right = pressed,
        KeyCode::KeyT | KeyCode::KeyG | KeyCode::KeyF | KeyCode::KeyH => {
            let Some(pusher) = targets.pusher.as_deref_mut() else {
                return false;
            };
            match key {
                KeyCode::KeyT => pusher.forward = pressed,
                KeyCode::KeyG => pusher.backward = pressed,
                KeyCode::KeyF => pusher.left = pressed,
                _ => pusher.right = pressed,
            }
        }
        KeyCode::KeyO if pressed => *targets.wireframe = false,
        KeyCode::KeyP if pressed => *targets.wireframe = true,
        KeyCode::KeyO | KeyCode::KeyP => {}
        _ => return false,
    }
    true
}
