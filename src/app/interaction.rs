// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::handler::{self, InputTargets};

use super::state::AppState;

pub fn handle_window_event(state: &mut AppState, event_loop: &ActiveEventLoop, event: WindowEvent) {
    match &event {
        WindowEvent::KeyboardInput {
            event: key_event, ..
        } if key_event.physical_key == PhysicalKey::Code(KeyCode::Escape) => {
            if key_event.state == ElementState::Pressed && !key_event.repeat {
                // First press frees the cursor, the second one quits.
                if state.controller.mouse_captured {
                    state.capture_mouse(false);
                } else {
                    event_loop.exit();
                }
            }
            return;
        }
        WindowEvent::CloseRequested => {
            event_loop.exit();
            return;
        }
        WindowEvent::Resized(size) => {
            state.handle_resize(*size);
            return;
        }
        WindowEvent::RedrawRequested => {
            state.update_and_render();
            return;
        }
        WindowEvent::MouseInput {
            button: MouseButton::Left,
            state: ElementState::Pressed,
            ..
        } if !state.controller.mouse_captured => {
            state.capture_mouse(true);
            return;
        }
        // Focus loss: release the cursor and drop held keys so nothing keeps
        // moving while the window is in the background.
        WindowEvent::Focused(false) => {
            state.controller.clear_movement();
            if let Some(pusher) = &mut state.pusher {
                pusher.clear_keys();
            }
            state.capture_mouse(false);
            return;
        }
        _ => {}
    }

    let mut targets = InputTargets {
        controller: &mut state.controller,
        pusher: state.pusher.as_mut(),
        wireframe: &mut state.wireframe,
    };
    handler::handle_window_event(&event, &mut targets);
}
