// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{PUSH_RESET, PUSH_STEP};

/// Axis-aligned rectangle on the ground plane (x, z). Bounds are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PushZone {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl PushZone {
    pub fn new(min: [f32; 2], max: [f32; 2]) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.min[0] && p.x < self.max[0] && p.y > self.min[1] && p.y < self.max[1]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PusherConfig {
    #[serde(default = "default_reset")]
    pub start: [f32; 2],

    #[serde(default = "default_step")]
    pub step: f32,

    #[serde(default = "default_reset")]
    pub reset: [f32; 2],

    #[serde(default)]
    pub zones: Vec<PushZone>,
}

fn default_reset() -> [f32; 2] {
    PUSH_RESET
}

fn default_step() -> f32 {
    PUSH_STEP
}

impl Default for PusherConfig {
    fn default() -> Self {
        Self {
            start: PUSH_RESET,
            step: PUSH_STEP,
            reset: PUSH_RESET,
            zones: Vec::new(),
        }
    }
}

/// Keyboard-driven cube on the ground plane.
///
/// Moves a fixed step per frame for each held key; landing inside any
/// blocking zone sends it back to the reset point.
#[derive(Debug, Clone)]
pub struct CubePusher {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    position: Vec2,
    step: f32,
    reset: Vec2,
    zones: Vec<PushZone>,
}

impl CubePusher {
    pub fn new(config: &PusherConfig) -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            position: Vec2::from(config.start),
            step: config.step,
            reset: Vec2::from(config.reset),
            zones: config.zones.clone(),
        }
    }

    /// (x, z) of the cube.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Returns true if the cube was sent back to the reset point.
    pub fn update(&mut self) -> bool {
        let mut delta = Vec2::ZERO;
        if self.forward {
            delta.y += self.step;
        }
        if self.backward {
            delta.y -= self.step;
        }
        if self.left {
            delta.x -= self.step;
        }
        if self.right {
            delta.x += self.step;
        }
        self.position += delta;

        if self.zones.iter().any(|z| z.contains(self.position)) {
            log::debug!(
                "Pushed cube hit a blocking zone at ({:.2}, {:.2})",
                self.position.x,
                self.position.y
            );
            self.position = self.reset;
            return true;
        }
        false
    }

    pub fn clear_keys(&mut self) {
        self.forward = false;
        self.backward = false;
        self.left = false;
        self.right = false;
    }
}
