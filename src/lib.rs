// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

//! First-person scene viewer: a fly camera and an image-to-GPU texture loader,
//! plus the wgpu viewer that drives them.

pub mod app;
pub mod camera;
pub mod constants;
pub mod gpu;
pub mod input;
pub mod model;
pub mod render;
pub mod scene;
pub mod shaders;
pub mod texture;
