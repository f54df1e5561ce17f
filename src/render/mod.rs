// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod frame;
pub mod lights;
pub mod mesh;
pub mod object;
