// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod backend;
pub mod decode;
pub mod error;
pub mod loader;
pub mod mipmap;

#[cfg(test)]
pub(crate) mod memory;
#[cfg(test)]
pub(crate) mod test_images;

pub use backend::{FilterMode, SamplerSettings, TextureBackend, WrapMode};
pub use decode::{ChannelFormat, DecodedImage};
pub use error::TextureError;
pub use loader::{
    CubeFace, CubemapDescriptor, FaceFailure, LoadedCubemap, TextureDescriptor, load_cubemap,
    load_texture, placeholder,
};
