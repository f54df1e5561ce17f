// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::pusher::{PushZone, PusherConfig};
use crate::constants::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_true")]
    pub fullscreen: bool,
}

fn default_title() -> String {
    DEFAULT_WINDOW_TITLE.to_string()
}

fn default_width() -> u32 {
    DEFAULT_WINDOW_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_WINDOW_HEIGHT
}

fn default_true() -> bool {
    true
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
            fullscreen: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],

    #[serde(default = "default_yaw")]
    pub yaw: f32,

    #[serde(default)]
    pub pitch: f32,

    #[serde(default = "default_speed")]
    pub speed: f32,

    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
}

fn default_camera_position() -> [f32; 3] {
    DEFAULT_CAMERA_POSITION
}

fn default_yaw() -> f32 {
    CAMERA_DEFAULT_YAW
}

fn default_speed() -> f32 {
    CAMERA_DEFAULT_SPEED
}

fn default_sensitivity() -> f32 {
    CAMERA_DEFAULT_SENSITIVITY
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            yaw: default_yaw(),
            pitch: CAMERA_DEFAULT_PITCH,
            speed: default_speed(),
            sensitivity: default_sensitivity(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisRotation {
    pub axis: [f32; 3],
    pub degrees: f32,
}

/// Placement of a model or cube.
///
/// The world matrix is `Ry(orbit * t) * T(position) * Ry(spin * t) * R * S`,
/// where `R` applies `rotations` in order: `orbit` swings the object around
/// the world origin, `spin` turns it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformConfig {
    #[serde(default)]
    pub position: [f32; 3],

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rotations: Vec<AxisRotation>,

    #[serde(default = "default_scale")]
    pub scale: f32,

    /// Radians per second about +Y, in place.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub spin: f32,

    /// Radians per second about the world +Y axis.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub orbit: f32,
}

fn default_scale() -> f32 {
    1.0
}

fn is_zero(v: &f32) -> bool {
    *v == 0.0
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotations: Vec::new(),
            scale: 1.0,
            spin: 0.0,
            orbit: 0.0,
        }
    }
}

impl TransformConfig {
    pub fn at(position: [f32; 3], scale: f32) -> Self {
        Self {
            position,
            scale,
            ..Default::default()
        }
    }

    pub fn matrix(&self, t: f32) -> Mat4 {
        self.matrix_at(Vec3::from(self.position), t)
    }

    /// Same as [`matrix`](Self::matrix) with the translation replaced.
    pub fn matrix_at(&self, position: Vec3, t: f32) -> Mat4 {
        let rotation = self
            .rotations
            .iter()
            .filter(|r| Vec3::from(r.axis).length_squared() > 0.0)
            .fold(Mat4::IDENTITY, |acc, r| {
                acc * Mat4::from_axis_angle(Vec3::from(r.axis).normalize(), r.degrees.to_radians())
            });
        Mat4::from_rotation_y(self.orbit * t)
            * Mat4::from_translation(position)
            * Mat4::from_rotation_y(self.spin * t)
            * rotation
            * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub name: String,

    pub path: String,

    #[serde(default)]
    pub transform: TransformConfig,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub wireframe: bool,

    /// Replaces the diffuse map named by the OBJ material.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diffuse: Option<String>,

    #[serde(default = "default_shininess")]
    pub shininess: f32,
}

fn default_shininess() -> f32 {
    DEFAULT_SHININESS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeConfig {
    pub name: String,

    pub diffuse: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specular: Option<String>,

    /// Used when no specular map is given.
    #[serde(default = "default_specular_color")]
    pub specular_color: [f32; 3],

    #[serde(default = "default_shininess")]
    pub shininess: f32,

    #[serde(default)]
    pub transform: TransformConfig,

    /// Driven by the keyboard pusher instead of `transform.position` x/z.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pushable: bool,
}

fn default_specular_color() -> [f32; 3] {
    DEFAULT_SPECULAR_COLOR
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LampConfig {
    /// OBJ mesh; a cube is drawn when absent or when it fails to load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<String>,

    #[serde(default = "default_lamp_scale")]
    pub scale: f32,
}

fn default_lamp_scale() -> f32 {
    LAMP_SCALE
}

impl Default for LampConfig {
    fn default() -> Self {
        Self {
            mesh: None,
            scale: LAMP_SCALE,
        }
    }
}

/// Everything the viewer draws. `Default` is the built-in demo scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub camera: CameraConfig,

    /// Faces in +X, -X, +Y, -Y, +Z, -Z order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skybox: Option<[String; 6]>,

    #[serde(default)]
    pub models: Vec<ModelConfig>,

    #[serde(default)]
    pub cubes: Vec<CubeConfig>,

    #[serde(default)]
    pub pusher: PusherConfig,

    #[serde(default)]
    pub lamp: LampConfig,
}

impl Scene {
    /// No geometry, default window and camera.
    pub fn empty() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            skybox: None,
            models: Vec::new(),
            cubes: Vec::new(),
            pusher: PusherConfig::default(),
            lamp: LampConfig::default(),
        }
    }

    /// Every texture and mesh path the scene refers to, mutable.
    pub fn asset_paths_mut(&mut self) -> Vec<&mut String> {
        let mut paths: Vec<&mut String> = Vec::new();
        if let Some(faces) = &mut self.skybox {
            paths.extend(faces.iter_mut());
        }
        for model in &mut self.models {
            paths.push(&mut model.path);
            paths.extend(model.diffuse.as_mut());
        }
        for cube in &mut self.cubes {
            paths.push(&mut cube.diffuse);
            paths.extend(cube.specular.as_mut());
        }
        paths.extend(self.lamp.mesh.as_mut());
        paths
    }
}

impl Default for Scene {
    fn default() -> Self {
        let model = |name: &str, path: &str, transform: TransformConfig| ModelConfig {
            name: name.to_string(),
            path: format!("{OBJECTS_DIR}/{path}"),
            transform,
            wireframe: false,
            diffuse: None,
            shininess: DEFAULT_SHININESS,
        };
        let tilted_earth = |x: f32| TransformConfig {
            position: [x, 5.75, -30.0],
            rotations: vec![AxisRotation {
                axis: [-0.5, 0.0, 1.0],
                degrees: 60.0,
            }],
            scale: 3.0,
            ..Default::default()
        };

        let models = vec![
            model(
                "droid",
                "droid/BattleDroidT.obj",
                TransformConfig::at([0.0, -1.75, 0.0], 1.6),
            ),
            model(
                "tree",
                "Tree 02/Tree.obj",
                TransformConfig::at([-5.0, -2.6, -5.0], 1.0),
            ),
            model(
                "castle",
                "hogwarts/great_hall.obj",
                TransformConfig {
                    position: [5.0, -2.6, -5.0],
                    rotations: vec![
                        AxisRotation {
                            axis: [1.0, 0.0, 0.0],
                            degrees: -90.0,
                        },
                        AxisRotation {
                            axis: [0.0, 0.0, 1.0],
                            degrees: -30.0,
                        },
                    ],
                    scale: 0.5,
                    ..Default::default()
                },
            ),
            model(
                "nanosuit",
                "nanosuit/nanosuit.obj",
                TransformConfig::at([-5.0, -1.75, 5.0], 0.5),
            ),
            ModelConfig {
                wireframe: true,
                ..model(
                    "nanosuit wireframe",
                    "nanosuit/nanosuit.obj",
                    TransformConfig::at([5.0, -1.75, 5.0], 0.5),
                )
            },
            model(
                "ground",
                "ground/ground.obj",
                TransformConfig::at([0.0, -1.75, 0.0], 1.0),
            ),
            model(
                "airplane",
                "airplane/11805_airplane_v2_L2.obj",
                TransformConfig {
                    orbit: -1.5,
                    ..TransformConfig::at([20.0, 3.75, 0.0], 0.008)
                },
            ),
            model("earth", "Earth/Earth.obj", tilted_earth(40.0)),
            ModelConfig {
                wireframe: true,
                ..model("earth wireframe", "Earth/Earth.obj", tilted_earth(-40.0))
            },
        ];

        let cubes = vec![
            CubeConfig {
                name: "container".to_string(),
                diffuse: format!("{TEXTURES_DIR}/container2.png"),
                specular: Some(format!("{TEXTURES_DIR}/container2_specular.png")),
                specular_color: DEFAULT_SPECULAR_COLOR,
                shininess: 32.0,
                transform: TransformConfig::at([2.0, -1.25, 0.0], 1.0),
                pushable: false,
            },
            CubeConfig {
                name: "wood".to_string(),
                diffuse: format!("{TEXTURES_DIR}/wood_box.jpg"),
                specular: None,
                specular_color: DEFAULT_SPECULAR_COLOR,
                shininess: 16.0,
                transform: TransformConfig {
                    spin: 1.0,
                    ..TransformConfig::at([2.0, -1.25, 2.0], 1.0)
                },
                pushable: false,
            },
            CubeConfig {
                name: "metal".to_string(),
                diffuse: format!("{TEXTURES_DIR}/metal_box.jpg"),
                specular: None,
                specular_color: DEFAULT_SPECULAR_COLOR,
                shininess: 32.0,
                transform: TransformConfig::at([PUSH_RESET[0], -1.25, PUSH_RESET[1]], 1.0),
                pushable: true,
            },
        ];

        let skybox = ["rt", "lf", "up", "dn", "bk", "ft"]
            .map(|side| format!("{SKYBOX_DIR}/darkskies_{side}.jpg"));

        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            skybox: Some(skybox),
            models,
            cubes,
            pusher: PusherConfig {
                zones: vec![
                    PushZone::new([1.0, 1.0], [3.0, 3.0]),
                    PushZone::new([1.0, -1.0], [3.0, 1.0]),
                    PushZone::new([-0.5, -0.5], [0.5, 0.5]),
                    PushZone::new([-4.5, -0.3], [-3.5, 0.3]),
                ],
                ..Default::default()
            },
            lamp: LampConfig {
                mesh: Some(format!("{OBJECTS_DIR}/sphere/webtrcc.obj")),
                scale: LAMP_SCALE,
            },
        }
    }
}
