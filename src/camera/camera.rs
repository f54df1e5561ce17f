// Copyright (C) Pavlo Hrytsenko <pashagricenko@gmail.com>
// SPDX-License-Identifier: GPL-3.0-or-later

use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};

use crate::constants::{
    CAMERA_DEFAULT_PITCH, CAMERA_DEFAULT_SENSITIVITY, CAMERA_DEFAULT_SPEED, CAMERA_DEFAULT_YAW,
    CAMERA_DEFAULT_ZOOM, CAMERA_FAR, CAMERA_NEAR, CAMERA_PITCH_CLAMP, CAMERA_ZOOM_MAX,
    CAMERA_ZOOM_MIN, DEFAULT_CAMERA_POSITION,
};

/// Discrete movement directions, relative to the camera's basis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
}

/// Euler-angle fly camera. No roll; pitch stays away from the poles.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    world_up: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    yaw: f32,   // degrees
    pitch: f32, // degrees
    zoom: f32,  // degrees
}

impl Camera {
    pub fn new(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            movement_speed: CAMERA_DEFAULT_SPEED,
            mouse_sensitivity: CAMERA_DEFAULT_SENSITIVITY,
            world_up: world_up.normalize(),
            front: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            yaw,
            pitch: pitch.clamp(-CAMERA_PITCH_CLAMP, CAMERA_PITCH_CLAMP),
            zoom: CAMERA_DEFAULT_ZOOM,
        };
        camera.update_vectors();
        camera
    }

    /// Camera at `position` with the default orientation.
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Vec3::Y, CAMERA_DEFAULT_YAW, CAMERA_DEFAULT_PITCH)
    }

    pub fn process_movement(&mut self, direction: Movement, dt: f32) {
        if !dt.is_finite() {
            return;
        }
        let velocity = self.movement_speed * dt;
        match direction {
            Movement::Forward => self.position += self.front * velocity,
            Movement::Backward => self.position -= self.front * velocity,
            Movement::Left => self.position -= self.right * velocity,
            Movement::Right => self.position += self.right * velocity,
        }
    }

    /// Screen-space y must already be inverted: positive `dy` looks up.
    pub fn process_look(&mut self, dx: f32, dy: f32) {
        // NaN would survive the clamp, and an infinite yaw has no cosine.
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.yaw += dx * self.mouse_sensitivity;
        self.pitch = (self.pitch + dy * self.mouse_sensitivity)
            .clamp(-CAMERA_PITCH_CLAMP, CAMERA_PITCH_CLAMP);
        self.update_vectors();
    }

    pub fn process_zoom(&mut self, offset: f32) {
        if !offset.is_finite() {
            return;
        }
        self.zoom = (self.zoom - offset).clamp(CAMERA_ZOOM_MIN, CAMERA_ZOOM_MAX);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Perspective projection with the current zoom as vertical field of view.
    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh(self.zoom.to_radians(), aspect, near, far)
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn world_up(&self) -> Vec3 {
        self.world_up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn to_gpu(&self, width: u32, height: u32) -> GpuCamera {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        let view = self.view_matrix();
        let projection = self.projection_matrix(aspect, CAMERA_NEAR, CAMERA_FAR);
        // The sky follows rotation only, so drop the translation column.
        let sky_view = Mat4::from_mat3(Mat3::from_mat4(view));

        GpuCamera {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            view_proj: (projection * view).to_cols_array_2d(),
            sky_view_proj: (projection * sky_view).to_cols_array_2d(),
            position: self.position.into(),
            _pad: 0.0,
        }
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        let front = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());
        self.front = front.normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::at(Vec3::from(DEFAULT_CAMERA_POSITION))
    }
}

/// Must match the WGSL `Camera` struct layout exactly.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct GpuCamera {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub view_proj: [[f32; 4]; 4],
    pub sky_view_proj: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub _pad: f32,
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    const EPS: f32 = 1e-4;

    fn assert_orthonormal(camera: &Camera) {
        let (f, u, r) = (camera.front(), camera.up(), camera.right());
        assert!((f.length() - 1.0).abs() < EPS, "front not unit: {f}");
        assert!((u.length() - 1.0).abs() < EPS, "up not unit: {u}");
        assert!((r.length() - 1.0).abs() < EPS, "right not unit: {r}");
        assert!(f.dot(u).abs() < EPS);
        assert!(f.dot(r).abs() < EPS);
        assert!(u.dot(r).abs() < EPS);
    }

    #[test]
    fn test_default_orientation_looks_down_negative_z() {
        let camera = Camera::default();
        assert!((camera.front() - Vec3::NEG_Z).length() < EPS);
        assert!((camera.right() - Vec3::X).length() < EPS);
        assert!((camera.up() - Vec3::Y).length() < EPS);
        assert_eq!(camera.zoom(), CAMERA_DEFAULT_ZOOM);
    }

    #[test]
    fn test_pitch_clamped_and_basis_orthonormal() {
        let mut camera = Camera::default();
        let mut rng = StdRng::seed_from_u64(0x1234_5678);
        for _ in 0..2000 {
            camera.process_look(
                rng.random_range(-5000.0..5000.0),
                rng.random_range(-5000.0..5000.0),
            );
            assert!(camera.pitch() >= -CAMERA_PITCH_CLAMP && camera.pitch() <= CAMERA_PITCH_CLAMP);
            assert_orthonormal(&camera);
        }
    }

    #[test]
    fn test_extreme_look_up_stays_below_pole() {
        let mut camera = Camera::default();
        camera.process_look(0.0, 1.0e6);
        assert_eq!(camera.pitch(), CAMERA_PITCH_CLAMP);
        assert!(camera.front().y < 1.0);
        assert_orthonormal(&camera);

        camera.process_look(0.0, -2.0e6);
        assert_eq!(camera.pitch(), -CAMERA_PITCH_CLAMP);
        assert_orthonormal(&camera);
    }

    #[test]
    fn test_non_finite_input_is_ignored() {
        let mut camera = Camera::at(Vec3::new(1.0, 2.0, 3.0));
        camera.process_look(30.0, 20.0);
        let (yaw, pitch, zoom, position) =
            (camera.yaw(), camera.pitch(), camera.zoom(), camera.position);

        for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            camera.process_look(bad, 0.0);
            camera.process_look(0.0, bad);
            camera.process_zoom(bad);
            camera.process_movement(Movement::Forward, bad);
        }
        assert_eq!(camera.yaw(), yaw);
        assert_eq!(camera.pitch(), pitch);
        assert_eq!(camera.zoom(), zoom);
        assert_eq!(camera.position, position);
        assert_orthonormal(&camera);

        // Later finite input still works normally.
        camera.process_look(0.0, 1.0e6);
        assert_eq!(camera.pitch(), CAMERA_PITCH_CLAMP);
        assert_orthonormal(&camera);
    }

    #[test]
    fn test_look_scales_by_sensitivity() {
        let mut camera = Camera::default();
        camera.mouse_sensitivity = 0.5;
        camera.process_look(10.0, 4.0);
        assert!((camera.yaw() - (CAMERA_DEFAULT_YAW + 5.0)).abs() < EPS);
        assert!((camera.pitch() - 2.0).abs() < EPS);
    }

    #[test]
    fn test_zoom_clamped() {
        let mut camera = Camera::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            camera.process_zoom(rng.random_range(-100.0..100.0));
            assert!(camera.zoom() >= CAMERA_ZOOM_MIN && camera.zoom() <= CAMERA_ZOOM_MAX);
        }

        camera.process_zoom(1000.0);
        assert_eq!(camera.zoom(), CAMERA_ZOOM_MIN);
        camera.process_zoom(-1000.0);
        assert_eq!(camera.zoom(), CAMERA_ZOOM_MAX);
    }

    #[test]
    fn test_zoom_does_not_touch_orientation() {
        let mut camera = Camera::default();
        let front = camera.front();
        camera.process_zoom(3.0);
        assert_eq!(camera.zoom(), CAMERA_DEFAULT_ZOOM - 3.0);
        assert_eq!(camera.front(), front);
    }

    #[test]
    fn test_view_matrix_is_pure() {
        let mut camera = Camera::at(Vec3::new(1.0, 2.0, 3.0));
        camera.process_look(37.0, -12.0);
        assert_eq!(camera.view_matrix(), camera.view_matrix());
    }

    #[test]
    fn test_view_matrix_maps_eye_to_origin_and_front_to_negative_z() {
        let mut camera = Camera::at(Vec3::new(4.0, -1.0, 2.0));
        camera.process_look(123.0, 45.0);
        let view = camera.view_matrix();

        let eye = view.transform_point3(camera.position);
        assert!(eye.length() < EPS);

        let ahead = view.transform_point3(camera.position + camera.front());
        assert!((ahead - Vec3::NEG_Z).length() < EPS);
    }

    #[test]
    fn test_forward_then_backward_returns_home() {
        let start = Vec3::new(0.5, -0.25, 3.0);
        let mut camera = Camera::at(start);
        camera.process_look(80.0, 30.0);

        camera.process_movement(Movement::Forward, 0.37);
        assert!((camera.position - start).length() > 0.1);
        camera.process_movement(Movement::Backward, 0.37);
        assert!((camera.position - start).length() < EPS);
    }

    #[test]
    fn test_strafe_moves_along_right() {
        let mut camera = Camera::at(Vec3::ZERO);
        camera.movement_speed = 2.0;
        camera.process_movement(Movement::Right, 0.5);
        assert!((camera.position - Vec3::X).length() < EPS);
        camera.process_movement(Movement::Left, 1.0);
        assert!((camera.position - Vec3::NEG_X).length() < EPS);
    }

    #[test]
    fn test_movement_leaves_basis_unchanged() {
        let mut camera = Camera::default();
        let (f, u, r) = (camera.front(), camera.up(), camera.right());
        camera.process_movement(Movement::Forward, 10.0);
        camera.process_movement(Movement::Left, 3.0);
        assert_eq!((camera.front(), camera.up(), camera.right()), (f, u, r));
    }

    #[test]
    fn test_sky_view_has_no_translation() {
        let camera = Camera::at(Vec3::new(10.0, 20.0, 30.0));
        let gpu = camera.to_gpu(1920, 1080);
        let sky_only = Mat4::from_cols_array_2d(&gpu.sky_view_proj);
        let projection = Mat4::from_cols_array_2d(&gpu.projection);
        let origin = (projection.inverse() * sky_only).transform_point3(Vec3::ZERO);
        assert!(origin.length() < EPS);
    }
}
