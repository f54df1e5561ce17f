use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::constants::{
    DIRECTIONAL_LIGHT_DIRECTION, POINT_LIGHT_ATTENUATION, POINT_LIGHT_HEIGHT,
    POINT_LIGHT_ORBIT_RADIUS,
};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuPointLight {
    pub position: [f32; 3],
    pub constant: f32,
    pub ambient: [f32; 3],
    pub linear: f32,
    pub diffuse: [f32; 3],
    pub quadratic: f32,
    pub specular: [f32; 3],
    pub _pad: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuDirectionalLight {
    pub direction: [f32; 3],
    pub _pad0: f32,
    pub ambient: [f32; 3],
    pub _pad1: f32,
    pub diffuse: [f32; 3],
    pub _pad2: f32,
    pub specular: [f32; 3],
    pub _pad3: f32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuLights {
    pub point: GpuPointLight,
    pub directional: GpuDirectionalLight,
}

/// Point light position at `t` seconds: a circle of radius 2 at height 1.5.
pub fn point_light_position(t: f32) -> Vec3 {
    Vec3::new(
        POINT_LIGHT_ORBIT_RADIUS * t.sin(),
        POINT_LIGHT_HEIGHT,
        POINT_LIGHT_ORBIT_RADIUS * t.cos(),
    )
}

impl GpuLights {
    pub fn at_time(t: f32) -> Self {
        let [constant, linear, quadratic] = POINT_LIGHT_ATTENUATION;
        Self {
            point: GpuPointLight {
                position: point_light_position(t).to_array(),
                constant,
                ambient: [0.2; 3],
                linear,
                diffuse: [0.5; 3],
                quadratic,
                specular: [1.0; 3],
                _pad: 0.0,
            },
            directional: GpuDirectionalLight {
                direction: DIRECTIONAL_LIGHT_DIRECTION,
                _pad0: 0.0,
                ambient: [0.05; 3],
                _pad1: 0.0,
                diffuse: [0.6; 3],
                _pad2: 0.0,
                specular: [0.5; 3],
                _pad3: 0.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orbit() {
        let p0 = point_light_position(0.0);
        assert!((p0 - Vec3::new(0.0, 1.5, 2.0)).length() < 1e-6);
        for i in 0..16 {
            let p = point_light_position(i as f32 * 0.7);
            assert!((Vec3::new(p.x, 0.0, p.z).length() - 2.0).abs() < 1e-5);
            assert_eq!(p.y, 1.5);
        }
    }

    #[test]
    fn test_uniform_layout() {
        // Two blocks of four vec4s each.
        assert_eq!(std::mem::size_of::<GpuLights>(), 128);
        let lights = GpuLights::at_time(1.0);
        assert_eq!(lights.point.constant, 1.0);
        assert_eq!(lights.point.linear, 0.09);
        assert_eq!(lights.point.quadratic, 0.032);
        assert_eq!(lights.directional.direction, [-0.2, -1.0, -0.3]);
    }
}
