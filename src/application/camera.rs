use macroquad::math::{Vec3, vec3};

use crate::domain::Ray;

/// Vertical field of view in radians.
const FOV_Y: f32 = std::f32::consts::FRAC_PI_4;

const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 60.0;
const MIN_PITCH: f32 = -1.5;
const MAX_PITCH: f32 = 1.5;

/// Orbit camera circling a fixed target, used to build per-pixel rays
/// for the raymarcher.
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    drag_anchor: Option<(f32, f32)>,
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self {
            target: vec3(0.0, 2.0, 0.0),
            yaw: 0.8,
            pitch: 0.45,
            distance: 12.0,
            drag_anchor: None,
        }
    }

    /// World-space eye position on the orbit sphere.
    pub fn eye(&self) -> Vec3 {
        let offset = vec3(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        ) * self.distance;
        self.target + offset
    }

    /// Rotate by a mouse delta; pitch is clamped short of the poles.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * 0.01;
        self.pitch = (self.pitch + dy * 0.01).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Dolly toward the target by factor
    pub fn zoom_in(&mut self, factor: f32) {
        self.distance = (self.distance / factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Dolly away from the target by factor
    pub fn zoom_out(&mut self, factor: f32) {
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Reset camera to the default orbit
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Begin or continue a drag; returns the delta since the last call.
    pub fn drag_to(&mut self, mouse_pos: (f32, f32)) -> (f32, f32) {
        let delta = match self.drag_anchor {
            Some(last) => (mouse_pos.0 - last.0, mouse_pos.1 - last.1),
            None => (0.0, 0.0),
        };
        self.drag_anchor = Some(mouse_pos);
        delta
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// True while a drag is active (anchor set by `drag_to`).
    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Orthonormal view basis: (right, up, forward).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.eye()).normalize();
        let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);
        (right, up, forward)
    }

    /// Ray through pixel center (px, py) of a width x height image.
    /// Row 0 is the top of the image.
    pub fn ray(&self, px: f32, py: f32, width: f32, height: f32) -> Ray {
        let (right, up, forward) = self.basis();
        let aspect = width / height.max(1.0);
        let half_h = (FOV_Y * 0.5).tan();
        let half_w = half_h * aspect;

        let x = (2.0 * px / width - 1.0) * half_w;
        let y = (1.0 - 2.0 * py / height) * half_h;

        Ray {
            origin: self.eye(),
            dir: (forward + right * x + up * y).normalize(),
        }
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eye_sits_at_orbit_distance() {
        let camera = OrbitCamera::new();
        let d = (camera.eye() - camera.target).length();
        assert!((d - camera.distance).abs() < 1e-4);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = OrbitCamera::new();
        let ray = camera.ray(160.0, 120.0, 320.0, 240.0);
        let to_target = (camera.target - ray.origin).normalize();
        assert!(ray.dir.dot(to_target) > 0.999);
    }

    #[test]
    fn test_pitch_clamps() {
        let mut camera = OrbitCamera::new();
        camera.orbit(0.0, 10_000.0);
        assert!(camera.pitch <= MAX_PITCH);
        camera.orbit(0.0, -100_000.0);
        assert!(camera.pitch >= MIN_PITCH);
    }

    #[test]
    fn test_zoom_clamps() {
        let mut camera = OrbitCamera::new();
        camera.zoom_in(1e6);
        assert!(camera.distance >= MIN_DISTANCE);
        camera.zoom_out(1e9);
        assert!(camera.distance <= MAX_DISTANCE);
    }

    #[test]
    fn test_drag_deltas() {
        let mut camera = OrbitCamera::new();
        assert_eq!(camera.drag_to((10.0, 10.0)), (0.0, 0.0));
        assert_eq!(camera.drag_to((15.0, 7.0)), (5.0, -3.0));
        camera.end_drag();
        assert_eq!(camera.drag_to((100.0, 100.0)), (0.0, 0.0));
    }
}
