//! Signed-distance-field scene evaluation and sphere tracing.
//!
//! This is the per-pixel kernel: every covered pixel runs `sphere_trace`
//! (which calls `map` once per step), then one `estimate_normal` and one
//! `blend_color` on a hit. Everything here is arithmetic-safe: a bad
//! primitive degrades visually instead of aborting the frame.

use macroquad::math::{Quat, Vec2, Vec3, vec2, vec3};
use serde::Deserialize;

/// Raymarch step budget per ray.
pub const MAX_STEPS: u32 = 100;
/// Far range; also the sentinel distance of an empty scene.
pub const MAX_DIST: f32 = 100.0;
/// Surface hit threshold.
pub const SURF_DIST: f32 = 1e-3;
/// Finite-difference epsilon for normal estimation.
pub const NORMAL_EPS: f32 = 1e-3;
/// Global smooth-minimum blend width (metaball fusion).
pub const SMOOTH_K: f32 = 0.4;
/// Fixed rounding radius applied to box primitives for seamless blending.
pub const BOX_ROUNDING: f32 = 0.1;
/// Default per-primitive blend factor carried in the data model.
pub const DEFAULT_BLEND: f32 = 0.4;

const WEIGHT_EPS: f32 = 1e-3;
const COLOR_SHARPNESS: i32 = 2;

/// Primitive shape vocabulary. `size` semantics are kind-dependent:
/// sphere uses `size.x` as radius; box uses all three as half-extents;
/// capsule and cylinder use `size.x` radius and `size.y` height along
/// the local Y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Sphere,
    Box,
    Capsule,
    Cylinder,
}

/// A flattened, world-space shape ready for field evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    pub kind: ShapeKind,
    pub position: Vec3,
    pub rotation: Quat,
    pub size: Vec3,
    pub color: Vec3,
    pub blend: f32,
}

impl Primitive {
    /// Transform a world-space point into this primitive's local frame.
    #[inline]
    fn local_point(&self, p: Vec3) -> Vec3 {
        self.rotation.inverse() * (p - self.position)
    }

    /// Signed distance from `p` to this primitive's surface.
    #[inline]
    pub fn distance(&self, p: Vec3) -> f32 {
        let q = self.local_point(p);
        match self.kind {
            ShapeKind::Sphere => sd_sphere(q, self.size.x),
            ShapeKind::Box => sd_round_box(q, self.size, BOX_ROUNDING),
            ShapeKind::Capsule => sd_capsule(q, self.size.y, self.size.x),
            ShapeKind::Cylinder => sd_cylinder(q, self.size.y, self.size.x),
        }
    }
}

#[inline]
fn sd_sphere(p: Vec3, radius: f32) -> f32 {
    p.length() - radius
}

#[inline]
fn sd_round_box(p: Vec3, half_extents: Vec3, rounding: f32) -> f32 {
    let q = p.abs() - half_extents;
    q.max(Vec3::ZERO).length() + q.x.max(q.y.max(q.z)).min(0.0) - rounding
}

#[inline]
fn sd_capsule(p: Vec3, height: f32, radius: f32) -> f32 {
    let y = p.y - p.y.clamp(-height * 0.5, height * 0.5);
    vec3(p.x, y, p.z).length() - radius
}

#[inline]
fn sd_cylinder(p: Vec3, height: f32, radius: f32) -> f32 {
    let d = vec2(vec2(p.x, p.z).length(), p.y).abs() - vec2(radius, height * 0.5);
    d.x.max(d.y).min(0.0) + d.max(Vec2::ZERO).length()
}

/// Polynomial smooth minimum: continuous approximation of `min(a, b)`
/// with blend width `k`. Degenerate `k` falls back to the exact minimum.
#[inline]
pub fn smooth_min(a: f32, b: f32, k: f32) -> f32 {
    if k <= f32::EPSILON {
        return a.min(b);
    }
    let h = (0.5 + 0.5 * (b - a) / k).clamp(0.0, 1.0);
    // mix(b, a, h) - k * h * (1 - h)
    b + (a - b) * h - k * h * (1.0 - h)
}

/// The scene field: smooth-minimum composition of all primitive distances.
/// An empty list evaluates to the `MAX_DIST` sentinel everywhere.
#[inline]
pub fn map(p: Vec3, primitives: &[Primitive]) -> f32 {
    let mut d = MAX_DIST;
    for (i, primitive) in primitives.iter().enumerate() {
        let dist = primitive.distance(p);
        d = if i == 0 { dist } else { smooth_min(d, dist, SMOOTH_K) };
    }
    d
}

/// A camera ray; `dir` is expected to be unit length.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

/// A resolved surface intersection.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub point: Vec3,
    pub distance: f32,
}

/// Sphere-trace a ray against the scene field. Returns `None` on a miss
/// (step budget exhausted, range exceeded, or an empty scene).
pub fn sphere_trace(ray: &Ray, primitives: &[Primitive]) -> Option<Hit> {
    if primitives.is_empty() {
        return None;
    }

    let mut t = 0.0;
    for _ in 0..MAX_STEPS {
        let p = ray.origin + ray.dir * t;
        let d = map(p, primitives);
        if d < SURF_DIST {
            return Some(Hit { point: p, distance: t });
        }
        t += d;
        if t > MAX_DIST {
            return None;
        }
    }
    None
}

/// Forward-difference gradient of the field, normalized. Guaranteed
/// finite: a degenerate gradient falls back to +Y.
pub fn estimate_normal(p: Vec3, primitives: &[Primitive]) -> Vec3 {
    let d = map(p, primitives);
    let e = NORMAL_EPS;
    let n = vec3(
        d - map(p - vec3(e, 0.0, 0.0), primitives),
        d - map(p - vec3(0.0, e, 0.0), primitives),
        d - map(p - vec3(0.0, 0.0, e), primitives),
    );
    n.try_normalize().unwrap_or(Vec3::Y)
}

/// Inverse-distance-weighted blend of all primitive colors at a hit
/// point. Deliberately the expensive pass: run once per resolved hit,
/// never per raymarch step.
pub fn blend_color(p: Vec3, primitives: &[Primitive]) -> Vec3 {
    let mut total = Vec3::ZERO;
    let mut weight = 0.0;
    for primitive in primitives {
        let dist = primitive.distance(p);
        let w = (1.0 / (dist.abs() + WEIGHT_EPS)).powi(COLOR_SHARPNESS);
        total += primitive.color * w;
        weight += w;
    }
    total / weight.max(WEIGHT_EPS)
}

/// Read-only snapshot of one generation's primitives, published whole.
/// In-flight frames always see either the previous or the next complete
/// scene, never a partially written one.
#[derive(Debug, Clone, Default)]
pub struct SceneBuffer {
    pub primitives: Vec<Primitive>,
}

impl SceneBuffer {
    pub fn new(primitives: Vec<Primitive>) -> Self {
        Self { primitives }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere_at(position: Vec3, radius: f32) -> Primitive {
        Primitive {
            kind: ShapeKind::Sphere,
            position,
            rotation: Quat::IDENTITY,
            size: vec3(radius, radius, radius),
            color: vec3(0.5, 0.5, 0.5),
            blend: DEFAULT_BLEND,
        }
    }

    #[test]
    fn test_empty_scene_is_sentinel_everywhere() {
        assert_eq!(map(Vec3::ZERO, &[]), MAX_DIST);
        assert_eq!(map(vec3(5.0, -3.0, 17.0), &[]), MAX_DIST);
    }

    #[test]
    fn test_empty_scene_rays_miss() {
        let ray = Ray { origin: vec3(0.0, 0.0, -10.0), dir: Vec3::Z };
        assert!(sphere_trace(&ray, &[]).is_none());
    }

    #[test]
    fn test_single_sphere_distance() {
        let prims = [sphere_at(Vec3::ZERO, 1.0)];
        assert!((map(vec3(3.0, 0.0, 0.0), &prims) - 2.0).abs() < 1e-5);
        assert!(map(Vec3::ZERO, &prims) < 0.0);
    }

    #[test]
    fn test_sphere_trace_hits_sphere() {
        let prims = [sphere_at(Vec3::ZERO, 1.0)];
        let ray = Ray { origin: vec3(0.0, 0.0, -10.0), dir: Vec3::Z };
        let hit = sphere_trace(&ray, &prims).expect("ray through center must hit");
        assert!((hit.distance - 9.0).abs() < 0.01);
    }

    #[test]
    fn test_sphere_trace_misses_off_axis_ray() {
        let prims = [sphere_at(Vec3::ZERO, 1.0)];
        let ray = Ray { origin: vec3(0.0, 50.0, -10.0), dir: Vec3::Z };
        assert!(sphere_trace(&ray, &prims).is_none());
    }

    #[test]
    fn test_smooth_min_bounded_by_min() {
        let cases = [(0.5, 0.7), (0.7, 0.5), (-0.2, 0.3), (1.0, 1.0)];
        for (a, b) in cases {
            assert!(smooth_min(a, b, SMOOTH_K) <= a.min(b) + 1e-6);
        }
    }

    #[test]
    fn test_smooth_min_converges_to_min() {
        let (a, b) = (0.3, 0.8);
        assert!((smooth_min(a, b, 1e-9) - a.min(b)).abs() < 1e-6);
        assert_eq!(smooth_min(a, b, 0.0), a.min(b));
    }

    #[test]
    fn test_rotated_box_distance() {
        // Box rotated 90 degrees about Y is symmetric under the swap of
        // its x and z half-extents.
        let half = vec3(1.0, 0.5, 0.25);
        let upright = Primitive {
            kind: ShapeKind::Box,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            size: half,
            color: Vec3::ONE,
            blend: DEFAULT_BLEND,
        };
        let turned = Primitive {
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            ..upright
        };

        let p = vec3(2.0, 0.0, 0.0);
        let equivalent = vec3(0.0, 0.0, 2.0);
        assert!((turned.distance(p) - upright.distance(equivalent)).abs() < 1e-4);
    }

    #[test]
    fn test_normal_on_sphere_surface_is_radial() {
        let prims = [sphere_at(Vec3::ZERO, 1.0)];
        let n = estimate_normal(vec3(1.0, 0.0, 0.0), &prims);
        assert!(n.is_finite());
        assert!((n.length() - 1.0).abs() < 1e-4);
        assert!(n.x > 0.99);
    }

    #[test]
    fn test_normal_finite_for_degenerate_field() {
        // All-zero gradient (empty scene is constant) must not NaN out.
        let n = estimate_normal(Vec3::ZERO, &[]);
        assert!(n.is_finite());
        assert_eq!(n, Vec3::Y);
    }

    #[test]
    fn test_blend_color_weights_toward_closest() {
        let mut red = sphere_at(vec3(-2.0, 0.0, 0.0), 1.0);
        red.color = vec3(1.0, 0.0, 0.0);
        let mut blue = sphere_at(vec3(2.0, 0.0, 0.0), 1.0);
        blue.color = vec3(0.0, 0.0, 1.0);

        let near_red = blend_color(vec3(-1.0, 0.0, 0.0), &[red, blue]);
        assert!(near_red.x > near_red.z);

        let midpoint = blend_color(Vec3::ZERO, &[red, blue]);
        assert!((midpoint.x - midpoint.z).abs() < 1e-4);
    }

    #[test]
    fn test_blend_color_safe_on_empty_scene() {
        assert!(blend_color(Vec3::ZERO, &[]).is_finite());
    }

    #[test]
    fn test_zero_size_primitive_is_finite() {
        let degenerate = Primitive {
            kind: ShapeKind::Cylinder,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            size: Vec3::ZERO,
            color: Vec3::ONE,
            blend: DEFAULT_BLEND,
        };
        let d = map(vec3(0.5, 0.5, 0.5), &[degenerate]);
        assert!(d.is_finite());
    }
}
