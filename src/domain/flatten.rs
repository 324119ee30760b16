use macroquad::math::{Mat4, Quat, Vec3};

use super::classify::classify;
use super::grammar::{NodeId, StructureTree};
use super::rules::ShapeParams;
use super::sdf::{DEFAULT_BLEND, Primitive, ShapeKind};

/// Hard capacity contract with the evaluator. Expansion past this bound
/// drops the excess in traversal order; the earliest-discovered
/// primitives are kept.
pub const MAX_PRIMITIVES: usize = 64;

/// Floor for size components; degenerate (zero or negative) sizes clamp
/// here instead of reaching the field functions.
pub const SIZE_EPS: f32 = 1e-4;

/// Fallback recipe for a node that carries explicit shape params but
/// classifies as unknown.
const PARAMS_ONLY_KIND: ShapeKind = ShapeKind::Sphere;
const PARAMS_ONLY_SIZE: Vec3 = Vec3::new(0.5, 0.5, 0.5);
const PARAMS_ONLY_COLOR: Vec3 = Vec3::new(0.2, 0.8, 0.5);

/// Flatten a structure tree into a bounded, ordered primitive list.
///
/// Pre-order DFS carrying an accumulated world matrix; the root has no
/// transform and uses identity. Traversal order is the sole source of
/// list ordering.
pub fn flatten(tree: &StructureTree) -> Vec<Primitive> {
    let mut primitives = Vec::new();
    if !tree.is_empty() {
        flatten_node(tree, StructureTree::ROOT, Mat4::IDENTITY, &mut primitives);
    }
    primitives
}

fn flatten_node(tree: &StructureTree, id: NodeId, parent: Mat4, out: &mut Vec<Primitive>) {
    let node = tree.node(id);

    let local = node
        .transform
        .as_ref()
        .map(|t| t.local_matrix())
        .unwrap_or(Mat4::IDENTITY);
    let world = parent * local;

    // Quaternion decomposition avoids gimbal ambiguity downstream. A
    // zero-scale matrix decomposes to a NaN rotation; fall back to
    // identity so a degenerate part cannot poison the field.
    let (scale, rotation, position) = world.to_scale_rotation_translation();
    let rotation = if rotation.is_finite() && rotation.length_squared() > 1e-6 {
        rotation.normalize()
    } else {
        Quat::IDENTITY
    };

    if out.len() < MAX_PRIMITIVES {
        if let Some(primitive) = build_primitive(node.params.as_ref(), &node.symbol, scale, rotation, position) {
            out.push(primitive);
        }
    }

    for &child in &node.children {
        flatten_node(tree, child, world, out);
    }
}

/// Resolve a node into a primitive: explicit shape params win over the
/// symbol classification; root and unrecognized symbols without params
/// contribute nothing.
fn build_primitive(
    params: Option<&ShapeParams>,
    symbol: &str,
    scale: Vec3,
    rotation: Quat,
    position: Vec3,
) -> Option<Primitive> {
    let template = classify(symbol).template();

    let (kind, base_size, color, blend) = match params {
        Some(p) => {
            let kind = p
                .shape
                .or(template.map(|t| t.kind))
                .unwrap_or(PARAMS_ONLY_KIND);
            let size = p
                .size
                .map(Vec3::from)
                .or(template.map(|t| t.size))
                .unwrap_or(PARAMS_ONLY_SIZE);
            let color = p
                .color
                .map(Vec3::from)
                .or(template.map(|t| t.color))
                .unwrap_or(PARAMS_ONLY_COLOR);
            (kind, size, color, p.blend.unwrap_or(DEFAULT_BLEND))
        }
        None => {
            let t = template?;
            (t.kind, t.size, t.color, DEFAULT_BLEND)
        }
    };

    let size = (base_size * scale).abs().max(Vec3::splat(SIZE_EPS));

    Some(Primitive {
        kind,
        position,
        rotation,
        size,
        color: color.clamp(Vec3::ZERO, Vec3::ONE),
        blend: blend.clamp(0.0, 1.0),
    })
}
