mod classify;
mod flatten;
mod genes;
mod grammar;
mod rules;
pub mod sdf;

pub use classify::{PartCategory, ShapeTemplate, classify};
pub use flatten::{MAX_PRIMITIVES, SIZE_EPS, flatten};
pub use genes::{GENE_LIST, GENE_PRESETS, random_genes};
pub use grammar::{
    MAX_DEPTH, NodeId, PartTransform, ROOT_SYMBOL, StructureNode, StructureTree, expand,
};
pub use rules::{
    Instruction, RuleError, RuleTable, ShapeParams, fallback_table, ingest, ingest_value,
};
pub use sdf::{
    Hit, Primitive, Ray, SceneBuffer, ShapeKind, blend_color, estimate_normal, map, smooth_min,
    sphere_trace,
};
