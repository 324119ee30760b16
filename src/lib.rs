// Domain layer - grammar expansion, flattening, SDF evaluation
pub mod domain;

// Application layer - camera and generation coordination
pub mod application;

// Rule producer boundary - genes in, rule tables out
pub mod producer;

// Infrastructure layer - UI, rendering, input
pub mod input;
pub mod rendering;
pub mod ui;

// Re-exports for convenience
pub use application::{AppState, OrbitCamera};
pub use domain::{Primitive, RuleTable, SceneBuffer, ShapeKind, StructureTree, expand, flatten};
pub use producer::{MockProducer, RuleProducer};
pub use ui::Button;
