use macroquad::math::{EulerRot, Mat4, Quat, Vec3};

use super::rules::{Instruction, RuleTable, ShapeParams};

/// Recursion ceiling for expansion. This is the sole termination
/// guarantee: self-referential rules are legal and stop here.
pub const MAX_DEPTH: u32 = 10;

/// The designated start symbol for every expansion.
pub const ROOT_SYMBOL: &str = "root";

pub type NodeId = usize;

/// Local placement of a node relative to its parent.
#[derive(Debug, Clone, PartialEq)]
pub struct PartTransform {
    pub pos: Vec3,
    pub rot_degrees: Vec3,
    pub scl: Vec3,
}

impl PartTransform {
    pub fn from_instruction(instruction: &Instruction) -> Self {
        Self {
            pos: instruction.position(),
            rot_degrees: instruction.rotation_degrees(),
            scl: instruction.scale(),
        }
    }

    /// Local matrix composed as translate * rotate * scale.
    /// Rotation is Euler XYZ in degrees.
    pub fn local_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rot_degrees.x.to_radians(),
            self.rot_degrees.y.to_radians(),
            self.rot_degrees.z.to_radians(),
        );
        Mat4::from_scale_rotation_translation(self.scl, rotation, self.pos)
    }
}

/// One node of the expanded hierarchy. The synthetic root carries no
/// transform; every other node's transform comes from the instruction
/// that spawned it.
#[derive(Debug, Clone)]
pub struct StructureNode {
    pub symbol: String,
    pub transform: Option<PartTransform>,
    pub params: Option<ShapeParams>,
    pub children: Vec<NodeId>,
}

/// Expanded structure tree. Nodes live in one arena, indexed by creation
/// order (pre-order), with the root at index 0. The tree is rebuilt
/// wholesale on every generation.
#[derive(Debug, Clone, Default)]
pub struct StructureTree {
    nodes: Vec<StructureNode>,
}

impl StructureTree {
    pub const ROOT: NodeId = 0;

    pub fn node(&self, id: NodeId) -> &StructureNode {
        &self.nodes[id]
    }

    pub fn root(&self) -> &StructureNode {
        &self.nodes[Self::ROOT]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Expand a rule table into a structure tree starting at `root_symbol`.
///
/// A symbol with no rule entry is terminal; there is no unknown-symbol
/// error. Sibling order follows instruction order, which later decides
/// primitive ordering and drop priority under the capacity bound.
pub fn expand(table: &RuleTable, root_symbol: &str) -> StructureTree {
    let mut tree = StructureTree::default();
    expand_into(&mut tree, table, root_symbol, 0);
    tree
}

fn expand_into(tree: &mut StructureTree, table: &RuleTable, symbol: &str, depth: u32) -> NodeId {
    let id = tree.nodes.len();
    tree.nodes.push(StructureNode {
        symbol: symbol.to_string(),
        transform: None,
        params: None,
        children: Vec::new(),
    });

    if depth >= MAX_DEPTH {
        return id;
    }

    if let Some(rule) = table.get(symbol) {
        for instruction in rule {
            let child = expand_into(tree, table, &instruction.symbol, depth + 1);
            tree.nodes[child].transform = Some(PartTransform::from_instruction(instruction));
            tree.nodes[child].params = instruction.params.clone();
            tree.nodes[id].children.push(child);
        }
    }

    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rules::fallback_table;

    fn depth_of(tree: &StructureTree, id: NodeId) -> u32 {
        tree.node(id)
            .children
            .iter()
            .map(|&c| depth_of(tree, c) + 1)
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn test_expand_fallback_table() {
        let tree = expand(&fallback_table(), ROOT_SYMBOL);
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.root().symbol, "root");
        assert!(tree.root().transform.is_none());

        let torso = tree.node(tree.root().children[0]);
        assert_eq!(torso.symbol, "torso");
        assert_eq!(torso.transform.as_ref().unwrap().pos, Vec3::new(0.0, 1.5, 0.0));
    }

    #[test]
    fn test_unknown_symbol_is_terminal() {
        let tree = expand(&RuleTable::new(), "gargoyle");
        assert_eq!(tree.len(), 1);
        assert!(tree.root().children.is_empty());
    }

    #[test]
    fn test_self_referential_rule_terminates_at_max_depth() {
        let mut table = RuleTable::new();
        table.set("worm", vec![Instruction::new("worm", [0.0, 0.5, 0.0])]);

        let tree = expand(&table, "worm");
        // One node per depth level: root at 0 through MAX_DEPTH
        assert_eq!(tree.len(), MAX_DEPTH as usize + 1);
        assert_eq!(depth_of(&tree, StructureTree::ROOT), MAX_DEPTH);
    }

    #[test]
    fn test_branching_cycle_terminates() {
        let mut table = RuleTable::new();
        table.set(
            "a",
            vec![
                Instruction::new("b", [1.0, 0.0, 0.0]),
                Instruction::new("b", [-1.0, 0.0, 0.0]),
            ],
        );
        table.set("b", vec![Instruction::new("a", [0.0, 1.0, 0.0])]);

        let tree = expand(&table, "a");
        assert!(depth_of(&tree, StructureTree::ROOT) <= MAX_DEPTH);
    }

    #[test]
    fn test_instruction_count_and_order_fidelity() {
        let mut table = RuleTable::new();
        table.set(
            "torso",
            vec![
                Instruction::new("head", [0.0, 1.0, 0.0]).scaled([0.8, 0.8, 0.8]),
                Instruction::new("arm", [0.6, 0.5, 0.0]).rotated([0.0, 0.0, -30.0]),
                Instruction::new("arm", [-0.6, 0.5, 0.0]).rotated([0.0, 0.0, 30.0]),
            ],
        );

        let tree = expand(&table, "torso");
        let children = &tree.root().children;
        assert_eq!(children.len(), 3);

        let symbols: Vec<&str> = children.iter().map(|&c| tree.node(c).symbol.as_str()).collect();
        assert_eq!(symbols, ["head", "arm", "arm"]);

        let head = tree.node(children[0]).transform.as_ref().unwrap();
        assert_eq!(head.pos, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(head.scl, Vec3::new(0.8, 0.8, 0.8));
        assert_eq!(head.rot_degrees, Vec3::ZERO);

        let right_arm = tree.node(children[1]).transform.as_ref().unwrap();
        assert_eq!(right_arm.rot_degrees, Vec3::new(0.0, 0.0, -30.0));
    }

    #[test]
    fn test_params_attach_to_child_node() {
        use crate::domain::rules::ShapeParams;
        use crate::domain::sdf::ShapeKind;

        let mut table = RuleTable::new();
        table.set(
            "root",
            vec![Instruction::new("blob", [0.0, 1.0, 0.0]).with_params(ShapeParams {
                shape: Some(ShapeKind::Sphere),
                size: Some([0.4, 0.0, 0.0]),
                color: None,
                blend: Some(0.6),
            })],
        );

        let tree = expand(&table, ROOT_SYMBOL);
        let blob = tree.node(tree.root().children[0]);
        assert_eq!(blob.params.as_ref().unwrap().shape, Some(ShapeKind::Sphere));
    }
}
