use crate::domain::{Instruction, RuleError, RuleTable};

use super::RuleProducer;

/// Deterministic built-in rule producer: a standard biped template plus
/// gene-triggered rewrites. Rewrites apply in a fixed order (neck, wings,
/// legs, eyes, spikes, head rescale); downstream code treats the result
/// as already resolved.
pub struct MockProducer;

/// Gene tags that trigger each rewrite. Tags are matched exactly; a
/// rewrite fires if any of its tags is present.
const NECK_GENES: &[&str] = &["long_neck", "elongated_neck", "frilled_neck"];
const WING_GENES: &[&str] = &["wings", "bat_wings", "feathered_wings", "insect_wings"];
const LEG_GENES: &[&str] = &["multi_legs", "long_legs", "segmented_legs", "arachnid_body", "insectoid"];
const EYE_GENES: &[&str] = &["laser_eyes", "glowing_eyes", "multiple_eyes"];
const SPIKE_GENES: &[&str] = &["spikes", "spiked_carapace", "spiny_ridge", "spiked_tail"];
const BIG_HEAD_GENES: &[&str] = &["big_head", "bulbous_growths"];

fn has_any(genes: &[String], tags: &[&str]) -> bool {
    genes.iter().any(|g| tags.contains(&g.as_str()))
}

impl RuleProducer for MockProducer {
    fn generate(&self, genes: &[String]) -> Result<RuleTable, RuleError> {
        let mut table = biped_template();

        if has_any(genes, NECK_GENES) {
            apply_long_neck(&mut table);
        }
        if has_any(genes, WING_GENES) {
            apply_wings(&mut table);
        }
        if has_any(genes, LEG_GENES) {
            apply_extra_legs(&mut table);
        }
        if has_any(genes, EYE_GENES) {
            apply_laser_eyes(&mut table);
        }
        if has_any(genes, SPIKE_GENES) {
            apply_spikes(&mut table);
        }
        if has_any(genes, BIG_HEAD_GENES) {
            apply_big_head(&mut table);
        }

        Ok(table)
    }
}

/// Base creature: torso with head, two arm chains, two leg chains.
/// Positions are relative to the parent, parts roughly unit length.
fn biped_template() -> RuleTable {
    let mut table = RuleTable::new();

    table.set(
        "root",
        vec![Instruction::new("torso", [0.0, 1.5, 0.0]).scaled([1.0, 1.5, 1.0])],
    );
    table.set(
        "torso",
        vec![
            Instruction::new("head", [0.0, 1.0, 0.0]).scaled([0.8, 0.8, 0.8]),
            Instruction::new("arm", [0.6, 0.5, 0.0]).rotated([0.0, 0.0, -30.0]),
            Instruction::new("arm", [-0.6, 0.5, 0.0]).rotated([0.0, 0.0, 30.0]),
            Instruction::new("leg", [0.4, -0.8, 0.0]),
            Instruction::new("leg", [-0.4, -0.8, 0.0]),
        ],
    );
    table.set("arm", vec![Instruction::new("forearm", [0.0, -0.8, 0.0])]);
    table.set("forearm", vec![Instruction::new("hand", [0.0, -0.8, 0.0])]);
    table.set("leg", vec![Instruction::new("calf", [0.0, -0.8, 0.0])]);
    table.set(
        "calf",
        vec![Instruction::new("foot", [0.0, -0.8, 0.0]).rotated([10.0, 0.0, 0.0])],
    );
    // Terminal unless a gene rewrite adds to them
    table.set("head", vec![]);
    table.set("hand", vec![]);
    table.set("foot", vec![]);

    table
}

/// Move the head off the torso onto a three-segment neck chain.
fn apply_long_neck(table: &mut RuleTable) {
    table.retain_children("torso", "head");
    table.push("torso", Instruction::new("neck_base", [0.0, 1.0, 0.0]));

    table.set(
        "neck_base",
        vec![Instruction::new("neck_segment", [0.0, 0.5, 0.0]).rotated([10.0, 0.0, 0.0])],
    );
    table.set(
        "neck_segment",
        vec![Instruction::new("neck_top", [0.0, 0.5, 0.0]).rotated([10.0, 0.0, 0.0])],
    );
    table.set(
        "neck_top",
        vec![Instruction::new("head", [0.0, 0.5, 0.0]).rotated([-20.0, 0.0, 0.0])],
    );
}

/// Symmetric wing pair on the upper back, each with a tip segment.
fn apply_wings(table: &mut RuleTable) {
    table.push(
        "torso",
        Instruction::new("wing", [0.5, 0.8, -0.3]).rotated([0.0, 30.0, -30.0]),
    );
    table.push(
        "torso",
        Instruction::new("wing", [-0.5, 0.8, -0.3]).rotated([0.0, -30.0, 30.0]),
    );

    table.set(
        "wing",
        vec![Instruction::new("wing_tip", [1.5, 0.0, 0.0]).scaled([0.8, 0.8, 0.8])],
    );
    table.set("wing_tip", vec![]);
}

/// A second ring of legs fore and aft of the hips.
fn apply_extra_legs(table: &mut RuleTable) {
    table.push("torso", Instruction::new("leg", [0.4, -0.8, 0.5]).rotated([-20.0, 0.0, 0.0]));
    table.push("torso", Instruction::new("leg", [-0.4, -0.8, 0.5]).rotated([-20.0, 0.0, 0.0]));
    table.push("torso", Instruction::new("leg", [0.4, -0.8, -0.5]).rotated([20.0, 0.0, 0.0]));
    table.push("torso", Instruction::new("leg", [-0.4, -0.8, -0.5]).rotated([20.0, 0.0, 0.0]));
}

/// Eye cylinders on the front of the head.
fn apply_laser_eyes(table: &mut RuleTable) {
    table.push(
        "head",
        Instruction::new("eye_laser", [0.2, 0.1, 0.4]).scaled([0.2, 0.2, 0.5]),
    );
    table.push(
        "head",
        Instruction::new("eye_laser", [-0.2, 0.1, 0.4]).scaled([0.2, 0.2, 0.5]),
    );
    table.set("eye_laser", vec![]);
}

/// A dorsal row of three spikes.
fn apply_spikes(table: &mut RuleTable) {
    table.push("torso", Instruction::new("spike", [0.0, 1.2, -0.6]).rotated([-45.0, 0.0, 0.0]));
    table.push("torso", Instruction::new("spike", [0.0, 0.6, -0.6]).rotated([-45.0, 0.0, 0.0]));
    table.push("torso", Instruction::new("spike", [0.0, 0.0, -0.6]).rotated([-45.0, 0.0, 0.0]));
    table.set("spike", vec![]);
}

/// Rescale every instruction that spawns a head, wherever it is attached
/// (torso or neck top).
fn apply_big_head(table: &mut RuleTable) {
    for (_, rule) in table.rules_mut() {
        for instruction in rule.iter_mut() {
            if instruction.symbol == "head" {
                instruction.scl = [2.0, 2.0, 2.0];
            }
        }
    }
}
