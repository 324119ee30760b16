use std::collections::HashMap;

use macroquad::math::Vec3;
use serde::Deserialize;
use thiserror::Error;

use super::sdf::ShapeKind;

/// Errors raised at the rule-producer boundary.
/// A malformed document is never fatal; callers substitute the fallback table.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("malformed rule document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("rule producer failed: {0}")]
    Producer(String),
}

/// Per-part visual override carried on an instruction.
/// Any field may be omitted; missing fields fall back to the symbol's
/// classification template.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ShapeParams {
    #[serde(default)]
    pub shape: Option<ShapeKind>,
    #[serde(default)]
    pub size: Option<[f32; 3]>,
    #[serde(default)]
    pub color: Option<[f32; 3]>,
    #[serde(default)]
    pub blend: Option<f32>,
}

/// One edge in the rewrite table: which child symbol to spawn and where
/// to place it relative to the parent.
///
/// Wire names follow the producer document schema (`pos`/`rot`/`scl`/
/// `params`); the long forms are accepted as aliases. Unknown extra
/// fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Instruction {
    #[serde(alias = "childSymbol")]
    pub symbol: String,

    /// Position relative to the parent.
    #[serde(default, alias = "position")]
    pub pos: [f32; 3],

    /// Euler rotation in degrees, XYZ order.
    #[serde(default, alias = "rotation")]
    pub rot: [f32; 3],

    /// Scale relative to the parent.
    #[serde(default = "unit_scale", alias = "scale")]
    pub scl: [f32; 3],

    #[serde(default, alias = "shapeParams")]
    pub params: Option<ShapeParams>,
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Instruction {
    /// New instruction at a relative position, with default rotation and scale.
    pub fn new(symbol: impl Into<String>, pos: [f32; 3]) -> Self {
        Self {
            symbol: symbol.into(),
            pos,
            rot: [0.0, 0.0, 0.0],
            scl: unit_scale(),
            params: None,
        }
    }

    pub fn rotated(mut self, rot: [f32; 3]) -> Self {
        self.rot = rot;
        self
    }

    pub fn scaled(mut self, scl: [f32; 3]) -> Self {
        self.scl = scl;
        self
    }

    pub fn with_params(mut self, params: ShapeParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from(self.pos)
    }

    pub fn rotation_degrees(&self) -> Vec3 {
        Vec3::from(self.rot)
    }

    pub fn scale(&self) -> Vec3 {
        Vec3::from(self.scl)
    }
}

/// Rewrite grammar: symbol -> ordered successor instructions.
/// Symbols with no entry are terminal. The table is read-only for the
/// duration of one expansion pass.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RuleTable(HashMap<String, Vec<Instruction>>);

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookup by exact symbol string.
    pub fn get(&self, symbol: &str) -> Option<&[Instruction]> {
        self.0.get(symbol).map(Vec::as_slice)
    }

    /// Replace (or create) the rule for a symbol.
    pub fn set(&mut self, symbol: impl Into<String>, instructions: Vec<Instruction>) {
        self.0.insert(symbol.into(), instructions);
    }

    /// Append an instruction to a symbol's rule, creating the rule if absent.
    pub fn push(&mut self, symbol: &str, instruction: Instruction) {
        self.0.entry(symbol.to_string()).or_default().push(instruction);
    }

    /// Remove every instruction spawning `child` from `symbol`'s rule.
    pub fn retain_children(&mut self, symbol: &str, child: &str) {
        if let Some(rule) = self.0.get_mut(symbol) {
            rule.retain(|i| i.symbol != child);
        }
    }

    /// Mutable access to every rule, for table-wide rewrites.
    pub fn rules_mut(&mut self) -> impl Iterator<Item = (&String, &mut Vec<Instruction>)> {
        self.0.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Minimal built-in table used whenever the producer fails or hands back
/// a document that does not validate: a torso with a head on top.
pub fn fallback_table() -> RuleTable {
    let mut table = RuleTable::new();
    table.set("root", vec![Instruction::new("torso", [0.0, 1.5, 0.0])]);
    table.set("torso", vec![Instruction::new("head", [0.0, 1.0, 0.0])]);
    table
}

/// Validate a producer document. The whole document is rejected if any
/// rule value is not an array or any instruction lacks its child symbol.
pub fn ingest_value(value: serde_json::Value) -> Result<RuleTable, RuleError> {
    Ok(serde_json::from_value(value)?)
}

/// Validate a raw JSON document (see [`ingest_value`]).
pub fn ingest(text: &str) -> Result<RuleTable, RuleError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ingest_minimal_document() {
        let table = ingest(r#"{ "root": [ { "symbol": "torso" } ] }"#).unwrap();
        let rule = table.get("root").unwrap();
        assert_eq!(rule.len(), 1);
        assert_eq!(rule[0].symbol, "torso");
        // Omitted fields take documented defaults
        assert_eq!(rule[0].pos, [0.0, 0.0, 0.0]);
        assert_eq!(rule[0].rot, [0.0, 0.0, 0.0]);
        assert_eq!(rule[0].scl, [1.0, 1.0, 1.0]);
        assert!(rule[0].params.is_none());
    }

    #[test]
    fn test_ingest_rejects_non_list_rule() {
        let result = ingest_value(json!({ "root": "torso" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_ingest_rejects_missing_symbol() {
        let result = ingest_value(json!({ "root": [ { "pos": [0, 1, 0] } ] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_ingest_ignores_unknown_fields() {
        let table = ingest_value(json!({
            "root": [ { "symbol": "torso", "pos": [0, 1.5, 0], "mood": "gloomy" } ]
        }))
        .unwrap();
        assert_eq!(table.get("root").unwrap()[0].pos, [0.0, 1.5, 0.0]);
    }

    #[test]
    fn test_ingest_accepts_long_field_aliases() {
        let short = ingest_value(json!({
            "root": [ { "symbol": "torso", "pos": [0, 1, 0], "rot": [0, 90, 0],
                        "scl": [2, 2, 2], "params": { "shape": "box" } } ]
        }))
        .unwrap();
        let long = ingest_value(json!({
            "root": [ { "symbol": "torso", "position": [0, 1, 0], "rotation": [0, 90, 0],
                        "scale": [2, 2, 2], "shapeParams": { "shape": "box" } } ]
        }))
        .unwrap();
        assert_eq!(short.get("root").unwrap(), long.get("root").unwrap());
    }

    #[test]
    fn test_ingest_shape_params() {
        let table = ingest_value(json!({
            "torso": [ { "symbol": "blob", "params": {
                "shape": "capsule", "size": [0.3, 1.0, 0.3],
                "color": [0.9, 0.1, 0.1], "blend": 0.8
            } } ]
        }))
        .unwrap();
        let params = table.get("torso").unwrap()[0].params.as_ref().unwrap();
        assert_eq!(params.shape, Some(ShapeKind::Capsule));
        assert_eq!(params.size, Some([0.3, 1.0, 0.3]));
        assert_eq!(params.blend, Some(0.8));
    }

    #[test]
    fn test_fallback_table_shape() {
        let table = fallback_table();
        assert_eq!(table.get("root").unwrap()[0].symbol, "torso");
        assert_eq!(table.get("torso").unwrap()[0].symbol, "head");
        assert!(table.get("head").is_none());
    }
}
