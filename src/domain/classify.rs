use macroquad::math::{Vec3, vec3};

use super::sdf::ShapeKind;

/// Canonical body-part categories. Classification runs once per node and
/// replaces ad hoc substring dispatch: "forearm" and "arm" both resolve
/// to `Limb` through the token table, never through containment order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartCategory {
    Torso,
    Head,
    Neck,
    Limb,
    Extremity,
    Wing,
    Spike,
    Sensor,
    Root,
    Unknown,
}

/// Shape recipe for a category: kind, base size (before world scale),
/// and base color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeTemplate {
    pub kind: ShapeKind,
    pub size: Vec3,
    pub color: Vec3,
}

const TOKEN_CATEGORIES: &[(&str, PartCategory)] = &[
    ("torso", PartCategory::Torso),
    ("head", PartCategory::Head),
    ("neck", PartCategory::Neck),
    ("arm", PartCategory::Limb),
    ("forearm", PartCategory::Limb),
    ("leg", PartCategory::Limb),
    ("calf", PartCategory::Limb),
    ("hand", PartCategory::Extremity),
    ("foot", PartCategory::Extremity),
    ("wing", PartCategory::Wing),
    ("spike", PartCategory::Spike),
    ("eye", PartCategory::Sensor),
    ("laser", PartCategory::Sensor),
];

/// Classify a symbol by its underscore-separated tokens. The first
/// recognized token decides the category; symbols with no recognized
/// token are `Unknown` and the literal "root" is the synthetic root.
pub fn classify(symbol: &str) -> PartCategory {
    let lowered = symbol.to_ascii_lowercase();
    if lowered == "root" {
        return PartCategory::Root;
    }

    for token in lowered.split(['_', '-', ' ']) {
        if let Some((_, category)) = TOKEN_CATEGORIES.iter().find(|(t, _)| *t == token) {
            return *category;
        }
    }
    PartCategory::Unknown
}

impl PartCategory {
    /// Base shape recipe for the category. `Root` and `Unknown`
    /// contribute no primitive of their own (explicit shape params on
    /// the node still can).
    pub fn template(self) -> Option<ShapeTemplate> {
        let template = match self {
            PartCategory::Torso => ShapeTemplate {
                kind: ShapeKind::Box,
                size: vec3(0.5, 0.5, 0.5),
                color: vec3(0.3, 0.7, 0.6),
            },
            PartCategory::Head => ShapeTemplate {
                kind: ShapeKind::Sphere,
                size: vec3(0.6, 0.6, 0.6),
                color: vec3(0.3, 0.7, 0.6),
            },
            PartCategory::Neck => ShapeTemplate {
                kind: ShapeKind::Capsule,
                size: vec3(0.2, 0.6, 0.2),
                color: vec3(0.2, 0.6, 0.5),
            },
            PartCategory::Limb => ShapeTemplate {
                kind: ShapeKind::Capsule,
                size: vec3(0.15, 0.8, 0.15),
                color: vec3(0.2, 0.6, 0.5),
            },
            PartCategory::Extremity => ShapeTemplate {
                kind: ShapeKind::Box,
                size: vec3(0.2, 0.2, 0.2),
                color: vec3(0.1, 0.5, 0.4),
            },
            PartCategory::Wing => ShapeTemplate {
                kind: ShapeKind::Box,
                size: vec3(0.8, 0.05, 1.2),
                color: vec3(0.9, 0.9, 0.2),
            },
            PartCategory::Spike => ShapeTemplate {
                kind: ShapeKind::Capsule,
                size: vec3(0.05, 0.6, 0.05),
                color: vec3(0.8, 0.8, 0.8),
            },
            PartCategory::Sensor => ShapeTemplate {
                kind: ShapeKind::Cylinder,
                size: vec3(0.05, 1.0, 0.05),
                color: vec3(1.0, 0.0, 0.0),
            },
            PartCategory::Root | PartCategory::Unknown => return None,
        };
        Some(template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_basic_symbols() {
        assert_eq!(classify("torso"), PartCategory::Torso);
        assert_eq!(classify("head"), PartCategory::Head);
        assert_eq!(classify("arm"), PartCategory::Limb);
        assert_eq!(classify("forearm"), PartCategory::Limb);
        assert_eq!(classify("calf"), PartCategory::Limb);
        assert_eq!(classify("hand"), PartCategory::Extremity);
        assert_eq!(classify("wing"), PartCategory::Wing);
        assert_eq!(classify("spike"), PartCategory::Spike);
    }

    #[test]
    fn test_classify_compound_symbols() {
        assert_eq!(classify("neck_base"), PartCategory::Neck);
        assert_eq!(classify("neck_segment"), PartCategory::Neck);
        assert_eq!(classify("wing_tip"), PartCategory::Wing);
        assert_eq!(classify("eye_laser"), PartCategory::Sensor);
        assert_eq!(classify("left_leg"), PartCategory::Limb);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(classify("Torso"), PartCategory::Torso);
        assert_eq!(classify("HEAD"), PartCategory::Head);
    }

    #[test]
    fn test_root_and_unknown_have_no_template() {
        assert_eq!(classify("root"), PartCategory::Root);
        assert_eq!(classify("mystery_gland"), PartCategory::Unknown);
        assert!(PartCategory::Root.template().is_none());
        assert!(PartCategory::Unknown.template().is_none());
    }

    #[test]
    fn test_templates_use_kind_specific_sizes() {
        let limb = PartCategory::Limb.template().unwrap();
        assert_eq!(limb.kind, ShapeKind::Capsule);
        // capsule: x is radius, y is height
        assert!(limb.size.y > limb.size.x);

        let sensor = PartCategory::Sensor.template().unwrap();
        assert_eq!(sensor.kind, ShapeKind::Cylinder);
    }
}
