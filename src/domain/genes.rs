//! The fixed gene catalog. Genes are opaque string tags to the core;
//! only the rule producer gives them meaning.

/// Full catalog of known gene tags, grouped by trait family.
pub const GENE_LIST: &[&str] = &[
    // Body types
    "serpentine_body", "quadrupedal", "bipedal", "insectoid", "aquatic_streamlined",
    "amorphous_blob", "segmented_worm", "floating_orb", "centaur_like", "arachnid_body",
    // Skin / surface
    "scales", "furry", "feathers", "slime_coated", "chitin_armor",
    "rocky_skin", "metallic_sheen", "bioluminescent_spots", "transparent_skin", "wrinkled_skin",
    "spiked_carapace", "wet_skin", "bark_like_texture", "patterned_stripes", "camouflage_spots",
    // Head / sensory
    "multiple_eyes", "cyclops_eye", "antennae", "compound_eyes", "eyestalks",
    "large_ears", "no_eyes", "thermal_pits", "whiskers", "glowing_eyes",
    "beak", "mandibles", "proboscis", "tusks", "horns",
    "frilled_neck", "crest_on_head", "elongated_snout", "jawless_mouth",
    // Limbs / appendages
    "wings", "bat_wings", "feathered_wings", "insect_wings", "fins",
    "tentacles", "claws", "pincers", "hooves", "webbed_feet",
    "suction_cups", "extra_arms", "long_legs", "short_stubby_legs", "segmented_legs",
    "prehensile_tail", "club_tail", "spiked_tail", "split_tail", "no_legs",
    // Abilities / features
    "poison_sacs", "electric_sparks", "smoke_emitting", "crystal_growths", "fungal_spores",
    "magma_veins", "ice_crystals", "floating_runes", "energy_core", "mechanical_implants",
    "heavy_armor_plating", "spiny_ridge", "inflated_air_sacs", "ventral_fins", "dorsal_fin",
    // Abstract / shape
    "asymmetrical", "geometric_shapes", "fractal_growth", "spiral_shell", "hollow_body",
    "detached_limbs", "melting_appearance", "sharp_angles", "bulbous_growths", "elongated_neck",
];

/// Named gene bundles for the preset dropdown.
pub const GENE_PRESETS: &[(&str, &[&str])] = &[
    ("Biped", &[]),
    ("Winged", &["wings", "feathers"]),
    ("Long Neck", &["elongated_neck", "patterned_stripes"]),
    ("Spiked", &["spiked_carapace", "spiny_ridge"]),
    ("Laser", &["glowing_eyes", "mechanical_implants"]),
    ("Chimera", &["wings", "elongated_neck", "spiked_tail", "glowing_eyes", "long_legs"]),
];

/// Pick 8-16 distinct random genes from the catalog.
pub fn random_genes() -> Vec<String> {
    use rand::Rng;
    use rand::seq::IndexedRandom;

    let mut rng = rand::rng();
    let count = rng.random_range(8..=16);
    GENE_LIST
        .choose_multiple(&mut rng, count)
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_no_duplicates() {
        let mut seen = std::collections::HashSet::new();
        for gene in GENE_LIST {
            assert!(seen.insert(gene), "duplicate gene tag: {gene}");
        }
    }

    #[test]
    fn test_presets_only_reference_known_genes() {
        for (name, genes) in GENE_PRESETS {
            for gene in *genes {
                assert!(GENE_LIST.contains(gene), "preset {name} uses unknown gene {gene}");
            }
        }
    }

    #[test]
    fn test_random_genes_are_distinct_and_bounded() {
        for _ in 0..20 {
            let genes = random_genes();
            assert!((8..=16).contains(&genes.len()));
            let unique: std::collections::HashSet<&String> = genes.iter().collect();
            assert_eq!(unique.len(), genes.len());
        }
    }
}
