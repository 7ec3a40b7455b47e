// src/analysis/mod.rs

pub mod features;

pub use features::{
    get_degree_of_unsaturation_per_carbon,
    get_electronegative_atom_ratio,
    get_metal_count,
    get_metal_types,
    get_metallic_percentage,
    get_nitrogen_to_oxygen_ratio,
    get_oxygen_to_metal_ratio,
    get_total_degree_of_unsaturation,
    get_weighted_electronegative_atom_ratio,
    safe_ratio,
    FeatureRecord,
    RatioPolicy,
};
