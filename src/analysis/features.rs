// src/analysis/features.rs

use crate::model::elements::{ELECTRONEGATIVE, HALIDES};
use crate::model::{get_pauling_electronegativity, is_metal, AtomCounts};
use serde::{Deserialize, Serialize};

/// What a ratio evaluates to when its denominator is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioPolicy {
    /// The descriptor is defined as 0 (e.g. no carbon, no oxygen)
    ZeroOnEmpty,
    /// No meaningful value exists; yields NaN so batch rows stay writable
    Undefined,
}

pub fn safe_ratio(numerator: f64, denominator: f64, policy: RatioPolicy) -> f64 {
    if denominator != 0.0 {
        return numerator / denominator;
    }
    match policy {
        RatioPolicy::ZeroOnEmpty => 0.0,
        RatioPolicy::Undefined => f64::NAN,
    }
}

/// Sum of atom counts over every metal in the reference table
pub fn get_metal_count(counts: &AtomCounts) -> usize {
    counts
        .iter()
        .filter(|(el, _)| is_metal(el))
        .map(|(_, n)| n)
        .sum()
}

/// Metal atoms per 100 carbon atoms; 0 for carbon-free frameworks
pub fn get_metallic_percentage(counts: &AtomCounts) -> f64 {
    let ratio = safe_ratio(
        get_metal_count(counts) as f64,
        counts.get("C") as f64,
        RatioPolicy::ZeroOnEmpty,
    );
    ratio * 100.0
}

/// ((2·C + 2) − H_eq) / 2 with H_eq = H + N/2 + F + Cl + Br + I.
///
/// Nitrogen enters the hydrogen side at half weight and oxygen or sulfur are ignored,
/// so values differ from the textbook formula for heteroatom-rich linkers.
pub fn get_total_degree_of_unsaturation(counts: &AtomCounts) -> f64 {
    let carbon_equivalent = counts.get("C") as f64;
    let mut hydrogen_equivalent = counts.get("H") as f64 + counts.get("N") as f64 / 2.0;
    for halide in HALIDES {
        hydrogen_equivalent += counts.get(halide) as f64;
    }
    ((carbon_equivalent * 2.0) + 2.0 - hydrogen_equivalent) / 2.0
}

pub fn get_degree_of_unsaturation_per_carbon(counts: &AtomCounts) -> f64 {
    safe_ratio(
        get_total_degree_of_unsaturation(counts),
        counts.get("C") as f64,
        RatioPolicy::ZeroOnEmpty,
    )
}

/// Fraction of O, N, F, Cl and Br among all atoms. NaN for an empty composition.
pub fn get_electronegative_atom_ratio(counts: &AtomCounts) -> f64 {
    let electronegative: usize = ELECTRONEGATIVE.iter().map(|el| counts.get(el)).sum();
    safe_ratio(electronegative as f64, counts.total() as f64, RatioPolicy::Undefined)
}

/// Pauling-weighted electronegative atom count per atom. NaN for an empty composition.
pub fn get_weighted_electronegative_atom_ratio(counts: &AtomCounts) -> f64 {
    let summed_weight: f64 = counts
        .iter()
        .filter_map(|(el, n)| get_pauling_electronegativity(el).map(|en| n as f64 * en))
        .sum();
    safe_ratio(summed_weight, counts.total() as f64, RatioPolicy::Undefined)
}

/// O per metal atom; 0 without oxygen or without metal
pub fn get_oxygen_to_metal_ratio(counts: &AtomCounts) -> f64 {
    safe_ratio(
        counts.get("O") as f64,
        get_metal_count(counts) as f64,
        RatioPolicy::ZeroOnEmpty,
    )
}

/// N per O atom; 0 without oxygen
pub fn get_nitrogen_to_oxygen_ratio(counts: &AtomCounts) -> f64 {
    safe_ratio(
        counts.get("N") as f64,
        counts.get("O") as f64,
        RatioPolicy::ZeroOnEmpty,
    )
}

/// Concatenates the requested metal symbols that occur in the composition,
/// in the order given (a Cu/Zn framework reports "CuZn").
pub fn get_metal_types<S: AsRef<str>>(counts: &AtomCounts, metal_types: &[S]) -> String {
    metal_types
        .iter()
        .map(|m| m.as_ref())
        .filter(|m| counts.contains(m))
        .collect()
}

/// Descriptor row for one structure file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub name: String,
    /// Counts for the configured elements, in configured order
    pub element_counts: Vec<(String, usize)>,
    pub metal_type: String,
    pub total_unsaturation: f64,
    pub unsaturation_per_carbon: f64,
    pub metallic_percentage: f64,
    pub oxygen_to_metal: f64,
    pub electronegative_ratio: f64,
    pub weighted_electronegativity: f64,
    pub nitrogen_to_oxygen: f64,
    /// Unit cell volume, when the geometry was requested and complete
    pub volume: Option<f64>,
}

impl FeatureRecord {
    pub fn compute<S: AsRef<str>>(
        name: &str,
        counts: &AtomCounts,
        element_features: &[S],
        metal_types: &[S],
    ) -> Self {
        if counts.is_empty() {
            log::warn!("{}: no atom-site rows found, ratio descriptors are undefined", name);
        }

        Self {
            name: name.to_string(),
            element_counts: element_features
                .iter()
                .map(|el| (el.as_ref().to_string(), counts.get(el.as_ref())))
                .collect(),
            metal_type: get_metal_types(counts, metal_types),
            total_unsaturation: get_total_degree_of_unsaturation(counts),
            unsaturation_per_carbon: get_degree_of_unsaturation_per_carbon(counts),
            metallic_percentage: get_metallic_percentage(counts),
            oxygen_to_metal: get_oxygen_to_metal_ratio(counts),
            electronegative_ratio: get_electronegative_atom_ratio(counts),
            weighted_electronegativity: get_weighted_electronegative_atom_ratio(counts),
            nitrogen_to_oxygen: get_nitrogen_to_oxygen_ratio(counts),
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: Option<f64>) -> Self {
        self.volume = volume;
        self
    }
}
