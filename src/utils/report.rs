// src/utils/report.rs

use crate::analysis::{get_metal_count, FeatureRecord};
use crate::io::cif::CifError;
use crate::model::{AtomCounts, UnitCell};

/// Generates the text printed by `inspect` for a single structure file
pub fn composition_summary(
    filename: &str,
    counts: &AtomCounts,
    cell: &Result<UnitCell, CifError>,
    record: &FeatureRecord,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("File: {}\n", filename));
    out.push_str(&format!("Formula: {}\n", counts.formula()));
    out.push_str(&format!(
        "Atoms: {} ({} metal)\n",
        counts.total(),
        get_metal_count(counts)
    ));

    match cell {
        Ok(c) => {
            out.push_str(&format!(
                "Cell: a={:.4} b={:.4} c={:.4}  α={:.2}° β={:.2}° γ={:.2}°\n",
                c.a, c.b, c.c, c.alpha, c.beta, c.gamma
            ));
            out.push_str(&format!("Volume: {:.3} Å³\n", c.volume()));
        }
        Err(e) => out.push_str(&format!("Cell: unavailable ({})\n", e)),
    }

    out.push_str("--------------------------------------------------\n");
    out.push_str(&format!("{:<8} {:>8}\n", "Element", "Count"));
    out.push_str("--------------------------------------------------\n");
    for (el, n) in counts.iter() {
        out.push_str(&format!("{:<8} {:>8}\n", el, n));
    }

    out.push_str("--------------------------------------------------\n");
    let metal_type = if record.metal_type.is_empty() { "-" } else { record.metal_type.as_str() };
    let rows = [
        ("Total degree of unsaturation", record.total_unsaturation),
        ("Unsaturation per carbon", record.unsaturation_per_carbon),
        ("Metallic percentage", record.metallic_percentage),
        ("Oxygen-to-metal ratio", record.oxygen_to_metal),
        ("Electronegative-to-total ratio", record.electronegative_ratio),
        ("Weighted electronegativity per atom", record.weighted_electronegativity),
        ("Nitrogen-to-oxygen ratio", record.nitrogen_to_oxygen),
    ];
    out.push_str(&format!("{:<38} {}\n", "Metal type", metal_type));
    for (label, value) in rows {
        out.push_str(&format!("{:<38} {:.4}\n", label, value));
    }

    out
}
