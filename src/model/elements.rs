// src/model/elements.rs

/// Element symbols counted as metals. Metalloids (B, Si, Ge, As, Sb, Te) are not listed.
pub const METALS: &[&str] = &[
    // --- s-block ---
    "Li", "Be", "Na", "Mg", "Al", "K", "Ca",
    // --- Period 4 ---
    "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Rb", "Sr",
    // --- Period 5 ---
    "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn", "Cs", "Ba",
    // --- Lanthanides ---
    "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu",
    // --- Period 6 ---
    "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "Fr", "Ra",
    // --- Actinides ---
    "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", "Md", "No", "Lr",
    // --- Superheavy ---
    "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh", "Fl", "Mc", "Lv",
];

/// Atoms counted as electronegative in the EN descriptors
pub const ELECTRONEGATIVE: &[&str] = &["O", "N", "F", "Cl", "Br"];

/// Halides each count as one hydrogen equivalent in the unsaturation formula
pub const HALIDES: &[&str] = &["F", "Cl", "Br", "I"];

pub fn is_metal(element: &str) -> bool {
    METALS.contains(&element)
}

/// Pauling electronegativity for the electronegative atoms tracked by the descriptors.
/// Returns `None` for everything else; they carry no weight.
pub fn get_pauling_electronegativity(element: &str) -> Option<f64> {
    match element {
        "O" => Some(3.44),
        "N" => Some(3.04),
        "F" => Some(3.98),
        "Cl" => Some(3.16),
        "Br" => Some(2.96),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metal_table() {
        assert_eq!(METALS.len(), 92);
        for m in ["Zn", "Cu", "Zr", "V", "Fe", "Lv"] {
            assert!(is_metal(m), "{} should be a metal", m);
        }
        for nm in ["C", "H", "O", "N", "Si", "B", "As", "Te", "zn"] {
            assert!(!is_metal(nm), "{} should not be a metal", nm);
        }
    }

    #[test]
    fn test_every_electronegative_atom_has_a_weight() {
        for el in ELECTRONEGATIVE {
            assert!(get_pauling_electronegativity(el).is_some());
        }
        assert_eq!(get_pauling_electronegativity("I"), None);
        assert_eq!(get_pauling_electronegativity("C"), None);
    }
}
