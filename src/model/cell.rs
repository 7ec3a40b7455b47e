// src/model/cell.rs

use serde::{Deserialize, Serialize};

/// Unit cell parameters as read from the `_cell_*` tags.
/// Lengths keep the file's units (Å in practice), angles are in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitCell {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl UnitCell {
    pub fn new(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Self {
        Self { a, b, c, alpha, beta, gamma }
    }

    /// Cell volume as a·b·c·sin(α)·sin(β)·sin(γ).
    ///
    /// Exact for orthogonal cells. Oblique cells do not get the full triclinic expression.
    pub fn volume(&self) -> f64 {
        let sin_a = self.alpha.to_radians().sin();
        let sin_b = self.beta.to_radians().sin();
        let sin_g = self.gamma.to_radians().sin();
        self.a * self.b * self.c * sin_a * sin_b * sin_g
    }
}
