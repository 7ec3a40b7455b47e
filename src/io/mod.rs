// src/io/mod.rs
pub mod cif;
pub mod table;

pub use cif::{load_atom_counts, load_unit_cell, read_atom_counts, read_unit_cell, CifError};
pub use table::{write_features, write_features_to, TableLayout};
