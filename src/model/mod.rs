//src/model/mod.rs
pub mod cell;
pub mod composition;
pub mod elements;

// Re-exports for cleaner imports
pub use cell::UnitCell;
pub use composition::AtomCounts;
pub use elements::{get_pauling_electronegativity, is_metal};
