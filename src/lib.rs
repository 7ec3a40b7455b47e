//! Compositional and geometric descriptors for metal-organic framework CIF files.
//!
//! [`io::cif`] counts atoms per element from the atom-site loop and reads the unit cell,
//! [`analysis::features`] turns the counts into a [`analysis::FeatureRecord`], and
//! [`batch`] runs both over a directory in parallel.

pub mod analysis;
pub mod batch;
pub mod config;
pub mod io;
pub mod model;
pub mod utils;
