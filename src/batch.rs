// src/batch.rs

use crate::analysis::FeatureRecord;
use crate::config::Config;
use crate::io::cif::{self, CifError};
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Outcome of a directory run: one record per readable file, failures kept apart.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub records: Vec<FeatureRecord>,
    pub failures: Vec<(PathBuf, CifError)>,
}

/// Entries in `dir` whose name ends with `extension`, sorted by name.
///
/// Directories are skipped. Anything else is kept so that files which turn out
/// unreadable (dangling links, permissions) show up as per-file failures.
pub fn discover_cif_files(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let matches = path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().ends_with(extension));
        if matches && !path.is_dir() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Reads one file and computes its descriptor row.
///
/// With extended descriptors on, an incomplete unit cell only blanks the volume.
pub fn process_file(path: &Path, config: &Config) -> Result<FeatureRecord, CifError> {
    let name = display_name(path);
    let content = cif::read_text(path)?;
    let counts = cif::read_atom_counts(&content);
    log::debug!("{}: {} atoms, {}", name, counts.total(), counts.formula());

    let record = FeatureRecord::compute(&name, &counts, &config.element_features, &config.metal_types);
    if !config.extended_descriptors {
        return Ok(record);
    }

    let volume = match cif::read_unit_cell(&content) {
        Ok(cell) => Some(cell.volume()),
        Err(e) => {
            log::warn!("{}: {}", name, e);
            None
        }
    };
    Ok(record.with_volume(volume))
}

/// Processes every structure file in `dir` in parallel.
pub fn run(dir: &Path, config: &Config) -> io::Result<BatchReport> {
    let files = discover_cif_files(dir, &config.extension)?;
    log::info!("Found {} '{}' files in {}", files.len(), config.extension, dir.display());

    let results: Vec<(PathBuf, Result<FeatureRecord, CifError>)> = match config.threads {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
            pool.install(|| process_all(&files, config))
        }
        None => process_all(&files, config),
    };

    let mut report = BatchReport::default();
    for (path, result) in results {
        match result {
            Ok(record) => report.records.push(record),
            Err(e) => {
                log::error!("{}", e);
                report.failures.push((path, e));
            }
        }
    }
    // Worker completion order is arbitrary
    report.records.sort_by(|a, b| a.name.cmp(&b.name));

    log::info!(
        "Processed {} files, {} failed",
        report.records.len() + report.failures.len(),
        report.failures.len()
    );
    Ok(report)
}

fn process_all(files: &[PathBuf], config: &Config) -> Vec<(PathBuf, Result<FeatureRecord, CifError>)> {
    files
        .par_iter()
        .map(|path| (path.clone(), process_file(path, config)))
        .collect()
}
