// src/io/table.rs

use crate::analysis::FeatureRecord;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

const DESCRIPTOR_COLUMNS: [&str; 6] = [
    "total degree of unsaturation",
    "metallic percentage",
    "oxygen-to-metal ratio",
    "electronegative-to-total ratio",
    "weighted electronegativity per atom",
    "nitrogen to oxygen",
];

const EXTENDED_COLUMNS: [&str; 2] = ["degree of unsaturation per carbon", "unit cell volume"];

/// Column layout of the feature table
#[derive(Debug, Clone)]
pub struct TableLayout<'a> {
    pub element_features: &'a [String],
    pub extended: bool,
}

impl TableLayout<'_> {
    pub fn header(&self) -> Vec<String> {
        let mut header = vec!["MOF".to_string()];
        header.extend(self.element_features.iter().cloned());
        header.push("metal type".to_string());
        header.extend(DESCRIPTOR_COLUMNS.iter().map(|c| c.to_string()));
        if self.extended {
            header.extend(EXTENDED_COLUMNS.iter().map(|c| c.to_string()));
        }
        header
    }

    pub fn row(&self, record: &FeatureRecord) -> Vec<String> {
        let mut row = vec![record.name.clone()];
        for el in self.element_features {
            let n = record
                .element_counts
                .iter()
                .find(|(sym, _)| sym == el)
                .map(|(_, n)| *n)
                .unwrap_or(0);
            row.push(n.to_string());
        }
        row.push(record.metal_type.clone());
        for value in [
            record.total_unsaturation,
            record.metallic_percentage,
            record.oxygen_to_metal,
            record.electronegative_ratio,
            record.weighted_electronegativity,
            record.nitrogen_to_oxygen,
        ] {
            row.push(value.to_string());
        }
        if self.extended {
            row.push(record.unsaturation_per_carbon.to_string());
            row.push(record.volume.map(|v| v.to_string()).unwrap_or_default());
        }
        row
    }
}

/// Writes header plus one row per record
pub fn write_features_to<W: Write>(
    writer: W,
    layout: &TableLayout,
    records: &[FeatureRecord],
) -> io::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(layout.header()).map_err(io::Error::from)?;
    for record in records {
        csv_writer.write_record(layout.row(record)).map_err(io::Error::from)?;
    }
    csv_writer.flush()
}

pub fn write_features(
    path: impl AsRef<Path>,
    layout: &TableLayout,
    records: &[FeatureRecord],
) -> io::Result<()> {
    let file = File::create(path)?;
    write_features_to(file, layout, records)
}
