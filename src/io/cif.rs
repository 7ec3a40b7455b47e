// src/io/cif.rs

use crate::model::{AtomCounts, UnitCell};
use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const LOOP_SENTINEL: &str = "loop_";
pub const ATOM_TYPE_TAG: &str = "_atom_site_type_symbol";

const TAG_PREFIX: char = '_';
/// Atom-site rows in the supported layouts carry at least this many fields
const MIN_DATA_FIELDS: usize = 5;

pub const CELL_TAGS: [&str; 6] = [
    "_cell_length_a",
    "_cell_length_b",
    "_cell_length_c",
    "_cell_angle_alpha",
    "_cell_angle_beta",
    "_cell_angle_gamma",
];

// --- Errors ---

#[derive(Debug)]
pub enum CifError {
    Io { path: PathBuf, source: io::Error },
    MissingCellTags(Vec<&'static str>),
    InvalidCellValue { tag: &'static str, line: usize, value: String },
}

impl fmt::Display for CifError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CifError::Io { path, source } => write!(f, "Could not read {}: {}", path.display(), source),
            CifError::MissingCellTags(tags) => {
                write!(f, "Unit cell incomplete, missing {}", tags.join(", "))
            }
            CifError::InvalidCellValue { tag, line, value } => {
                write!(f, "Line {}: {} has no numeric value (got '{}')", line, tag, value)
            }
        }
    }
}

impl Error for CifError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CifError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

// --- Atom-site scan ---

/// Where the scanner stands relative to the atom-site loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// No `loop_` seen and no type column known yet
    BeforeLoop,
    /// Inside a loop header, counting tag lines
    ReadingTags,
    /// Type column known; qualifying rows are counted
    ReadingData,
}

/// Line-by-line scanner locating the `_atom_site_type_symbol` column.
///
/// The column counter is reset to -1 on a `loop_` line and advanced after every
/// non-blank line, so the first tag line after `loop_` sits at column 0. It keeps
/// counting through data rows and later loops; only the type tag line records it.
#[derive(Debug, Clone)]
pub struct AtomSiteScanner {
    column: i64,
    type_column: Option<usize>,
    seen_loop: bool,
}

impl Default for AtomSiteScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl AtomSiteScanner {
    pub fn new() -> Self {
        Self { column: 0, type_column: None, seen_loop: false }
    }

    pub fn phase(&self) -> ScanPhase {
        match (self.type_column, self.seen_loop) {
            (Some(_), _) => ScanPhase::ReadingData,
            (None, true) => ScanPhase::ReadingTags,
            (None, false) => ScanPhase::BeforeLoop,
        }
    }

    /// Column counter value the next non-blank line will be assigned
    pub fn column(&self) -> i64 {
        self.column
    }

    pub fn type_column(&self) -> Option<usize> {
        self.type_column
    }

    /// Feeds one line and returns the element symbol when it is an atom-site row.
    pub fn feed<'a>(&mut self, line: &'a str) -> Option<&'a str> {
        if line == LOOP_SENTINEL {
            self.column = -1;
            self.seen_loop = true;
        }

        let words: Vec<&'a str> = line.split_whitespace().collect();
        let first = *words.first()?;

        if first == ATOM_TYPE_TAG {
            if let Ok(idx) = usize::try_from(self.column) {
                self.type_column = Some(idx);
            }
        }

        let symbol = match self.type_column {
            Some(idx) if words.len() >= MIN_DATA_FIELDS && !first.starts_with(TAG_PREFIX) => {
                let symbol = words.get(idx).copied();
                if symbol.is_none() {
                    log::debug!(
                        "Row '{}' has {} fields, type symbol expected in column {}",
                        line.trim(),
                        words.len(),
                        idx
                    );
                }
                symbol
            }
            _ => None,
        };

        self.column += 1;
        symbol
    }
}

/// Counts atoms per element from the atom-site loop of a CIF text.
///
/// A file without `_atom_site_type_symbol` yields an empty map rather than an error.
pub fn read_atom_counts(content: &str) -> AtomCounts {
    let mut scanner = AtomSiteScanner::new();
    let mut counts = AtomCounts::new();

    for line in content.lines() {
        if let Some(symbol) = scanner.feed(line) {
            counts.increment(symbol);
        }
    }

    if scanner.type_column().is_none() {
        log::debug!("No {} tag found, atom counts are empty", ATOM_TYPE_TAG);
    }
    counts
}

// --- Unit cell ---

/// Reads the six `_cell_*` parameters. Scanning stops once all six are known.
pub fn read_unit_cell(content: &str) -> Result<UnitCell, CifError> {
    let mut values: [Option<f64>; 6] = [None; 6];

    for (i, line) in content.lines().enumerate() {
        let mut words = line.split_whitespace();
        if let Some(tag) = words.next() {
            if let Some(slot) = CELL_TAGS.iter().position(|t| *t == tag) {
                let raw = words.next().unwrap_or("");
                let value = parse_cif_float(raw).ok_or_else(|| CifError::InvalidCellValue {
                    tag: CELL_TAGS[slot],
                    line: i + 1,
                    value: raw.to_string(),
                })?;
                values[slot] = Some(value);
            }
        }
        if values.iter().all(Option::is_some) {
            break;
        }
    }

    match values {
        [Some(a), Some(b), Some(c), Some(alpha), Some(beta), Some(gamma)] => {
            Ok(UnitCell::new(a, b, c, alpha, beta, gamma))
        }
        _ => {
            let missing = CELL_TAGS
                .iter()
                .zip(values.iter())
                .filter(|(_, v)| v.is_none())
                .map(|(tag, _)| *tag)
                .collect();
            Err(CifError::MissingCellTags(missing))
        }
    }
}

/// Numeric CIF value with an optional standard uncertainty, e.g. "10.2345(7)"
fn parse_cif_float(s: &str) -> Option<f64> {
    let clean = s.split('(').next().unwrap_or(s);
    clean.parse().ok()
}

// --- File access ---

/// Reads a whole file. Bytes outside UTF-8 (Latin-1 author names and the like) are
/// replaced, since only ASCII tags, symbols and numbers are interpreted.
pub fn read_text(path: &Path) -> Result<String, CifError> {
    let bytes = fs::read(path).map_err(|source| CifError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn load_atom_counts(path: impl AsRef<Path>) -> Result<AtomCounts, CifError> {
    let content = read_text(path.as_ref())?;
    Ok(read_atom_counts(&content))
}

pub fn load_unit_cell(path: impl AsRef<Path>) -> Result<UnitCell, CifError> {
    let content = read_text(path.as_ref())?;
    read_unit_cell(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOF_5: &str = "data_MOF5
_symmetry_space_group_name_H-M    'P1'
_cell_length_a                    25.832
_cell_length_b                    25.832
_cell_length_c                    25.832
_cell_angle_alpha                 90
_cell_angle_beta                  90
_cell_angle_gamma                 90
_symmetry_Int_Tables_number       1
_audit_creation_method 'Materials Studio'

loop_
_atom_site_label
_atom_site_occupancy
_atom_site_fract_x
_atom_site_fract_y
_atom_site_fract_z
_atom_site_thermal_displace_type
_atom_site_B_iso_or_equiv
_atom_site_type_symbol
Zn1 1.0 0.2934 0.2066 0.2066 Biso 1.0 Zn
Zn2 1.0 0.2066 0.2934 0.2066 Biso 1.0 Zn
O1 1.0 0.25 0.25 0.25 Biso 1.0 O
O2 1.0 0.2819 0.2181 0.1337 Biso 1.0 O
C1 1.0 0.2500 0.2500 0.1112 Biso 1.0 C
H1 1.0 0.3000 0.2000 0.0500 Biso 1.0 H
";

    #[test]
    fn test_type_column_alignment() {
        let text = "loop_\n_atom_site_label\n_atom_site_type_symbol\nFe1 1.0 0.1 0.2 0.3 Uiso 0.02 Fe\n";
        let counts = read_atom_counts(text);
        // The `loop_` line itself advances the counter from -1 to 0, so the label tag is
        // column 0 and the type tag column 1: the second field is read, not "Fe".
        assert_eq!(counts.get("1.0"), 1);
        assert_eq!(counts.len(), 1);

        let text = "loop_\n_atom_site_label\n_atom_site_occupancy\n_atom_site_fract_x\n\
                    _atom_site_fract_y\n_atom_site_fract_z\n_atom_site_U_iso_or_equiv\n\
                    _atom_site_adp_type\n_atom_site_type_symbol\nFe1 1.0 0.1 0.2 0.3 Uiso 0.02 Fe\n";
        let counts = read_atom_counts(text);
        assert_eq!(counts.get("Fe"), 1);
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_materials_studio_layout() {
        let counts = read_atom_counts(MOF_5);
        assert_eq!(counts.get("Zn"), 2);
        assert_eq!(counts.get("O"), 2);
        assert_eq!(counts.get("C"), 1);
        assert_eq!(counts.get("H"), 1);
        assert_eq!(counts.total(), 6);
    }

    #[test]
    fn test_missing_type_tag_gives_empty_map() {
        let text = "loop_\n_atom_site_label\n_atom_site_fract_x\nZn1 0.1 0.2 0.3 0.4 Zn\n";
        let counts = read_atom_counts(text);
        assert!(counts.is_empty());
    }

    #[test]
    fn test_short_rows_are_not_data() {
        let text = "loop_\n_atom_site_label\n_atom_site_type_symbol\nZn1 Zn 0.1 0.2\nZn2 Zn 0.1 0.2 0.3\n";
        let counts = read_atom_counts(text);
        assert_eq!(counts.get("Zn"), 1);
    }

    #[test]
    fn test_blank_lines_do_not_advance_column() {
        let text = "loop_\n\n_atom_site_label\n   \n_atom_site_type_symbol\nZn1 Zn 0.1 0.2 0.3\n";
        let mut scanner = AtomSiteScanner::new();
        for line in text.lines() {
            scanner.feed(line);
        }
        assert_eq!(scanner.type_column(), Some(1));
    }

    #[test]
    fn test_scanner_phases() {
        let mut scanner = AtomSiteScanner::new();
        assert_eq!(scanner.phase(), ScanPhase::BeforeLoop);

        scanner.feed("data_x");
        assert_eq!(scanner.column(), 1);

        scanner.feed("loop_");
        assert_eq!(scanner.phase(), ScanPhase::ReadingTags);
        assert_eq!(scanner.column(), 0);

        assert_eq!(scanner.feed("_atom_site_label"), None);
        assert_eq!(scanner.feed("_atom_site_type_symbol"), None);
        assert_eq!(scanner.phase(), ScanPhase::ReadingData);
        assert_eq!(scanner.type_column(), Some(1));

        assert_eq!(scanner.feed("Cu1 Cu 0.0 0.0 0.0"), Some("Cu"));
        assert_eq!(scanner.feed("_tag_with many words here too"), None);
        assert_eq!(scanner.column(), 4);
    }

    #[test]
    fn test_row_shorter_than_type_column_is_skipped() {
        let mut scanner = AtomSiteScanner::new();
        scanner.feed("loop_");
        for i in 0..7 {
            scanner.feed(&format!("_atom_site_col{}", i));
        }
        scanner.feed("_atom_site_type_symbol");
        assert_eq!(scanner.type_column(), Some(7));
        assert_eq!(scanner.feed("a b c d e"), None);
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = MOF_5.replace('\n', "\r\n");
        assert_eq!(read_atom_counts(&text), read_atom_counts(MOF_5));
        assert!(read_unit_cell(&text).is_ok());
    }

    #[test]
    fn test_cubic_cell() {
        let text = "_cell_length_a 10.0\n_cell_length_b 10.0\n_cell_length_c 10.0\n\
                    _cell_angle_alpha 90\n_cell_angle_beta 90\n_cell_angle_gamma 90\n";
        let cell = read_unit_cell(text).unwrap();
        assert!((cell.volume() - 1000.0).abs() < 1e-9);

        let cell = read_unit_cell(MOF_5).unwrap();
        assert_eq!(cell.a, 25.832);
    }

    #[test]
    fn test_missing_gamma_is_an_error() {
        let text = "_cell_length_a 10.0\n_cell_length_b 10.0\n_cell_length_c 10.0\n\
                    _cell_angle_alpha 90\n_cell_angle_beta 90\n";
        match read_unit_cell(text) {
            Err(CifError::MissingCellTags(tags)) => assert_eq!(tags, vec!["_cell_angle_gamma"]),
            other => panic!("expected missing tag error, got {:?}", other),
        }
    }

    #[test]
    fn test_uncertainty_suffix_and_bad_values() {
        let text = "_cell_length_a 10.5(2)\n_cell_length_b 10.0\n_cell_length_c 10.0\n\
                    _cell_angle_alpha 90\n_cell_angle_beta 90\n_cell_angle_gamma 90.00(1)\n";
        let cell = read_unit_cell(text).unwrap();
        assert_eq!(cell.a, 10.5);
        assert_eq!(cell.gamma, 90.0);

        let err = read_unit_cell("_cell_length_a ?\n").unwrap_err();
        assert!(matches!(err, CifError::InvalidCellValue { line: 1, .. }));
        assert!(err.to_string().contains("_cell_length_a"));

        let err = read_unit_cell("_cell_length_b\n").unwrap_err();
        assert!(matches!(err, CifError::InvalidCellValue { tag: "_cell_length_b", .. }));
    }

    #[test]
    fn test_scan_stops_after_six_tags() {
        let text = "_cell_length_a 1\n_cell_length_b 2\n_cell_length_c 3\n\
                    _cell_angle_alpha 90\n_cell_angle_beta 90\n_cell_angle_gamma 90\n\
                    _cell_length_a garbage\n";
        let cell = read_unit_cell(text).unwrap();
        assert_eq!(cell.a, 1.0);
    }

    #[test]
    fn test_unreadable_file() {
        let err = load_atom_counts("/nonexistent/dir/none.cif").unwrap_err();
        assert!(matches!(err, CifError::Io { .. }));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_non_utf8_bytes_are_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.cif");
        let mut bytes = b"data_x\n_publ_author_name 'M".to_vec();
        bytes.push(0xfc);
        bytes.extend_from_slice(b"ller'\nloop_\n_atom_site_label\n_atom_site_type_symbol\n");
        bytes.extend_from_slice(b"Zn1 Zn 0.0 0.0 0.0\nO1 O 0.5 0.5 0.5\n");
        std::fs::write(&path, bytes).unwrap();

        let counts = load_atom_counts(&path).unwrap();
        assert_eq!(counts.get("Zn"), 1);
        assert_eq!(counts.get("O"), 1);
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mof5.cif");
        std::fs::write(&path, MOF_5).unwrap();

        assert_eq!(load_atom_counts(&path).unwrap().get("Zn"), 2);
        assert!((load_unit_cell(&path).unwrap().volume() - 25.832_f64.powi(3)).abs() < 1e-6);
    }
}
