//! Standards directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the standards directory.
pub const STANDARDS_ENV_VAR: &str = "ECO_STANDARDS_DIR";

/// File name of the reference range table inside a standards directory.
pub const REFERENCE_RANGES_FILE: &str = "reference_ranges.json";

/// Standards directory named by `ECO_STANDARDS_DIR`, if set.
pub fn standards_override() -> Option<PathBuf> {
    std::env::var_os(STANDARDS_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Standards directory shipped with this crate.
pub fn bundled_standards_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("standards")
}

/// Reference range file inside a standards directory.
pub fn reference_ranges_path(standards_dir: impl Into<PathBuf>) -> PathBuf {
    standards_dir.into().join(REFERENCE_RANGES_FILE)
}
