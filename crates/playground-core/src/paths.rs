//! Locations inside the playground checkout.

use std::path::{Path, PathBuf};

/// Root of the workspace this crate was built from.
///
/// Resolved from the crate manifest at compile time, two levels above
/// `crates/playground-core`.
pub fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .unwrap_or(manifest_dir)
        .to_path_buf()
}
