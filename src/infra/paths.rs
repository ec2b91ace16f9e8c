//! On-disk layout: project root and `data/`.

use crate::error::AppResult;
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_FILENAME: &str = "tkx_franca.db";

/// Installation location. Falls back to the per-user data dir when the
/// build-time crate directory is gone (binary installed elsewhere).
pub fn project_root() -> PathBuf {
    let built = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    if built.is_dir() {
        return built;
    }
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("tkx")
}

pub fn data_dir(root: &Path) -> PathBuf {
    root.join("data")
}

/// `root/data/<filename>`, creating `root/data` if absent.
pub fn db_path(root: &Path, filename: &str) -> AppResult<PathBuf> {
    let dir = data_dir(root);
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join(filename))
}
