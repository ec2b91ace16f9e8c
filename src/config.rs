//! Runtime configuration, read once from the environment at the call site.

use crate::error::{AppError, AppResult};
use crate::infra::paths::{project_root, DEFAULT_DB_FILENAME};
use std::path::PathBuf;

pub const ENV_PROJECT_ROOT: &str = "TKX_PROJECT_ROOT";
pub const ENV_DB: &str = "TKX_DB";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub project_root: PathBuf,
    /// `DEFAULT_DB_FILENAME` or an explicit path.
    pub db_target: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            project_root: project_root(),
            db_target: DEFAULT_DB_FILENAME.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(root) = lookup(ENV_PROJECT_ROOT) {
            if root.trim().is_empty() {
                return Err(AppError::Config(format!("{ENV_PROJECT_ROOT} is empty")));
            }
            cfg.project_root = PathBuf::from(root);
        }
        if let Some(db) = lookup(ENV_DB) {
            let db = db.trim();
            if db.is_empty() {
                return Err(AppError::Config(format!("{ENV_DB} is empty")));
            }
            cfg.db_target = db.to_string();
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_to_canonical_filename() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.db_target, DEFAULT_DB_FILENAME);
        assert_eq!(cfg.project_root, project_root());
    }

    #[test]
    fn env_overrides_root_and_target() {
        let cfg = AppConfig::from_lookup(lookup(&[
            (ENV_PROJECT_ROOT, "/srv/tkx"),
            (ENV_DB, " /tmp/other.db "),
        ]))
        .unwrap();
        assert_eq!(cfg.project_root, PathBuf::from("/srv/tkx"));
        assert_eq!(cfg.db_target, "/tmp/other.db");
    }

    #[test]
    fn empty_values_are_rejected() {
        let err = AppConfig::from_lookup(lookup(&[(ENV_DB, "  ")])).unwrap_err();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }
}
