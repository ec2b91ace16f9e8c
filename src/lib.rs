pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;

use config::AppConfig;
use error::AppResult;
use infra::{migrate_path, resolve_db_target, MigrationReport};

pub const SUCCESS_MESSAGE: &str = "✅ Migração concluída com sucesso.";

fn init_logging() {
    // RUST_LOG overrides; a second init (tests) is ignored
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .try_init();
}

/// Resolve the configured database and bring its schema up to date.
pub fn migrate_configured(cfg: &AppConfig) -> AppResult<MigrationReport> {
    let db_path = resolve_db_target(&cfg.project_root, &cfg.db_target)?;
    log::info!("DB path: {:?}", db_path);
    migrate_path(&db_path)
}

/// Migration entry point. Returns the process exit code.
pub fn run() -> i32 {
    init_logging();

    let result = AppConfig::from_env().and_then(|cfg| migrate_configured(&cfg));
    match result {
        Ok(report) => {
            match serde_json::to_string(&report) {
                Ok(json) => log::info!("migration report: {}", json),
                Err(e) => log::warn!("could not render migration report: {}", e),
            }
            println!("{SUCCESS_MESSAGE}");
            0
        }
        Err(e) => {
            log::error!("migration failed: {}", e);
            eprintln!("[{}] {}", e.code(), e);
            1
        }
    }
}
