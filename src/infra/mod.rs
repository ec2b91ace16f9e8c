//! Infrastructure: paths, SQLite connection, schema and migrations.

pub mod db;
pub mod migrate;
pub mod paths;
pub mod schema;

pub use db::{init_db, open_connection, resolve_db_target};
pub use migrate::{migrate, migrate_path, schema_status, MigrationReport, SchemaStatus};
pub use paths::{db_path, project_root, DEFAULT_DB_FILENAME};
