//! Idempotent, additive schema migration.
//!
//! There is no version table: every run introspects the live structure,
//! diffs it against [`crate::infra::schema`] and applies only what is
//! missing. A run converges from an empty, partial or current database.

use crate::domain::CANONICAL_PERIODS;
use crate::error::{AppError, AppResult};
use crate::infra::schema::{
    seeded_tables, ColumnDef, ColumnDefault, ADDED_COLUMNS, BASE_TABLES, COMPAT_VIEW,
};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Default, Serialize)]
pub struct MigrationReport {
    pub tables_created: Vec<String>,
    /// `table.column`
    pub columns_added: Vec<String>,
    pub triggers_created: Vec<String>,
    pub seeds_inserted: usize,
    pub view_created: bool,
}

impl MigrationReport {
    pub fn is_noop(&self) -> bool {
        self.tables_created.is_empty()
            && self.columns_added.is_empty()
            && self.triggers_created.is_empty()
            && self.seeds_inserted == 0
            && !self.view_created
    }
}

/// What a migration run would still have to apply.
#[derive(Debug, Default, Serialize)]
pub struct SchemaStatus {
    pub missing_tables: Vec<String>,
    pub missing_columns: Vec<String>,
    /// `table.column` present but without its timestamp default
    pub missing_defaults: Vec<String>,
    /// `table.periodo`
    pub missing_seeds: Vec<String>,
    pub view_missing: bool,
}

impl SchemaStatus {
    pub fn is_current(&self) -> bool {
        self.missing_tables.is_empty()
            && self.missing_columns.is_empty()
            && self.missing_defaults.is_empty()
            && self.missing_seeds.is_empty()
            && !self.view_missing
    }
}

/// Tables and views both count.
pub fn table_exists(conn: &Connection, name: &str) -> AppResult<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type IN ('table','view') AND name = ?1 LIMIT 1",
            [name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub sql_type: String,
    /// `dflt_value` as declared, e.g. `CURRENT_TIMESTAMP`.
    pub default: Option<String>,
}

/// Lowercased column name -> info. Empty when the table does not exist.
///
/// SQLite compares column names case-insensitively, so lookups must use
/// lowercased keys too.
pub fn table_columns(conn: &Connection, table: &str) -> AppResult<BTreeMap<String, ColumnInfo>> {
    let mut stmt = conn.prepare("SELECT name, type, dflt_value FROM pragma_table_info(?1)")?;
    let rows = stmt.query_map([table], |row| {
        Ok((
            row.get::<_, String>(0)?,
            ColumnInfo {
                sql_type: row.get(1)?,
                default: row.get(2)?,
            },
        ))
    })?;
    let mut out = BTreeMap::new();
    for r in rows {
        let (name, info) = r?;
        out.insert(name.to_ascii_lowercase(), info);
    }
    Ok(out)
}

fn trigger_exists(conn: &Connection, name: &str) -> AppResult<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'trigger' AND name = ?1 LIMIT 1",
            [name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

fn table_is_empty(conn: &Connection, table: &str) -> AppResult<bool> {
    let any: i64 = conn.query_row(
        &format!("SELECT EXISTS (SELECT 1 FROM {table})"),
        [],
        |row| row.get(0),
    )?;
    Ok(any == 0)
}

/// Returns true when the column was added.
///
/// Presence is decided by introspection, never by a duplicate-column error.
/// A same-named column with another declared type is left alone and logged.
pub fn add_column_if_missing(conn: &Connection, col: &ColumnDef) -> AppResult<bool> {
    let cols = table_columns(conn, col.table)?;
    if cols.is_empty() {
        return Err(AppError::NotFound(format!(
            "table {} (needed for column {})",
            col.table, col.name
        )));
    }
    if let Some(existing) = cols.get(&col.name.to_ascii_lowercase()) {
        if !existing.sql_type.eq_ignore_ascii_case(col.sql_type) {
            log::warn!(
                "{}.{} exists as {:?}, expected {:?}; leaving it untouched",
                col.table,
                col.name,
                existing.sql_type,
                col.sql_type
            );
        }
        return Ok(false);
    }

    match col.default {
        ColumnDefault::CurrentTimestamp if !table_is_empty(conn, col.table)? => {
            // ALTER rejects non-constant defaults on populated tables
            conn.execute(
                &format!("ALTER TABLE {} ADD COLUMN {} {}", col.table, col.name, col.sql_type),
                [],
            )?;
            let filled = conn.execute(
                &format!(
                    "UPDATE {} SET {} = CURRENT_TIMESTAMP WHERE {} IS NULL",
                    col.table, col.name, col.name
                ),
                [],
            )?;
            log::debug!("{}.{} backfilled on {} rows", col.table, col.name, filled);
            // the default itself is carried by a trigger, see ensure_default_trigger
        }
        _ => {
            conn.execute(
                &format!("ALTER TABLE {} ADD COLUMN {} {}", col.table, col.name, col.ddl()),
                [],
            )?;
        }
    }
    log::info!("added column {}.{}", col.table, col.name);
    Ok(true)
}

/// Returns names of tables that did not exist before.
pub fn create_base_tables(conn: &Connection) -> AppResult<Vec<String>> {
    let mut created = Vec::new();
    for def in BASE_TABLES {
        let existed = table_exists(conn, def.name)?;
        conn.execute(def.create_sql, [])?;
        if !existed {
            log::info!("created table {}", def.name);
            created.push(def.name.to_string());
        }
    }
    Ok(created)
}

pub fn ensure_columns(conn: &Connection) -> AppResult<Vec<String>> {
    let mut added = Vec::new();
    for col in ADDED_COLUMNS {
        if add_column_if_missing(conn, col)? {
            added.push(format!("{}.{}", col.table, col.name));
        }
    }
    Ok(added)
}

/// Stamps `CURRENT_TIMESTAMP` on insert for a column that exists without its
/// declared non-constant default (added to a populated table). Returns the
/// trigger name when one was created.
pub fn ensure_default_trigger(conn: &Connection, col: &ColumnDef) -> AppResult<Option<String>> {
    if col.default != ColumnDefault::CurrentTimestamp {
        return Ok(None);
    }
    let cols = table_columns(conn, col.table)?;
    let Some(info) = cols.get(&col.name.to_ascii_lowercase()) else {
        return Ok(None);
    };
    let name = col.default_trigger_name();
    if info.default.is_some() || trigger_exists(conn, &name)? {
        return Ok(None);
    }
    conn.execute(
        &format!(
            "CREATE TRIGGER IF NOT EXISTS {name}
             AFTER INSERT ON {table}
             WHEN NEW.{column} IS NULL
             BEGIN
               UPDATE {table} SET {column} = CURRENT_TIMESTAMP WHERE rowid = NEW.rowid;
             END",
            table = col.table,
            column = col.name,
        ),
        [],
    )?;
    log::info!("created trigger {} for {}.{} default", name, col.table, col.name);
    Ok(Some(name))
}

pub fn ensure_default_triggers(conn: &Connection) -> AppResult<Vec<String>> {
    let mut created = Vec::new();
    for col in ADDED_COLUMNS {
        if let Some(name) = ensure_default_trigger(conn, col)? {
            created.push(name);
        }
    }
    Ok(created)
}

/// Inserts the canonical periods; an existing `periodo` is never overwritten.
pub fn seed_reference_tables(conn: &Connection) -> AppResult<usize> {
    let mut inserted = 0;
    for table in seeded_tables() {
        let mut stmt = conn.prepare(&format!(
            "INSERT INTO {} (periodo, hora_inicio, hora_fim, multiplicador) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(periodo) DO NOTHING",
            table.as_str()
        ))?;
        for p in CANONICAL_PERIODS.iter() {
            inserted += stmt.execute(params![p.name, p.start, p.end, p.multiplier])?;
        }
    }
    Ok(inserted)
}

/// An existing view is kept as-is, even if its definition differs.
pub fn ensure_compat_view(conn: &Connection) -> AppResult<bool> {
    let existed = table_exists(conn, COMPAT_VIEW.name)?;
    conn.execute(COMPAT_VIEW.create_sql, [])?;
    if !existed {
        log::info!("created view {} over {}", COMPAT_VIEW.name, COMPAT_VIEW.source);
    }
    Ok(!existed)
}

pub fn schema_status(conn: &Connection) -> AppResult<SchemaStatus> {
    let mut status = SchemaStatus::default();
    for def in BASE_TABLES {
        if !table_exists(conn, def.name)? {
            status.missing_tables.push(def.name.to_string());
        }
    }
    for col in ADDED_COLUMNS {
        let cols = table_columns(conn, col.table)?;
        match cols.get(&col.name.to_ascii_lowercase()) {
            None => status.missing_columns.push(format!("{}.{}", col.table, col.name)),
            Some(info)
                if col.default == ColumnDefault::CurrentTimestamp
                    && info.default.is_none()
                    && !trigger_exists(conn, &col.default_trigger_name())? =>
            {
                status.missing_defaults.push(format!("{}.{}", col.table, col.name));
            }
            Some(_) => {}
        }
    }
    for table in seeded_tables() {
        let present = table_exists(conn, table.as_str())?;
        for p in CANONICAL_PERIODS.iter() {
            let seeded = present
                && conn
                    .query_row(
                        &format!("SELECT 1 FROM {} WHERE periodo = ?1", table.as_str()),
                        [p.name],
                        |_| Ok(()),
                    )
                    .optional()?
                    .is_some();
            if !seeded {
                status.missing_seeds.push(format!("{}.{}", table.as_str(), p.name));
            }
        }
    }
    status.view_missing = !table_exists(conn, COMPAT_VIEW.name)?;
    Ok(status)
}

/// One run in one transaction. On error nothing from this run is committed.
pub fn migrate(conn: &mut Connection) -> AppResult<MigrationReport> {
    let tx = conn.transaction()?;

    let tables_created = create_base_tables(&tx)?;
    let columns_added = ensure_columns(&tx)?;
    let triggers_created = ensure_default_triggers(&tx)?;
    let seeds_inserted = seed_reference_tables(&tx)?;
    let view_created = ensure_compat_view(&tx)?;

    tx.commit()?;

    let report = MigrationReport {
        tables_created,
        columns_added,
        triggers_created,
        seeds_inserted,
        view_created,
    };
    if report.is_noop() {
        log::info!("schema already current");
    }
    Ok(report)
}

/// Opens `path`, migrates, and closes the connection on every exit path.
pub fn migrate_path(path: &Path) -> AppResult<MigrationReport> {
    log::info!("migrating {:?}", path);
    let mut conn = Connection::open(path)?;
    let result = migrate(&mut conn);
    let closed = conn.close().map_err(|(_, e)| AppError::from(e));
    let report = result?;
    closed?;
    Ok(report)
}
