//! Fare / schedule period lookups.

use crate::domain::{covers, PeriodTable};
use crate::error::AppError;
use chrono::NaiveTime;
use rusqlite::Connection;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodDto {
    pub name: String,
    pub start: String,
    pub end: String,
    pub multiplier: f64,
}

fn row_to_period(row: &rusqlite::Row<'_>) -> rusqlite::Result<PeriodDto> {
    Ok(PeriodDto {
        name: row.get(0)?,
        start: row.get(1)?,
        end: row.get(2)?,
        multiplier: row.get(3)?,
    })
}

pub fn period_list(conn: &Connection, table: PeriodTable) -> Result<Vec<PeriodDto>, AppError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT periodo, hora_inicio, hora_fim, multiplicador FROM {} ORDER BY hora_inicio",
        table.as_str()
    ))?;
    let rows = stmt.query_map([], row_to_period)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Period covering `time` (`H:MM` or `HH:MM`, optional `:SS` ignored).
pub fn period_for_time(conn: &Connection, table: PeriodTable, time: &str) -> Result<PeriodDto, AppError> {
    let t = time.trim();
    let parsed = NaiveTime::parse_from_str(t, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M:%S"))
        .map_err(|_| AppError::Validation(format!("invalid time of day: {time:?}")))?;
    let key = parsed.format("%H:%M").to_string();

    period_list(conn, table)?
        .into_iter()
        .find(|p| covers(&p.start, &p.end, &key))
        .ok_or_else(|| AppError::NotFound(format!("period for {key} in {}", table.as_str())))
}
