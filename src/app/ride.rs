//! Ride history: append-only.

use crate::error::AppError;
use crate::infra::schema::RIDES;
use rusqlite::{params, Connection};
use serde::Serialize;

#[derive(Debug, Default)]
pub struct RideAppendReq {
    pub driver_id: i64,
    pub client_id: Option<i64>,
    pub total_paid: f64,
    pub distance_km: f64,
    pub platform_fee: f64,
    pub gateway_cost: f64,
    pub fixed_costs: f64,
    pub driver_net: f64,
    pub departure_time: Option<String>,
    pub competitor_price: Option<f64>,
    pub driver_rating: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct RideDto {
    pub id: i64,
    pub driver_id: Option<i64>,
    pub client_id: Option<i64>,
    pub total_paid: Option<f64>,
    pub distance_km: Option<f64>,
    pub platform_fee: Option<f64>,
    pub gateway_cost: Option<f64>,
    pub fixed_costs: Option<f64>,
    pub driver_net: Option<f64>,
    pub departure_time: Option<String>,
    pub competitor_price: Option<f64>,
    pub driver_rating: Option<i32>,
    pub ride_at: Option<String>,
    pub recorded_at: Option<String>,
}

const SELECT_COLS: &str = "id, motorista_id, cliente_id, valor_total_pago, km_distancia, taxa_app_valor, \
     custo_gateway, custos_fixos_totais, liquido_motorista, hora_partida, preco_concorrente, \
     avaliacao_motorista, data_corrida, data_cadastro";

fn row_to_ride(row: &rusqlite::Row<'_>) -> rusqlite::Result<RideDto> {
    Ok(RideDto {
        id: row.get(0)?,
        driver_id: row.get(1)?,
        client_id: row.get(2)?,
        total_paid: row.get(3)?,
        distance_km: row.get(4)?,
        platform_fee: row.get(5)?,
        gateway_cost: row.get(6)?,
        fixed_costs: row.get(7)?,
        driver_net: row.get(8)?,
        departure_time: row.get(9)?,
        competitor_price: row.get(10)?,
        driver_rating: row.get(11)?,
        ride_at: row.get(12)?,
        recorded_at: row.get(13)?,
    })
}

pub fn ride_append(conn: &Connection, req: RideAppendReq) -> Result<RideDto, AppError> {
    let departure = req
        .departure_time
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    conn.execute(
        &format!(
            "INSERT INTO {RIDES} (motorista_id, cliente_id, valor_total_pago, km_distancia, taxa_app_valor,
               custo_gateway, custos_fixos_totais, liquido_motorista, hora_partida, preco_concorrente,
               avaliacao_motorista, data_corrida, data_cadastro)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)"
        ),
        params![
            req.driver_id,
            req.client_id,
            req.total_paid,
            req.distance_km,
            req.platform_fee,
            req.gateway_cost,
            req.fixed_costs,
            req.driver_net,
            departure,
            req.competitor_price,
            req.driver_rating,
        ],
    )?;
    let id = conn.last_insert_rowid();

    Ok(conn.query_row(
        &format!("SELECT {SELECT_COLS} FROM {RIDES} WHERE id = ?1"),
        [id],
        row_to_ride,
    )?)
}

/// Newest first.
pub fn ride_list(conn: &Connection, limit: u32) -> Result<Vec<RideDto>, AppError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {SELECT_COLS} FROM {RIDES} ORDER BY id DESC LIMIT ?1"
    ))?;
    let rows = stmt.query_map([limit], row_to_ride)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
