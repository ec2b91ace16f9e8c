//! Driver and client registration.

use crate::error::AppError;
use crate::infra::schema::{CLIENTS, COMPAT_VIEW, DRIVERS};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

pub const DRIVER_STATUS_PENDING: &str = "pendente";

#[derive(Debug)]
pub struct DriverRegisterReq {
    pub name: String,
    pub cpf: String,
    pub phone: Option<String>,
    pub vehicle_model: Option<String>,
    pub plate: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DriverDto {
    pub id: i64,
    pub name: String,
    pub cpf: String,
    pub phone: Option<String>,
    pub vehicle_model: Option<String>,
    pub plate: Option<String>,
    pub registered_at: Option<String>,
    pub status: String,
}

#[derive(Debug)]
pub struct ClientCreateReq {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientDto {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    pub registered_at: Option<String>,
    pub total_rides: i64,
    pub average_rating: f64,
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub fn driver_register(conn: &Connection, req: DriverRegisterReq) -> Result<DriverDto, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    let cpf = req.cpf.trim();
    if cpf.is_empty() {
        return Err(AppError::Validation("cpf is required".into()));
    }
    let phone = non_empty(req.phone);
    let vehicle_model = non_empty(req.vehicle_model);
    let plate = non_empty(req.plate).map(|p| p.to_uppercase());

    conn.execute(
        &format!(
            "INSERT INTO {DRIVERS} (nome, cpf, telefone, veiculo_modelo, placa, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
        ),
        params![name, cpf, phone, vehicle_model, plate, DRIVER_STATUS_PENDING],
    )
    .map_err(|e| AppError::from_write(e, "driver with this cpf or plate"))?;
    let id = conn.last_insert_rowid();

    Ok(conn.query_row(
        &format!(
            "SELECT id, nome, cpf, telefone, veiculo_modelo, placa, data_cadastro, status
             FROM {DRIVERS} WHERE id = ?1"
        ),
        [id],
        |row| {
            Ok(DriverDto {
                id: row.get(0)?,
                name: row.get(1)?,
                cpf: row.get(2)?,
                phone: row.get(3)?,
                vehicle_model: row.get(4)?,
                plate: row.get(5)?,
                registered_at: row.get(6)?,
                status: row.get(7)?,
            })
        },
    )?)
}

pub fn client_create(conn: &Connection, req: ClientCreateReq) -> Result<ClientDto, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    let phone = req.phone.trim();
    if phone.is_empty() {
        return Err(AppError::Validation("phone is required".into()));
    }
    let email = non_empty(req.email).map(|e| e.to_lowercase());

    conn.execute(
        &format!("INSERT INTO {CLIENTS} (nome, telefone, email) VALUES (?1, ?2, ?3)"),
        params![name, phone, email],
    )
    .map_err(|e| AppError::from_write(e, "client with this phone or email"))?;
    let id = conn.last_insert_rowid();

    client_get(conn, id)
}

/// Nullable counters read back as their declared defaults.
const CLIENT_COLS: &str =
    "id, nome, email, telefone, data_cadastro, COALESCE(total_corridas, 0), COALESCE(nota_media, 5.0)";

fn row_to_client(row: &rusqlite::Row<'_>) -> rusqlite::Result<ClientDto> {
    Ok(ClientDto {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        registered_at: row.get(4)?,
        total_rides: row.get(5)?,
        average_rating: row.get(6)?,
    })
}

pub fn client_get(conn: &Connection, id: i64) -> Result<ClientDto, AppError> {
    conn.query_row(
        &format!("SELECT {CLIENT_COLS} FROM {} WHERE id = ?1", COMPAT_VIEW.name),
        [id],
        row_to_client,
    )
    .optional()?
    .ok_or_else(|| AppError::NotFound(format!("client {id}")))
}

/// Reads through the legacy compatibility view.
pub fn client_list(conn: &Connection) -> Result<Vec<ClientDto>, AppError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CLIENT_COLS} FROM {} ORDER BY id",
        COMPAT_VIEW.name
    ))?;
    let rows = stmt.query_map([], row_to_client)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
