//! Expected database shape. Pure data; `migrate` diffs against it.

use crate::domain::PeriodTable;

pub struct TableDef {
    pub name: &'static str,
    pub create_sql: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDefault {
    None,
    /// Non-constant; SQLite only accepts it via ALTER on an empty table.
    CurrentTimestamp,
}

pub struct ColumnDef {
    pub table: &'static str,
    pub name: &'static str,
    pub sql_type: &'static str,
    pub default: ColumnDefault,
}

impl ColumnDef {
    pub fn ddl(&self) -> String {
        match self.default {
            ColumnDefault::None => self.sql_type.to_string(),
            ColumnDefault::CurrentTimestamp => format!("{} DEFAULT CURRENT_TIMESTAMP", self.sql_type),
        }
    }

    pub fn default_trigger_name(&self) -> String {
        format!("{}_{}_default", self.table, self.name)
    }
}

pub struct ViewDef {
    pub name: &'static str,
    pub source: &'static str,
    pub create_sql: &'static str,
}

pub const DRIVERS: &str = "motoristas_cadastro";
pub const CLIENTS: &str = "clientes";
pub const RIDES: &str = "historico_corridas";

pub const BASE_TABLES: &[TableDef] = &[
    TableDef {
        name: DRIVERS,
        create_sql: "CREATE TABLE IF NOT EXISTS motoristas_cadastro (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nome TEXT NOT NULL,
            cpf TEXT UNIQUE NOT NULL,
            telefone TEXT,
            veiculo_modelo TEXT,
            placa TEXT UNIQUE,
            data_cadastro DATETIME DEFAULT CURRENT_TIMESTAMP,
            status TEXT DEFAULT 'pendente'
        )",
    },
    TableDef {
        name: CLIENTS,
        create_sql: "CREATE TABLE IF NOT EXISTS clientes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            nome TEXT NOT NULL,
            email TEXT UNIQUE,
            telefone TEXT UNIQUE NOT NULL,
            data_cadastro DATETIME DEFAULT CURRENT_TIMESTAMP,
            total_corridas INTEGER DEFAULT 0,
            nota_media REAL DEFAULT 5.0
        )",
    },
    // motorista_id / cliente_id: no FOREIGN KEY
    TableDef {
        name: RIDES,
        create_sql: "CREATE TABLE IF NOT EXISTS historico_corridas (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            motorista_id INTEGER,
            valor_total_pago REAL,
            km_distancia REAL,
            taxa_app_valor REAL,
            custo_gateway REAL,
            custos_fixos_totais REAL,
            liquido_motorista REAL,
            data_corrida DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
    },
    TableDef {
        name: "tarifas_dinamicas",
        create_sql: "CREATE TABLE IF NOT EXISTS tarifas_dinamicas (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            periodo TEXT UNIQUE,
            hora_inicio TIME,
            hora_fim TIME,
            multiplicador REAL
        )",
    },
    TableDef {
        name: "grade_horarios",
        create_sql: "CREATE TABLE IF NOT EXISTS grade_horarios (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            periodo TEXT UNIQUE,
            hora_inicio TIME,
            hora_fim TIME,
            multiplicador REAL
        )",
    },
];

/// Columns added to the ride history after its first release, in order.
pub const ADDED_COLUMNS: &[ColumnDef] = &[
    ColumnDef {
        table: RIDES,
        name: "cliente_id",
        sql_type: "INTEGER",
        default: ColumnDefault::None,
    },
    ColumnDef {
        table: RIDES,
        name: "hora_partida",
        sql_type: "TEXT",
        default: ColumnDefault::None,
    },
    ColumnDef {
        table: RIDES,
        name: "preco_concorrente",
        sql_type: "REAL",
        default: ColumnDefault::None,
    },
    ColumnDef {
        table: RIDES,
        name: "avaliacao_motorista",
        sql_type: "INTEGER",
        default: ColumnDefault::None,
    },
    ColumnDef {
        table: RIDES,
        name: "data_cadastro",
        sql_type: "DATETIME",
        default: ColumnDefault::CurrentTimestamp,
    },
];

/// Legacy name still queried by the strategic report.
pub const COMPAT_VIEW: ViewDef = ViewDef {
    name: "clientes_cadastro",
    source: CLIENTS,
    create_sql: "CREATE VIEW IF NOT EXISTS clientes_cadastro AS
        SELECT id, nome, email, telefone, data_cadastro, total_corridas, nota_media
        FROM clientes",
};

pub fn seeded_tables() -> &'static [PeriodTable] {
    PeriodTable::all()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_seeded_table_is_a_base_table() {
        for t in seeded_tables() {
            assert!(BASE_TABLES.iter().any(|d| d.name == t.as_str()));
        }
    }

    #[test]
    fn added_columns_target_existing_base_tables() {
        for c in ADDED_COLUMNS {
            assert!(BASE_TABLES.iter().any(|d| d.name == c.table));
        }
    }

    #[test]
    fn ddl_includes_default_only_when_declared() {
        assert_eq!(ADDED_COLUMNS[0].ddl(), "INTEGER");
        assert_eq!(ADDED_COLUMNS[4].ddl(), "DATETIME DEFAULT CURRENT_TIMESTAMP");
    }
}
