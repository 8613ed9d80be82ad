//! Data source access.
//!
//! RULE: Only the store talks to the database.
//! Reports ask a `Session` for typed rows; they never execute SQL directly.

use crate::{
    config::SourceConfig,
    error::{ConnectError, ReportError, ReportResult},
    table::{Table, Value},
    types::{LocationId, ProductId, ProductModelId},
};
use chrono::NaiveDateTime;
use rusqlite::{types::ValueRef, Connection, OpenFlags};
use std::path::{Path, PathBuf};

#[cfg(feature = "postgres")]
use postgres::NoTls;
#[cfg(feature = "postgres")]
use r2d2_postgres::PostgresConnectionManager;

mod catalog;
mod sales;

#[cfg(feature = "postgres")]
type PgPool = r2d2::Pool<PostgresConnectionManager<NoTls>>;

// ── Row types ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub product_id: ProductId,
    pub product_model_id: Option<ProductModelId>,
    pub standard_cost: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRow {
    pub product_id: ProductId,
    pub location_id: Option<LocationId>,
    pub quantity: i64,
}

/// A sales transaction (`transactiontype = 'S'`). `actual_cost` is per unit.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRow {
    pub product_id: ProductId,
    pub transaction_date: NaiveDateTime,
    pub quantity: i64,
    pub actual_cost: f64,
}

/// A list price effective from `start_date` until the product's next entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPriceRow {
    pub product_id: ProductId,
    pub start_date: NaiveDateTime,
    pub list_price: f64,
}

// ── Database ───────────────────────────────────────────────────

enum Backend {
    Sqlite { path: PathBuf },
    #[cfg(feature = "postgres")]
    Postgres(PgPool),
}

/// An open data source. Hand out one `Session` per unit of work.
pub struct Database {
    backend: Backend,
    schema: Option<String>,
}

impl Database {
    /// Open the configured data source, verifying it is reachable.
    pub fn open(config: &SourceConfig) -> Result<Self, ConnectError> {
        let backend = match config {
            SourceConfig::Sqlite(lite) => {
                let conn = open_sqlite(&lite.path)?;
                // Reads the header, so a missing or non-database file fails here.
                conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))?;
                Backend::Sqlite {
                    path: lite.path.clone(),
                }
            }
            #[cfg(feature = "postgres")]
            SourceConfig::Postgres(pg) => {
                let manager = PostgresConnectionManager::new(pg.to_client_config(), NoTls);
                let pool = r2d2::Pool::builder()
                    .max_size(pg.pool_size)
                    .connection_timeout(std::time::Duration::from_secs(pg.connect_timeout))
                    .build(manager)?;
                Backend::Postgres(pool)
            }
            #[cfg(not(feature = "postgres"))]
            SourceConfig::Postgres(_) => return Err(ConnectError::DialectDisabled("postgresql")),
        };
        log::debug!("opened data source (schema: {:?})", config.schema());
        Ok(Self {
            backend,
            schema: config.schema().map(str::to_string),
        })
    }

    /// Check out a connection. It is released when the session drops.
    pub fn session(&self) -> ReportResult<Session> {
        let conn = match &self.backend {
            Backend::Sqlite { path } => SessionConn::Sqlite(open_sqlite(path)?),
            #[cfg(feature = "postgres")]
            Backend::Postgres(pool) => SessionConn::Postgres(pool.get()?),
        };
        Ok(Session {
            conn,
            schema: self.schema.clone(),
        })
    }
}

fn open_sqlite(path: &Path) -> rusqlite::Result<Connection> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI,
    )
}

// ── Session ────────────────────────────────────────────────────

enum SessionConn {
    Sqlite(Connection),
    #[cfg(feature = "postgres")]
    Postgres(r2d2::PooledConnection<PostgresConnectionManager<NoTls>>),
}

pub struct Session {
    conn: SessionConn,
    schema: Option<String>,
}

impl Session {
    /// Execute a read-only statement and materialise the full result.
    pub fn run_query(&mut self, sql: &str) -> ReportResult<Table> {
        log::debug!("query: {sql}");
        let table = match &mut self.conn {
            SessionConn::Sqlite(conn) => sqlite_query(conn, sql)?,
            #[cfg(feature = "postgres")]
            SessionConn::Postgres(client) => pg_query(client, sql)?,
        };
        log::debug!("query returned {} rows", table.len());
        Ok(table)
    }

    /// Table name qualified with the configured schema, if any.
    fn qualified(&self, table: &str) -> String {
        match &self.schema {
            Some(schema) => format!("{schema}.{table}"),
            None => table.to_string(),
        }
    }
}

fn sqlite_query(conn: &Connection, sql: &str) -> ReportResult<Table> {
    let mut stmt = conn.prepare(sql)?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = columns.len();
    let mut table = Table::new(sql, columns);

    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(width);
        for idx in 0..width {
            values.push(match row.get_ref(idx)? {
                ValueRef::Null => Value::Null,
                ValueRef::Integer(v) => Value::Int(v),
                ValueRef::Real(v) => Value::Float(v),
                ValueRef::Text(bytes) => Value::Text(String::from_utf8_lossy(bytes).into_owned()),
                ValueRef::Blob(_) => {
                    return Err(ReportError::UnsupportedColumnType {
                        column: table.columns()[idx].clone(),
                        type_name: "blob".into(),
                    })
                }
            });
        }
        table.push_row(values)?;
    }
    Ok(table)
}

#[cfg(feature = "postgres")]
fn pg_query(client: &mut postgres::Client, sql: &str) -> ReportResult<Table> {
    let stmt = client.prepare(sql)?;
    let columns: Vec<String> = stmt.columns().iter().map(|c| c.name().to_string()).collect();
    let mut table = Table::new(sql, columns);

    for row in client.query(&stmt, &[])? {
        let values = (0..row.len())
            .map(|idx| pg_value(&row, idx))
            .collect::<ReportResult<Vec<_>>>()?;
        table.push_row(values)?;
    }
    Ok(table)
}

#[cfg(feature = "postgres")]
fn pg_value(row: &postgres::Row, idx: usize) -> ReportResult<Value> {
    use chrono::{DateTime, NaiveDate, Utc};

    let column = &row.columns()[idx];
    let value = match column.type_().name() {
        "bool" => row.try_get::<_, Option<bool>>(idx)?.map(Value::Bool),
        "int2" => row.try_get::<_, Option<i16>>(idx)?.map(|v| Value::Int(v.into())),
        "int4" => row.try_get::<_, Option<i32>>(idx)?.map(|v| Value::Int(v.into())),
        "int8" => row.try_get::<_, Option<i64>>(idx)?.map(Value::Int),
        "float4" => row.try_get::<_, Option<f32>>(idx)?.map(|v| Value::Float(v.into())),
        "float8" => row.try_get::<_, Option<f64>>(idx)?.map(Value::Float),
        "text" | "varchar" | "bpchar" | "name" => {
            row.try_get::<_, Option<String>>(idx)?.map(Value::Text)
        }
        "timestamp" => row
            .try_get::<_, Option<NaiveDateTime>>(idx)?
            .map(Value::Timestamp),
        "timestamptz" => row
            .try_get::<_, Option<DateTime<Utc>>>(idx)?
            .map(|ts| Value::Timestamp(ts.naive_utc())),
        "date" => row
            .try_get::<_, Option<NaiveDate>>(idx)?
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(Value::Timestamp),
        other => {
            return Err(ReportError::UnsupportedColumnType {
                column: column.name().to_string(),
                type_name: other.to_string(),
            })
        }
    };
    Ok(value.unwrap_or(Value::Null))
}
