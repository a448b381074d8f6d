//! Driver connections and the demonstration run.

use sqlx::{Connection, FromRow, MySqlConnection, PgConnection};
use thiserror::Error;
use tracing::debug;

use dbspin_core::{EngineKind, EngineSpec};

use crate::dialect;

/// Errors from the database boundary.
#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sql(#[from] sqlx::Error),
}

pub type DbResult<T> = Result<T, DbError>;

/// One row of the demonstration table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct DemoRow {
    pub demo_k: i32,
    pub f_name: String,
}

/// Driver URL for the engine's administrative surface (no demo database).
fn admin_url(spec: &EngineSpec) -> String {
    match spec.kind {
        EngineKind::MariaDb => format!(
            "mysql://{}:{}@127.0.0.1:{}",
            spec.user, spec.password, spec.host_port
        ),
        // Postgres connections always target a database; use the
        // maintenance one.
        EngineKind::Postgres => format!(
            "postgres://{}:{}@127.0.0.1:{}/postgres",
            spec.user, spec.password, spec.host_port
        ),
    }
}

/// Driver URL targeting the demonstration database.
fn demo_url(spec: &EngineSpec) -> String {
    let scheme = match spec.kind {
        EngineKind::MariaDb => "mysql",
        EngineKind::Postgres => "postgres",
    };
    format!(
        "{scheme}://{}:{}@127.0.0.1:{}/{}",
        spec.user, spec.password, spec.host_port, spec.database
    )
}

/// Open one authenticated connection and immediately close it.
///
/// This is the readiness probe's dial: any failure (refused connection,
/// handshake error, bad credentials) is one failed attempt.
pub async fn dial(spec: &EngineSpec) -> DbResult<()> {
    let url = admin_url(spec);
    match spec.kind {
        EngineKind::MariaDb => {
            let conn = MySqlConnection::connect(&url).await?;
            conn.close().await?;
        }
        EngineKind::Postgres => {
            let conn = PgConnection::connect(&url).await?;
            conn.close().await?;
        }
    }
    Ok(())
}

/// Create the demonstration database, set up `tdemo`, insert the two fixed
/// rows, and return everything the table now holds, in insertion order.
pub async fn run_demo(spec: &EngineSpec) -> DbResult<Vec<DemoRow>> {
    match spec.kind {
        EngineKind::MariaDb => run_demo_mariadb(spec).await,
        EngineKind::Postgres => run_demo_postgres(spec).await,
    }
}

async fn run_demo_mariadb(spec: &EngineSpec) -> DbResult<Vec<DemoRow>> {
    let mut admin = MySqlConnection::connect(&admin_url(spec)).await?;
    let create_db = dialect::mariadb::create_database(&spec.database);
    debug!(statement = %create_db, "creating demo database");
    sqlx::query(&create_db).execute(&mut admin).await?;
    admin.close().await?;

    let mut conn = MySqlConnection::connect(&demo_url(spec)).await?;
    debug!(statement = dialect::mariadb::CREATE_TABLE, "creating demo table");
    sqlx::query(dialect::mariadb::CREATE_TABLE)
        .execute(&mut conn)
        .await?;
    debug!(statement = dialect::INSERT_ROWS, "inserting demo rows");
    sqlx::query(dialect::INSERT_ROWS).execute(&mut conn).await?;
    let rows = sqlx::query_as::<_, DemoRow>(dialect::SELECT_ALL)
        .fetch_all(&mut conn)
        .await?;
    conn.close().await?;
    Ok(rows)
}

async fn run_demo_postgres(spec: &EngineSpec) -> DbResult<Vec<DemoRow>> {
    let mut admin = PgConnection::connect(&admin_url(spec)).await?;
    let exists = sqlx::query(&dialect::postgres::database_exists(&spec.database))
        .fetch_optional(&mut admin)
        .await?
        .is_some();
    if !exists {
        let create_db = dialect::postgres::create_database(&spec.database);
        debug!(statement = %create_db, "creating demo database");
        sqlx::query(&create_db).execute(&mut admin).await?;
    }
    admin.close().await?;

    let mut conn = PgConnection::connect(&demo_url(spec)).await?;
    debug!(statement = dialect::postgres::CREATE_TABLE, "creating demo table");
    sqlx::query(dialect::postgres::CREATE_TABLE)
        .execute(&mut conn)
        .await?;
    debug!(statement = dialect::INSERT_ROWS, "inserting demo rows");
    sqlx::query(dialect::INSERT_ROWS).execute(&mut conn).await?;
    let rows = sqlx::query_as::<_, DemoRow>(dialect::SELECT_ALL)
        .fetch_all(&mut conn)
        .await?;
    conn.close().await?;
    Ok(rows)
}

/// Render rows the way the demonstration prints them: one row per line,
/// insertion order.
pub fn render_rows(rows: &[DemoRow]) -> String {
    rows.iter()
        .map(|row| format!("({}, {})", row.demo_k, row.f_name))
        .collect::<Vec<_>>()
        .join("\n")
}
