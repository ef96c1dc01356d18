use std::str::FromStr;
use std::time::Duration;

use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Connection, PgConnection, PgPool, Postgres};

use crate::config::DbConfig;
use crate::error::AppError;

/// Database every Postgres server has, used while (re)creating ours.
const MAINTENANCE_DATABASE: &str = "postgres";

/// Build connection options from the URL if given, otherwise from the parts.
pub fn connect_options(config: &DbConfig) -> Result<PgConnectOptions, AppError> {
    if let Some(url) = &config.database_url {
        return PgConnectOptions::from_str(url).map_err(AppError::Connectivity);
    }

    let mut options = PgConnectOptions::new()
        .host(&config.db_host)
        .port(config.db_port)
        .username(&config.db_user)
        .database(&config.db_name);
    if let Some(password) = &config.db_password {
        options = options.password(password);
    }
    Ok(options)
}

pub async fn create_pool(options: PgConnectOptions) -> Result<PgPool, AppError> {
    PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(options)
        .await
        .map_err(AppError::Connectivity)
}

/// Check out a connection for one store operation. It goes back to the pool
/// when dropped, whichever way the operation ends.
pub async fn acquire(pool: &PgPool) -> Result<PoolConnection<Postgres>, AppError> {
    pool.acquire().await.map_err(AppError::Connectivity)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Drop and recreate the configured database from the maintenance database.
pub async fn recreate_database(options: &PgConnectOptions) -> Result<(), AppError> {
    let name = options
        .get_database()
        .ok_or_else(|| AppError::Internal("No database name configured".to_string()))?
        .to_string();
    if name == MAINTENANCE_DATABASE {
        return Err(AppError::Internal(format!(
            "Refusing to recreate the '{MAINTENANCE_DATABASE}' database"
        )));
    }

    let maintenance = options.clone().database(MAINTENANCE_DATABASE);
    let mut conn = PgConnection::connect_with(&maintenance)
        .await
        .map_err(AppError::Connectivity)?;

    let ident = quote_ident(&name);
    tracing::warn!("Dropping database {ident}");
    sqlx::raw_sql(&format!("DROP DATABASE IF EXISTS {ident}"))
        .execute(&mut conn)
        .await?;
    sqlx::raw_sql(&format!("CREATE DATABASE {ident}"))
        .execute(&mut conn)
        .await?;
    conn.close().await?;

    tracing::info!("Created database {ident}");
    Ok(())
}

/// Quote an SQL identifier, doubling any embedded quotes.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
