//! Connects to MySQL using `MYSQL_*` environment variables, runs one query
//! and shuts down.
//!
//! ```sh
//! MYSQL_HOST=localhost MYSQL_PORT=3306 MYSQL_USERNAME=u MYSQL_PASSWORD=p \
//! MYSQL_DATABASE=d MYSQL_MAXOPENCONNS=10 MYSQL_MAXIDLECONNS=5 \
//! RUST_LOG=debug cargo run --example connect
//! ```

use blaster_db::database::mysql::ENV_PREFIX;
use blaster_db::{Database, MySql, MySqlConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut db = MySql::new();
    *db.new_config() = MySqlConfig::from_env(ENV_PREFIX)?;

    if let Err(e) = db.validate_before() {
        eprintln!("configuration error [{}]: {e}", e.code());
        std::process::exit(2);
    }
    db.connect().await?;

    let pool = db.get_connection().expect("connect succeeded");
    let (version,): (String,) = sqlx::query_as("SELECT VERSION()").fetch_one(pool).await?;
    info!(%version, "connected");

    db.close().await?;
    Ok(())
}
