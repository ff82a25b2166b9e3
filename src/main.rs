//! Runs the shopping cart service.

use color_eyre::eyre::WrapErr;
use shopping_cart_service::{
    infra::{config, database, logging, shutdown, state::AppState},
    server,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e).wrap_err("failed to read .env");
        }
    }
    let _guard = logging::init_logging();

    let config = config::load_config().wrap_err("invalid configuration")?;
    let db = database::init_db(&config.database).wrap_err("invalid database url")?;
    if config.database.run_migrations {
        database::migrate(&db)
            .await
            .wrap_err("failed to run migrations")?;
    }

    let address = format!("{}:{}", config.server.address, config.server.port);
    let listener = TcpListener::bind(&address)
        .await
        .wrap_err_with(|| format!("failed to bind {address}"))?;
    server::run_app(
        listener,
        AppState::new(db),
        config.server,
        shutdown::shutdown_signal(),
    )
    .await?;
    Ok(())
}
