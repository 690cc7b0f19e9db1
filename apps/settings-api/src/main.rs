//! # Bountip Settings API
//!
//! Binary entry point: load configuration, open the database, serve HTTP.

use actix_web::{web, App, HttpServer};
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bountip_db::Database;
use settings_api::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("settings_api=debug,bountip_db=info,actix_web=info")
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    info!("Starting Bountip Settings API...");

    let config = AppConfig::from_env()?;
    info!(
        address = %config.server_address(),
        database = %config.database_path,
        currency = %config.default_currency,
        "Configuration loaded"
    );

    let db = Database::new(config.db_config()).await?;
    info!("Database ready");

    let address = config.server_address();
    let db = web::Data::new(db);
    let config = web::Data::new(config);

    HttpServer::new({
        let db = db.clone();
        move || {
            App::new()
                .wrap(TracingLogger::default())
                .app_data(db.clone())
                .app_data(config.clone())
                .configure(settings_api::configure)
        }
    })
    .bind(&address)?
    .run()
    .await?;

    info!("Server stopped, closing database");
    db.close().await;

    Ok(())
}
