//! Customer API server: reads config from env, wires the store into the service, serves HTTP.

use customer_api::{
    app_router, ensure_customer_table, ensure_database_exists, AppConfig, AppState, CustomerDao,
    CustomerService, InMemoryCustomerDao, PgCustomerDao, StoreKind,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("customer_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let dao: Arc<dyn CustomerDao> = match config.store {
        StoreKind::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            ensure_customer_table(&pool).await?;
            Arc::new(PgCustomerDao::new(pool))
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory customer store; data is lost on exit");
            Arc::new(InMemoryCustomerDao::new())
        }
    };

    let state = AppState::new(CustomerService::new(dao));
    let app = app_router(state, config.max_body_bytes);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
