mod config;
mod db;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use services::memory::MemoryIdentityStore;
use services::store::{IdentityStore, PgIdentityStore};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::HostingConfig::from_env().expect("invalid configuration");

    // Persistent store when a database is configured, in-memory otherwise.
    let identity: Arc<dyn IdentityStore> = match &config.database_url {
        Some(database_url) => {
            let pool = db::init_pool(database_url, config.db_max_connections)
                .await
                .expect("database init failed");
            Arc::new(PgIdentityStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; accounts are kept in memory and lost on restart");
            Arc::new(MemoryIdentityStore::new())
        }
    };

    tracing::info!(
        require_confirmed_account = config.identity.require_confirmed_account,
        min_password_length = config.identity.min_password_length,
        "identity options loaded"
    );

    let state = state::AppState::new(identity, config.identity.clone(), config.cookie_secure);
    let app = routes::app(state, &config.site_root);

    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, site_root = %config.site_root.display(), "identity-interop listening");
    axum::serve(listener, app).await.expect("server failed");
}
