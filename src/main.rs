//! The catalog server.
//!
//! Run with:
//!   RUST_LOG=charstore=info PORT=3000 DB_PATH=db.json cargo run --bin charstore
//!
//! Try:
//!   curl 'http://localhost:3000/api/character?status=alive&page=1'
//!   curl -X POST http://localhost:3000/api/character \
//!        -H 'content-type: application/json' \
//!        -d '{"name":"Rick","species":"Human","status":"Alive","image":"http://x/1.png"}'
//!   curl -X DELETE http://localhost:3000/api/character/1

use charstore::api::{self, App};
use charstore::config::ServerConfig;
use charstore::middleware::cors::Cors;
use charstore::store::{CharacterStore, JsonFileStore};
use charstore::Server;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), charstore::Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "charstore=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    tracing::info!(
        addr = %config.addr(),
        db_path = %config.db_path.display(),
        "loaded server configuration"
    );

    let store = JsonFileStore::new(&config.db_path);
    // A broken database is reported but does not stop the server: /readyz
    // stays 503 and data requests answer 500 until the file is repaired.
    if let Err(e) = store.ready().await {
        tracing::error!(error = %e, "database not ready");
    }

    let router = api::router(App::new(store), Cors::permissive().allow_origin(&config.cors_origin));

    Server::bind(config.addr()).await?.serve(router).await
}
