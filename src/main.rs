use std::env;

use matchmaker::app;
use matchmaker::utils::constant::{DEFAULT_BIND_ADDR, DEFAULT_DB_MAX_CONNECTIONS};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "matchmaker=info,tower_http=info".into());

    let is_production = env::var("APP_ENV")
        .map(|value| value.eq_ignore_ascii_case("production"))
        .unwrap_or(false);

    if is_production {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(
                "matchmaker".into(),
                std::io::stdout,
            ))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let database_url =
        env::var("DATABASE_URL").expect("Env variable `DATABASE_URL` should be set");
    let max_connections = env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|val| val.parse::<u32>().ok())
        .unwrap_or_else(|| {
            warn!("Invalid or missing DB_MAX_CONNECTIONS, using {DEFAULT_DB_MAX_CONNECTIONS}");
            DEFAULT_DB_MAX_CONNECTIONS
        });

    let db_pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!()
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    let addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listening address");
    info!("Server starting at http://{}", addr);

    axum::serve(listener, app(db_pool).into_make_service())
        .await
        .expect("Server error");
}
