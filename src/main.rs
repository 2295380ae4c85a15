use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boxoffice::{config::Config, database::Database, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting BoxOffice");

    // Пул ленивый: без MySQL сервер всё равно поднимется
    let db = Database::new(&config.database);

    // Схема и сиды; ошибки только в лог
    db.initialize(&config.database).await;

    let app_state = AppState::new(Arc::new(db), config.clone());

    let app = boxoffice::app(app_state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = match format!("{}:{}", config.app.host, config.app.port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Invalid listen address {}:{}: {}", config.app.host, config.app.port, e);
            std::process::exit(1);
        }
    };
    info!("Server listening on {}", addr);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        error!("Server error: {}", e);
    }
}
