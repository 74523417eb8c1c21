use std::sync::Arc;

use actix_web::{web, App, HttpResponse, HttpServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog::config::Config;
use catalog::middleware::RequestLogger;
use catalog::modules::categories::controllers::configure_category_routes;
use catalog::modules::products::controllers::configure_product_routes;
use catalog::store::{MySqlStore, StoreHandle};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog=debug,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().expect("Failed to load configuration");
    config.validate().expect("Configuration validation failed");

    tracing::info!("Starting catalog API");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .expect("Failed to create database pool");

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    // Apply schema migrations
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");

    let store: StoreHandle = Arc::new(MySqlStore::new(db_pool));

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let workers = config.server.workers;

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(store.clone()))
            .wrap(RequestLogger)
            .route("/health", web::get().to(health_check))
            .configure(configure_category_routes)
            .configure(configure_product_routes)
    });

    let server = match workers {
        Some(workers) => server.workers(workers),
        None => server,
    };

    let server = server.bind(&bind_address)?.run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "catalog"
    }))
}
