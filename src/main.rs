use std::{sync::Arc, time::Duration};

use actix_cors::Cors;
use actix_web::{http::header, middleware::NormalizePath, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use launchboard::{
    db::postgres::{PgConnections, PgConnector},
    graceful_shutdown::shutdown_signal,
    middlewares::session::SessionMiddleware,
    payments::stripe::StripeGateway,
    routes::configure_routes,
    settings::AppConfig,
    shared_repos::SharedRepositories,
    telemetry::init_tracing,
    AppState,
};

fn build_cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .supports_credentials()
        .max_age(3600);

    if origins.iter().any(|o| o == "*") {
        return cors.allow_any_origin();
    }

    origins.iter().fold(cors, |cors, origin| cors.allowed_origin(origin))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config);
    tracing::info!("Loaded configuration: {:?}", config);

    // Requests make a single attempt of their own if this one fails
    let connections = Arc::new(PgConnections::new(PgConnector::from(&config)));
    if let Err(e) = connections
        .get_with_retries(config.database_connect_retries, Duration::from_secs(2))
        .await
    {
        tracing::warn!("Database not reachable at startup, will retry on first use: {}", e);
    }

    let gateway = match StripeGateway::new(&config) {
        Ok(gateway) => Arc::new(gateway),
        Err(e) => {
            tracing::error!("Payment gateway setup failed: {}", e);
            std::process::exit(1);
        }
    };
    if !config.payments_enabled() {
        tracing::warn!("Payments are not configured, checkout will answer 503");
    }

    let repos = SharedRepositories::postgres(connections.clone());
    let server_addr = format!("{}:{}", config.host, config.port);
    let workers = config.worker_count;
    let cors_origins = config.cors_origins();

    let app_state = web::Data::new(AppState::new(config, repos, gateway));

    tracing::info!(
        "🚀 Starting Launchboard v{} on {}",
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(configure_routes)
            .wrap(SessionMiddleware)
            .wrap(TracingLogger::default())
            .wrap(build_cors(&cors_origins))
            .wrap(NormalizePath::trim())
    })
    .workers(workers)
    .bind(server_addr)?
    .disable_signals()
    .run();

    let handle = server.handle();
    let server_task = actix_rt::spawn(server);

    shutdown_signal().await;

    tracing::info!("Stopping HTTP server...");
    handle.stop(true).await;

    match server_task.await {
        Ok(Err(e)) => tracing::error!("HTTP server error: {}", e),
        Err(e) => tracing::error!("Server task failed: {}", e),
        Ok(Ok(())) => {}
    }

    connections.close().await;
    tracing::info!("Shutdown complete.");

    Ok(())
}
