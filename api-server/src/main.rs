use hotel_api_server::{app, config::Config, service::ReservationService, store::AvailabilityStore};
use room_selector::Layout;
use tokio::signal;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotel_api_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    let service = ReservationService::new(
        AvailabilityStore::new(Layout::standard()),
        config.random_density,
    );
    if config.start_random {
        service.randomize().await;
    }

    let app = app(service, &config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Hotel reservation API listening on http://{}", config.bind_addr);
    tracing::info!("  GET  /api/rooms           - available rooms");
    tracing::info!("  GET  /api/preview?count=N - rooms a booking would pick");
    tracing::info!("  POST /api/book            - book a block of 1-5 rooms");
    tracing::info!("  POST /api/reset           - release every room");
    tracing::info!("  POST /api/random          - randomize occupancy");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
