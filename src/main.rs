use std::{env, error::Error, sync::Arc};

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use tokio::{fs, net, signal, task};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{
    layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

use helpdesk::{api, store, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = fs::read_to_string("config.toml").await?;
    let mut config = toml::from_str::<Config>(&config)?;
    if let Ok(url) = env::var("STORE_URL") {
        config.store.url = url;
    }

    let (store_client, store_connection) =
        store::connect(&config.store).await?;

    task::spawn(async move {
        if let Err(e) = store_connection.await {
            panic!("store connection failed: {e}");
        }
    });

    store_client.init().await?;

    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE]);
    for origin in &config.http.cors.allowed_origins {
        cors = cors.allow_origin(origin.parse::<HeaderValue>()?);
    }

    let app = api::router(Arc::new(store_client)).layer(cors);

    let listener = net::TcpListener::bind(config.http.server.addr).await?;
    tracing::info!("listening on {}", config.http.server.addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;

    // Dropping the router releases the store handle, which closes the
    // connection and lets the driver task finish.
    Ok(())
}
