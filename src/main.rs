use anyhow::Context;
use axum::ServiceExt;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod auth;
mod blog;
mod config;
mod error;
mod forms;
mod job;
mod paginate;
mod render;
mod routes;
mod state;
mod store;
mod urls;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blogicum=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::load().context("loading configuration")?;
    let store = store::JsonStore::open(&config.store.path)
        .await
        .with_context(|| format!("opening store at {:?}", config.store.path))?;
    tokio::fs::create_dir_all(&config.media.path)
        .await
        .with_context(|| format!("creating media folder {:?}", config.media.path))?;

    let address = format!("{}:{}", config.server.host, config.server.port);
    let state = std::sync::Arc::new(state::State::new(store, config));
    let app = NormalizePathLayer::trim_trailing_slash().layer(routes::app(state));

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    tracing::info!("Listening on {address}");

    axum::serve(
        listener,
        ServiceExt::<axum::extract::Request>::into_make_service(app),
    )
    .await
    .context("serving app")
}
