use anyhow::Context;
use tracing_subscriber::EnvFilter;

use cuidador::{
    app::{build_app, serve},
    db::MIGRATOR,
    state::AppState,
};

const DEFAULT_LOG_FILTER: &str = "cuidador=debug,axum=info,tower_http=info";

/// `RUST_LOG` picks the filter; `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.with_target(false).json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let state = AppState::init().await?;
    MIGRATOR
        .run(&state.db)
        .await
        .context("run database migrations")?;
    tracing::info!("migrations applied");

    let config = state.config.clone();
    serve(build_app(state), &config).await
}
