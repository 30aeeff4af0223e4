mod config;
mod db;
mod rate_limit;
mod routes;
mod services;
mod state;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("database init failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("server io failed: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; variables may come from the environment.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "startup aborted");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let envs = config::Envs::from_env()?;
    let port = envs.port;

    let pool = db::init_pool(&envs.postgres).await?;
    tracing::info!(
        db = %envs.postgres.db,
        user = %envs.postgres.user,
        port = envs.postgres.port,
        "database ready"
    );

    let mailer = services::email::mailer_from_config(&envs.mailer);
    tracing::info!(service = ?envs.mailer.service, from = %envs.mailer.email, "mailer configured");

    let state = state::AppState::new(pool, envs, mailer);

    let app = match routes::leptos_app(state.clone()) {
        Ok(app) => app,
        Err(e) => {
            tracing::warn!(error = %e, "leptos app not configured; serving API only");
            routes::api_routes(state)
        }
    };

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!(%port, "authdesk listening");
    axum::serve(listener, app).await?;
    Ok(())
}
