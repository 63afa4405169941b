use icinema::config::Config;
use icinema::database::{SqliteMovieRepository, establish_pool};
use icinema::http::{AppState, HttpServer, HttpServerConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "icinema=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = establish_pool(config.database_url(), config.database_max_connections()).await?;
    let movie_repo = SqliteMovieRepository::new(pool);

    let state = AppState::new(movie_repo, config.build().clone());
    let server_config = HttpServerConfig::new(config.server_port());
    let http_server = HttpServer::new(state, server_config).await?;
    http_server.run().await
}
