mod handler;
mod status;

use crate::config::BuildInfo;
use crate::repositories::MovieRepository;
use anyhow::Context;
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use handler::{
    ApiError, CreateMovieHttpRequest, ListMoviesQuery, MovieHttpResponse, UpdateMovieHttpRequest,
};

pub const MOVIE_NOT_FOUND: &str = "Película no encontrada";

#[derive(Debug)]
pub struct AppState<MR: MovieRepository> {
    movie_repo: Arc<MR>,
    build: Arc<BuildInfo>,
}

impl<MR: MovieRepository> AppState<MR> {
    pub fn new(movie_repo: MR, build: BuildInfo) -> Self {
        Self {
            movie_repo: Arc::new(movie_repo),
            build: Arc::new(build),
        }
    }
}

// Derived `Clone` would require `MR: Clone`.
impl<MR: MovieRepository> Clone for AppState<MR> {
    fn clone(&self) -> Self {
        Self {
            movie_repo: Arc::clone(&self.movie_repo),
            build: Arc::clone(&self.build),
        }
    }
}

#[derive(Debug)]
pub struct HttpServerConfig {
    port: u16,
}

impl HttpServerConfig {
    pub const fn new(port: u16) -> Self {
        Self { port }
    }
}

pub struct HttpServer {
    router: Router,
    listener: TcpListener,
}

impl HttpServer {
    pub async fn new<MR: MovieRepository>(
        state: AppState<MR>,
        config: HttpServerConfig,
    ) -> anyhow::Result<Self> {
        let router = router(state);

        let listener = TcpListener::bind(format!("0.0.0.0:{}", config.port))
            .await
            .with_context(|| format!("Failed to bind to port {}", config.port))?;

        Ok(Self { router, listener })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        if let Ok(addr) = self.listener.local_addr() {
            tracing::info!("listening on {addr}");
        }
        axum::serve(self.listener, self.router)
            .await
            .context("Received error from running server")?;
        Ok(())
    }
}

/// Builds the complete application router, tracing layer included.
pub fn router<MR: MovieRepository>(state: AppState<MR>) -> Router {
    Router::new()
        .merge(movie_routes())
        .merge(status_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn movie_routes<MR: MovieRepository>() -> Router<AppState<MR>> {
    Router::new()
        .route(
            "/peliculas",
            get(handler::list_movies::<MR>).post(handler::create_movie::<MR>),
        )
        .route(
            "/peliculas/{id}",
            get(handler::find_movie::<MR>)
                .put(handler::update_movie::<MR>)
                .delete(handler::delete_movie::<MR>),
        )
}

fn status_routes<MR: MovieRepository>() -> Router<AppState<MR>> {
    Router::new()
        .route("/health", get(status::health))
        .route("/version", get(status::version::<MR>))
        .route("/cd-status", get(status::cd_status::<MR>))
        .route("/full-status", get(status::full_status::<MR>))
}
