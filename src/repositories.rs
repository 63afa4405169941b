use crate::models::{
    CreateMovieError, CreateMovieRequest, DeleteMovieError, DeleteMovieRequest, FindMovieError,
    FindMovieRequest, ListMoviesError, ListMoviesRequest, Movie, UpdateMovieError,
    UpdateMovieRequest,
};
use async_trait::async_trait;

/// Storage port for movies. Lookups by id report a missing record as `Ok(None)`.
#[async_trait]
pub trait MovieRepository: Send + Sync + 'static {
    async fn create_movie(&self, req: &CreateMovieRequest) -> Result<Movie, CreateMovieError>;

    async fn list_movies(&self, req: &ListMoviesRequest) -> Result<Vec<Movie>, ListMoviesError>;

    async fn find_movie(&self, req: &FindMovieRequest) -> Result<Option<Movie>, FindMovieError>;

    async fn update_movie(
        &self,
        req: &UpdateMovieRequest,
    ) -> Result<Option<Movie>, UpdateMovieError>;

    /// Returns the record as it was just before it was removed.
    async fn delete_movie(
        &self,
        req: &DeleteMovieRequest,
    ) -> Result<Option<Movie>, DeleteMovieError>;
}
