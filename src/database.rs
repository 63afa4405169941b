use crate::models::{
    CreateMovieError, CreateMovieRequest, DeleteMovieError, DeleteMovieRequest, FindMovieError,
    FindMovieRequest, ListMoviesError, ListMoviesRequest, Movie, MovieDetails, MovieTitle,
    UpdateMovieError, UpdateMovieRequest,
};
use crate::repositories::MovieRepository;
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};
use std::str::FromStr;

const CREATE_MOVIES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS peliculas (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre       TEXT    NOT NULL,
    categoria    TEXT    NOT NULL,
    ano          INTEGER NOT NULL,
    director     TEXT    NOT NULL,
    duracion     INTEGER NOT NULL,
    calificacion REAL    NOT NULL
)";

const MOVIE_COLUMNS: &str = "id, nombre, categoria, ano, director, duracion, calificacion";

/// Opens the pool and creates the `peliculas` table when it does not exist yet.
///
/// Connections are never recycled, so an in-memory database lives as long as the pool.
pub async fn establish_pool(url: &str, max_connections: u32) -> anyhow::Result<SqlitePool> {
    let opts = SqliteConnectOptions::from_str(url)
        .with_context(|| format!("Invalid database url {url}"))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(opts)
        .await
        .with_context(|| format!("Failed to open database at {url}"))?;

    ensure_schema(&pool).await?;
    tracing::info!(url, max_connections, "database ready");

    Ok(pool)
}

pub async fn ensure_schema(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query(CREATE_MOVIES_TABLE)
        .execute(pool)
        .await
        .context("Failed to create table peliculas")?;
    Ok(())
}

#[derive(Debug, Clone)]
pub struct SqliteMovieRepository {
    pool: SqlitePool,
}

impl SqliteMovieRepository {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl<'r> FromRow<'r, SqliteRow> for Movie {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id = row.try_get("id")?;
        let nombre: &str = row.try_get("nombre")?;
        let details = MovieDetails {
            nombre: MovieTitle::new_unchecked(nombre),
            categoria: row.try_get("categoria")?,
            ano: row.try_get("ano")?,
            director: row.try_get("director")?,
            duracion: row.try_get("duracion")?,
            calificacion: row.try_get("calificacion")?,
        };
        Ok(Self::new(id, details))
    }
}

#[async_trait]
impl MovieRepository for SqliteMovieRepository {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn create_movie(&self, req: &CreateMovieRequest) -> Result<Movie, CreateMovieError> {
        let details = req.details();
        let query = format!(
            "INSERT INTO peliculas (nombre, categoria, ano, director, duracion, calificacion) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING {MOVIE_COLUMNS}"
        );
        let movie = sqlx::query_as(&query)
            .bind(details.nombre.as_str())
            .bind(details.categoria.as_str())
            .bind(details.ano)
            .bind(details.director.as_str())
            .bind(details.duracion)
            .bind(details.calificacion)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                let err = anyhow!(err).context(format!(
                    r#"Failed to create movie with nombre "{}""#,
                    details.nombre
                ));
                CreateMovieError(err)
            })?;

        Ok(movie)
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn list_movies(&self, req: &ListMoviesRequest) -> Result<Vec<Movie>, ListMoviesError> {
        let query = format!("SELECT {MOVIE_COLUMNS} FROM peliculas ORDER BY id LIMIT ? OFFSET ?");
        let movies = sqlx::query_as(&query)
            .bind(req.limit())
            .bind(req.skip())
            .fetch_all(&self.pool)
            .await
            .map_err(|err| {
                let err = anyhow!(err).context(format!(
                    "Failed to list movies (skip {}, limit {})",
                    req.skip(),
                    req.limit()
                ));
                ListMoviesError(err)
            })?;

        Ok(movies)
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn find_movie(&self, req: &FindMovieRequest) -> Result<Option<Movie>, FindMovieError> {
        let query = format!("SELECT {MOVIE_COLUMNS} FROM peliculas WHERE id = ?");
        let movie = sqlx::query_as(&query)
            .bind(req.id())
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| {
                let err = anyhow!(err).context(format!(
                    r#"Failed to retrieve movie with id "{}""#,
                    req.id()
                ));
                FindMovieError(err)
            })?;

        Ok(movie)
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn update_movie(
        &self,
        req: &UpdateMovieRequest,
    ) -> Result<Option<Movie>, UpdateMovieError> {
        if req.is_empty() {
            return self
                .find_movie(&FindMovieRequest::new(req.id()))
                .await
                .map_err(|FindMovieError(err)| UpdateMovieError(err));
        }

        let mut builder = QueryBuilder::<Sqlite>::new("UPDATE peliculas SET ");
        {
            let mut assignments = builder.separated(", ");
            if let Some(nombre) = req.nombre() {
                assignments.push("nombre = ");
                assignments.push_bind_unseparated(nombre.to_string());
            }
            if let Some(categoria) = req.categoria() {
                assignments.push("categoria = ");
                assignments.push_bind_unseparated(categoria.to_string());
            }
            if let Some(ano) = req.ano() {
                assignments.push("ano = ");
                assignments.push_bind_unseparated(ano);
            }
            if let Some(director) = req.director() {
                assignments.push("director = ");
                assignments.push_bind_unseparated(director.to_string());
            }
            if let Some(duracion) = req.duracion() {
                assignments.push("duracion = ");
                assignments.push_bind_unseparated(duracion);
            }
            if let Some(calificacion) = req.calificacion() {
                assignments.push("calificacion = ");
                assignments.push_bind_unseparated(calificacion);
            }
        }
        builder
            .push(" WHERE id = ")
            .push_bind(req.id())
            .push(format!(" RETURNING {MOVIE_COLUMNS}"));

        let movie = builder
            .build_query_as::<Movie>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| {
                let err = anyhow!(err)
                    .context(format!(r#"Failed to update movie with id "{}""#, req.id()));
                UpdateMovieError(err)
            })?;

        Ok(movie)
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn delete_movie(
        &self,
        req: &DeleteMovieRequest,
    ) -> Result<Option<Movie>, DeleteMovieError> {
        let query = format!("DELETE FROM peliculas WHERE id = ? RETURNING {MOVIE_COLUMNS}");
        let movie = sqlx::query_as(&query)
            .bind(req.id())
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| {
                let err = anyhow!(err)
                    .context(format!(r#"Failed to delete movie with id "{}""#, req.id()));
                DeleteMovieError(err)
            })?;

        Ok(movie)
    }
}
