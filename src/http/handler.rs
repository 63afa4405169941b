use crate::http::{AppState, MOVIE_NOT_FOUND};
use crate::models::{
    CreateMovieError, CreateMovieRequest, DEFAULT_LIST_LIMIT, DeleteMovieError, DeleteMovieRequest,
    FindMovieError, FindMovieRequest, ListMoviesError, ListMoviesRequest, Movie, MovieDetails,
    MovieTitle, MovieTitleEmptyError, UpdateMovieError, UpdateMovieRequest,
};
use crate::repositories::MovieRepository;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub const fn new(status: StatusCode, data: T) -> Self {
        Self(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> axum::response::Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    status_code: u16,
    detail: String,
}

impl ApiErrorBody {
    fn new(status: StatusCode, detail: String) -> Self {
        Self {
            status_code: status.as_u16(),
            detail,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    NotFound(String),
    UnsupportedMediaType(String),
    UnprocessableEntity(String),
}

impl ApiError {
    fn not_found() -> Self {
        Self::NotFound(MOVIE_NOT_FOUND.to_string())
    }

    fn internal(cause: &anyhow::Error) -> Self {
        tracing::error!("{cause:?}");
        Self::InternalServerError("Internal server error".to_string())
    }

    /// Extractor failures are validation errors, except a body sent without a JSON content type.
    fn rejected(status: StatusCode, message: String) -> Self {
        if status == StatusCode::UNSUPPORTED_MEDIA_TYPE {
            Self::UnsupportedMediaType(message)
        } else {
            Self::UnprocessableEntity(message)
        }
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let detail = match self {
            Self::InternalServerError(msg)
            | Self::NotFound(msg)
            | Self::UnsupportedMediaType(msg)
            | Self::UnprocessableEntity(msg) => msg,
        };
        (status, Json(ApiErrorBody::new(status, detail))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::rejected(rejection.status(), rejection.body_text())
    }
}

impl From<MovieTitleEmptyError> for ApiError {
    fn from(err: MovieTitleEmptyError) -> Self {
        Self::UnprocessableEntity(err.to_string())
    }
}

impl From<CreateMovieError> for ApiError {
    fn from(CreateMovieError(cause): CreateMovieError) -> Self {
        Self::internal(&cause)
    }
}

impl From<ListMoviesError> for ApiError {
    fn from(ListMoviesError(cause): ListMoviesError) -> Self {
        Self::internal(&cause)
    }
}

impl From<FindMovieError> for ApiError {
    fn from(FindMovieError(cause): FindMovieError) -> Self {
        Self::internal(&cause)
    }
}

impl From<UpdateMovieError> for ApiError {
    fn from(UpdateMovieError(cause): UpdateMovieError) -> Self {
        Self::internal(&cause)
    }
}

impl From<DeleteMovieError> for ApiError {
    fn from(DeleteMovieError(cause): DeleteMovieError) -> Self {
        Self::internal(&cause)
    }
}

/// Body of `POST /peliculas`. Every field is required.
#[derive(Debug, Deserialize)]
pub struct CreateMovieHttpRequest {
    nombre: String,
    categoria: String,
    ano: i32,
    director: String,
    duracion: i32,
    calificacion: f64,
}

impl TryFrom<CreateMovieHttpRequest> for CreateMovieRequest {
    type Error = MovieTitleEmptyError;

    fn try_from(value: CreateMovieHttpRequest) -> Result<Self, Self::Error> {
        let details = MovieDetails {
            nombre: MovieTitle::new(&value.nombre)?,
            categoria: value.categoria,
            ano: value.ano,
            director: value.director,
            duracion: value.duracion,
            calificacion: value.calificacion,
        };
        Ok(Self::new(details))
    }
}

/// Body of `PUT /peliculas/{id}`. Absent and `null` fields are left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateMovieHttpRequest {
    nombre: Option<String>,
    categoria: Option<String>,
    ano: Option<i32>,
    director: Option<String>,
    duracion: Option<i32>,
    calificacion: Option<f64>,
}

impl UpdateMovieHttpRequest {
    fn into_domain(self, id: i64) -> Result<UpdateMovieRequest, MovieTitleEmptyError> {
        let mut req = UpdateMovieRequest::new(id);
        if let Some(nombre) = self.nombre {
            req.set_nombre(MovieTitle::new(&nombre)?);
        }
        if let Some(categoria) = self.categoria {
            req.set_categoria(categoria);
        }
        if let Some(ano) = self.ano {
            req.set_ano(ano);
        }
        if let Some(director) = self.director {
            req.set_director(director);
        }
        if let Some(duracion) = self.duracion {
            req.set_duracion(duracion);
        }
        if let Some(calificacion) = self.calificacion {
            req.set_calificacion(calificacion);
        }
        Ok(req)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListMoviesQuery {
    skip: Option<i64>,
    limit: Option<i64>,
}

impl From<ListMoviesQuery> for ListMoviesRequest {
    fn from(value: ListMoviesQuery) -> Self {
        Self::new(
            value.skip.unwrap_or(0),
            value.limit.unwrap_or(DEFAULT_LIST_LIMIT),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct MovieHttpResponse {
    id: i64,
    nombre: String,
    categoria: String,
    ano: i32,
    director: String,
    duracion: i32,
    calificacion: f64,
}

impl From<Movie> for MovieHttpResponse {
    fn from(value: Movie) -> Self {
        let id = value.id();
        let details = value.into_details();
        Self {
            id,
            nombre: details.nombre.to_string(),
            categoria: details.categoria,
            ano: details.ano,
            director: details.director,
            duracion: details.duracion,
            calificacion: details.calificacion,
        }
    }
}

pub async fn create_movie<MR: MovieRepository>(
    State(state): State<AppState<MR>>,
    body: Result<Json<CreateMovieHttpRequest>, JsonRejection>,
) -> Result<ApiSuccess<MovieHttpResponse>, ApiError> {
    let Json(body) = body?;
    let req = CreateMovieRequest::try_from(body)?;
    let movie = state.movie_repo.create_movie(&req).await?;
    tracing::info!(id = movie.id(), "movie created");
    Ok(ApiSuccess::new(StatusCode::CREATED, movie.into()))
}

pub async fn list_movies<MR: MovieRepository>(
    State(state): State<AppState<MR>>,
    query: Result<Query<ListMoviesQuery>, QueryRejection>,
) -> Result<ApiSuccess<Vec<MovieHttpResponse>>, ApiError> {
    let Query(query) = query?;
    let req = ListMoviesRequest::from(query);
    let movies = state.movie_repo.list_movies(&req).await?;
    let movies = movies.into_iter().map(MovieHttpResponse::from).collect();
    Ok(ApiSuccess::new(StatusCode::OK, movies))
}

pub async fn find_movie<MR: MovieRepository>(
    State(state): State<AppState<MR>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<ApiSuccess<MovieHttpResponse>, ApiError> {
    let Path(id) = id?;
    state
        .movie_repo
        .find_movie(&FindMovieRequest::new(id))
        .await?
        .map(|movie| ApiSuccess::new(StatusCode::OK, movie.into()))
        .ok_or_else(ApiError::not_found)
}

pub async fn update_movie<MR: MovieRepository>(
    State(state): State<AppState<MR>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateMovieHttpRequest>, JsonRejection>,
) -> Result<ApiSuccess<MovieHttpResponse>, ApiError> {
    let Path(id) = id?;
    let Json(body) = body?;
    let req = body.into_domain(id)?;
    let movie = state
        .movie_repo
        .update_movie(&req)
        .await?
        .ok_or_else(ApiError::not_found)?;
    tracing::info!(id, "movie updated");
    Ok(ApiSuccess::new(StatusCode::OK, movie.into()))
}

pub async fn delete_movie<MR: MovieRepository>(
    State(state): State<AppState<MR>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<ApiSuccess<MovieHttpResponse>, ApiError> {
    let Path(id) = id?;
    let movie = state
        .movie_repo
        .delete_movie(&DeleteMovieRequest::new(id))
        .await?
        .ok_or_else(ApiError::not_found)?;
    tracing::info!(id, "movie deleted");
    Ok(ApiSuccess::new(StatusCode::OK, movie.into()))
}
