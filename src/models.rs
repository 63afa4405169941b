use thiserror::Error;

pub const DEFAULT_LIST_LIMIT: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieTitle(String);

impl MovieTitle {
    pub fn new(raw: &str) -> Result<Self, MovieTitleEmptyError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Err(MovieTitleEmptyError)
        } else {
            Ok(Self(trimmed.into()))
        }
    }

    pub fn new_unchecked(raw: &str) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MovieTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug)]
#[error("Movie title (nombre) cannot be empty")]
pub struct MovieTitleEmptyError;

/// The descriptive fields of a movie, shared by the stored entity and the create request.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetails {
    pub nombre: MovieTitle,
    pub categoria: String,
    pub ano: i32,
    pub director: String,
    pub duracion: i32,
    pub calificacion: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    id: i64,
    details: MovieDetails,
}

impl Movie {
    pub const fn new(id: i64, details: MovieDetails) -> Self {
        Self { id, details }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }

    pub const fn details(&self) -> &MovieDetails {
        &self.details
    }

    pub fn into_details(self) -> MovieDetails {
        self.details
    }
}

#[derive(Debug)]
pub struct CreateMovieRequest {
    details: MovieDetails,
}

impl CreateMovieRequest {
    pub const fn new(details: MovieDetails) -> Self {
        Self { details }
    }

    pub const fn details(&self) -> &MovieDetails {
        &self.details
    }
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct CreateMovieError(#[from] pub anyhow::Error);

/// Offset/limit page. A negative `skip` reads from the start; a negative `limit` means no limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMoviesRequest {
    skip: i64,
    limit: i64,
}

impl ListMoviesRequest {
    pub const fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }

    pub const fn skip(&self) -> i64 {
        self.skip
    }

    pub const fn limit(&self) -> i64 {
        self.limit
    }
}

impl Default for ListMoviesRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_LIST_LIMIT)
    }
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct ListMoviesError(#[from] pub anyhow::Error);

#[derive(Debug)]
pub struct FindMovieRequest {
    id: i64,
}

impl FindMovieRequest {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct FindMovieError(#[from] pub anyhow::Error);

/// Partial update: only the fields that are set are written.
#[derive(Debug, Default)]
pub struct UpdateMovieRequest {
    id: i64,
    nombre: Option<MovieTitle>,
    categoria: Option<String>,
    ano: Option<i32>,
    director: Option<String>,
    duracion: Option<i32>,
    calificacion: Option<f64>,
}

impl UpdateMovieRequest {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }

    pub fn is_empty(&self) -> bool {
        self.nombre.is_none()
            && self.categoria.is_none()
            && self.ano.is_none()
            && self.director.is_none()
            && self.duracion.is_none()
            && self.calificacion.is_none()
    }

    pub const fn nombre(&self) -> Option<&MovieTitle> {
        self.nombre.as_ref()
    }

    pub fn set_nombre(&mut self, nombre: MovieTitle) {
        self.nombre = Some(nombre);
    }

    pub fn categoria(&self) -> Option<&str> {
        self.categoria.as_deref()
    }

    pub fn set_categoria(&mut self, categoria: String) {
        self.categoria = Some(categoria);
    }

    pub const fn ano(&self) -> Option<i32> {
        self.ano
    }

    pub fn set_ano(&mut self, ano: i32) {
        self.ano = Some(ano);
    }

    pub fn director(&self) -> Option<&str> {
        self.director.as_deref()
    }

    pub fn set_director(&mut self, director: String) {
        self.director = Some(director);
    }

    pub const fn duracion(&self) -> Option<i32> {
        self.duracion
    }

    pub fn set_duracion(&mut self, duracion: i32) {
        self.duracion = Some(duracion);
    }

    pub const fn calificacion(&self) -> Option<f64> {
        self.calificacion
    }

    pub fn set_calificacion(&mut self, calificacion: f64) {
        self.calificacion = Some(calificacion);
    }
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct UpdateMovieError(#[from] pub anyhow::Error);

#[derive(Debug)]
pub struct DeleteMovieRequest {
    id: i64,
}

impl DeleteMovieRequest {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct DeleteMovieError(#[from] pub anyhow::Error);
