use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// crate specific Error enum
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Seeding produced {seeds} usable points, at least 3 non-collinear points are needed")]
    EmptyCellSet { seeds: usize },
    #[error("Cosine {cos} is outside the tolerated [-1, 1] window")]
    NumericDomainFault { cos: f64 },
    #[error(transparent)]
    Triangulation(#[from] spade::InsertionError),
    #[error(transparent)]
    LasError(#[from] las::Error),
    #[error(transparent)]
    TiffError(#[from] tiff::TiffError),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
