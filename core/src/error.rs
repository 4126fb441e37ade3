use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("Coordinates outside the grid")]
    InvalidCoords,
    #[error("Endpoint is not on the grid boundary and no edge was given")]
    EndpointNotOnBoundary,
    #[error("Puzzle already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, PuzzleError>;
