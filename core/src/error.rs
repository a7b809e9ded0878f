use thiserror::Error;

use crate::{Player, Pos};

pub type Result<T> = std::result::Result<T, Error>;

/// Engine errors. All of them are raised before any mutation happens, so a
/// rejected call leaves the game exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("cell {pos} cannot be played")]
    InvalidPlacement { pos: Pos },
    #[error("position {pos} is outside the board")]
    OutOfBounds { pos: Pos },
    #[error("it is not {player}'s turn")]
    OutOfTurn { player: Player },
    #[error("the game has not been started")]
    NotStarted,
    #[error("the game is already over")]
    AlreadyOver,
    #[error("the game has no winner")]
    NotOver,
}
