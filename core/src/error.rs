use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid cell, cards are numbered 1 to 9")]
    InvalidCell,
    #[error("Game is still running, only a finished game can be reset")]
    NotEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
