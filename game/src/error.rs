use crate::ButtonId;

/// Setup-time errors. Anything that goes wrong during play is absorbed by the engine.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum GameError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("button {0} doesn't exist on this grid")]
    InvalidButton(ButtonId),
    #[error("button {0} was given more than once")]
    DuplicateButton(ButtonId),
}

pub type GameResult<T> = Result<T, GameError>;
