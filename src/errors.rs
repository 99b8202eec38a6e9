use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    io::Error as IoError,
    num::ParseIntError,
};

pub struct GameOfLifeWebError {
    err: anyhow::Error,
}

impl Debug for GameOfLifeWebError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let anyhow_str = format!("{:?}", self.err).replace("\n", " ");
        f.debug_tuple("").field(&anyhow_str).finish()
    }
}

impl Display for GameOfLifeWebError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "({:#})", self.err)
    }
}

impl From<anyhow::Error> for GameOfLifeWebError {
    fn from(err: anyhow::Error) -> GameOfLifeWebError {
        GameOfLifeWebError { err }
    }
}

impl std::convert::From<ParseIntError> for GameOfLifeWebError {
    fn from(err: ParseIntError) -> GameOfLifeWebError {
        let msg = format!("parse int err: '{:#}'", err);
        let anyhow_err = anyhow::Error::msg(msg);
        GameOfLifeWebError { err: anyhow_err }
    }
}

impl std::convert::From<IoError> for GameOfLifeWebError {
    fn from(err: IoError) -> GameOfLifeWebError {
        let msg = format!("io error: '{:#}'", err);
        let anyhow_err = anyhow::Error::msg(msg);
        GameOfLifeWebError { err: anyhow_err }
    }
}

impl std::convert::From<tokio::task::JoinError> for GameOfLifeWebError {
    fn from(err: tokio::task::JoinError) -> GameOfLifeWebError {
        let msg = format!("tokio task join error: {}", err);
        let anyhow_err = anyhow::Error::msg(msg);
        GameOfLifeWebError { err: anyhow_err }
    }
}

impl std::convert::From<RequestError> for GameOfLifeWebError {
    fn from(err: RequestError) -> GameOfLifeWebError {
        let anyhow_err = anyhow::Error::msg(err.to_string());
        GameOfLifeWebError { err: anyhow_err }
    }
}

/// Caller mistakes in an /advance request. Surfaced as 400, nothing is
/// computed once one of these is raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    MalformedParameter(String),
    MalformedCell(String),
}

impl Display for RequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RequestError::MalformedParameter(msg) => {
                write!(f, "malformed parameter: {}", msg)
            }
            RequestError::MalformedCell(msg) => write!(f, "malformed live cell: {}", msg),
        }
    }
}

impl std::error::Error for RequestError {}
