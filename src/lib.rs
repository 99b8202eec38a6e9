pub mod errors;
pub mod game;
pub mod request;

use std::{net::SocketAddr, path::PathBuf};

use errors::GameOfLifeWebError;
use structopt::StructOpt;

pub type Result<T> = std::result::Result<T, GameOfLifeWebError>;
pub type StdResult<T, E> = std::result::Result<T, E>;

#[derive(Debug, Clone, StructOpt)]
#[structopt(name = "GameOfLifeWebConfig")]
pub struct GameOfLifeWebOpt {
    #[structopt(long, env, default_value = "game_of_life_web=debug")]
    pub rust_log: String,

    #[structopt(long, env, default_value = "127.0.0.1:8000")]
    pub listen: SocketAddr,

    #[structopt(long, env, default_value = "static/index.html")]
    pub index_page: PathBuf,
}
