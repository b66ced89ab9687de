mod board;
mod common;
mod config;
mod game;
mod logging;
mod placement;
mod score;
mod ship;
mod store;
pub mod ui;

pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use logging::init_logging;
pub use placement::*;
pub use score::*;
pub use ship::*;
pub use store::*;
