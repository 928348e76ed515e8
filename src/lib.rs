//! Rules engine for two-player Battleship: placement validation, attack
//! resolution, turn order and game completion, behind a pluggable store.

mod attack;
mod common;
mod config;
mod engine;
pub mod events;
mod fleet;
mod game;
mod geometry;
mod logging;
pub mod placement;
pub mod player;
mod projection;
mod ship;
pub mod store;

pub use attack::*;
pub use common::*;
pub use config::*;
pub use engine::Engine;
pub use events::{EventBus, GameEvent};
pub use fleet::*;
pub use game::*;
pub use geometry::*;
pub use logging::{init_logging, init_logging_with, level_from_env};
pub use placement::{random_fleet, validate, violations};
pub use player::{play_match, AiPlayer, Contender, MatchSummary, Player};
pub use projection::*;
pub use ship::*;
pub use store::{GameStore, InMemoryStore};
