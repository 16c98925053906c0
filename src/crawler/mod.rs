//! The castle crawl engine.
//!
//! A [`Session`] holds one game. World generation lives in [`world`], the
//! player-facing operations are split across [`navigation`], [`inventory`]
//! and [`combat`], and [`commands`] maps typed lines onto them.

pub mod combat;
pub mod commands;
pub mod errors;
pub mod inventory;
pub mod navigation;
pub mod render;
pub mod session;
pub mod types;
pub mod world;

pub use combat::{CombatOutcome, FleeOutcome, Strike};
pub use commands::{dispatch, parse_command, CrawlerCommand, Reply};
pub use errors::{BlockReason, CrawlerError};
pub use inventory::UseOutcome;
pub use navigation::MoveOutcome;
pub use session::{PendingFlee, RoomView, Session};
pub use types::*;
pub use world::{RoomRegistry, WorldGenerator, WorldSnapshot};
