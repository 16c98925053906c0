//! # Castle Crawler - a text dungeon crawl
//!
//! Castle Crawler generates a square castle of randomly furnished rooms and
//! lets a single player explore it: pick up and equip gear, light torches in
//! dark rooms, spend silver keys on locked doors, and fight whatever lurks
//! inside. Walking one particular sequence of directions opens a hidden final
//! encounter and, beyond it, the secret treasure room.
//!
//! ## Features
//!
//! - **Seeded Worlds**: the same seed always builds the same castle.
//! - **Secret Path**: a fixed eight-step direction sequence whose seventh
//!   consecutive match opens the final encounter.
//! - **Equipment**: five armor slots that reduce incoming damage plus two hands.
//! - **Combat**: preemptive strikes, misses and an escape prompt for unarmed fights.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use castle_crawler::config::WorldConfig;
//! use castle_crawler::crawler::{dispatch, Session};
//!
//! let mut session = Session::from_seed(&WorldConfig::default(), 42);
//! let reply = dispatch(&mut session, "take all");
//! print!("{}", reply.text);
//! ```
//!
//! ## Module Organization
//!
//! - [`crawler`] - World generation, the game session and its commands
//! - [`config`] - Configuration loading and validation
//! - [`logutil`] - Log sanitizing for raw player input

pub mod config;
pub mod crawler;
pub mod logutil;
