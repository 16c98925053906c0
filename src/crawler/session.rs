//! The per-player game session.
//!
//! A [`Session`] owns everything one crawl mutates: the room registry, the
//! player, the secret-path counter, any pending escape, and the random
//! source. Operations live in sibling modules as `impl Session` blocks
//! (navigation, inventory, combat); this module holds construction and the
//! read-only projections.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::errors::CrawlerError;
use super::types::{Player, Position, Room, TORCH};
use super::world::{RoomRegistry, WorldGenerator};
use crate::config::WorldConfig;

/// An unarmed fight that ended with the player needing to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingFlee {
    /// Damage dealt on every hesitation.
    pub damage: i32,
}

/// What the player can see of the current room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomView {
    pub name: String,
    pub description: String,
    /// False when the room is dark and the player holds no torch.
    pub visible: bool,
    pub items: Vec<String>,
    pub monsters: Vec<String>,
    pub exits: Vec<String>,
}

pub struct Session<R: Rng = StdRng> {
    pub(crate) world: RoomRegistry,
    pub(crate) player: Player,
    pub(crate) secret_progress: usize,
    pub(crate) pending_flee: Option<PendingFlee>,
    pub(crate) rng: R,
}

impl Session<StdRng> {
    /// Generate a fresh castle from `seed` and place the player in the entry hall.
    pub fn from_seed(config: &WorldConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let world = WorldGenerator::castle(config).generate(&mut rng);
        debug!("New session from seed {}", seed);
        Session::new(world, rng)
    }
}

impl<R: Rng> Session<R> {
    pub fn new(world: RoomRegistry, rng: R) -> Self {
        Session {
            world,
            player: Player::new(),
            secret_progress: 0,
            pending_flee: None,
            rng,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn world(&self) -> &RoomRegistry {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut RoomRegistry {
        &mut self.world
    }

    /// Consecutive correct secret-path moves made so far.
    pub fn secret_progress(&self) -> usize {
        self.secret_progress
    }

    pub fn pending_flee(&self) -> Option<PendingFlee> {
        self.pending_flee
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.world.get(self.player.position)
    }

    pub(crate) fn current_room_mut(&mut self) -> Result<&mut Room, CrawlerError> {
        self.world
            .get_mut(self.player.position)
            .ok_or(CrawlerError::NoCurrentRoom)
    }

    /// Gate for every mutating command.
    pub(crate) fn ensure_can_act(&self) -> Result<(), CrawlerError> {
        if self.player.is_defeated() {
            return Err(CrawlerError::PlayerDefeated);
        }
        if self.pending_flee.is_some() {
            return Err(CrawlerError::FleePending);
        }
        Ok(())
    }

    pub fn describe_current_room(&self) -> Result<RoomView, CrawlerError> {
        let room = self.current_room().ok_or(CrawlerError::NoCurrentRoom)?;
        let visible = !room.dark || self.player.has_item(TORCH);
        Ok(RoomView {
            name: room.name.clone(),
            description: room.description.clone(),
            visible,
            items: if visible { room.items.clone() } else { Vec::new() },
            monsters: if visible {
                room.monsters.clone()
            } else {
                Vec::new()
            },
            exits: room.exits.iter().map(|e| e.label.clone()).collect(),
        })
    }

    pub fn position(&self) -> Position {
        self.player.position
    }
}
