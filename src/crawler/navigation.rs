//! Movement between rooms and the secret-path state machine.
//!
//! Every grid move first feeds the raw requested direction to the secret
//! path, even when the move itself is blocked afterwards. Seven correct moves
//! in a row open the final encounter instead of moving the player.

use log::{debug, info};
use rand::Rng;

use super::errors::{BlockReason, CrawlerError};
use super::session::Session;
use super::types::{
    Coord, Direction, Exit, Position, SpecialRoom, SECRET_SEQUENCE, SILVER_KEY, TORCH,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved {
        to: Position,
        /// A silver key was spent opening the destination.
        unlocked: bool,
        /// The torch lit last turn went out on arrival.
        torch_burned_out: bool,
    },
    /// The secret path opened; the player now stands in the final encounter.
    EnteredFinalEncounter { from: Coord },
}

impl<R: Rng> Session<R> {
    pub fn move_player(&mut self, direction: &str) -> Result<MoveOutcome, CrawlerError> {
        self.ensure_can_act()?;
        match self.player.position {
            Position::Special(key) => self.move_from_special(key, direction),
            Position::Grid(current) => self.move_on_grid(current, direction),
        }
    }

    fn move_from_special(
        &mut self,
        key: SpecialRoom,
        label: &str,
    ) -> Result<MoveOutcome, CrawlerError> {
        let room = self
            .world
            .get(Position::Special(key))
            .ok_or(CrawlerError::NoCurrentRoom)?;
        let to = room
            .exit(label)
            .ok_or(CrawlerError::NavigationBlocked(BlockReason::NoSuchExit))?;
        self.player.position = to;
        debug!("Left {} via '{}' to {}", key.key(), label, to);
        Ok(MoveOutcome::Moved {
            to,
            unlocked: false,
            torch_burned_out: false,
        })
    }

    fn move_on_grid(&mut self, current: Coord, word: &str) -> Result<MoveOutcome, CrawlerError> {
        if self.world.room_at(current).is_none() {
            return Err(CrawlerError::NoCurrentRoom);
        }

        self.advance_secret_path(word);
        if self.secret_progress == SECRET_SEQUENCE.len() - 1 {
            return Ok(self.enter_final_encounter(current));
        }

        let dir = Direction::from_word(word)
            .ok_or(CrawlerError::NavigationBlocked(BlockReason::NoSuchExit))?;
        let dest = current.step(dir);
        if !self.world.bounds().contains(dest) {
            return Err(CrawlerError::NavigationBlocked(BlockReason::OutOfBounds));
        }

        let has_key = self.player.has_item(SILVER_KEY);
        if self.world.room_at(dest).is_none() {
            // Stepping into an empty cell still uses up a lit torch.
            self.burn_out_torch();
            return Err(CrawlerError::NavigationBlocked(BlockReason::NoRoom));
        }
        let room = self
            .world
            .get_mut(Position::Grid(dest))
            .ok_or(CrawlerError::NavigationBlocked(BlockReason::NoRoom))?;
        let mut unlocked = false;
        if room.locked {
            if !has_key {
                return Err(CrawlerError::NavigationBlocked(BlockReason::Locked));
            }
            room.locked = false;
            self.player.remove_item(SILVER_KEY);
            unlocked = true;
            info!("Unlocked {} at {} with a silver key", room.name, dest);
        }

        self.player.position = Position::Grid(dest);
        let torch_burned_out = self.burn_out_torch();
        Ok(MoveOutcome::Moved {
            to: Position::Grid(dest),
            unlocked,
            torch_burned_out,
        })
    }

    /// Count a matching direction or start over. Uses the raw word, so a
    /// blocked move still counts.
    fn advance_secret_path(&mut self, word: &str) {
        let expected = SECRET_SEQUENCE.get(self.secret_progress);
        if expected.map(|d| d.as_str()) == Some(word) {
            self.secret_progress += 1;
            debug!(
                "Secret path progress {}/{}",
                self.secret_progress,
                SECRET_SEQUENCE.len()
            );
        } else {
            self.secret_progress = 0;
        }
    }

    fn enter_final_encounter(&mut self, from: Coord) -> MoveOutcome {
        let key = SpecialRoom::FinalEncounter;
        if let Some(room) = self.world.get_mut(Position::Special(key)) {
            room.exits = vec![
                Exit {
                    label: "back".to_string(),
                    to: Position::Grid(from),
                },
                Exit {
                    label: "continue".to_string(),
                    to: Position::Special(SpecialRoom::SecretTreasure),
                },
            ];
        }
        self.player.last_room = Some(from);
        self.player.position = Position::Special(key);
        self.secret_progress = 0;
        info!("Secret path completed from {}; entering {}", from, key.key());
        MoveOutcome::EnteredFinalEncounter { from }
    }

    fn burn_out_torch(&mut self) -> bool {
        if !self.player.torch_active {
            return false;
        }
        self.player.torch_active = false;
        self.player.remove_item(TORCH);
        true
    }
}
