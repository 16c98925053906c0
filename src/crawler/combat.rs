//! Monster encounters.
//!
//! An attack draws two independent rolls up front: the monster striking
//! first, then the player missing. Each fires on a 25% chance. Only when the
//! miss roll does not fire does the fight resolve; an armed player wins
//! outright and an unarmed one is hurt and must run.
//!
//! Running used to be a blocking prompt; here it is the
//! [`PendingFlee`] state, resolved by [`Session::confirm_flee`].

use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use super::errors::CrawlerError;
use super::session::{PendingFlee, Session};
use super::types::{Equipment, Position};

const PREEMPTIVE_CHANCE: f64 = 0.25;
const MISS_CHANCE: f64 = 0.25;
const MITIGATION_PER_PIECE: f64 = 0.15;
const MAX_MITIGATION: f64 = 0.75;

/// Damage a monster deals before armor and secret-path bonus.
pub fn base_damage(monster: &str) -> i32 {
    match monster {
        "goblin" => 5,
        "orc" => 10,
        "skeleton" => 8,
        "zombie" => 7,
        "bat" => 3,
        "final boss" => 30,
        _ => 5,
    }
}

/// Reduce `raw` by 15% per protective piece worn, capped at 75%. Rounds
/// half to even and never lets a real hit drop below 1.
pub fn mitigated_damage(raw: i32, equipment: &Equipment) -> i32 {
    let reduction =
        (equipment.protective_count() as f64 * MITIGATION_PER_PIECE).min(MAX_MITIGATION);
    let dealt = (raw as f64 * (1.0 - reduction)).round_ties_even() as i32;
    if dealt < 1 && raw > 0 {
        1
    } else {
        dealt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    pub damage: i32,
    /// Player health after the hit.
    pub health: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatOutcome {
    /// The monster's first strike killed the player. It stays in the room.
    Slain { monster: String, strike: Strike },
    /// The player missed and took a counterattack. The monster stays and no
    /// death check is made here.
    Missed {
        monster: String,
        preemptive: Option<Strike>,
        counter: Strike,
    },
    /// An armed player killed the monster.
    Defeated {
        monster: String,
        preemptive: Option<Strike>,
    },
    /// An unarmed player drove the monster off but was hurt and must run.
    AwaitingFleeConfirmation {
        monster: String,
        preemptive: Option<Strike>,
        strike: Strike,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleeOutcome {
    /// The player hesitated and was hit again; the flee is still pending.
    Hesitated(Strike),
    Escaped { to: Position },
    /// No exits: the encounter ends where it began.
    Cornered,
}

impl<R: Rng> Session<R> {
    pub fn attack(&mut self, monster: &str) -> Result<CombatOutcome, CrawlerError> {
        self.ensure_can_act()?;
        let present = self
            .current_room()
            .map_or(false, |r| r.monsters.iter().any(|m| m == monster));
        if !present {
            return Err(CrawlerError::NoSuchMonster(monster.to_string()));
        }

        let monster_first_roll: f64 = self.rng.gen();
        let miss_roll: f64 = self.rng.gen();
        debug!(
            "Attack on {}: first={:.3} miss={:.3} progress={}",
            monster, monster_first_roll, miss_roll, self.secret_progress
        );

        let total = base_damage(monster) + 2 * self.secret_progress as i32;
        let dealt = mitigated_damage(total, &self.player.equipment);
        let name = monster.to_string();

        let mut preemptive = None;
        if monster_first_roll < PREEMPTIVE_CHANCE {
            let strike = self.hit_player(dealt);
            if self.player.is_defeated() {
                warn!("Player slain by {}'s preemptive strike", monster);
                return Ok(CombatOutcome::Slain {
                    monster: name,
                    strike,
                });
            }
            preemptive = Some(strike);
        }

        if miss_roll < MISS_CHANCE {
            let counter = self.hit_player(dealt);
            return Ok(CombatOutcome::Missed {
                monster: name,
                preemptive,
                counter,
            });
        }

        let armed = self.player.equipment.is_armed();
        self.remove_monster(monster)?;
        if armed {
            info!("Defeated {}", monster);
            return Ok(CombatOutcome::Defeated {
                monster: name,
                preemptive,
            });
        }

        let strike = self.hit_player(dealt);
        self.pending_flee = Some(PendingFlee { damage: dealt });
        Ok(CombatOutcome::AwaitingFleeConfirmation {
            monster: name,
            preemptive,
            strike,
        })
    }

    /// Answer the escape prompt after an unarmed fight. Declining costs
    /// another hit; accepting runs through a random exit of the current room.
    pub fn confirm_flee(&mut self, run: bool) -> Result<FleeOutcome, CrawlerError> {
        let pending = self.pending_flee.ok_or(CrawlerError::NoFleePending)?;
        if self.player.is_defeated() {
            return Err(CrawlerError::PlayerDefeated);
        }
        if !run {
            return Ok(FleeOutcome::Hesitated(self.hit_player(pending.damage)));
        }

        self.pending_flee = None;
        let room = self.current_room().ok_or(CrawlerError::NoCurrentRoom)?;
        let targets: Vec<Position> = room.exits.iter().map(|e| e.to).collect();
        match targets.choose(&mut self.rng) {
            Some(to) => {
                self.player.position = *to;
                debug!("Fled to {}", to);
                Ok(FleeOutcome::Escaped { to: *to })
            }
            None => Ok(FleeOutcome::Cornered),
        }
    }

    fn hit_player(&mut self, damage: i32) -> Strike {
        self.player.health -= damage;
        Strike {
            damage,
            health: self.player.health,
        }
    }

    fn remove_monster(&mut self, monster: &str) -> Result<(), CrawlerError> {
        let room = self.current_room_mut()?;
        if let Some(idx) = room.monsters.iter().position(|m| m == monster) {
            room.monsters.remove(idx);
        }
        Ok(())
    }
}
