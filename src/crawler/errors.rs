use std::fmt;
use thiserror::Error;

use super::types::EquipSlot;

/// Why a move request did not change the player's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    OutOfBounds,
    NoRoom,
    Locked,
    NoSuchExit,
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            BlockReason::OutOfBounds => "You can't go that way; the castle's walls block your path!",
            BlockReason::NoRoom | BlockReason::NoSuchExit => "You can't go that way.",
            BlockReason::Locked => "The door is locked! You need a silver key to enter.",
        };
        f.write_str(msg)
    }
}

/// Recoverable failures of crawler operations. None of these leave the
/// session partially mutated, except that a blocked grid move still updates
/// the secret-path counter.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CrawlerError {
    #[error("{0}")]
    NavigationBlocked(BlockReason),

    /// Requested item is not lying in the current room.
    #[error("There is no {0} here.")]
    ItemNotFound(String),

    /// Requested item is not in the player's inventory.
    #[error("You don't have {0} in your inventory.")]
    ItemNotHeld(String),

    #[error("The {0} cannot be equipped.")]
    NotEquippable(String),

    #[error("You already have something in your {0} slot.")]
    SlotOccupied(EquipSlot),

    #[error("Both your hands are already occupied.")]
    BothHandsFull,

    #[error("There is no {0} here.")]
    NoSuchMonster(String),

    #[error("You cannot 'use' the {0} directly.")]
    NotUsable(String),

    /// Health has dropped to zero or below; the session is over.
    #[error("You have fallen. Your adventure is over.")]
    PlayerDefeated,

    /// A monster still blocks the way and the player must decide to flee.
    #[error("You must escape first!")]
    FleePending,

    #[error("There is nothing to flee from.")]
    NoFleePending,

    /// The player's position does not resolve to a registered room.
    #[error("You are in an empty void!")]
    NoCurrentRoom,
}
