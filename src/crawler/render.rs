//! Plain-text rendering of crawler state and outcomes.
//!
//! Nothing here mutates a session; the dispatcher hands outcomes over and
//! gets lines of text back.

use super::combat::{CombatOutcome, FleeOutcome, Strike};
use super::inventory::UseOutcome;
use super::navigation::MoveOutcome;
use super::session::RoomView;
use super::types::{Coord, EquipSlot, Position, SILVER_KEY};
use super::world::{RoomRegistry, ENTRY_HALL, THRONE_ROOM};

pub fn welcome_message() -> &'static str {
    "Welcome to Castle Crawler!\n\n\
Venture into the shadowed halls of this ancient castle, where whispers of a hidden treasure echo in every corridor.\n\
Legends speak of riches beyond imagination-and of those who perished seeking them. Your mission, should you dare,\n\
is to uncover the secret path leading to the treasure, or fall to the castle's eternal curse.\n\n\
May fortune favor the brave!"
}

pub fn help_text() -> &'static str {
    "Available Commands:\n\
- go <direction>   : Move in the specified direction (e.g., 'go north', 'go east', etc.).\n\
- look             : Describe your current surroundings.\n\
- take <item>      : Pick up an item (e.g., 'take sword').\n\
- take all         : Pick up all items in the room.\n\
- drop <item>      : Drop a specific item from your inventory into the current room.\n\
- use <item>       : Use an item (e.g., 'use health potion', 'use torch').\n\
- equip <item>     : Equip an item (e.g., 'equip helmet', 'equip sword').\n\
- inventory        : Show your current inventory.\n\
- equipment        : Show what you currently have equipped.\n\
- attack <monster> : Attack a monster in the room.\n\
- help             : Display this help message.\n\
- quit             : Exit the game."
}

pub fn room_view(view: &RoomView) -> String {
    let mut out = String::new();
    out.push_str(&view.description);
    out.push('\n');
    if !view.visible {
        out.push_str("It's too dark to see anything clearly.\n");
    } else {
        if !view.items.is_empty() {
            out.push_str("You see:\n");
            for item in &view.items {
                out.push_str(&format!("- {}\n", item));
            }
        }
        if !view.monsters.is_empty() {
            out.push_str("Monsters here:\n");
            for monster in &view.monsters {
                out.push_str(&format!("- {}\n", monster));
            }
        }
    }
    if view.exits.is_empty() {
        out.push_str("There are no obvious exits!\n");
    } else {
        out.push_str(&format!("Exits: {}\n", view.exits.join(", ")));
    }
    out
}

/// Short notices about a move; the dispatcher appends the new room view.
pub fn move_outcome(outcome: &MoveOutcome) -> String {
    match outcome {
        MoveOutcome::Moved {
            unlocked,
            torch_burned_out,
            ..
        } => {
            let mut out = String::new();
            if *unlocked {
                out.push_str("You unlock the door with a silver key.\n");
            }
            if *torch_burned_out {
                out.push_str("Your torch burns out as you enter the new room.\n");
            }
            out
        }
        MoveOutcome::EnteredFinalEncounter { .. } => {
            "A heavy door creaks open, revealing a foreboding chamber...\n".to_string()
        }
    }
}

fn strike_lines(monster: &str, strike: &Strike, out: &mut String) {
    out.push_str(&format!(
        "The {} deals {} damage to you!\nYour health is now: {}\n",
        monster, strike.damage, strike.health
    ));
}

pub fn combat_outcome(outcome: &CombatOutcome) -> String {
    let mut out = String::new();
    let (monster, preemptive) = match outcome {
        CombatOutcome::Slain { monster, strike } => (monster, Some(strike)),
        CombatOutcome::Missed {
            monster, preemptive, ..
        }
        | CombatOutcome::Defeated { monster, preemptive }
        | CombatOutcome::AwaitingFleeConfirmation {
            monster, preemptive, ..
        } => (monster, preemptive.as_ref()),
    };
    if let Some(strike) = preemptive {
        out.push_str("The monster strikes before you can act!\n");
        strike_lines(monster, strike, &mut out);
    }
    match outcome {
        CombatOutcome::Slain { .. } => {
            out.push_str("You have been slain by the monster's preemptive strike!\n");
        }
        CombatOutcome::Missed { counter, .. } => {
            out.push_str("You swing your weapon, but miss the monster entirely!\n");
            out.push_str(&format!(
                "Your miss leaves you vulnerable! The {} counterattacks, dealing {} damage!\n\
                 Your health is now: {}\n",
                monster, counter.damage, counter.health
            ));
        }
        CombatOutcome::Defeated { .. } => {
            out.push_str(&format!(
                "You attack the {} with your weapon and defeat it!\n",
                monster
            ));
        }
        CombatOutcome::AwaitingFleeConfirmation { strike, .. } => {
            out.push_str(&format!(
                "You are unarmed! The {} attacks, dealing {} damage!\nYour health is now: {}\n",
                monster, strike.damage, strike.health
            ));
            out.push_str("You must escape! Type 'run' to flee.\n");
        }
    }
    out
}

/// Notice for an escape attempt; an escape is followed by the new room view.
pub fn flee_outcome(outcome: &FleeOutcome) -> String {
    match outcome {
        FleeOutcome::Hesitated(strike) => format!(
            "You hesitate! The monster strikes again!\nYour health is now: {}\nType 'run' to flee.\n",
            strike.health
        ),
        FleeOutcome::Escaped { .. } => "You flee!\n".to_string(),
        FleeOutcome::Cornered => "There is nowhere to run!\n".to_string(),
    }
}

pub fn use_outcome(item: &str, outcome: &UseOutcome) -> String {
    match outcome {
        UseOutcome::Healed { health } => {
            format!("You used a {}. Your health is now: {}\n", item, health)
        }
        UseOutcome::TorchLit => "You light the torch. The room is now illuminated.\n".to_string(),
    }
}

pub fn equip_message(item: &str, slot: EquipSlot) -> String {
    match slot {
        EquipSlot::Helmet => "You don the helmet.\n".to_string(),
        EquipSlot::Armor => format!("You don the {}.\n", item),
        EquipSlot::Shield => "You equip the shield.\n".to_string(),
        EquipSlot::Boots => "You put on the boots.\n".to_string(),
        EquipSlot::Gloves => "You put on the gloves.\n".to_string(),
        EquipSlot::WeaponLeft => format!("You wield the {} in your left hand.\n", item),
        EquipSlot::WeaponRight => format!("You wield the {} in your right hand.\n", item),
    }
}

pub fn inventory(items: &[String]) -> String {
    if items.is_empty() {
        return "Your inventory is empty.\n".to_string();
    }
    let mut out = String::from("You have:\n");
    for item in items {
        out.push_str(&format!("- {}\n", item));
    }
    out
}

pub fn equipment(slots: &[(EquipSlot, Option<&str>)]) -> String {
    let mut out = String::from("Equipped Items:\n");
    for (slot, item) in slots {
        out.push_str(&format!("{}: {}\n", slot, item.unwrap_or("Empty")));
    }
    out
}

/// ASCII overview of the grid, north at the top. Used by the `map`
/// subcommand to inspect a seed.
pub fn render_map(world: &RoomRegistry, player: Option<Position>) -> String {
    let b = world.bounds();
    let mut msg = String::new();
    for y in (b.min..=b.max).rev() {
        for x in b.min..=b.max {
            let c = Coord::new(x, y);
            let symbol = match world.room_at(c) {
                _ if player == Some(Position::Grid(c)) => '@',
                None => '.',
                Some(_) if c == ENTRY_HALL => 'E',
                Some(_) if c == THRONE_ROOM => 'T',
                Some(r) if r.items.iter().any(|i| i == SILVER_KEY) => 'K',
                Some(r) if r.locked => 'L',
                Some(r) if !r.monsters.is_empty() => 'M',
                Some(_) => '#',
            };
            msg.push(symbol);
            if x < b.max {
                msg.push(' ');
            }
        }
        msg.push('\n');
    }
    msg.push_str("@=You E=Entry T=Throne K=Key\n");
    msg.push_str("L=Locked M=Monster #=Room .=None\n");
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::types::{GridBounds, Room};
    use std::collections::BTreeMap;

    #[test]
    fn dark_view_hides_lists() {
        let view = RoomView {
            name: "crypt".into(),
            description: "A crypt.".into(),
            visible: false,
            items: vec![],
            monsters: vec![],
            exits: vec!["north".into()],
        };
        let text = room_view(&view);
        assert!(text.contains("too dark"));
        assert!(text.contains("Exits: north"));
        assert!(!text.contains("You see:"));
    }

    #[test]
    fn map_marks_player_and_landmarks() {
        let mut grid = BTreeMap::new();
        grid.insert(ENTRY_HALL, Room::new("entry_hall", "hall"));
        grid.insert(THRONE_ROOM, Room::new("throne_room", "throne"));
        grid.insert(Coord::new(1, 0), Room::new("crypt", "c").locked());
        let world = RoomRegistry::new(GridBounds { min: 0, max: 1 }, grid);
        let map = render_map(&world, Some(Position::Grid(Coord::new(1, 0))));
        let rows: Vec<&str> = map.lines().collect();
        assert_eq!(rows[0], "T .");
        assert_eq!(rows[1], "E @");
    }

    #[test]
    fn equipment_lists_empty_slots() {
        let text = equipment(&[(EquipSlot::Helmet, None), (EquipSlot::WeaponLeft, Some("sword"))]);
        assert!(text.contains("Helmet: Empty"));
        assert!(text.contains("Weapon_left: sword"));
    }
}
