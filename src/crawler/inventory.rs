/// Inventory, equipment and consumables for the crawler session
use log::debug;
use rand::Rng;

use super::errors::CrawlerError;
use super::session::Session;
use super::types::{EquipSlot, HEALTH_POTION, LEGENDARY_SWORD, MAX_HEALTH, POTION_HEAL, SWORD, TORCH};

/// Where an equippable item goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gear {
    Slot(EquipSlot),
    /// Fills the left hand, then the right.
    Weapon,
}

/// Classify an item by the slot it occupies, if any.
pub fn gear_for(item: &str) -> Option<Gear> {
    match item {
        "helmet" => Some(Gear::Slot(EquipSlot::Helmet)),
        "armor" | "enchanted armor" => Some(Gear::Slot(EquipSlot::Armor)),
        "shield" => Some(Gear::Slot(EquipSlot::Shield)),
        "boots" => Some(Gear::Slot(EquipSlot::Boots)),
        "gloves" => Some(Gear::Slot(EquipSlot::Gloves)),
        SWORD | LEGENDARY_SWORD => Some(Gear::Weapon),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UseOutcome {
    Healed { health: i32 },
    TorchLit,
}

// ============================================================================
// Item Operations
// ============================================================================

impl<R: Rng> Session<R> {
    /// Pick up one unit of `item` from the current room.
    pub fn take(&mut self, item: &str) -> Result<(), CrawlerError> {
        self.ensure_can_act()?;
        let room = self.current_room_mut()?;
        let idx = room
            .items
            .iter()
            .position(|i| i == item)
            .ok_or_else(|| CrawlerError::ItemNotFound(item.to_string()))?;
        let taken = room.items.remove(idx);
        self.player.inventory.push(taken);
        debug!("Took {}", item);
        Ok(())
    }

    /// Pick up everything in the current room. Returns what was taken, which
    /// is empty when the room had nothing.
    pub fn take_all(&mut self) -> Result<Vec<String>, CrawlerError> {
        self.ensure_can_act()?;
        let room = self.current_room_mut()?;
        let taken: Vec<String> = room.items.drain(..).collect();
        self.player.inventory.extend(taken.iter().cloned());
        Ok(taken)
    }

    /// Put one unit of `item` down in the current room.
    pub fn drop_item(&mut self, item: &str) -> Result<(), CrawlerError> {
        self.ensure_can_act()?;
        if !self.player.has_item(item) {
            return Err(CrawlerError::ItemNotHeld(item.to_string()));
        }
        let room = self.current_room_mut()?;
        room.items.push(item.to_string());
        self.player.remove_item(item);
        debug!("Dropped {}", item);
        Ok(())
    }

    /// Move a held item into its equipment slot.
    pub fn equip(&mut self, item: &str) -> Result<EquipSlot, CrawlerError> {
        self.ensure_can_act()?;
        if !self.player.has_item(item) {
            return Err(CrawlerError::ItemNotHeld(item.to_string()));
        }
        let eq = &self.player.equipment;
        let slot = match gear_for(item) {
            Some(Gear::Slot(slot)) => {
                if eq.slot(slot).is_some() {
                    return Err(CrawlerError::SlotOccupied(slot));
                }
                slot
            }
            Some(Gear::Weapon) => [EquipSlot::WeaponLeft, EquipSlot::WeaponRight]
                .into_iter()
                .find(|s| eq.slot(*s).is_none())
                .ok_or(CrawlerError::BothHandsFull)?,
            None => return Err(CrawlerError::NotEquippable(item.to_string())),
        };
        self.player.remove_item(item);
        *self.player.equipment.slot_mut(slot) = Some(item.to_string());
        debug!("Equipped {} in {}", item, slot);
        Ok(slot)
    }

    /// Apply a consumable.
    pub fn use_item(&mut self, item: &str) -> Result<UseOutcome, CrawlerError> {
        self.ensure_can_act()?;
        if !self.player.has_item(item) {
            return Err(CrawlerError::ItemNotHeld(item.to_string()));
        }
        match item {
            HEALTH_POTION => {
                self.player.health = (self.player.health + POTION_HEAL).min(MAX_HEALTH);
                self.player.remove_item(HEALTH_POTION);
                Ok(UseOutcome::Healed {
                    health: self.player.health,
                })
            }
            TORCH => {
                self.current_room_mut()?.dark = false;
                self.player.torch_active = true;
                Ok(UseOutcome::TorchLit)
            }
            other => Err(CrawlerError::NotUsable(other.to_string())),
        }
    }

    pub fn show_inventory(&self) -> &[String] {
        &self.player.inventory
    }

    /// Every slot in display order with its item, if any.
    pub fn show_equipment(&self) -> Vec<(EquipSlot, Option<&str>)> {
        EquipSlot::ALL
            .iter()
            .map(|s| (*s, self.player.equipment.slot(*s)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::types::{Coord, GridBounds, Room, SILVER_KEY};
    use crate::crawler::world::RoomRegistry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;

    fn session_with(items: &[&str]) -> Session {
        let mut grid = BTreeMap::new();
        grid.insert(Coord::new(0, 0), Room::new("hall", "A hall.").with_items(items).dark());
        let world = RoomRegistry::new(GridBounds { min: -1, max: 1 }, grid);
        Session::new(world, StdRng::seed_from_u64(3))
    }

    #[test]
    fn take_moves_single_unit() {
        let mut s = session_with(&["boots", "boots"]);
        s.take("boots").unwrap();
        assert_eq!(s.show_inventory(), &["boots".to_string()]);
        assert_eq!(s.current_room().unwrap().items, vec!["boots".to_string()]);
        assert_eq!(
            s.take("helmet"),
            Err(CrawlerError::ItemNotFound("helmet".into()))
        );
    }

    #[test]
    fn take_all_empties_room() {
        let mut s = session_with(&["boots", SILVER_KEY]);
        let taken = s.take_all().unwrap();
        assert_eq!(taken.len(), 2);
        assert!(s.current_room().unwrap().items.is_empty());
        assert!(s.take_all().unwrap().is_empty());
    }

    #[test]
    fn drop_requires_holding() {
        let mut s = session_with(&[]);
        assert_eq!(
            s.drop_item("gloves"),
            Err(CrawlerError::ItemNotHeld("gloves".into()))
        );
        s.player_mut().inventory.push("gloves".into());
        s.drop_item("gloves").unwrap();
        assert!(s.show_inventory().is_empty());
        assert_eq!(s.current_room().unwrap().items, vec!["gloves".to_string()]);
    }

    #[test]
    fn armor_variants_share_one_slot() {
        let mut s = session_with(&[]);
        s.player_mut().inventory = vec!["armor".into(), "enchanted armor".into()];
        assert_eq!(s.equip("enchanted armor"), Ok(EquipSlot::Armor));
        assert_eq!(
            s.equip("armor"),
            Err(CrawlerError::SlotOccupied(EquipSlot::Armor))
        );
        assert_eq!(s.show_inventory(), &["armor".to_string()]);
    }

    #[test]
    fn non_gear_cannot_be_equipped() {
        let mut s = session_with(&[]);
        s.player_mut().inventory.push("golden crown".into());
        assert_eq!(
            s.equip("golden crown"),
            Err(CrawlerError::NotEquippable("golden crown".into()))
        );
        assert_eq!(
            s.equip("helmet"),
            Err(CrawlerError::ItemNotHeld("helmet".into()))
        );
    }

    #[test]
    fn torch_lights_room_and_stays_in_pack() {
        let mut s = session_with(&[]);
        s.player_mut().inventory.push(TORCH.into());
        assert_eq!(s.use_item(TORCH), Ok(UseOutcome::TorchLit));
        assert!(!s.current_room().unwrap().dark);
        assert!(s.player().torch_active);
        assert!(s.player().has_item(TORCH));
    }

    #[test]
    fn unknown_consumable_is_rejected() {
        let mut s = session_with(&[]);
        s.player_mut().inventory.push(SILVER_KEY.into());
        assert_eq!(
            s.use_item(SILVER_KEY),
            Err(CrawlerError::NotUsable(SILVER_KEY.into()))
        );
        assert!(s.player().has_item(SILVER_KEY));
    }

    #[test]
    fn show_equipment_lists_all_slots() {
        let s = session_with(&[]);
        let slots = s.show_equipment();
        assert_eq!(slots.len(), 7);
        assert!(slots.iter().all(|(_, item)| item.is_none()));
    }
}
