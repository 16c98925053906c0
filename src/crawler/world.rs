//! World generation and the room registry.
//!
//! The castle is a square grid of optional rooms plus two special rooms that
//! sit outside the grid. Generation is a pure function of the random source:
//! the same seed always builds the same castle.
//!
//! Rooms are kept in a `BTreeMap` so that iteration order, and therefore key
//! placement, does not depend on hashing.

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::collections::BTreeMap;

use super::types::{
    Coord, Direction, Exit, GridBounds, Position, Room, SpecialRoom, SECRET_LOCKED_INDICES,
    SILVER_KEY, SWORD, TORCH,
};
use crate::config::WorldConfig;

pub const ENTRY_HALL: Coord = Coord::new(0, 0);
pub const THRONE_ROOM: Coord = Coord::new(0, 1);

const ITEM_POOL: [&str; 6] = ["health potion", "shield", "helmet", "boots", "gloves", "armor"];
const MONSTER_POOL: [&str; 5] = ["goblin", "orc", "skeleton", "zombie", "bat"];

const LOCK_CHANCE: f64 = 0.3;
const DARK_CHANCE: f64 = 0.5;

/// A kind of randomly placed room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomType {
    pub name: &'static str,
    pub description: &'static str,
}

pub const ROOM_TYPES: [RoomType; 8] = [
    RoomType {
        name: "library",
        description: "You enter a quiet library filled with dusty tomes and ancient scrolls.",
    },
    RoomType {
        name: "kitchen",
        description: "You step into the castle's kitchen, where the aroma of stale bread and herbs lingers.",
    },
    RoomType {
        name: "armory",
        description: "You find yourself in an armory, with racks of glistening weapons and battered shields lining the walls.",
    },
    RoomType {
        name: "bedchamber",
        description: "You enter a dimly lit bedchamber, where an opulent bed and faded decor suggest once royal inhabitants.",
    },
    RoomType {
        name: "study",
        description: "You enter a study cluttered with maps, parchments, and mysterious artifacts.",
    },
    RoomType {
        name: "dungeon",
        description: "You descend into a dungeon, where cold, damp stone and iron bars evoke a sense of dread.",
    },
    RoomType {
        name: "crypt",
        description: "You step into a silent crypt, the air thick with the scent of decay and ancient secrets.",
    },
    RoomType {
        name: "gallery",
        description: "You wander into an art gallery, where portraits of nobility watch over the room in silent judgment.",
    },
];

fn entry_hall() -> Room {
    Room::new(
        "entry_hall",
        "You stand in a bright, welcoming entry hall of Castle Crawler. \
         Sunlight streams through a stained-glass window.",
    )
    .with_items(&[TORCH, SWORD])
}

fn throne_room() -> Room {
    Room::new(
        "throne_room",
        "You enter the grand throne room, echoes of past royalty haunting the air.",
    )
}

/// Template for a special room. Exits start empty.
pub fn special_room(which: SpecialRoom) -> Room {
    match which {
        SpecialRoom::FinalEncounter => Room::new(
            which.key(),
            "You have entered the final chamber. A massive figure looms before you-the Final Boss, \
             radiating unfathomable malice. This is the threshold to the treasure...",
        )
        .with_monsters(&["final boss"]),
        SpecialRoom::SecretTreasure => Room::new(
            which.key(),
            "Incredible! You've discovered the secret treasure room filled with riches beyond imagination. \
             Glittering gold, rare weapons, enchanted armor, and ancient relics are piled high.",
        )
        .with_items(&[
            "legendary sword",
            "enchanted armor",
            "infinite health potion",
            "golden crown",
        ]),
    }
}

/// Cells along the center column south of the entry hall never hold a room.
pub fn castle_exclusion(c: Coord) -> bool {
    c.x == 0 && c.y < 0
}

/// Grid rooms plus the two special rooms, addressed uniformly by [`Position`].
#[derive(Debug, Clone)]
pub struct RoomRegistry {
    bounds: GridBounds,
    grid: BTreeMap<Coord, Room>,
    final_encounter: Room,
    secret_treasure: Room,
}

impl RoomRegistry {
    /// Build a registry from placed grid rooms and derive their exits.
    /// Any exits already present on the rooms are replaced.
    pub fn new(bounds: GridBounds, mut grid: BTreeMap<Coord, Room>) -> Self {
        grid.retain(|c, _| bounds.contains(*c));
        link_exits(&mut grid);
        RoomRegistry {
            bounds,
            grid,
            final_encounter: special_room(SpecialRoom::FinalEncounter),
            secret_treasure: special_room(SpecialRoom::SecretTreasure),
        }
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    pub fn get(&self, position: Position) -> Option<&Room> {
        match position {
            Position::Grid(c) => self.grid.get(&c),
            Position::Special(SpecialRoom::FinalEncounter) => Some(&self.final_encounter),
            Position::Special(SpecialRoom::SecretTreasure) => Some(&self.secret_treasure),
        }
    }

    pub fn get_mut(&mut self, position: Position) -> Option<&mut Room> {
        match position {
            Position::Grid(c) => self.grid.get_mut(&c),
            Position::Special(SpecialRoom::FinalEncounter) => Some(&mut self.final_encounter),
            Position::Special(SpecialRoom::SecretTreasure) => Some(&mut self.secret_treasure),
        }
    }

    pub fn room_at(&self, c: Coord) -> Option<&Room> {
        self.grid.get(&c)
    }

    pub fn grid_rooms(&self) -> impl Iterator<Item = (Coord, &Room)> {
        self.grid.iter().map(|(c, r)| (*c, r))
    }

    pub fn grid_len(&self) -> usize {
        self.grid.len()
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            bounds: self.bounds,
            rooms: self
                .grid
                .iter()
                .map(|(c, room)| PlacedRoom {
                    coord: *c,
                    room: room.clone(),
                })
                .collect(),
        }
    }
}

/// Serializable view of the grid, used by `castle-crawler map --json`.
#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    pub bounds: GridBounds,
    pub rooms: Vec<PlacedRoom>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacedRoom {
    pub coord: Coord,
    pub room: Room,
}

/// Record an exit for every cardinal neighbour that also holds a room.
fn link_exits(grid: &mut BTreeMap<Coord, Room>) {
    let coords: Vec<Coord> = grid.keys().copied().collect();
    for c in coords {
        let exits: Vec<Exit> = Direction::ALL
            .iter()
            .filter_map(|d| {
                let n = c.step(*d);
                grid.contains_key(&n).then(|| Exit {
                    label: d.as_str().to_string(),
                    to: Position::Grid(n),
                })
            })
            .collect();
        if let Some(room) = grid.get_mut(&c) {
            room.exits = exits;
        }
    }
}

/// Parameters of a castle layout.
#[derive(Debug, Clone)]
pub struct WorldGenerator {
    pub bounds: GridBounds,
    pub room_probability: f64,
    pub room_types: Vec<RoomType>,
    pub forced_rooms: Vec<(Coord, Room)>,
    pub exclusion: fn(Coord) -> bool,
    /// Number of silver keys to hide in non-forced rooms.
    pub key_count: usize,
}

impl WorldGenerator {
    /// The standard castle: entry hall and throne room fixed, the column
    /// south of the entry hall empty, one key per locked secret step.
    pub fn castle(config: &WorldConfig) -> Self {
        WorldGenerator {
            bounds: GridBounds {
                min: config.grid_min,
                max: config.grid_max,
            },
            room_probability: config.room_probability,
            room_types: ROOM_TYPES.to_vec(),
            forced_rooms: vec![(ENTRY_HALL, entry_hall()), (THRONE_ROOM, throne_room())],
            exclusion: castle_exclusion,
            key_count: SECRET_LOCKED_INDICES.len(),
        }
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> RoomRegistry {
        let mut grid = BTreeMap::new();
        for c in self.bounds.coords() {
            if (self.exclusion)(c) {
                continue;
            }
            if let Some((_, forced)) = self.forced_rooms.iter().find(|(fc, _)| *fc == c) {
                grid.insert(c, forced.clone());
                continue;
            }
            if rng.gen::<f64>() < self.room_probability {
                if let Some(rt) = self.room_types.choose(rng) {
                    grid.insert(c, random_room(rt, rng));
                }
            }
        }

        let mut registry = RoomRegistry::new(self.bounds, grid);
        self.distribute_keys(&mut registry, rng);
        info!(
            "Generated castle: {} rooms within {}..={}",
            registry.grid_len(),
            self.bounds.min,
            self.bounds.max
        );
        registry
    }

    fn distribute_keys<R: Rng + ?Sized>(&self, registry: &mut RoomRegistry, rng: &mut R) {
        let candidates: Vec<Coord> = registry
            .grid
            .keys()
            .copied()
            .filter(|c| !self.forced_rooms.iter().any(|(fc, _)| fc == c))
            .collect();
        let chosen: Vec<Coord> = if candidates.len() < self.key_count {
            candidates
        } else {
            candidates
                .choose_multiple(rng, self.key_count)
                .copied()
                .collect()
        };
        for c in chosen {
            if let Some(room) = registry.grid.get_mut(&c) {
                room.items.push(SILVER_KEY.to_string());
                debug!("Silver key hidden at {}", c);
            }
        }
    }
}

fn random_room<R: Rng + ?Sized>(rt: &RoomType, rng: &mut R) -> Room {
    let count = rng.gen_range(1..=ITEM_POOL.len().min(3));
    let items: Vec<&str> = ITEM_POOL.choose_multiple(rng, count).copied().collect();
    let locked = rng.gen::<f64>() < LOCK_CHANCE;
    let dark = rng.gen_bool(DARK_CHANCE);

    let roll = rng.gen::<f64>();
    let monsters: Vec<&str> = if roll < 0.5 {
        Vec::new()
    } else if roll < 0.8 || MONSTER_POOL.len() < 2 {
        MONSTER_POOL.choose(rng).copied().into_iter().collect()
    } else {
        MONSTER_POOL.choose_multiple(rng, 2).copied().collect()
    };

    let mut room = Room::new(rt.name, rt.description)
        .with_items(&items)
        .with_monsters(&monsters);
    room.locked = locked;
    room.dark = dark;
    room
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_registry() -> RoomRegistry {
        let mut grid = BTreeMap::new();
        grid.insert(ENTRY_HALL, entry_hall());
        grid.insert(THRONE_ROOM, throne_room());
        grid.insert(Coord::new(1, 0), Room::new("crypt", "cold"));
        grid.insert(Coord::new(3, 3), Room::new("study", "dusty"));
        RoomRegistry::new(GridBounds { min: -2, max: 2 }, grid)
    }

    #[test]
    fn registry_drops_rooms_outside_bounds() {
        let reg = small_registry();
        assert!(reg.room_at(Coord::new(3, 3)).is_none());
        assert_eq!(reg.grid_len(), 3);
    }

    #[test]
    fn exits_follow_adjacency() {
        let reg = small_registry();
        let hall = reg.room_at(ENTRY_HALL).unwrap();
        let labels: Vec<&str> = hall.exits.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["north", "east"]);
        let crypt = reg.room_at(Coord::new(1, 0)).unwrap();
        assert_eq!(crypt.exit("west"), Some(Position::Grid(ENTRY_HALL)));
        assert_eq!(crypt.exit("north"), None);
    }

    #[test]
    fn special_rooms_resolve_by_key() {
        let reg = small_registry();
        let boss = reg
            .get(Position::Special(SpecialRoom::FinalEncounter))
            .unwrap();
        assert_eq!(boss.monsters, vec!["final boss".to_string()]);
        assert!(boss.exits.is_empty());
        let treasure = reg
            .get(Position::Special(SpecialRoom::SecretTreasure))
            .unwrap();
        assert!(treasure.items.iter().any(|i| i == "legendary sword"));
    }

    #[test]
    fn random_rooms_stay_within_pools() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let room = random_room(&ROOM_TYPES[0], &mut rng);
            assert!((1..=3).contains(&room.items.len()));
            assert!(room.items.iter().all(|i| ITEM_POOL.contains(&i.as_str())));
            assert!(room.monsters.len() <= 2);
            if room.monsters.len() == 2 {
                assert_ne!(room.monsters[0], room.monsters[1]);
            }
            let mut dedup = room.items.clone();
            dedup.sort();
            dedup.dedup();
            assert_eq!(dedup.len(), room.items.len(), "items drawn without repetition");
        }
    }

    #[test]
    fn keys_go_everywhere_when_rooms_are_scarce() {
        let gen = WorldGenerator {
            bounds: GridBounds { min: 0, max: 1 },
            room_probability: 1.0,
            room_types: ROOM_TYPES.to_vec(),
            forced_rooms: vec![(ENTRY_HALL, entry_hall()), (THRONE_ROOM, throne_room())],
            exclusion: castle_exclusion,
            key_count: 3,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let reg = gen.generate(&mut rng);
        assert_eq!(reg.grid_len(), 4);
        for (c, room) in reg.grid_rooms() {
            let keys = room.items.iter().filter(|i| *i == SILVER_KEY).count();
            if c == ENTRY_HALL || c == THRONE_ROOM {
                assert_eq!(keys, 0, "forced room {} must not hold a key", c);
            } else {
                assert_eq!(keys, 1, "room {} should hold exactly one key", c);
            }
        }
    }
}
