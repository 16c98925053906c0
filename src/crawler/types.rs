use serde::{Deserialize, Serialize};
use std::fmt;

pub const SILVER_KEY: &str = "silver key";
pub const TORCH: &str = "torch";
pub const HEALTH_POTION: &str = "health potion";
pub const SWORD: &str = "sword";
pub const LEGENDARY_SWORD: &str = "legendary sword";

pub const MAX_HEALTH: i32 = 100;
pub const POTION_HEAL: i32 = 25;

/// Ordered moves that open the way to the final encounter.
pub const SECRET_SEQUENCE: [Direction; 8] = [
    Direction::East,
    Direction::North,
    Direction::West,
    Direction::South,
    Direction::East,
    Direction::North,
    Direction::West,
    Direction::South,
];

/// Positions in [`SECRET_SEQUENCE`] that are guarded by a lock. Their count
/// decides how many silver keys the generator hides.
pub const SECRET_LOCKED_INDICES: [usize; 3] = [1, 4, 6];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Exit order used when linking rooms.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }

    /// Parse a full lowercase direction word.
    pub fn from_word(word: &str) -> Option<Direction> {
        match word {
            "north" => Some(Direction::North),
            "south" => Some(Direction::South),
            "east" => Some(Direction::East),
            "west" => Some(Direction::West),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    pub fn step(self, dir: Direction) -> Coord {
        let (dx, dy) = dir.offset();
        Coord::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Inclusive square bounds of the room grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridBounds {
    pub min: i32,
    pub max: i32,
}

impl GridBounds {
    pub fn contains(&self, c: Coord) -> bool {
        (self.min..=self.max).contains(&c.x) && (self.min..=self.max).contains(&c.y)
    }

    /// Every coordinate in x-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (self.min..=self.max).flat_map(move |x| (self.min..=self.max).map(move |y| Coord::new(x, y)))
    }
}

/// Rooms that live outside the grid and are addressed by key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SpecialRoom {
    FinalEncounter,
    SecretTreasure,
}

impl SpecialRoom {
    pub fn key(self) -> &'static str {
        match self {
            SpecialRoom::FinalEncounter => "final_boss_room",
            SpecialRoom::SecretTreasure => "secret_treasure_room",
        }
    }
}

/// Where the player stands, or where an exit leads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Grid(Coord),
    Special(SpecialRoom),
}

impl Position {
    pub fn coord(self) -> Option<Coord> {
        match self {
            Position::Grid(c) => Some(c),
            Position::Special(_) => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Grid(c) => c.fmt(f),
            Position::Special(s) => f.write_str(s.key()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exit {
    pub label: String,
    pub to: Position,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Room {
    pub name: String,
    pub description: String,
    pub items: Vec<String>,
    pub monsters: Vec<String>,
    pub locked: bool,
    pub dark: bool,
    /// Derived from grid adjacency, or set on entry for special rooms.
    pub exits: Vec<Exit>,
}

impl Room {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Room {
            name: name.into(),
            description: description.into(),
            items: Vec::new(),
            monsters: Vec::new(),
            locked: false,
            dark: false,
            exits: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: &[&str]) -> Self {
        self.items = items.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_monsters(mut self, monsters: &[&str]) -> Self {
        self.monsters = monsters.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    pub fn dark(mut self) -> Self {
        self.dark = true;
        self
    }

    pub fn exit(&self, label: &str) -> Option<Position> {
        self.exits.iter().find(|e| e.label == label).map(|e| e.to)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EquipSlot {
    Helmet,
    Armor,
    Shield,
    Boots,
    Gloves,
    WeaponLeft,
    WeaponRight,
}

impl EquipSlot {
    pub const ALL: [EquipSlot; 7] = [
        EquipSlot::Helmet,
        EquipSlot::Armor,
        EquipSlot::Shield,
        EquipSlot::Boots,
        EquipSlot::Gloves,
        EquipSlot::WeaponLeft,
        EquipSlot::WeaponRight,
    ];

    /// Slots that count toward damage mitigation.
    pub const PROTECTIVE: [EquipSlot; 5] = [
        EquipSlot::Helmet,
        EquipSlot::Armor,
        EquipSlot::Shield,
        EquipSlot::Boots,
        EquipSlot::Gloves,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EquipSlot::Helmet => "Helmet",
            EquipSlot::Armor => "Armor",
            EquipSlot::Shield => "Shield",
            EquipSlot::Boots => "Boots",
            EquipSlot::Gloves => "Gloves",
            EquipSlot::WeaponLeft => "Weapon_left",
            EquipSlot::WeaponRight => "Weapon_right",
        }
    }
}

impl fmt::Display for EquipSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Equipment {
    pub helmet: Option<String>,
    pub armor: Option<String>,
    pub shield: Option<String>,
    pub boots: Option<String>,
    pub gloves: Option<String>,
    pub weapon_left: Option<String>,
    pub weapon_right: Option<String>,
}

impl Equipment {
    pub fn slot(&self, slot: EquipSlot) -> Option<&str> {
        match slot {
            EquipSlot::Helmet => self.helmet.as_deref(),
            EquipSlot::Armor => self.armor.as_deref(),
            EquipSlot::Shield => self.shield.as_deref(),
            EquipSlot::Boots => self.boots.as_deref(),
            EquipSlot::Gloves => self.gloves.as_deref(),
            EquipSlot::WeaponLeft => self.weapon_left.as_deref(),
            EquipSlot::WeaponRight => self.weapon_right.as_deref(),
        }
    }

    pub fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<String> {
        match slot {
            EquipSlot::Helmet => &mut self.helmet,
            EquipSlot::Armor => &mut self.armor,
            EquipSlot::Shield => &mut self.shield,
            EquipSlot::Boots => &mut self.boots,
            EquipSlot::Gloves => &mut self.gloves,
            EquipSlot::WeaponLeft => &mut self.weapon_left,
            EquipSlot::WeaponRight => &mut self.weapon_right,
        }
    }

    pub fn protective_count(&self) -> usize {
        EquipSlot::PROTECTIVE
            .iter()
            .filter(|s| self.slot(**s).is_some())
            .count()
    }

    /// True when either hand holds a sword.
    pub fn is_armed(&self) -> bool {
        [EquipSlot::WeaponLeft, EquipSlot::WeaponRight]
            .iter()
            .any(|s| matches!(self.slot(*s), Some(SWORD) | Some(LEGENDARY_SWORD)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Position,
    pub inventory: Vec<String>,
    pub health: i32,
    /// Armed by lighting a torch; burns out on the next grid move.
    pub torch_active: bool,
    pub equipment: Equipment,
    /// Grid room the player left to enter the final encounter.
    pub last_room: Option<Coord>,
}

impl Player {
    pub fn new() -> Self {
        Player {
            position: Position::Grid(Coord::new(0, 0)),
            inventory: Vec::new(),
            health: MAX_HEALTH,
            torch_active: false,
            equipment: Equipment::default(),
            last_room: None,
        }
    }

    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    /// Remove one unit of `item`; false when none is held.
    pub fn remove_item(&mut self, item: &str) -> bool {
        match self.inventory.iter().position(|i| i == item) {
            Some(idx) => {
                self.inventory.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}
