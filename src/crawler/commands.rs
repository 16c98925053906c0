//! Text command parsing and dispatch for an interactive crawl.
//!
//! [`parse_command`] turns a typed line into a [`CrawlerCommand`];
//! [`dispatch`] runs it against a [`Session`] and renders the reply. While an
//! escape is pending only `run` (flee) and `quit` are honoured; anything else
//! counts as hesitating.

use log::{debug, warn};
use rand::Rng;

use super::combat::FleeOutcome;
use super::errors::CrawlerError;
use super::render;
use super::session::Session;
use super::types::Direction;
use crate::logutil::PlayerInput;

/// Crawler command categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlerCommand {
    Go(String),           // GO NORTH, N, NORTH, GO BACK
    Look,                 // LOOK, L
    Take(String),         // TAKE sword
    TakeAll,              // TAKE ALL
    Drop(String),         // DROP boots
    Use(String),          // USE health potion
    Equip(String),        // EQUIP helmet
    Inventory,            // I, INVENTORY
    Equipment,            // EQUIPMENT, EQ
    Attack(String),       // ATTACK goblin
    Help,                 // HELP, ?
    Quit,                 // QUIT, Q
    Unknown(String),
}

/// Result of one dispatched line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// The player asked to leave.
    pub quit: bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Reply {
            text: text.into(),
            quit: false,
        }
    }
}

/// Expand the one-letter direction shorthands; anything else passes through
/// so special-room labels like `back` still work.
fn direction_word(word: &str) -> String {
    match word {
        "n" => Direction::North.as_str().to_string(),
        "s" => Direction::South.as_str().to_string(),
        "e" => Direction::East.as_str().to_string(),
        "w" => Direction::West.as_str().to_string(),
        other => other.to_string(),
    }
}

/// Parse a raw line. Matching is case-insensitive and item or monster names
/// may span several words.
pub fn parse_command(input: &str) -> CrawlerCommand {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.is_empty() {
        return CrawlerCommand::Unknown(input);
    }
    let rest = parts[1..].join(" ");

    match parts[0] {
        "go" | "move" => {
            if rest.is_empty() {
                CrawlerCommand::Unknown("Usage: go <direction>".to_string())
            } else {
                CrawlerCommand::Go(direction_word(&rest))
            }
        }
        "n" | "s" | "e" | "w" | "north" | "south" | "east" | "west" if parts.len() == 1 => {
            CrawlerCommand::Go(direction_word(parts[0]))
        }
        "l" | "look" => CrawlerCommand::Look,
        "take" | "get" => {
            if rest.is_empty() {
                CrawlerCommand::Unknown("Usage: take <item>".to_string())
            } else if rest == "all" {
                CrawlerCommand::TakeAll
            } else {
                CrawlerCommand::Take(rest)
            }
        }
        "drop" if !rest.is_empty() => CrawlerCommand::Drop(rest),
        "use" if !rest.is_empty() => CrawlerCommand::Use(rest),
        "equip" | "wear" | "wield" if !rest.is_empty() => CrawlerCommand::Equip(rest),
        "attack" | "fight" | "kill" if !rest.is_empty() => CrawlerCommand::Attack(rest),
        "i" | "inv" | "inventory" => CrawlerCommand::Inventory,
        "eq" | "equipment" => CrawlerCommand::Equipment,
        "help" | "?" | "h" => CrawlerCommand::Help,
        "q" | "quit" | "exit" => CrawlerCommand::Quit,
        "drop" | "use" | "equip" | "wear" | "wield" | "attack" | "fight" | "kill" => {
            CrawlerCommand::Unknown(format!("Usage: {} <target>", parts[0]))
        }
        _ => CrawlerCommand::Unknown(input.clone()),
    }
}

/// Parse and run one line of player input. A blank line does nothing,
/// except while an escape is pending, where it counts as hesitating.
pub fn dispatch<R: Rng>(session: &mut Session<R>, line: &str) -> Reply {
    let command = parse_command(line);
    debug!("Dispatch {} -> {:?}", PlayerInput(line), command);

    if session.pending_flee().is_some() {
        return resolve_flee(session, line, command);
    }
    if line.trim().is_empty() {
        return Reply::text("");
    }

    match run(session, command) {
        Ok(reply) => reply,
        Err(e) => Reply::text(format!("{}\n", e)),
    }
}

fn resolve_flee<R: Rng>(session: &mut Session<R>, line: &str, command: CrawlerCommand) -> Reply {
    if command == CrawlerCommand::Quit {
        return Reply {
            text: "Goodbye!\n".to_string(),
            quit: true,
        };
    }
    let flee = line.trim().eq_ignore_ascii_case("run");
    match session.confirm_flee(flee) {
        Ok(outcome) => {
            let mut text = render::flee_outcome(&outcome);
            if matches!(outcome, FleeOutcome::Escaped { .. }) {
                append_room(session, &mut text);
            }
            Reply::text(text)
        }
        Err(e) => Reply::text(format!("{}\n", e)),
    }
}

fn append_room<R: Rng>(session: &Session<R>, text: &mut String) {
    match session.describe_current_room() {
        Ok(view) => text.push_str(&render::room_view(&view)),
        Err(e) => warn!("No room to describe after move: {}", e),
    }
}

fn run<R: Rng>(session: &mut Session<R>, command: CrawlerCommand) -> Result<Reply, CrawlerError> {
    let reply = match command {
        CrawlerCommand::Go(dir) => {
            let torch_was_lit = session.player().torch_active;
            match session.move_player(&dir) {
                Ok(outcome) => {
                    let mut text = render::move_outcome(&outcome);
                    append_room(session, &mut text);
                    Reply::text(text)
                }
                Err(e) => {
                    let mut text = format!("{}\n", e);
                    if torch_was_lit && !session.player().torch_active {
                        text.push_str("Your torch burns out.\n");
                    }
                    Reply::text(text)
                }
            }
        }
        CrawlerCommand::Look => Reply::text(render::room_view(&session.describe_current_room()?)),
        CrawlerCommand::Take(item) => {
            session.take(&item)?;
            Reply::text(format!("You take the {}.\n", item))
        }
        CrawlerCommand::TakeAll => {
            let taken = session.take_all()?;
            if taken.is_empty() {
                Reply::text("There are no items to take.\n")
            } else {
                Reply::text(format!("You take: {}\n", taken.join(", ")))
            }
        }
        CrawlerCommand::Drop(item) => {
            session.drop_item(&item)?;
            Reply::text(format!("You drop the {}.\n", item))
        }
        CrawlerCommand::Use(item) => {
            let outcome = session.use_item(&item)?;
            Reply::text(render::use_outcome(&item, &outcome))
        }
        CrawlerCommand::Equip(item) => {
            let slot = session.equip(&item)?;
            Reply::text(render::equip_message(&item, slot))
        }
        CrawlerCommand::Inventory => Reply::text(render::inventory(session.show_inventory())),
        CrawlerCommand::Equipment => Reply::text(render::equipment(&session.show_equipment())),
        CrawlerCommand::Attack(monster) => {
            let outcome = session.attack(&monster)?;
            Reply::text(render::combat_outcome(&outcome))
        }
        CrawlerCommand::Help => Reply::text(format!("{}\n", render::help_text())),
        CrawlerCommand::Quit => Reply {
            text: "Goodbye!\n".to_string(),
            quit: true,
        },
        CrawlerCommand::Unknown(msg) if msg.starts_with("Usage:") => Reply::text(format!("{}\n", msg)),
        CrawlerCommand::Unknown(_) => {
            Reply::text("I don't understand that command. Type 'help' for a list of commands.\n")
        }
    };
    Ok(reply)
}
