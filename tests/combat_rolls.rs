//! Combat resolution driven by seeded rolls

mod common;

use castle_crawler::crawler::{
    CombatOutcome, Coord, CrawlerError, FleeOutcome, Position, Room, Session, Strike, SWORD,
};
use common::{find_seed, session_with_rooms};

fn arena(monsters: &[&str], seed: u64) -> Session {
    session_with_rooms(
        vec![
            (Coord::new(0, 0), Room::new("hall", "A hall.").with_monsters(monsters)),
            (Coord::new(1, 0), Room::new("crypt", "A crypt.")),
        ],
        seed,
    )
}

fn armed(s: &mut Session) {
    s.player_mut().equipment.weapon_left = Some(SWORD.into());
}

fn monsters_here(s: &Session) -> Vec<String> {
    s.current_room().unwrap().monsters.clone()
}

#[test]
fn armed_clean_hit_kills_without_damage() {
    let seed = find_seed(|first, miss| first >= 0.25 && miss >= 0.25);
    let mut s = arena(&["goblin", "bat"], seed);
    armed(&mut s);
    let out = s.attack("goblin").unwrap();
    assert_eq!(
        out,
        CombatOutcome::Defeated {
            monster: "goblin".into(),
            preemptive: None
        }
    );
    assert_eq!(s.player().health, 100);
    assert_eq!(monsters_here(&s), vec!["bat".to_string()]);
}

#[test]
fn preemptive_strike_lands_before_the_kill() {
    let seed = find_seed(|first, miss| first < 0.25 && miss >= 0.25);
    let mut s = arena(&["goblin"], seed);
    armed(&mut s);
    let out = s.attack("goblin").unwrap();
    assert_eq!(
        out,
        CombatOutcome::Defeated {
            monster: "goblin".into(),
            preemptive: Some(Strike { damage: 5, health: 95 })
        }
    );
    assert!(monsters_here(&s).is_empty());
}

#[test]
fn a_miss_leaves_the_monster_and_costs_health() {
    let seed = find_seed(|first, miss| first >= 0.25 && miss < 0.25);
    let mut s = arena(&["orc"], seed);
    armed(&mut s);
    s.player_mut().equipment.helmet = Some("helmet".into());
    s.player_mut().equipment.armor = Some("armor".into());
    let out = s.attack("orc").unwrap();
    // Two pieces of armor cut 10 down to 7.
    assert_eq!(
        out,
        CombatOutcome::Missed {
            monster: "orc".into(),
            preemptive: None,
            counter: Strike { damage: 7, health: 93 }
        }
    );
    assert_eq!(monsters_here(&s), vec!["orc".to_string()]);
}

#[test]
fn a_fatal_miss_is_reported_as_a_miss() {
    let seed = find_seed(|first, miss| first >= 0.25 && miss < 0.25);
    let mut s = arena(&["goblin"], seed);
    s.player_mut().health = 3;
    let out = s.attack("goblin").unwrap();
    assert!(matches!(out, CombatOutcome::Missed { .. }));
    assert!(s.player().is_defeated());
    assert_eq!(s.take("anything"), Err(CrawlerError::PlayerDefeated));
}

#[test]
fn preemptive_strike_can_kill() {
    let seed = find_seed(|first, _| first < 0.25);
    let mut s = arena(&["goblin"], seed);
    s.player_mut().health = 3;
    let out = s.attack("goblin").unwrap();
    assert_eq!(
        out,
        CombatOutcome::Slain {
            monster: "goblin".into(),
            strike: Strike { damage: 5, health: -2 }
        }
    );
    assert_eq!(monsters_here(&s), vec!["goblin".to_string()]);
    assert_eq!(s.move_player("east"), Err(CrawlerError::PlayerDefeated));
}

#[test]
fn unarmed_fight_forces_an_escape() {
    let seed = find_seed(|first, miss| first >= 0.25 && miss >= 0.25);
    let mut s = arena(&["goblin"], seed);
    let out = s.attack("goblin").unwrap();
    assert_eq!(
        out,
        CombatOutcome::AwaitingFleeConfirmation {
            monster: "goblin".into(),
            preemptive: None,
            strike: Strike { damage: 5, health: 95 }
        }
    );
    assert!(monsters_here(&s).is_empty());
    assert!(s.pending_flee().is_some());

    // Nothing else may happen until the player answers.
    assert_eq!(s.take("anything"), Err(CrawlerError::FleePending));
    assert_eq!(s.move_player("east"), Err(CrawlerError::FleePending));

    assert_eq!(
        s.confirm_flee(false),
        Ok(FleeOutcome::Hesitated(Strike { damage: 5, health: 90 }))
    );
    assert_eq!(
        s.confirm_flee(true),
        Ok(FleeOutcome::Escaped {
            to: Position::Grid(Coord::new(1, 0))
        })
    );
    assert_eq!(s.position(), Position::Grid(Coord::new(1, 0)));
    assert!(s.pending_flee().is_none());
    assert_eq!(s.confirm_flee(true), Err(CrawlerError::NoFleePending));
}

#[test]
fn cornered_without_exits() {
    let seed = find_seed(|first, miss| first >= 0.25 && miss >= 0.25);
    let mut s = session_with_rooms(
        vec![(Coord::new(0, 0), Room::new("cell", "A cell.").with_monsters(&["bat"]))],
        seed,
    );
    s.attack("bat").unwrap();
    assert_eq!(s.confirm_flee(true), Ok(FleeOutcome::Cornered));
    assert_eq!(s.position(), Position::Grid(Coord::new(0, 0)));
    assert!(s.pending_flee().is_none());
}

#[test]
fn missing_monster_is_an_error_and_rolls_nothing() {
    let mut s = arena(&["goblin"], 0);
    assert_eq!(
        s.attack("dragon"),
        Err(CrawlerError::NoSuchMonster("dragon".into()))
    );
    assert_eq!(s.player().health, 100);
}
