//! QA tests for full-turn resolution: movement, collision combat, and end
//! conditions.
//!
//! NPCs draw their direction from the engine's rng. A constant `StepRng`
//! pins every NPC to `Up`, which makes the board fully scripted; the
//! invariant sweep at the bottom uses a seeded `StdRng` instead.

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use skirmish_core::{
    Character, Direction, GameConfig, Grid, Position, Roster, TurnEngine, TurnEvent, TurnOutcome,
};

fn player(x: i32, y: i32, health: i32, armor: i32, damage: i32) -> Character {
    Character::player("Hero", Position::new(x, y), health, armor, damage)
}

fn enemy(name: &str, x: i32, y: i32, health: i32, armor: i32, damage: i32) -> Character {
    Character::enemy(name, Position::new(x, y), health, armor, damage)
}

/// Engine whose NPCs always step `Up`.
fn scripted(width: i32, height: i32, characters: Vec<Character>) -> TurnEngine<StepRng> {
    TurnEngine::new(
        Grid::new(width, height),
        Roster::new(characters).expect("roster"),
        StepRng::new(0, 0),
    )
}

#[test]
fn walking_into_an_enemy_attacks_instead_of_moving() {
    let mut engine = scripted(
        3,
        3,
        vec![
            player(1, 1, 100, 0, 30),
            // Sits at the top edge; its own Up step is off the grid.
            enemy("Enemy#1", 1, 0, 100, 10, 15),
        ],
    );

    let report = engine.resolve(Direction::Up);

    let attacks: Vec<_> = report
        .events
        .iter()
        .filter(|e| matches!(e, TurnEvent::Attacked { .. }))
        .collect();
    assert_eq!(attacks.len(), 1, "exactly one attack per collision");
    assert_eq!(
        attacks[0],
        &TurnEvent::Attacked {
            attacker: "Hero".to_string(),
            target: "Enemy#1".to_string(),
            damage: 30,
            armor: 0,
            health: 80,
        }
    );

    // The attacker never moves on an attack turn.
    assert_eq!(engine.roster().player().position, Position::new(1, 1));
    let target = &engine.roster().characters()[1];
    assert_eq!(target.armor, 0);
    assert_eq!(target.health, 80);
    assert!(!target.is_dead());
    assert_eq!(report.outcome, TurnOutcome::Continue);
}

#[test]
fn overkill_in_one_step_kills_in_the_same_step() {
    let mut engine = scripted(
        3,
        3,
        vec![player(1, 1, 100, 0, 30), enemy("Enemy#1", 1, 0, 20, 0, 15)],
    );

    let report = engine.resolve(Direction::Up);

    assert!(report.events.contains(&TurnEvent::Attacked {
        attacker: "Hero".to_string(),
        target: "Enemy#1".to_string(),
        damage: 30,
        armor: 0,
        health: -10,
    }));
    assert!(report
        .events
        .contains(&TurnEvent::Died { name: "Enemy#1".to_string() }));
    assert!(engine.roster().characters()[1].is_dead());
    assert_eq!(report.outcome, TurnOutcome::Victory);
}

#[test]
fn friendly_block_is_a_complete_no_op() {
    let mut engine = scripted(
        3,
        3,
        vec![
            player(0, 0, 100, 0, 10),
            // Resolves before its blocker has moved out of the way.
            enemy("Blocked", 1, 2, 60, 5, 10),
            enemy("Blocker", 1, 1, 60, 5, 10),
        ],
    );

    let report = engine.resolve(Direction::Down);

    let blocked = &engine.roster().characters()[1];
    let blocker = &engine.roster().characters()[2];
    assert_eq!(blocked.position, Position::new(1, 2), "no position change");
    assert_eq!(blocker.health, 60, "no stat change");
    assert_eq!(blocker.armor, 5);
    assert!(report
        .events
        .iter()
        .all(|e| !matches!(e, TurnEvent::Attacked { .. })));
    // Player stepped down, the blocker stepped up; the blocked one stayed.
    assert_eq!(blocker.position, Position::new(1, 0));
    assert_eq!(engine.roster().player().position, Position::new(0, 1));
}

#[test]
fn dead_characters_do_not_block_movement() {
    let mut corpse = enemy("Enemy#1", 1, 0, 0, 0, 15);
    corpse.health = 0;
    let mut engine = scripted(
        3,
        3,
        vec![player(1, 1, 100, 0, 30), corpse, enemy("Enemy#2", 2, 2, 60, 0, 10)],
    );

    engine.resolve(Direction::Up);

    // The corpse's cell reads as free; the player walks straight onto it.
    assert_eq!(engine.roster().player().position, Position::new(1, 0));
    assert_eq!(engine.roster().characters()[1].health, 0);
}

#[test]
fn npc_killing_the_player_is_defeat_even_with_enemies_left() {
    let mut engine = scripted(
        3,
        3,
        vec![
            // Pressed against the top edge; the commanded Up is a no-op.
            player(1, 0, 20, 0, 10),
            enemy("Enemy#1", 1, 1, 60, 0, 30),
            enemy("Enemy#2", 0, 2, 60, 0, 10),
        ],
    );

    let report = engine.resolve(Direction::Up);

    assert!(report
        .events
        .contains(&TurnEvent::Died { name: "Hero".to_string() }));
    assert_eq!(report.outcome, TurnOutcome::Defeat);
    assert_eq!(engine.roster().live_enemy_count(), 2);
}

#[test]
fn two_dead_enemies_mean_victory_before_anyone_moves() {
    let mut first = enemy("Enemy#1", 1, 1, 0, 0, 15);
    first.health = 0;
    let mut second = enemy("Enemy#2", 2, 2, 0, 0, 15);
    second.health = -4;
    let engine = scripted(3, 3, vec![player(0, 0, 100, 0, 10), first, second]);

    assert_eq!(engine.outcome(), TurnOutcome::Victory);
    assert_eq!(engine.turn(), 0);
}

#[test]
fn board_invariants_hold_across_many_resolved_turns() {
    let config = GameConfig {
        width: 5,
        height: 4,
        enemies: 6,
        ..GameConfig::default()
    };
    let grid = config.grid();

    for seed in 0..10u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let roster = Roster::spawn(&config, &mut rng).expect("spawn");
        let mut engine = TurnEngine::new(grid, roster, rng);

        let commands = [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ];
        for turn in 0..60 {
            engine.resolve(commands[turn % commands.len()]);

            let characters = engine.roster().characters();
            for (i, c) in characters.iter().enumerate() {
                assert!(grid.contains(c.position), "seed {seed} turn {turn}");
                assert!(c.armor >= 0, "seed {seed} turn {turn}");
                assert_eq!(c.is_dead(), c.health <= 0);
                if c.is_dead() {
                    continue;
                }
                for other in characters[i + 1..].iter().filter(|o| !o.is_dead()) {
                    assert_ne!(
                        c.position, other.position,
                        "two live characters share {} (seed {seed} turn {turn})",
                        c.position
                    );
                }
            }
        }
    }
}
