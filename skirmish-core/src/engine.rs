//! Turn resolution: player commands, per-character movement, combat, and
//! end conditions.
//!
//! The engine owns the roster outright; each turn it walks the roster in
//! order, moves or attacks on behalf of every live character, and then
//! evaluates whether the game is over. It does no I/O of its own: a turn
//! returns the events that happened and the front ends decide how to show
//! them.

use crate::character::Character;
use crate::grid::{Direction, Grid, Position};
use crate::roster::{Roster, RosterError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parsing a player command token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unrecognized command {0:?}")]
    Unrecognized(String),
}

/// A parsed player command. Only `Move` advances the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Save,
    Load,
    Quit,
}

impl Command {
    /// Parse a command token. Matching is exact and case-sensitive.
    pub fn parse(token: &str) -> Result<Command, CommandError> {
        match token {
            "up" => Ok(Command::Move(Direction::Up)),
            "down" => Ok(Command::Move(Direction::Down)),
            "left" => Ok(Command::Move(Direction::Left)),
            "right" => Ok(Command::Move(Direction::Right)),
            "save" => Ok(Command::Save),
            "load" => Ok(Command::Load),
            "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unrecognized(other.to_string())),
        }
    }
}

/// Where the game stands after a turn.
///
/// Quitting is not an outcome; the front end simply stops asking for turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    Continue,
    Victory,
    Defeat,
}

impl TurnOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, TurnOutcome::Continue)
    }
}

/// One thing that happened during a turn, in resolution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    Moved {
        name: String,
        to: Position,
    },
    Attacked {
        attacker: String,
        target: String,
        damage: i32,
        /// Target's armor after the hit.
        armor: i32,
        /// Target's health after the hit.
        health: i32,
    },
    Died {
        name: String,
    },
}

/// Everything a resolved turn produced.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub events: Vec<TurnEvent>,
    pub outcome: TurnOutcome,
}

/// Drives one simulation step per commanded direction.
#[derive(Debug)]
pub struct TurnEngine<R: Rng> {
    grid: Grid,
    roster: Roster,
    rng: R,
    turn: u32,
}

impl<R: Rng> TurnEngine<R> {
    pub fn new(grid: Grid, roster: Roster, rng: R) -> Self {
        Self {
            grid,
            roster,
            rng,
            turn: 0,
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Completed turn count.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Resolve one full turn.
    ///
    /// Every roster member acts once, in roster order: the player steps in
    /// `commanded`, each NPC in a direction drawn fresh from the rng. There
    /// is no decide/commit split; an early mover changes the board the later
    /// movers see.
    pub fn resolve(&mut self, commanded: Direction) -> TurnReport {
        let mut events = Vec::new();
        for index in 0..self.roster.len() {
            self.resolve_character(index, commanded, &mut events);
        }
        self.turn += 1;
        TurnReport {
            events,
            outcome: self.outcome(),
        }
    }

    fn resolve_character(&mut self, index: usize, commanded: Direction, events: &mut Vec<TurnEvent>) {
        let (position, is_player, attack_damage) = match self.roster.get(index) {
            Some(actor) if !actor.is_dead() => (actor.position, actor.is_player(), actor.damage),
            _ => return,
        };

        let direction = if is_player {
            commanded
        } else {
            Direction::random(&mut self.rng)
        };
        let candidate = position.step(direction);
        if !self.grid.contains(candidate) {
            return;
        }

        match self.roster.live_occupant(candidate, index) {
            None => {
                if let Some(actor) = self.roster.get_mut(index) {
                    actor.position = candidate;
                    events.push(TurnEvent::Moved {
                        name: actor.name.clone(),
                        to: candidate,
                    });
                }
            }
            Some(occupant) => {
                // The cell is busy either way; an attack happens only across
                // allegiances, and the attacker stays put regardless.
                let hostile = self
                    .roster
                    .get(occupant)
                    .is_some_and(|c| c.is_player() != is_player);
                if hostile {
                    self.attack(index, occupant, attack_damage, events);
                }
            }
        }
    }

    fn attack(&mut self, attacker: usize, target: usize, damage: i32, events: &mut Vec<TurnEvent>) {
        let attacker_name = match self.roster.get(attacker) {
            Some(c) => c.name.clone(),
            None => return,
        };
        if let Some(target) = self.roster.get_mut(target) {
            let target_name = target.name.clone();
            let outcome = target.take_hit(damage);
            events.push(TurnEvent::Attacked {
                attacker: attacker_name,
                target: target_name.clone(),
                damage,
                armor: outcome.armor,
                health: outcome.health,
            });
            if outcome.lethal {
                events.push(TurnEvent::Died { name: target_name });
            }
        }
    }

    /// Evaluate the end condition without resolving a turn.
    ///
    /// Player death wins over victory: a player killed in the same pass that
    /// cleared the map is still a defeat.
    pub fn outcome(&self) -> TurnOutcome {
        if self.roster.player_is_dead() {
            TurnOutcome::Defeat
        } else if self.roster.all_enemies_dead() {
            TurnOutcome::Victory
        } else {
            TurnOutcome::Continue
        }
    }

    /// Swap in a loaded roster after validating it against the grid.
    ///
    /// On any error the current roster is untouched and play continues.
    pub fn restore(&mut self, characters: Vec<Character>) -> Result<(), RosterError> {
        let roster = Roster::new(characters)?;
        roster.validate_against(&self.grid)?;
        self.roster = roster;
        Ok(())
    }
}
