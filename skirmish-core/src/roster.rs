//! The character roster and the spawn factory.
//!
//! The roster is an ordered, owned list, player first by convention.
//! Order is load-bearing twice over: characters update in roster order
//! within a turn (an early mover can vacate or occupy a cell before a later
//! one looks), and the collision scan returns the first live match in the
//! same order. Characters are addressed by stable index so that mutating
//! one entry's stats while scanning for collisions stays unambiguous.
//! Dead characters remain in the roster, inert, forever.

use crate::character::Character;
use crate::config::GameConfig;
use crate::grid::{Grid, Position};
use rand::Rng;
use thiserror::Error;

/// Errors from roster construction and validation.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("expected exactly one player character, found {0}")]
    PlayerCount(usize),

    #[error("{name} is outside the grid at {position}")]
    OutOfBounds { name: String, position: Position },

    #[error("{first} and {second} both occupy {position}")]
    Overlap {
        first: String,
        second: String,
        position: Position,
    },
}

/// Fatal setup errors, detected before any placement is attempted.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("{requested} enemies requested but only {available} free cells on the map")]
    NotEnoughCells { requested: i32, available: i64 },
}

/// Ordered collection of every character in the game.
#[derive(Debug, Clone)]
pub struct Roster {
    characters: Vec<Character>,
    player_index: usize,
}

impl Roster {
    /// Build a roster from an explicit character list.
    ///
    /// Exactly one character must carry the player flag.
    pub fn new(characters: Vec<Character>) -> Result<Self, RosterError> {
        let players: Vec<usize> = characters
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_player())
            .map(|(index, _)| index)
            .collect();
        match players.as_slice() {
            &[player_index] => Ok(Self {
                characters,
                player_index,
            }),
            other => Err(RosterError::PlayerCount(other.len())),
        }
    }

    /// Build the player plus `config.enemies` randomly placed, randomly
    /// statted enemies.
    ///
    /// The free-cell check runs once, up front; placement itself is
    /// rejection sampling against every cell already taken and therefore
    /// always terminates once the check has passed.
    pub fn spawn<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self, SetupError> {
        let grid = config.grid();
        let available = grid.cell_count() - 1;
        if i64::from(config.enemies) > available {
            return Err(SetupError::NotEnoughCells {
                requested: config.enemies,
                available,
            });
        }

        let mut characters = Vec::with_capacity(config.enemies.max(0) as usize + 1);
        let start = match config.player.start {
            Some(position) => position,
            None => grid.random_position(rng),
        };
        characters.push(Character::player(
            config.player.name.clone(),
            start,
            config.player.health,
            config.player.armor,
            config.player.damage,
        ));

        for id in 1..=config.enemies {
            let position = free_position(&grid, &characters, rng);
            characters.push(Character::enemy(
                format!("Enemy#{id}"),
                position,
                config.enemy_stats.health.sample(rng),
                config.enemy_stats.armor.sample(rng),
                config.enemy_stats.damage.sample(rng),
            ));
        }

        Ok(Self {
            characters,
            player_index: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Character> {
        self.characters.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Character> {
        self.characters.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    /// The full list in roster order.
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn player_index(&self) -> usize {
        self.player_index
    }

    pub fn player(&self) -> &Character {
        &self.characters[self.player_index]
    }

    /// First live character on `position` in roster order, skipping
    /// `excluding`.
    ///
    /// First match wins by design: if a corrupted roster ever held two live
    /// characters on one cell, roster order would decide, not proximity or
    /// any priority rule.
    pub fn live_occupant(&self, position: Position, excluding: usize) -> Option<usize> {
        self.characters.iter().enumerate().find_map(|(index, c)| {
            (index != excluding && !c.is_dead() && c.position == position).then_some(index)
        })
    }

    pub fn live_enemy_count(&self) -> usize {
        self.characters
            .iter()
            .filter(|c| !c.is_player() && !c.is_dead())
            .count()
    }

    pub fn all_enemies_dead(&self) -> bool {
        self.live_enemy_count() == 0
    }

    pub fn player_is_dead(&self) -> bool {
        self.player().is_dead()
    }

    /// Check the roster against a grid: every live character in bounds and
    /// no two live characters on one cell. Used when restoring a save.
    pub fn validate_against(&self, grid: &Grid) -> Result<(), RosterError> {
        for (index, character) in self.characters.iter().enumerate() {
            if character.is_dead() {
                continue;
            }
            if !grid.contains(character.position) {
                return Err(RosterError::OutOfBounds {
                    name: character.name.clone(),
                    position: character.position,
                });
            }
            if let Some(other) = self.live_occupant(character.position, index) {
                if other > index {
                    return Err(RosterError::Overlap {
                        first: character.name.clone(),
                        second: self.characters[other].name.clone(),
                        position: character.position,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Rejection-sample a cell not taken by any already-placed character.
fn free_position<R: Rng + ?Sized>(grid: &Grid, taken: &[Character], rng: &mut R) -> Position {
    loop {
        let candidate = grid.random_position(rng);
        if taken.iter().all(|c| c.position != candidate) {
            return candidate;
        }
    }
}
