//! Character entities and attack resolution.

use crate::grid::Position;
use serde::{Deserialize, Serialize};

/// What one attack did to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    /// Armor remaining after the hit, never negative.
    pub armor: i32,
    /// Health after overflow damage; may be negative.
    pub health: i32,
    /// Whether the hit left the target dead.
    pub lethal: bool,
}

/// A combatant on the grid: the player or one enemy.
///
/// Death is never stored. A character is dead exactly when `health <= 0`,
/// so the flag cannot drift out of sync with health.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub position: Position,
    is_player: bool,
    pub health: i32,
    pub armor: i32,
    pub damage: i32,
}

impl Character {
    /// The player-controlled character.
    pub fn player(
        name: impl Into<String>,
        position: Position,
        health: i32,
        armor: i32,
        damage: i32,
    ) -> Self {
        Self::from_parts(name.into(), position, true, health, armor, damage)
    }

    /// An NPC-controlled enemy.
    pub fn enemy(
        name: impl Into<String>,
        position: Position,
        health: i32,
        armor: i32,
        damage: i32,
    ) -> Self {
        Self::from_parts(name.into(), position, false, health, armor, damage)
    }

    pub(crate) fn from_parts(
        name: String,
        position: Position,
        is_player: bool,
        health: i32,
        armor: i32,
        damage: i32,
    ) -> Self {
        Self {
            name,
            position,
            is_player,
            health,
            armor,
            damage,
        }
    }

    /// Allegiance flag, fixed at construction.
    pub fn is_player(&self) -> bool {
        self.is_player
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Apply an incoming attack.
    ///
    /// Armor absorbs the full amount first; whatever exceeds the remaining
    /// armor carries into health 1:1, and armor clamps to zero. This is the
    /// only path that mutates health.
    pub fn take_hit(&mut self, damage: i32) -> HitOutcome {
        self.armor -= damage;
        if self.armor <= 0 {
            self.health += self.armor;
            self.armor = 0;
        }
        HitOutcome {
            armor: self.armor,
            health: self.health,
            lethal: self.is_dead(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(health: i32, armor: i32) -> Character {
        Character::enemy("Target", Position::new(0, 0), health, armor, 1)
    }

    #[test]
    fn test_overflow_damage_carries_into_health() {
        let mut t = target(100, 10);
        let outcome = t.take_hit(30);
        assert_eq!(outcome, HitOutcome { armor: 0, health: 80, lethal: false });
        assert_eq!(t.armor, 0);
        assert_eq!(t.health, 80);
        assert!(!t.is_dead());
    }

    #[test]
    fn test_lethal_hit_on_unarmored_target() {
        let mut t = target(20, 0);
        let outcome = t.take_hit(30);
        assert_eq!(outcome, HitOutcome { armor: 0, health: -10, lethal: true });
        assert!(t.is_dead());
    }

    #[test]
    fn test_armor_absorbs_fully() {
        let mut t = target(50, 10);
        let outcome = t.take_hit(4);
        assert_eq!(outcome.armor, 6);
        assert_eq!(outcome.health, 50);
        assert!(!outcome.lethal);
    }

    #[test]
    fn test_exact_armor_break_leaves_health_untouched() {
        let mut t = target(50, 10);
        let outcome = t.take_hit(10);
        assert_eq!(outcome.armor, 0);
        assert_eq!(outcome.health, 50);
    }

    #[test]
    fn test_death_is_derived_from_health() {
        let mut t = target(1, 0);
        assert!(!t.is_dead());
        t.health = 0;
        assert!(t.is_dead());
        t.health = -3;
        assert!(t.is_dead());
    }
}
