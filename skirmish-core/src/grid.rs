//! Grid geometry: directions, positions, and bounds checking.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four cardinal movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit delta in screen coordinates (y grows downward).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Draw a direction uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Direction {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A cell coordinate. A `Position` may lie outside the play area;
/// `Grid::contains` is the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighboring cell one step in `direction`.
    pub fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The fixed rectangular play area.
///
/// Dimensions are validated once by `GameConfig::validate`; the grid itself
/// trusts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Self {
        debug_assert!(width >= 1 && height >= 1);
        Self { width, height }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `position` lies within `[0, width) x [0, height)`.
    pub fn contains(&self, position: Position) -> bool {
        (0..self.width).contains(&position.x) && (0..self.height).contains(&position.y)
    }

    pub fn cell_count(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    /// A uniformly random cell inside the grid.
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position {
            x: rng.gen_range(0..self.width),
            y: rng.gen_range(0..self.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_direction_deltas() {
        assert_eq!(Direction::Up.delta(), (0, -1));
        assert_eq!(Direction::Down.delta(), (0, 1));
        assert_eq!(Direction::Left.delta(), (-1, 0));
        assert_eq!(Direction::Right.delta(), (1, 0));
    }

    #[test]
    fn test_step() {
        let origin = Position::new(3, 3);
        assert_eq!(origin.step(Direction::Up), Position::new(3, 2));
        assert_eq!(origin.step(Direction::Down), Position::new(3, 4));
        assert_eq!(origin.step(Direction::Left), Position::new(2, 3));
        assert_eq!(origin.step(Direction::Right), Position::new(4, 3));
    }

    #[test]
    fn test_contains_edges() {
        let grid = Grid::new(3, 2);
        assert!(grid.contains(Position::new(0, 0)));
        assert!(grid.contains(Position::new(2, 1)));
        assert!(!grid.contains(Position::new(3, 1)));
        assert!(!grid.contains(Position::new(2, 2)));
        assert!(!grid.contains(Position::new(-1, 0)));
        assert!(!grid.contains(Position::new(0, -1)));
    }

    #[test]
    fn test_random_position_in_bounds() {
        let grid = Grid::new(4, 3);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            assert!(grid.contains(grid.random_position(&mut rng)));
        }
    }

    #[test]
    fn test_random_direction_with_constant_rng() {
        // A constant rng always lands on the first cardinal.
        let mut rng = StepRng::new(0, 0);
        for _ in 0..8 {
            assert_eq!(Direction::random(&mut rng), Direction::Up);
        }
    }
}
