//! Turn-based grid combat engine.
//!
//! A player character and a fixed set of enemies occupy a small 2D grid.
//! Each turn every character takes one step: the player in the commanded
//! direction, enemies at random. Stepping into a hostile character resolves
//! as an attack where armor absorbs damage before health; stepping into a
//! friendly one is a blocked move. The engine owns all game state and
//! returns events, leaving rendering and input to the front end.
//!
//! # Quick Start
//!
//! ```no_run
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use skirmish_core::{Direction, GameConfig, Roster, TurnEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GameConfig::default();
//!     config.validate()?;
//!
//!     let mut rng = StdRng::seed_from_u64(7);
//!     let roster = Roster::spawn(&config, &mut rng)?;
//!     let mut engine = TurnEngine::new(config.grid(), roster, rng);
//!
//!     let report = engine.resolve(Direction::Right);
//!     for event in &report.events {
//!         println!("{event:?}");
//!     }
//!     println!("{:?}", report.outcome);
//!     Ok(())
//! }
//! ```

pub mod character;
pub mod config;
pub mod engine;
pub mod grid;
pub mod persist;
pub mod roster;

pub use character::{Character, HitOutcome};
pub use config::{ConfigError, EnemyStatConfig, GameConfig, PlayerConfig, StatRange};
pub use engine::{Command, CommandError, TurnEngine, TurnEvent, TurnOutcome, TurnReport};
pub use grid::{Direction, Grid, Position};
pub use persist::{load_roster, read_roster, save_roster, write_roster, PersistError};
pub use roster::{Roster, RosterError, SetupError};
