//! Application state for the TUI front end.

use rand::rngs::StdRng;
use skirmish_core::{
    load_roster, save_roster, Direction, TurnEngine, TurnEvent, TurnOutcome,
};
use std::path::PathBuf;

/// Kind of a battle-log line, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Move,
    Attack,
    Death,
    System,
    Error,
}

#[derive(Debug, Clone)]
pub struct LogLine {
    pub text: String,
    pub kind: LogKind,
}

/// All mutable front-end state.
pub struct App {
    pub engine: TurnEngine<StdRng>,
    pub log: Vec<LogLine>,
    pub status: String,
    pub save_path: PathBuf,
    pub outcome: TurnOutcome,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(engine: TurnEngine<StdRng>) -> Self {
        let outcome = engine.outcome();
        let mut app = Self {
            engine,
            log: Vec::new(),
            status: String::new(),
            save_path: PathBuf::from("skirmish.sav"),
            outcome,
            show_help: false,
            should_quit: false,
        };
        app.push_log(
            "Arrow keys move. Walk into an enemy to attack it.",
            LogKind::System,
        );
        app.set_status("Turn 0");
        app
    }

    pub fn push_log(&mut self, text: impl Into<String>, kind: LogKind) {
        self.log.push(LogLine {
            text: text.into(),
            kind,
        });
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = text.into();
    }

    /// Resolve one turn for `direction` and log what happened.
    ///
    /// Once the game is over further moves are ignored; the board stays as
    /// it ended.
    pub fn submit_move(&mut self, direction: Direction) {
        if self.outcome.is_terminal() {
            self.set_status("The battle is over. Press q to leave.");
            return;
        }

        let report = self.engine.resolve(direction);
        for event in &report.events {
            self.log_event(event);
        }
        self.outcome = report.outcome;

        match report.outcome {
            TurnOutcome::Victory => {
                self.push_log("VICTORY!", LogKind::System);
                self.set_status("Victory! Press q to leave.");
            }
            TurnOutcome::Defeat => {
                self.push_log("DEFEAT...", LogKind::System);
                self.set_status("Defeat. Press q to leave.");
            }
            TurnOutcome::Continue => {
                self.set_status(format!("Turn {}", self.engine.turn()));
            }
        }
    }

    fn log_event(&mut self, event: &TurnEvent) {
        match event {
            TurnEvent::Moved { name, to } => {
                self.push_log(format!("{name} moved to {to}"), LogKind::Move);
            }
            TurnEvent::Attacked {
                attacker,
                target,
                damage,
                armor,
                health,
            } => {
                self.push_log(
                    format!(
                        "{attacker} hits {target} for {damage} (armor {armor}, health {health})"
                    ),
                    LogKind::Attack,
                );
            }
            TurnEvent::Died { name } => {
                self.push_log(format!("{name} is dead. Rest in peace."), LogKind::Death);
            }
        }
    }

    /// Save the roster. Never advances the turn.
    pub fn save(&mut self) {
        match save_roster(&self.save_path, self.engine.roster().characters()) {
            Ok(()) => {
                let message = format!("Saved to {}", self.save_path.display());
                self.push_log(message.clone(), LogKind::System);
                self.set_status(message);
            }
            Err(e) => {
                self.push_log(format!("Save failed: {e}"), LogKind::Error);
                self.set_status("Save failed");
            }
        }
    }

    /// Load a saved roster. The current roster is kept on any failure.
    pub fn load(&mut self) {
        let characters = match load_roster(&self.save_path) {
            Ok(characters) => characters,
            Err(e) => {
                self.push_log(format!("Load failed: {e}"), LogKind::Error);
                self.set_status("Load failed");
                return;
            }
        };
        match self.engine.restore(characters) {
            Ok(()) => {
                self.outcome = self.engine.outcome();
                let message = format!("Loaded from {}", self.save_path.display());
                self.push_log(message.clone(), LogKind::System);
                self.set_status(message);
            }
            Err(e) => {
                self.push_log(format!("Load failed: {e}"), LogKind::Error);
                self.set_status("Load failed");
            }
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use skirmish_core::{Character, Grid, Position, Roster};

    fn app_with(characters: Vec<Character>) -> App {
        let engine = TurnEngine::new(
            Grid::new(3, 3),
            Roster::new(characters).expect("roster"),
            StdRng::seed_from_u64(0),
        );
        App::new(engine)
    }

    #[test]
    fn test_moves_are_ignored_once_the_game_is_over() {
        let mut dead_hero = Character::player("Hero", Position::new(0, 0), 100, 0, 10);
        dead_hero.health = 0;
        let enemy = Character::enemy("Enemy#1", Position::new(2, 2), 50, 0, 15);

        let mut app = app_with(vec![dead_hero, enemy]);
        assert_eq!(app.outcome, TurnOutcome::Defeat);

        app.submit_move(Direction::Right);
        assert_eq!(app.engine.turn(), 0, "a finished game consumes no turns");
    }

    #[test]
    fn test_turn_events_land_in_the_log() {
        let hero = Character::player("Hero", Position::new(0, 0), 100, 0, 10);
        let enemy = Character::enemy("Enemy#1", Position::new(2, 2), 50, 0, 15);

        let mut app = app_with(vec![hero, enemy]);
        let before = app.log.len();
        app.submit_move(Direction::Right);
        assert!(app.log.len() > before);
    }
}
