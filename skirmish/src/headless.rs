//! Headless mode: a line-oriented console front end.
//!
//! The same game loop as the TUI, driven by textual commands over
//! stdin/stdout. Commands are the exact tokens `up`, `down`, `left`,
//! `right`, `save`, `load`, `exit`; anything else is reported and
//! re-prompted without consuming a turn.

use rand::rngs::StdRng;
use skirmish_core::{
    load_roster, save_roster, Command, Position, TurnEngine, TurnEvent, TurnOutcome,
};
use std::io::{self, BufRead, Write};

const SAVE_PATH: &str = "skirmish.sav";

/// Run the game until a terminal outcome, an `exit` command, or the end of
/// input.
pub fn run_headless(mut engine: TurnEngine<StdRng>) -> io::Result<()> {
    println!("--- Starting game ---");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        print_map(&engine);
        match engine.outcome() {
            TurnOutcome::Victory => {
                println!("VICTORY!");
                break;
            }
            TurnOutcome::Defeat => {
                println!("DEFEAT...");
                break;
            }
            TurnOutcome::Continue => {}
        }

        println!("Please enter the command (up / down / left / right / save / load / exit):");
        stdout.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break, // end of input: same as exit
        };
        let token = line.trim();
        if token.is_empty() {
            continue;
        }

        let command = match Command::parse(token) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}. Try again.");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Save => match save_roster(SAVE_PATH, engine.roster().characters()) {
                Ok(()) => println!("Saved to {SAVE_PATH}."),
                Err(e) => eprintln!("Save failed: {e}"),
            },
            Command::Load => {
                let result = load_roster(SAVE_PATH)
                    .map_err(|e| e.to_string())
                    .and_then(|characters| {
                        engine.restore(characters).map_err(|e| e.to_string())
                    });
                match result {
                    Ok(()) => println!("Loaded from {SAVE_PATH}."),
                    Err(e) => eprintln!("Load failed: {e}"),
                }
            }
            Command::Move(direction) => {
                let report = engine.resolve(direction);
                for event in &report.events {
                    print_event(event);
                }
            }
        }
    }

    Ok(())
}

/// Print the map, one row per grid line: `P` for the player, `E` for a live
/// enemy, `.` for empty. Dead characters are not drawn.
fn print_map(engine: &TurnEngine<StdRng>) {
    let grid = engine.grid();
    let roster = engine.roster();
    for y in 0..grid.height() {
        let mut row = String::with_capacity(grid.width() as usize * 2);
        for x in 0..grid.width() {
            let cell = Position::new(x, y);
            let glyph = match roster.iter().find(|c| !c.is_dead() && c.position == cell) {
                Some(c) if c.is_player() => 'P',
                Some(_) => 'E',
                None => '.',
            };
            row.push(glyph);
            row.push(' ');
        }
        println!("{}", row.trim_end());
    }
}

fn print_event(event: &TurnEvent) {
    match event {
        TurnEvent::Moved { name, to } => println!("\t{name} moved to {to}"),
        TurnEvent::Attacked {
            attacker,
            target,
            damage,
            armor,
            health,
        } => {
            println!("\t{attacker} attacks {target} for {damage}");
            println!("\t{target}: armor is {armor}, health is {health}");
        }
        TurnEvent::Died { name } => println!("\t{name} is dead. Rest in peace."),
    }
}
