//! Terminal front end for the grid combat game.
//!
//! Arrow keys (or hjkl) move the player; every move resolves one full turn
//! for the whole board. Walk into an enemy to attack it.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented console interface suitable for
//! scripted play:
//!
//! ```bash
//! cargo run -p skirmish -- --headless --width 4 --height 4 --enemies 3
//! ```

mod app;
mod events;
mod headless;
mod ui;

use crossterm::{
    event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use skirmish_core::{GameConfig, Roster, TurnEngine};
use std::io::{self, stdout};
use std::time::Duration;

use app::App;
use events::{handle_event, EventResult};
use ui::render;

/// Everything the command line can override.
struct CliOptions {
    headless: bool,
    seed: Option<u64>,
    config: GameConfig,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return;
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let roster = match Roster::spawn(&options.config, &mut rng) {
        Ok(roster) => roster,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let engine = TurnEngine::new(options.config.grid(), roster, rng);

    // Victory, defeat, and quit all come back as Ok and exit 0.
    let result = if options.headless {
        headless::run_headless(engine)
    } else {
        run_tui(engine)
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Parse command line options on top of the defaults (or a `--config` file).
fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions {
        headless: false,
        seed: None,
        config: GameConfig::default(),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--headless" => options.headless = true,
            "--config" => {
                let path = flag_value(args, &mut i, "--config")?;
                options.config =
                    GameConfig::load(&path).map_err(|e| format!("{path}: {e}"))?;
            }
            "--width" => options.config.width = flag_number(args, &mut i, "--width")?,
            "--height" => options.config.height = flag_number(args, &mut i, "--height")?,
            "--enemies" => options.config.enemies = flag_number(args, &mut i, "--enemies")?,
            "--name" => options.config.player.name = flag_value(args, &mut i, "--name")?,
            "--seed" => options.seed = Some(flag_number(args, &mut i, "--seed")?),
            other => return Err(format!("unknown option {other:?} (try --help)")),
        }
        i += 1;
    }

    options.config.validate().map_err(|e| e.to_string())?;
    Ok(options)
}

fn flag_value(args: &[String], i: &mut usize, flag: &str) -> Result<String, String> {
    *i += 1;
    args.get(*i)
        .cloned()
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn flag_number<T: std::str::FromStr>(
    args: &[String],
    i: &mut usize,
    flag: &str,
) -> Result<T, String> {
    let raw = flag_value(args, i, flag)?;
    raw.parse()
        .map_err(|_| format!("{flag}: {raw:?} is not a valid number"))
}

/// Run the TUI, bracketing the session with terminal setup and teardown.
fn run_tui(engine: TurnEngine<StdRng>) -> io::Result<()> {
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, App::new(engine));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, &app))?;

        if event::poll(Duration::from_millis(100))? {
            let ev = event::read()?;
            if let EventResult::Quit = handle_event(&mut app, ev) {
                return Ok(());
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn print_help() {
    println!("skirmish - turn-based grid combat in the terminal");
    println!();
    println!("USAGE:");
    println!("  skirmish [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -h, --help         Show this help message");
    println!("  --headless         Line-oriented console mode (no TUI)");
    println!("  --config <PATH>    Load a JSON configuration file");
    println!("  --width <N>        Map width (default: 2)");
    println!("  --height <N>       Map height (default: 2)");
    println!("  --enemies <N>      Enemy count (default: 2)");
    println!("  --name <NAME>      Player name (default: Player)");
    println!("  --seed <N>         Seed the rng for a reproducible game");
    println!();
    println!("TUI KEYS:");
    println!("  arrows / hjkl      Move (resolves one turn)");
    println!("  s                  Save to skirmish.sav");
    println!("  L                  Load from skirmish.sav");
    println!("  ? / F1             Help overlay");
    println!("  q / Ctrl-C         Quit");
    println!();
    println!("HEADLESS COMMANDS:");
    println!("  up / down / left / right / save / load / exit");
}
