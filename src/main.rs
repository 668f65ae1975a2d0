//! Skate Dash entry point
//!
//! Runs a headless demo round driven by the autopilot and prints the final
//! frame as JSON. A renderer drives `Game` the same way, one `frame` per
//! displayed frame.
//!
//! Usage: `skate-dash [seed] [tuning.json]`

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use skate_dash::consts::TICKS_PER_SECOND;
use skate_dash::sim::{GamePhase, autopilot};
use skate_dash::{Command, Game, Tuning};

/// Demo rounds are cut off after this many seconds
const DEMO_SECONDS: u64 = 180;

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Skate Dash (headless demo) starting...");

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s
            .parse::<u64>()
            .with_context(|| format!("seed must be an unsigned integer, got {s:?}"))?,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0),
    };
    let tuning = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading tuning file {path}"))?;
            Tuning::from_json(&json).with_context(|| format!("parsing tuning file {path}"))?
        }
        None => Tuning::default(),
    };

    let mut game = Game::new(seed, tuning);
    game.command(Command::Confirm);
    log::info!("Game initialized with seed: {}", seed);

    let max_ticks = DEMO_SECONDS * u64::from(TICKS_PER_SECOND);
    let mut tricks = 0u32;
    for _ in 0..max_ticks {
        let keys = autopilot::suggest(game.state());
        let event = game.frame(&keys);
        if let Some(landed) = event.landed {
            tricks += 1;
            log::info!(
                "{} +{}{}",
                landed.kind.label(),
                landed.bonus,
                if landed.boosted { " (RAMP!)" } else { "" }
            );
        }
        if event.terminal {
            break;
        }
    }

    let snapshot = game.snapshot();
    let outcome = match snapshot.phase {
        GamePhase::GameOver => "crashed",
        _ => "survived",
    };
    log::info!(
        "Demo {} after {} ticks: score {}, {} tricks, {}",
        outcome,
        snapshot.time_ticks,
        snapshot.score,
        tricks,
        snapshot.speed_label()
    );

    println!("{}", snapshot.to_json().context("serializing final frame")?);
    Ok(())
}
