//! Koto Note Trainer - note-reading drills with an accelerating cadence
//!
//! Single-session, self-contained CLI application. Flashes randomly chosen
//! string glyphs, push-technique notations, and melodic intervals on a timer
//! that speeds up over the course of a practice session.

mod cli;
mod notation;
mod platform;
mod session;
mod timing;

use clap::Parser;
use cli::{Display, InputHandler};
use notation::{Catalog, Mode};
use platform::platform_wake_lock;
use session::{SessionDriver, SessionEvent, Settings};
use std::error::Error;
use std::time::Duration;
use timing::{Scheduler, SystemClock};

/// Upper bound on the input poll so quit keys stay responsive
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Parser, Debug)]
#[command(name = "Koto Note Trainer")]
#[command(about = "Koto note-reading drills with a self-accelerating cadence")]
struct Args {
    /// Start immediately in this mode (beginner, intermediate, advanced)
    #[arg(short, long)]
    mode: Option<Mode>,

    /// Probability of showing a push-technique notation (0-1)
    #[arg(long, default_value = "0.5")]
    oshi_probability: f64,

    /// Probability of showing a two-string interval (0-1)
    #[arg(long, default_value = "0.25")]
    interval_probability: f64,

    /// Starting milliseconds between note changes
    #[arg(long, default_value = "5000")]
    initial_interval: u64,

    /// Fastest cadence in milliseconds
    #[arg(long, default_value = "500")]
    min_interval: u64,

    /// Session duration in minutes (how long the speed-up is spread over)
    #[arg(long, default_value = "10")]
    duration: u64,

    /// Path to a JSON mode-catalog override
    #[arg(long)]
    modes: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if args.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let catalog = match &args.modes {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin(),
    };

    // Fail fast on bad numeric flags, before the terminal goes raw
    let settings = Settings {
        oshi_probability: args.oshi_probability,
        interval_probability: args.interval_probability,
        initial_interval_ms: args.initial_interval,
        min_interval_ms: args.min_interval,
        duration_min: args.duration,
    }
    .validated()?;

    println!("🎶 Koto Note Trainer v0.1.0");

    let display = Display::new()?;
    let input = InputHandler::new();
    let mut scheduler = Scheduler::new(SystemClock);
    let mut driver = SessionDriver::new(catalog);
    let mut wake = platform_wake_lock();
    let mut rng = rand::thread_rng();

    InputHandler::enable_raw_mode()?;

    match args.mode {
        Some(mode) => {
            driver.start(mode, settings, &mut scheduler)?;
            wake.request();
            display.show_practice_screen(mode, driver.state().cadence_secs())?;
        }
        None => display.show_menu(&settings)?,
    }

    // Event loop
    'session: loop {
        let timeout = scheduler
            .time_until_next()
            .unwrap_or(POLL_INTERVAL)
            .min(POLL_INTERVAL);

        if let Some(key) = input.read_key(timeout)? {
            if InputHandler::is_exit(&key) {
                break 'session;
            }

            if driver.is_running() {
                if InputHandler::is_reset(&key) {
                    driver.reset(&mut scheduler);
                    wake.release();
                    display.show_menu(&settings)?;
                }
            } else if let Some(mode) = InputHandler::mode_for_key(&key) {
                driver.start(mode, settings, &mut scheduler)?;
                wake.request();
                display.show_practice_screen(mode, driver.state().cadence_secs())?;
            }
        }

        for id in scheduler.poll_due() {
            match driver.on_task(id, &mut scheduler, &mut rng) {
                Some(SessionEvent::Prompt(prompt)) => display.show_prompt(&prompt)?,
                Some(SessionEvent::Cleared) => display.clear_prompt()?,
                Some(SessionEvent::CadenceChanged(_)) => {
                    if let Some(mode) = driver.state().mode {
                        display.show_info(mode, driver.state().cadence_secs())?;
                    }
                }
                None => {}
            }
        }
    }

    // Cleanup
    let last_session = driver
        .state()
        .mode
        .map(|mode| (mode.display_name(), driver.state().cadence_secs()));
    driver.reset(&mut scheduler);
    wake.release();
    InputHandler::disable_raw_mode()?;
    display.shutdown()?;

    if let Some((mode_name, cadence)) = last_session {
        println!(
            "\n📊 Last session: {} mode, cadence down to {:.1}s",
            mode_name, cadence
        );
    }
    println!("🎶 Thanks for practicing!");

    Ok(())
}
