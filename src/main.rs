mod app;
mod audio;
mod direction;
mod food;
mod grid;
mod input;
mod menu;
mod render;
mod round;
mod scheduler;
mod snake;
mod store;

use std::fs::File;
use std::io::stdout;

use anyhow::Context;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info, LevelFilter};
use simplelog::{Config, WriteLogger};

use app::App;
use audio::{AudioManager, NullSink};
use store::Store;

fn main() -> anyhow::Result<()> {
    WriteLogger::init(
        LevelFilter::Info,
        Config::default(),
        File::create("slinker.log").context("failed to create log file")?,
    )
    .context("failed to initialize logger")?;
    info!("starting slinker");

    // Missing or unreadable stores are fatal: leaderboard integrity can't
    // be assumed, so report and exit instead of guessing.
    let store = Store::open(".").context("failed to open the leaderboard store")?;
    let settings = store.settings().context("failed to read settings")?;
    let audio = AudioManager::new(Box::new(NullSink), settings);

    terminal::enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, Hide)?;

    let result = App::new(store, audio).run();

    execute!(stdout(), Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    if let Err(ref err) = result {
        error!("exiting after error: {:#}", err);
    }
    result
}
