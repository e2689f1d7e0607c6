mod game;
mod render;
mod term;
mod snake;

use std::{fs::File, process::exit};

use anyhow::Context;
use log::{error, info, warn};
use simplelog::{Config, LevelFilter, WriteLogger};

use term::TermManager;

pub type GridInt = i16;
pub type Coords = (GridInt, GridInt);

const LOG_FILE: &str = "snake.log";

fn main() {
    // stdout is the game screen, so logs go to a file
    match File::create(LOG_FILE) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Info, Config::default(), file) {
                eprintln!("Could not start logging: {}", e);
            }
        },
        Err(e) => eprintln!("Could not create {}: {}", LOG_FILE, e),
    }

    info!("Starting snake");

    let mut term = TermManager::new();
    let res = play(&mut term);

    // Give the terminal back no matter how the game ended
    if let Err(e) = term.restore() {
        warn!("Error restoring the terminal: {}", e);
    }

    if let Err(e) = res {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        exit(1);
    }

    info!("Bye");
}

fn play(term: &mut TermManager) -> anyhow::Result<()> {
    term.setup().context("setting up the terminal")?;
    game::run(term).context("running the game loop")
}
