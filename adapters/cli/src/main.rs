#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Tile Blast in the terminal.

mod config;
mod prompt;
mod render;
mod session;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use tile_blast_core::Event;
use tile_blast_world::query;

use crate::{
    config::Settings,
    prompt::{Input, HELP},
    session::Session,
};

/// Command-line arguments accepted by the terminal adapter.
#[derive(Debug, Parser)]
#[command(name = "tile-blast", version, about = "Play Tile Blast in the terminal")]
struct Cli {
    /// Seed for every random draw; a random seed is picked when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// TOML file overriding the game and booster settings.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Print every engine event to stderr as it happens.
    #[arg(long)]
    trace_events: bool,
}

/// Entry point for the Tile Blast command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => config::load(path)?,
        None => Settings::default(),
    };
    let seed = cli.seed.unwrap_or_else(rand::random);

    let mut session = Session::new(settings, seed);
    println!("{}", query::welcome_banner(session.world()));
    println!("seed {seed}, type `help` for commands");
    let events = session.new_game();
    report(&cli, &events);
    draw(&session);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        match prompt::parse(&line) {
            Ok(Input::Quit) => break,
            Ok(Input::Help) => println!("{HELP}"),
            Ok(Input::NewGame) => {
                let events = session.new_game();
                report(&cli, &events);
                draw(&session);
            }
            Ok(Input::Request(request)) => match session.submit(request) {
                Ok(events) => {
                    report(&cli, &events);
                    draw(&session);
                }
                Err(error) => eprintln!("{error}"),
            },
            Err(error) => eprintln!("{error}"),
        }
        io::stdout().flush().context("failed to flush stdout")?;
    }

    Ok(())
}

fn report(cli: &Cli, events: &[Event]) {
    for event in events {
        if cli.trace_events {
            eprintln!("{event:?}");
        }
        match event {
            Event::ShuffleGranted {
                shuffles_left,
                moves,
            } => println!(
                "out of moves: field shuffled, {moves} moves granted, {shuffles_left} shuffles left"
            ),
            Event::GameWon => println!("target score reached, you win!"),
            Event::GameLost => println!("no moves or shuffles left, game over"),
            _ => {}
        }
    }
}

fn draw(session: &Session) {
    print!("{}", render::grid(query::grid_view(session.world())));
    println!(
        "{}",
        render::status(session.progress(), session.gameplay().boosters())
    );
}
