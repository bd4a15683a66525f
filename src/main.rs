use anyhow::{bail, Result};
use colored::Colorize;

use tengen::agent::{build_agent, Agent};
use tengen::core::{Action, Board, Side};
use tengen::engine::EngineOptions;

fn main() -> Result<()> {
    println!("Tengen - NoGo Engine");

    let mut options = EngineOptions::default();
    for arg in std::env::args().skip(1) {
        match arg.split_once('=') {
            Some((name, value)) => options.set_option(name, value)?,
            None => bail!("expected name=value, got: {}", arg),
        }
    }

    let mut wins = [0u32; 2];
    for game in 1..=options.games {
        let winner = play_game(&options)?;
        match winner {
            Side::Black => wins[0] += 1,
            Side::White => wins[1] += 1,
        }
        println!("game {}: {} wins", game, winner.to_string().bold());
    }

    println!(
        "{} black {} - white {}",
        "result:".green(),
        wins[0],
        wins[1]
    );
    Ok(())
}

fn play_game(options: &EngineOptions) -> Result<Side> {
    let mut board = Board::new();
    let mut black = build_agent(options.black, Side::Black, &options.search);
    let mut white = build_agent(options.white, Side::White, &options.search);

    loop {
        let mover: &mut dyn Agent = match board.side_to_move() {
            Side::Black => black.as_mut(),
            Side::White => white.as_mut(),
        };

        match mover.take_action(&board) {
            Action::None => {
                // the stuck player loses
                let winner = !board.side_to_move();
                println!("{}", board);
                return Ok(winner);
            }
            Action::Place { pos, side } => {
                if side != board.side_to_move() {
                    bail!("{} played out of turn", mover.name());
                }
                if !board.place(pos) {
                    bail!("{} played an illegal move at {}", mover.name(), pos);
                }
            }
        }
    }
}
