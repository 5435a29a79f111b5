//! Text driver for the rules engine: reads moves and commands from stdin and
//! prints the results to stdout. Logs go to stderr and are controlled by
//! `RUST_LOG`.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use chessmate::chess::core::Position;
use chessmate::chess::service::{GameStatus, MoveService};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Do not print the version banner on startup.
    #[arg(short, long)]
    quiet: bool,
    /// Comma-separated moves to play before reading stdin, e.g. "e2e4,e7e5".
    #[arg(long, value_delimiter = ',')]
    moves: Vec<String>,
}

enum Command {
    Move(Position, Position),
    Display,
    Moves,
    Log,
    Status,
    Reset,
    Quit,
}

fn parse_command(line: &str) -> anyhow::Result<Command> {
    let command = match line {
        "d" => Command::Display,
        "moves" => Command::Moves,
        "log" => Command::Log,
        "status" => Command::Status,
        "reset" => Command::Reset,
        "quit" | "exit" => Command::Quit,
        _ => {
            let (from, to) = parse_move(line)?;
            Command::Move(from, to)
        },
    };
    Ok(command)
}

/// Accepts "e2e4" and "e2 e4".
fn parse_move(input: &str) -> anyhow::Result<(Position, Position)> {
    let squares: String = input.split_whitespace().collect();
    if squares.len() != 4 || !squares.is_ascii() {
        bail!("unknown command or move: '{input}'");
    }
    let (from, to) = squares.split_at(2);
    let from = Position::try_from(from).with_context(|| format!("parsing move '{input}'"))?;
    let to = Position::try_from(to).with_context(|| format!("parsing move '{input}'"))?;
    Ok((from, to))
}

fn play(game: &mut MoveService, from: Position, to: Position) -> anyhow::Result<()> {
    if game.try_move(from, to)? {
        println!("ok {from}{to}");
        match game.status()? {
            GameStatus::Ongoing => {},
            status => println!("{} {status}", game.current_player()),
        }
    } else {
        println!("illegal {from}{to}");
    }
    Ok(())
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut game = MoveService::new();
    for notation in &args.moves {
        let (from, to) = parse_move(notation)?;
        if !game.try_move(from, to)? {
            bail!("move '{notation}' from --moves is illegal");
        }
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                println!("error: {e:#}");
                continue;
            },
        };
        match command {
            Command::Move(from, to) => play(&mut game, from, to)?,
            Command::Display => println!("{:?}", game.context().board),
            Command::Moves => {
                let moves = game.legal_moves()?;
                let moves: Vec<_> = moves.iter().map(|(from, to)| format!("{from}{to}")).collect();
                println!("{}", moves.join(" "));
            },
            Command::Log => {
                for (index, entry) in game.move_log().iter().enumerate() {
                    println!("{}. {entry}", index + 1);
                }
            },
            Command::Status => println!("{} to move: {}", game.current_player(), game.status()?),
            Command::Reset => game.reset(),
            Command::Quit => break,
        }
        io::stdout().flush()?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    if !args.quiet {
        chessmate::print_engine_info();
        chessmate::print_binary_info();
    }
    run(&args)
}
