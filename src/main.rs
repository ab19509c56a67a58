use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Write};
use std::time::Duration;

use tictactoe3d::{
    board::Board,
    command::{Command, HELP},
    config::Mode,
    game::{Game, GameState},
    search::{Outlook, SearchResult},
    session::{Event, Session},
    Player,
};

mod cli;
use cli::Cli;

mod display;
use display::display;

fn main() -> Result<()> {
    // logs go to stderr so they never interleave with the board
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.to_config();
    config.validate()?;

    let mut session = Session::new(config.clone());

    println!("Welcome to 3D Tic-Tac-Toe (4x4x4)\n");
    println!("{}\n", HELP);

    if let Some(layout) = &cli.position {
        let game = Game::from_board(config, Board::from_layout(layout)?)?;
        let game = session.start_from(game)?;
        display(game.board(), winning_line(game.state()))?;
        announce(game.state(), game.to_move());
        play_computer_turns(&mut session)?;
    }

    let stdin = stdin();
    loop {
        print!("> ");
        stdout().flush().expect("failed to flush to stdout!");

        let mut buffer = String::new();
        // end of input
        if stdin.read_line(&mut buffer)? == 0 {
            break;
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let command = match buffer.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };

        match session.execute(command) {
            Ok(Event::Exit) => break,
            Ok(event) => report(&session, &event)?,
            Err(err) => {
                println!("{}", err);
                // try the command again
                continue;
            }
        }

        play_computer_turns(&mut session)?;
    }

    println!("\nThanks for playing!");
    Ok(())
}

fn play_computer_turns(session: &mut Session) -> Result<()> {
    while session.computer_to_move() {
        // slow down play if both players are computers
        if session.defaults().mode == Mode::ComputerVsComputer {
            std::thread::sleep(Duration::from_secs(1));
        }
        println!("Computer's turn...");
        let event = session.play_computer()?;
        report(session, &event)?;
    }
    Ok(())
}

fn report(session: &Session, event: &Event) -> Result<()> {
    match event {
        Event::Started { depth } => {
            println!("Game started with search depth {}", depth);
            let game = session.game()?;
            display(game.board(), None)?;
            announce(game.state(), game.to_move());
        }
        Event::Moved { player, coord, state } => {
            println!("Player {} plays at {}", player, coord);
            let game = session.game()?;
            display(game.board(), winning_line(state))?;
            announce(state, game.to_move());
        }
        Event::ComputerMoved(computer_move) => {
            println!(
                "Computer ({}) plays at {}",
                computer_move.player, computer_move.coord
            );
            describe_search(computer_move.player, &computer_move.search);
            let game = session.game()?;
            display(game.board(), winning_line(&computer_move.state))?;
            announce(&computer_move.state, game.to_move());
        }
        Event::Hint(search) => {
            let player = session.game()?.to_move();
            println!("Suggested move for {}: {}", player, search.best_move);
            describe_search(player, search);
        }
        Event::ShowBoard => {
            let game = session.game()?;
            display(game.board(), winning_line(game.state()))?;
            announce(game.state(), game.to_move());
        }
        Event::Reset { had_game: true } => println!("Game reset!"),
        Event::Reset { had_game: false } => println!("No game in progress"),
        Event::Help => println!("{}", HELP),
        Event::Exit => {}
    }
    Ok(())
}

fn describe_search(player: Player, search: &SearchResult) {
    let plural = |moves: usize| if moves == 1 { "move" } else { "moves" };
    match search.outlook() {
        Outlook::Win { moves } => println!(
            "Player {} can force a win in at most {} {}.",
            player,
            moves,
            plural(moves)
        ),
        Outlook::Loss { moves } => println!(
            "Player {} can force a win in at most {} {}.",
            player.opponent(),
            moves,
            plural(moves)
        ),
        Outlook::Unclear => {}
    }
    println!(
        "Move calculated in {:.2} seconds (depth {}, {} positions{}).",
        search.elapsed.as_secs_f64(),
        search.depth,
        search.node_count,
        if search.aborted { ", stopped early" } else { "" }
    );
}

fn announce(state: &GameState, to_move: Player) {
    match state {
        GameState::Playing => println!("Player {} to move", to_move),
        GameState::Won { winner, .. } => println!("Player {} wins!", winner),
        GameState::Draw => println!("It's a tie!"),
    }
}

fn winning_line(state: &GameState) -> Option<&tictactoe3d::lines::Line> {
    match state {
        GameState::Won { line, .. } => Some(*line),
        _ => None,
    }
}
