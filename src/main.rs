use anyhow::Result;

use std::io::{stdin, stdout, Stdin, Write};

use connect4_minimax::agent::{Agent, MinimaxAgent, RandomAgent};
use connect4_minimax::arena::run_series;
use connect4_minimax::board::{check_move_status, Board, GameState, Player};
use connect4_minimax::DEFAULT_SEARCH_DEPTH;

mod display;

/// Asks `question` until the first letter of the answer is one of `options`
fn ask(stdin: &Stdin, question: &str, options: &[char]) -> Result<char> {
    loop {
        let mut buffer = String::new();
        print!("{}", question);
        stdout().flush()?;
        stdin.read_line(&mut buffer)?;
        match buffer.trim().to_lowercase().chars().next() {
            Some(letter) if options.contains(&letter) => return Ok(letter),
            _ => println!("Unknown answer given"),
        }
    }
}

/// Asks for a positive number, taking `default` on an empty answer
fn ask_number(stdin: &Stdin, question: &str, default: usize) -> Result<usize> {
    loop {
        let mut buffer = String::new();
        print!("{} [{}]: ", question, default);
        stdout().flush()?;
        stdin.read_line(&mut buffer)?;
        let answer = buffer.trim();
        if answer.is_empty() {
            return Ok(default);
        }
        match answer.parse::<usize>() {
            Ok(number) if number > 0 => return Ok(number),
            _ => println!("Invalid number: {}", answer),
        }
    }
}

fn choose_controller(stdin: &Stdin, number: usize, depth: usize) -> Result<Option<Box<dyn Agent>>> {
    let question = format!(
        "Who controls player {}? (h)uman/(r)andom/(m)inimax: ",
        number
    );
    let agent: Option<Box<dyn Agent>> = match ask(stdin, &question, &['h', 'r', 'm'])? {
        'r' => Some(Box::new(RandomAgent::new())),
        'm' => Some(Box::new(MinimaxAgent::new(depth))),
        _ => None,
    };
    Ok(agent)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    if ask(&stdin, "Run a minimax vs random series instead of a game? y/n: ", &['y', 'n'])? == 'y' {
        let games = ask_number(&stdin, "Number of games", 100)?;
        let depth = ask_number(&stdin, "Search depth", DEFAULT_SEARCH_DEPTH)?;
        let result = run_series(games, depth, rand::random(), true)?;
        println!(
            "Minimax won {}, random won {}, drawn {} of {} games",
            result.minimax_wins,
            result.random_wins,
            result.draws,
            result.games()
        );
        return Ok(());
    }

    let depth = ask_number(&stdin, "AI search depth", DEFAULT_SEARCH_DEPTH)?;
    let mut controllers = (
        choose_controller(&stdin, 1, depth)?,
        choose_controller(&stdin, 2, depth)?,
    );

    let mut board = Board::new();
    let mut player = Player::One;

    // game loop
    loop {
        display::draw(&board)?;

        match board.state() {
            GameState::Playing => {
                let (number, controller) = match player {
                    Player::One => (1, &mut controllers.0),
                    Player::Two => (2, &mut controllers.1),
                };

                let next_move = match controller {
                    // AI player
                    Some(agent) => {
                        println!("{} AI is thinking...", agent.name());
                        let column = agent.generate_move(&board, player);
                        println!("Player {} plays column {}", number, column);
                        column
                    }

                    // human player
                    None => {
                        print!("Player {} move input > ", number);
                        stdout().flush()?;
                        let mut input_str = String::new();
                        stdin.read_line(&mut input_str)?;

                        match check_move_status(&board, &input_str) {
                            Err(err) => {
                                println!("{}", err);
                                // try the move again
                                continue;
                            }
                            Ok(column) => column,
                        }
                    }
                };

                board.drop_piece(next_move, player);
                player = player.opponent();
            }

            // end states
            GameState::PlayerOneWin => {
                println!("{}", board);
                println!("Player 1 wins!");
                break;
            }
            GameState::PlayerTwoWin => {
                println!("{}", board);
                println!("Player 2 wins!");
                break;
            }
            GameState::Draw => {
                println!("{}", board);
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}
