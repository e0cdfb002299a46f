mod console_game;

use std::io;

use clap::Parser;
use common::games::tictactoe::Mark;
use common::{log, logger};

use console_game::{ConsoleSettings, run_console};

#[derive(Parser)]
#[command(name = "tictactoe_console")]
#[command(about = "Play tic-tac-toe against the minimax AI in the terminal")]
struct Args {
    /// Your mark, X or O
    #[arg(long, default_value = "O", value_parser = parse_mark)]
    mark: Mark,

    /// Let the AI make the opening move
    #[arg(long)]
    ai_first: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

fn parse_mark(value: &str) -> Result<Mark, String> {
    Mark::from_player_symbol(value).ok_or_else(|| format!("expected X or O, got '{}'", value))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Console".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let settings = ConsoleSettings {
        user_mark: args.mark,
        ai_first: args.ai_first,
    };
    log!("Starting console game as {}, AI first: {}", settings.user_mark, settings.ai_first);

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_console(stdin.lock(), stdout.lock(), settings)?;

    Ok(())
}
