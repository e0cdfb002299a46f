use std::io::{self, BufRead, Write};

use common::games::tictactoe::{GameStatus, Mark, TicTacToeGameState};
use common::log;

pub const PROMPT: &str = "Enter row and column (0-2): ";
pub const INVALID_MOVE: &str = "Invalid move! Try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleSettings {
    pub user_mark: Mark,
    pub ai_first: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Place(i64, i64),
    Reset,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "q" | "quit" => return Some(Command::Quit),
        "r" | "reset" => return Some(Command::Reset),
        _ => {}
    }

    let mut parts = trimmed.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Command::Place(row, col))
}

fn final_message(status: GameStatus) -> Option<&'static str> {
    match status {
        GameStatus::AiWon => Some("AI wins!"),
        GameStatus::UserWon => Some("You win!"),
        GameStatus::Draw => Some("It's a tie!"),
        GameStatus::InProgress => None,
    }
}

fn new_state(settings: ConsoleSettings) -> io::Result<TicTacToeGameState> {
    TicTacToeGameState::with_opening(settings.user_mark, settings.ai_first).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "player mark must be X or O")
    })
}

/// Plays one game over the given streams. Returns the final status, or
/// `None` when the player quit or input ran out first.
pub fn run_console<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    settings: ConsoleSettings,
) -> io::Result<Option<GameStatus>> {
    let mut state = new_state(settings)?;
    writeln!(
        output,
        "You are {}, the AI is {}. Type 'r' to restart or 'q' to quit.",
        state.user_mark, state.ai_mark
    )?;

    loop {
        write!(output, "{}", state.board)?;

        let status = state.status();
        if let Some(message) = final_message(status) {
            writeln!(output, "{}", message)?;
            log!("Console game finished: {}", status.message());
            return Ok(Some(status));
        }

        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(None);
        }

        match parse_command(&line) {
            Some(Command::Quit) => return Ok(None),
            Some(Command::Reset) => {
                state = new_state(settings)?;
                writeln!(output, "New game.")?;
            }
            Some(Command::Place(row, col)) => {
                if state.place_mark(row, col).is_err() {
                    writeln!(output, "{}", INVALID_MOVE)?;
                }
            }
            None => writeln!(output, "{}", INVALID_MOVE)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn play(script: &str, settings: ConsoleSettings) -> (Option<GameStatus>, String) {
        let mut output = Vec::new();
        let result = run_console(Cursor::new(script.as_bytes()), &mut output, settings).unwrap();
        (result, String::from_utf8(output).unwrap())
    }

    fn default_settings() -> ConsoleSettings {
        ConsoleSettings {
            user_mark: Mark::O,
            ai_first: false,
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("1 2\n"), Some(Command::Place(1, 2)));
        assert_eq!(parse_command("  0   0 "), Some(Command::Place(0, 0)));
        assert_eq!(parse_command("-1 4"), Some(Command::Place(-1, 4)));
        assert_eq!(parse_command("Q"), Some(Command::Quit));
        assert_eq!(parse_command("reset"), Some(Command::Reset));
        assert_eq!(parse_command("1"), None);
        assert_eq!(parse_command("1 2 3"), None);
        assert_eq!(parse_command("a b"), None);
    }

    #[test]
    fn test_eof_ends_without_result() {
        let (result, output) = play("", default_settings());

        assert_eq!(result, None);
        assert!(output.contains(PROMPT));
        assert!(output.starts_with("You are O, the AI is X."));
    }

    #[test]
    fn test_bad_input_is_rejected() {
        let (result, output) = play("hello\n5 5\nq\n", default_settings());

        assert_eq!(result, None);
        assert_eq!(output.matches(INVALID_MOVE).count(), 2);
    }

    #[test]
    fn test_occupied_cell_is_rejected() {
        // Human O opens at the center; the AI takes (0, 0).
        let (_, output) = play("1 1\n0 0\nq\n", default_settings());

        assert!(output.contains("X| | \n-----\n |O| \n"));
        assert_eq!(output.matches(INVALID_MOVE).count(), 1);
    }

    #[test]
    fn test_ai_first_opens_board() {
        let settings = ConsoleSettings {
            user_mark: Mark::O,
            ai_first: true,
        };

        let (_, output) = play("q\n", settings);

        assert!(output.contains("X| | \n"));
    }

    #[test]
    fn test_reset_restarts_game() {
        let (_, output) = play("1 1\nr\nq\n", default_settings());

        assert!(output.contains("New game."));
        assert!(output.contains(" | | \n-----\n | | \n-----\n | | \n-----\n"));
    }

    #[test]
    fn test_ai_never_loses_scripted_game() {
        // Walks every cell row-major; invalid ones are simply rejected.
        let script: String = (0..3)
            .flat_map(|r| (0..3).map(move |c| format!("{} {}\n", r, c)))
            .collect();

        let (result, output) = play(&script, default_settings());

        let status = result.unwrap();
        assert_ne!(status, GameStatus::UserWon);
        assert!(output.contains("AI wins!") || output.contains("It's a tie!"));
    }
}
