use derive_more::{Display, Error};
use tictactoe_common::tictactoe::CELL_COUNT;

use crate::config::ModeChoice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Zero-based cell index.
    Cell(usize),
    Restart,
    Menu,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Start(ModeChoice),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unrecognized input '{input}'")]
pub struct InputError {
    pub input: String,
}

impl InputError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// Cells are numbered 1-9, row-major from the top-left.
pub fn parse_game_command(line: &str) -> Result<GameCommand, InputError> {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "r" | "restart" => return Ok(GameCommand::Restart),
        "m" | "menu" => return Ok(GameCommand::Menu),
        "q" | "quit" => return Ok(GameCommand::Quit),
        _ => {}
    }

    match trimmed.parse::<usize>() {
        Ok(number) if (1..=CELL_COUNT).contains(&number) => Ok(GameCommand::Cell(number - 1)),
        _ => Err(InputError::new(trimmed)),
    }
}

pub fn parse_menu_command(line: &str) -> Result<MenuCommand, InputError> {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "1" | "c" | "computer" => Ok(MenuCommand::Start(ModeChoice::VsComputer)),
        "2" | "f" | "friend" => Ok(MenuCommand::Start(ModeChoice::VsFriend)),
        "q" | "quit" => Ok(MenuCommand::Quit),
        _ => Err(InputError::new(trimmed)),
    }
}
