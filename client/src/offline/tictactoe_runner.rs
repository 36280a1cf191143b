use std::io;
use std::time::Duration;

use tictactoe_common::tictactoe::{
    BotInput, FirstPlayerMode, GameMode, Player, TicTacToeGameState, calculate_move,
};
use tictactoe_common::{debug, log, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use crate::config::{GameConfig, ModeChoice};
use crate::input::{GameCommand, MenuCommand, parse_game_command, parse_menu_command};
use crate::ui::{GAME_HELP, GAME_OVER_HELP, MENU_TEXT, render_game};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    Menu,
    Quit,
}

/// Mode menu and games until the player quits or input ends.
pub async fn run_client<R, W>(config: &GameConfig, input: R, output: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut preselected = config.mode;

    loop {
        let mode = match preselected.take() {
            Some(mode) => mode,
            None => {
                write_line(output, MENU_TEXT).await?;
                let Some(line) = lines.next_line().await? else {
                    return Ok(());
                };
                match parse_menu_command(&line) {
                    Ok(MenuCommand::Start(mode)) => mode,
                    Ok(MenuCommand::Quit) => return Ok(()),
                    Err(err) => {
                        write_line(output, &err.to_string()).await?;
                        continue;
                    }
                }
            }
        };

        log!("Starting game: {:?}", mode);
        match run_tictactoe_game(config, mode, &mut lines, output).await? {
            SessionExit::Menu => continue,
            SessionExit::Quit => return Ok(()),
        }
    }
}

pub async fn run_tictactoe_game<R, W>(
    config: &GameConfig,
    mode: ModeChoice,
    lines: &mut Lines<R>,
    output: &mut W,
) -> io::Result<SessionExit>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let game_mode = match mode {
        ModeChoice::VsComputer => GameMode::VsComputer {
            computer: config.computer_mark,
        },
        ModeChoice::VsFriend => GameMode::VsFriend,
    };
    let mut game = TicTacToeGameState::new(game_mode, pick_first_player(config.first_player));

    loop {
        write_line(output, &render_game(&game)).await?;

        if game.is_computer_turn() {
            play_computer_turn(&mut game, config.computer_delay_ms).await?;
            continue;
        }

        let help = if game.is_over() { GAME_OVER_HELP } else { GAME_HELP };
        write_line(output, help).await?;

        let Some(line) = lines.next_line().await? else {
            return Ok(SessionExit::Quit);
        };

        match parse_game_command(&line) {
            Ok(GameCommand::Cell(index)) => {
                // Occupied cells and finished games only produce a message.
                if let Err(err) = game.place_human_mark(index) {
                    debug!("Rejected move {}: {}", index + 1, err);
                    write_line(output, &err.to_string()).await?;
                }
            }
            Ok(GameCommand::Restart) => {
                log!("Restarting game");
                game.restart(pick_first_player(config.first_player));
            }
            Ok(GameCommand::Menu) => return Ok(SessionExit::Menu),
            Ok(GameCommand::Quit) => return Ok(SessionExit::Quit),
            Err(err) => write_line(output, &err.to_string()).await?,
        }
    }
}

/// Waits the presentation delay, then searches off the async workers. No
/// input is read until the reply has been applied.
async fn play_computer_turn(game: &mut TicTacToeGameState, delay_ms: u64) -> io::Result<()> {
    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }

    let input = BotInput::from_game_state(game);
    let result = tokio::task::spawn_blocking(move || calculate_move(&input))
        .await
        .map_err(io::Error::other)?;

    match result {
        Ok(search) => {
            debug!("Computer search visited {} nodes", search.nodes_visited);
            game.place_mark(search.cell).map_err(io::Error::other)?;
        }
        Err(err) => {
            warn!("Computer could not move: {}", err);
            return Err(io::Error::other(err));
        }
    }
    Ok(())
}

fn pick_first_player(mode: FirstPlayerMode) -> Player {
    match mode {
        FirstPlayerMode::X => Player::X,
        FirstPlayerMode::Random => {
            if rand::random::<bool>() {
                Player::X
            } else {
                Player::O
            }
        }
    }
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> io::Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}
