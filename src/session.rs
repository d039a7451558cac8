//! The interactive text loop: prompt, parse, play, print.

use std::io::{BufRead, Write};

use serde::Serialize;
use tracing::debug;

use crate::board::RenderOptions;
use crate::error::{InputError, MoveError, PlayError, SessionError};
use crate::game::Game;
use crate::input::{Command, parse_command};
use crate::pieces::{Color, PieceType};
use crate::types::{Capture, MoveOutcome, Square};

const SEPARATOR: &str = "--------------------";
const USAGE: &str = "Use the format: y1 x1 y2 x2, e.g. A 1 A 2 or d 6 d 4";

#[derive(Clone, Copy, Debug, Default)]
pub struct SessionConfig {
    /// One JSON object per line instead of prompts and boards.
    pub json: bool,
    pub render: RenderOptions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    Won(Color),
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Event {
    Moved {
        color: Color,
        from: Square,
        to: Square,
        capture: Option<Capture>,
    },
    Rejected {
        reason: String,
    },
    GameOver {
        winner: Color,
        by: PieceType,
    },
    Quit,
}

pub fn run<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    config: &SessionConfig,
) -> Result<SessionEnd, SessionError> {
    let mut game = Game::new();
    if !config.json {
        write!(output, "{}", game.board.render_with(&config.render))?;
    }

    let mut buf = Vec::new();
    loop {
        if !config.json {
            writeln!(output, "{SEPARATOR}")?;
            writeln!(output, "It is {}'s turn.", game.current_turn)?;
            write!(output, "\nEnter a move (e.g. A 6 A 4) or 'Q' to quit: ")?;
            output.flush()?;
        }

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            debug!("input closed");
            return finish(&mut output, config, SessionEnd::Quit);
        }
        if !config.json {
            writeln!(output)?;
        }

        // Undecodable bytes become U+FFFD and fall through to the malformed-input path.
        let line = String::from_utf8_lossy(&buf);
        let (from, to) = match parse_command(&line) {
            Ok(Command::Quit) => return finish(&mut output, config, SessionEnd::Quit),
            Ok(Command::Move(from, to)) => (from, to),
            Err(err) => {
                report_input_error(&mut output, config, &err)?;
                continue;
            }
        };

        let mover = game.current_turn;
        match game.make_move(from, to) {
            Ok(MoveOutcome::KingCaptured { winner, by }) => {
                if config.json {
                    emit(&mut output, &Event::GameOver { winner, by })?;
                } else {
                    writeln!(output, "{winner} wins!")?;
                }
                return Ok(SessionEnd::Won(winner));
            }
            Ok(MoveOutcome::Moved { from, to, capture }) => {
                if config.json {
                    emit(
                        &mut output,
                        &Event::Moved {
                            color: mover,
                            from,
                            to,
                            capture,
                        },
                    )?;
                } else {
                    if let Some(c) = capture {
                        writeln!(
                            output,
                            "\n{}'s {} captured {}'s {}.\n",
                            c.by_color,
                            c.by.symbol(),
                            c.captured_color,
                            c.captured.symbol()
                        )?;
                    }
                    write!(output, "{}", game.board.render_with(&config.render))?;
                }
            }
            Err(err) => report_play_error(&mut output, config, &err)?,
        }
    }
}

fn emit<W: Write>(output: &mut W, event: &Event) -> Result<(), SessionError> {
    serde_json::to_writer(&mut *output, event)?;
    writeln!(output)?;
    Ok(())
}

fn finish<W: Write>(
    output: &mut W,
    config: &SessionConfig,
    end: SessionEnd,
) -> Result<SessionEnd, SessionError> {
    if config.json {
        emit(output, &Event::Quit)?;
    }
    output.flush()?;
    Ok(end)
}

fn report_input_error<W: Write>(
    output: &mut W,
    config: &SessionConfig,
    err: &InputError,
) -> Result<(), SessionError> {
    if config.json {
        return emit(
            output,
            &Event::Rejected {
                reason: err.to_string(),
            },
        );
    }
    writeln!(output, "Bad input: {err}. {USAGE}\n")?;
    Ok(())
}

fn report_play_error<W: Write>(
    output: &mut W,
    config: &SessionConfig,
    err: &PlayError,
) -> Result<(), SessionError> {
    if config.json {
        return emit(
            output,
            &Event::Rejected {
                reason: err.to_string(),
            },
        );
    }
    match err {
        PlayError::WrongSideToMove { expected } => {
            writeln!(output, "Wrong side! It is {expected}'s turn.\n")?
        }
        PlayError::Move(MoveError::NoPieceAtOrigin { .. }) => {
            writeln!(output, "There is no piece on the starting square.")?
        }
        PlayError::Move(MoveError::IllegalMove { .. }) => {
            writeln!(output, "That piece cannot move there.")?
        }
        PlayError::GameOver { winner } => writeln!(output, "The game is over, {winner} won.")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn play_bytes(script: &[u8], config: &SessionConfig) -> (SessionEnd, String) {
        let mut out = Vec::new();
        let end = run(Cursor::new(script.to_vec()), &mut out, config).unwrap();
        (end, String::from_utf8(out).unwrap())
    }

    fn play(script: &str, config: &SessionConfig) -> (SessionEnd, String) {
        play_bytes(script.as_bytes(), config)
    }

    #[test]
    fn invalid_utf8_line_is_rejected_not_fatal() {
        let mut script = vec![0xff, 0xfe, b'\n'];
        script.extend_from_slice(b"A6A4\nQ\n");
        let (end, out) = play_bytes(&script, &SessionConfig::default());
        assert_eq!(end, SessionEnd::Quit);
        assert!(out.contains("Bad input"));
        assert!(out.contains("It is black's turn."));
    }

    #[test]
    fn king_capture_wins_and_stops_reading() {
        let script = "E6E4\nF1F2\nD7H3\nA1A2\nH3E0\nA6A5\n";
        let (end, out) = play(script, &SessionConfig::default());
        assert_eq!(end, SessionEnd::Won(Color::White));
        assert!(out.trim_end().ends_with("white wins!"));
        // The trailing A6A5 was never played: A6 still holds its pawn.
        assert!(out.contains("6 P P P P . P P P "));
        assert!(!out.contains("5 P "));
    }

    #[test]
    fn capture_message_names_both_pieces() {
        let (_, out) = play("E6E4\nD1D3\nE4D3\nQ\n", &SessionConfig::default());
        assert!(out.contains("white's P captured black's P."));
    }

    #[test]
    fn quits_on_q_and_on_eof() {
        let config = SessionConfig::default();
        assert_eq!(play("Q\n", &config).0, SessionEnd::Quit);
        assert_eq!(play("", &config).0, SessionEnd::Quit);
    }

    #[test]
    fn prints_board_and_prompt() {
        let (_, out) = play("A 6 A 4\nQ\n", &SessionConfig::default());
        assert!(out.starts_with("  A B C D E F G H\n0 R N B Q K B N R \n"));
        assert!(out.contains("It is white's turn."));
        assert!(out.contains("It is black's turn."));
        assert!(out.contains("4 P . . . . . . . "));
    }

    #[test]
    fn reports_rejections_and_keeps_turn() {
        let (_, out) = play("zz\nA1A2\nD4D3\nD7D5\nQ\n", &SessionConfig::default());
        assert!(out.contains("Bad input"));
        assert!(out.contains("Wrong side! It is white's turn."));
        assert!(out.contains("There is no piece on the starting square."));
        assert!(out.contains("That piece cannot move there."));
        assert!(!out.contains("It is black's turn."));
    }

    #[test]
    fn json_stream() {
        let config = SessionConfig {
            json: true,
            ..SessionConfig::default()
        };
        let (end, out) = play("a6a4\nb1b1\nq\n", &config);
        assert_eq!(end, SessionEnd::Quit);
        let events: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0]["event"], "moved");
        assert_eq!(events[0]["color"], "white");
        assert_eq!(events[0]["capture"], serde_json::Value::Null);
        assert_eq!(events[1]["event"], "rejected");
        assert_eq!(events[2]["event"], "quit");
    }
}
