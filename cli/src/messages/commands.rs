use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use mate_engine::{Color, SearchParams, Square};
use winnow::ascii::{alphanumeric1, digit1, space1};
use winnow::combinator::{alt, opt, preceded};
use winnow::token::rest;
use winnow::Parser;
use winnow::Result as WinnowResult;

#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) enum Command {
    Fen { fen: String },
    Load { path: PathBuf },
    Board,
    Moves { square: Square },
    Eval { color: Color },
    Mate { params: SearchParams },
    Quit,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Fen { fen } => write!(f, "fen {}", fen),
            Command::Load { path } => write!(f, "load {}", path.display()),
            Command::Board => write!(f, "board"),
            Command::Moves { square } => write!(f, "moves {}", square),
            Command::Eval { color } => write!(f, "eval {}", color),
            Command::Mate { params } => {
                write!(f, "mate {} {}", params.color, params.plies)?;
                if params.record_lines {
                    write!(f, " lines")?;
                }
                if let Some(breadth) = params.breadth {
                    write!(f, " breadth {}", breadth)?;
                }
                Ok(())
            }
            Command::Quit => write!(f, "quit"),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct CommandParseError(String);

impl fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl std::error::Error for CommandParseError {}

impl FromStr for Command {
    type Err = CommandParseError;
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        alt((
            parse_fen,
            parse_load,
            parse_board,
            parse_moves,
            parse_eval,
            parse_mate,
            parse_quit,
        ))
        .parse(input.trim())
        .map_err(|_| CommandParseError(format!("cannot parse: [{}]", input)))
    }
}

fn parse_fen(input: &mut &str) -> WinnowResult<Command> {
    preceded(("fen", space1), rest)
        .map(|fen: &str| Command::Fen {
            fen: fen.to_string(),
        })
        .parse_next(input)
}

fn parse_load(input: &mut &str) -> WinnowResult<Command> {
    preceded(("load", space1), rest)
        .map(|path: &str| Command::Load {
            path: PathBuf::from(path),
        })
        .parse_next(input)
}

fn parse_board(input: &mut &str) -> WinnowResult<Command> {
    "board".value(Command::Board).parse_next(input)
}

fn parse_moves(input: &mut &str) -> WinnowResult<Command> {
    preceded(("moves", space1), parse_square)
        .map(|square: Square| Command::Moves { square })
        .parse_next(input)
}

fn parse_eval(input: &mut &str) -> WinnowResult<Command> {
    preceded(("eval", space1), parse_color)
        .map(|color: Color| Command::Eval { color })
        .parse_next(input)
}

fn parse_mate(input: &mut &str) -> WinnowResult<Command> {
    preceded(
        ("mate", space1),
        (
            parse_color,
            preceded(space1, digit1.try_map(|plies: &str| u8::from_str(plies))),
            opt(preceded(space1, "lines")),
            opt(preceded(
                (space1, "breadth", space1),
                digit1.try_map(|breadth: &str| usize::from_str(breadth)),
            )),
        ),
    )
    .map(
        |(color, plies, lines, breadth): (Color, u8, Option<&str>, Option<usize>)| Command::Mate {
            params: SearchParams {
                color,
                plies,
                record_lines: lines.is_some(),
                breadth,
            },
        },
    )
    .parse_next(input)
}

fn parse_quit(input: &mut &str) -> WinnowResult<Command> {
    alt(("quit", "exit")).value(Command::Quit).parse_next(input)
}

fn parse_color(input: &mut &str) -> WinnowResult<Color> {
    alt(("white".value(Color::White), "black".value(Color::Black))).parse_next(input)
}

fn parse_square(input: &mut &str) -> WinnowResult<Square> {
    alphanumeric1.verify_map(Square::from_text).parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_case::test_case;
    use testresult::TestResult;

    use mate_engine::Square::*;

    #[test_case("fen 6k1/5ppp/8/8/8/8/8/R5K1", Command::Fen { fen: "6k1/5ppp/8/8/8/8/8/R5K1".to_string() } ; "fen")]
    #[test_case("fen 6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", Command::Fen { fen: "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1".to_string() } ; "fen with trailing fields")]
    #[test_case("load positions/ladder.txt", Command::Load { path: PathBuf::from("positions/ladder.txt") } ; "load")]
    #[test_case("board", Command::Board ; "board")]
    #[test_case("  board  ", Command::Board ; "surrounding whitespace")]
    #[test_case("moves E2", Command::Moves { square: E2 } ; "moves upper")]
    #[test_case("moves e2", Command::Moves { square: E2 } ; "moves lower")]
    #[test_case("eval black", Command::Eval { color: Color::Black } ; "eval")]
    #[test_case("mate white 2", Command::Mate { params: SearchParams { plies: 2, ..SearchParams::default() } } ; "mate")]
    #[test_case("mate black 3 lines", Command::Mate { params: SearchParams { color: Color::Black, record_lines: true, ..SearchParams::default() } } ; "mate lines")]
    #[test_case("mate white 4 breadth 6", Command::Mate { params: SearchParams { plies: 4, breadth: Some(6), ..SearchParams::default() } } ; "mate breadth")]
    #[test_case("mate white 4 lines breadth 6", Command::Mate { params: SearchParams { plies: 4, record_lines: true, breadth: Some(6), ..SearchParams::default() } } ; "mate lines breadth")]
    #[test_case("quit", Command::Quit ; "quit")]
    #[test_case("exit", Command::Quit ; "exit")]
    fn test_from_str(input: &str, want: Command) -> TestResult {
        let got = Command::from_str(input)?;

        assert_eq!(got, want);
        Ok(())
    }

    #[test_case("" ; "empty")]
    #[test_case("fen" ; "fen without placement")]
    #[test_case("moves" ; "moves without square")]
    #[test_case("moves Z9" ; "off board square")]
    #[test_case("eval green" ; "unknown color")]
    #[test_case("mate white" ; "mate without plies")]
    #[test_case("mate white 2 breadth" ; "breadth without value")]
    #[test_case("mate white 300" ; "plies overflow")]
    #[test_case("board now" ; "trailing input")]
    fn test_from_str_invalid(input: &str) {
        assert!(Command::from_str(input).is_err());
    }

    #[test_case("mate black 2 lines breadth 3" ; "mate")]
    #[test_case("moves E2" ; "moves")]
    #[test_case("fen 8/8/8/8/8/8/8/8" ; "fen")]
    fn test_display_parses_back(input: &str) -> TestResult {
        let command = Command::from_str(input)?;

        assert_eq!(command.to_string(), input);
        Ok(())
    }
}
