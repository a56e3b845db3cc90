use std::io::Write;
use std::path::Path;

use statig::prelude::*;
use tracing::{debug, warn};

use mate_engine::{
    find_checkmate, legal_moves_from, Board, EvaluatePosition, SearchParams, Square, MOVE_GEN,
    POSITION_EVALUATOR,
};

use crate::messages::{Command, CommandResponse};
use crate::read_listing_file;

#[derive(Debug)]
pub(crate) struct SessionState<W>
where
    W: Write,
{
    out: W,
}

impl<W> SessionState<W>
where
    W: Write + 'static,
{
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }

    fn before_dispatch(&mut self, _: StateOrSuperstate<'_, State, Superstate>, event: &Command) {
        debug!("> {}", event);
    }

    fn respond(&mut self, response: CommandResponse) {
        if let Err(e) = writeln!(self.out, "{}", response) {
            warn!("Couldn't write response: {}", e);
        }
    }
}

#[state_machine(
    initial = "State::empty()",
    before_dispatch = "Self::before_dispatch",
    state(derive(PartialEq, Eq, Debug)),
    superstate(derive(Debug))
)]
impl<W> SessionState<W>
where
    W: Write + 'static,
{
    #[superstate]
    fn top_level(&mut self, event: &Command) -> Outcome<State> {
        match event {
            Command::Quit => Transition(State::finished()),
            _ => {
                warn!("Unexpected command for current state: {}", event);
                Handled
            }
        }
    }

    #[superstate(superstate = "top_level")]
    fn loading(&mut self, event: &Command) -> Outcome<State> {
        let loaded = match event {
            Command::Fen { fen } => Board::from_fen(fen).map_err(anyhow::Error::from),
            Command::Load { path } => read_listing_file(Path::new(path)),
            _ => return Super,
        };

        match loaded {
            Ok(board) => {
                self.respond(CommandResponse::Loaded { board: &board });
                Transition(State::loaded(board))
            }
            Err(e) => {
                warn!("Couldn't load position from `{}`: {:#}", event, e);
                Handled
            }
        }
    }

    #[state(superstate = "loading")]
    fn empty(&mut self, event: &Command) -> Outcome<State> {
        match event {
            Command::Board
            | Command::Moves { .. }
            | Command::Eval { .. }
            | Command::Mate { .. } => {
                self.respond(CommandResponse::NoPosition);
                Handled
            }
            _ => Super,
        }
    }

    #[state(superstate = "loading")]
    fn loaded(&mut self, board: &mut Board, event: &Command) -> Outcome<State> {
        match event {
            Command::Board => {
                self.respond(CommandResponse::Board { board });
                Handled
            }
            Command::Moves { square } => {
                self.respond_moves(board, *square);
                Handled
            }
            Command::Eval { color } => {
                let eval = POSITION_EVALUATOR.evaluate(board, *color, MOVE_GEN);
                self.respond(CommandResponse::Eval {
                    color: *color,
                    eval,
                });
                Handled
            }
            Command::Mate { params } => {
                self.respond_mate(board, params);
                Handled
            }
            _ => Super,
        }
    }

    #[state]
    fn finished(&mut self, event: &Command) -> Outcome<State> {
        debug!("Session is finished, ignoring {}", event);
        Handled
    }
}

impl<W> SessionState<W>
where
    W: Write + 'static,
{
    fn respond_moves(&mut self, board: &mut Board, square: Square) {
        if board.piece_at(square).is_none() {
            self.respond(CommandResponse::NoPiece { square });
            return;
        }
        let moves = legal_moves_from(board, square);
        self.respond(CommandResponse::Moves {
            square,
            moves: &moves,
        });
    }

    fn respond_mate(&mut self, board: &mut Board, params: &SearchParams) {
        match find_checkmate(board, params, MOVE_GEN, POSITION_EVALUATOR) {
            Ok(outcome) => {
                debug!("{}", outcome.stats);
                self.respond(CommandResponse::Outcome { outcome: &outcome });
            }
            Err(e) => warn!("Couldn't run search: {}", e),
        }
    }
}
