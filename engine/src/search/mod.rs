use std::fmt::{self, Display};
use std::time::{Duration, Instant};

use tabled::{Table, Tabled};
use tracing::{debug, debug_span, info, warn};

use crate::board::{Board, Move};
use crate::evaluation::{Eval, EvaluatePosition};
use crate::move_gen::GenerateMoves;
use crate::piece::Color;
use crate::search::move_ordering::order_moves;

mod move_ordering;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchParams {
    /// The side trying to deliver mate. It moves first.
    pub color: Color,
    /// Moves of `color` to search. The tree is twice as deep, since every move gets a reply.
    pub plies: u8,
    /// Collect every root-to-mate move sequence found under the best root move.
    pub record_lines: bool,
    /// Keep only the best `breadth` moves at every node, according to move ordering.
    ///
    /// This is a heuristic cut: the only mating line can be pruned away, in which case the search
    /// reports no mate although one exists.
    pub breadth: Option<usize>,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            color: Color::White,
            plies: 3,
            record_lines: false,
            breadth: None,
        }
    }
}

impl Display for SearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Print out only non default fields
        let default = SearchParams::default();
        let mut parts = vec![];

        if self.color != default.color {
            parts.push(format!("color: {}", self.color));
        }
        if self.plies != default.plies {
            parts.push(format!("plies: {}", self.plies));
        }
        if self.record_lines != default.record_lines {
            parts.push(format!("record_lines: {}", self.record_lines));
        }
        if let Some(breadth) = self.breadth {
            parts.push(format!("breadth: {}", breadth));
        }
        write!(f, "SearchParams: {}", parts.join(", "))
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SearchError {
    #[error("search depth must be between 1 and 127 plies, got {0}")]
    InvalidSearchDepth(u8),

    #[error("breadth limit must keep at least one move")]
    InvalidBreadth,
}

/// Counters for one distance from the root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Tabled)]
pub struct PlyStats {
    pub ply: usize,
    pub nodes: u64,
    pub leaves: u64,
    pub cutoffs: u64,
    pub mates: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub plies: Vec<PlyStats>,
    pub time_elapsed: Duration,
}

impl SearchStats {
    fn new(depth: usize) -> Self {
        SearchStats {
            plies: (0..=depth)
                .map(|ply| PlyStats {
                    ply,
                    ..PlyStats::default()
                })
                .collect(),
            time_elapsed: Duration::ZERO,
        }
    }

    pub fn total_nodes(&self) -> u64 {
        self.plies.iter().map(|ply| ply.nodes).sum()
    }
}

impl Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "total nodes: {}", self.total_nodes())?;
        writeln!(f, "time elapsed: {}", self.time_elapsed.as_secs_f32())?;
        writeln!(f, "{}", Table::new(&self.plies))?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub eval: Eval,
    pub best_move: Option<Move>,
    pub forcing_lines: Vec<Vec<Move>>,
    pub stats: SearchStats,
}

impl SearchOutcome {
    pub fn mate_found(&self) -> bool {
        self.eval.is_mate()
    }

    /// The side that forces mate, if any.
    pub fn winner(&self) -> Option<Color> {
        self.eval.winner()
    }

    /// Which side the search result favours, read off the sign of the evaluation.
    pub fn material_verdict(&self) -> String {
        match self.eval.value().signum() {
            1 => format!("{} has material advantage.", Color::White),
            -1 => format!("{} has material advantage.", Color::Black),
            _ => "no player has material advantage.".to_string(),
        }
    }
}

impl Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let best_move = self
            .best_move
            .map_or("none".to_string(), |mve| mve.to_string());

        if !self.mate_found() {
            writeln!(f, "No checkmate found, {}", self.material_verdict())?;
            return writeln!(f, "Good move could be: {}", best_move);
        }

        writeln!(f, "Checkmate found!")?;
        writeln!(f, "Start: {}", best_move)?;
        if !self.forcing_lines.is_empty() {
            writeln!(f, "Checkmate moves:")?;
            for line in &self.forcing_lines {
                let moves = line.iter().map(Move::to_string).collect::<Vec<_>>();
                writeln!(f, "{}", moves.join(", "))?;
            }
        }
        Ok(())
    }
}

/// Searches whether `params.color` can force mate within `params.plies` of its own moves.
///
/// White maximizes and black minimizes. The board is handed back exactly as it was passed in.
/// With `params.breadth` set the search is no longer exhaustive, see [`SearchParams::breadth`].
pub fn find_checkmate(
    board: &mut Board,
    params: &SearchParams,
    move_gen: impl GenerateMoves + Copy,
    position_eval: impl EvaluatePosition + Copy,
) -> Result<SearchOutcome, SearchError> {
    let span = debug_span!("find_checkmate", position = board.to_fen(), params = %params);
    let _enter = span.enter();

    // The tree is twice as deep as `plies` and its depth must fit in a u8.
    let Some(root_depth) = params.plies.checked_mul(2).filter(|&depth| depth > 0) else {
        return Err(SearchError::InvalidSearchDepth(params.plies));
    };
    if params.breadth == Some(0) {
        return Err(SearchError::InvalidBreadth);
    }
    if let Some(breadth) = params.breadth {
        warn!(
            "Only the best {} moves are searched at each node, a forced mate may be missed",
            breadth
        );
    }

    let start = Instant::now();
    let mut search = Search {
        board,
        params,
        root_depth,
        move_gen,
        position_eval,
        path: Vec::with_capacity(root_depth.into()),
        forcing_lines: vec![],
        best_move: None,
        stats: SearchStats::new(root_depth.into()),
    };

    let eval = search.minimax(params.color, root_depth, Eval::BLACK_MATES, Eval::WHITE_MATES);
    search.stats.time_elapsed = start.elapsed();

    let outcome = SearchOutcome {
        eval,
        best_move: search.best_move,
        forcing_lines: search.forcing_lines,
        stats: search.stats,
    };
    info!(
        "Search done: eval {}, best move {:?}, {} forcing lines, {} nodes in {:?}",
        outcome.eval,
        outcome.best_move,
        outcome.forcing_lines.len(),
        outcome.stats.total_nodes(),
        outcome.stats.time_elapsed
    );

    Ok(outcome)
}

struct Search<'a, M, E> {
    board: &'a mut Board,
    params: &'a SearchParams,
    root_depth: u8,
    move_gen: M,
    position_eval: E,
    path: Vec<Move>,
    forcing_lines: Vec<Vec<Move>>,
    best_move: Option<Move>,
    stats: SearchStats,
}

impl<M, E> Search<'_, M, E>
where
    M: GenerateMoves + Copy,
    E: EvaluatePosition + Copy,
{
    fn minimax(&mut self, color: Color, depth: u8, mut alpha: Eval, mut beta: Eval) -> Eval {
        let ply = usize::from(self.root_depth - depth);
        self.stats.plies[ply].nodes += 1;

        if depth == 0 {
            self.stats.plies[ply].leaves += 1;
            return self.position_eval.evaluate(self.board, color, self.move_gen);
        }

        let mut moves = self.move_gen.gen_moves(self.board, color);
        if moves.is_empty() {
            if !self.move_gen.check_status(self.board, color).in_check() {
                return Eval::DRAW;
            }
            self.stats.plies[ply].mates += 1;
            if self.params.record_lines && color != self.params.color {
                self.forcing_lines.push(self.path.clone());
            }
            return Eval::mated(color);
        }
        order_moves(&mut moves, self.board, self.params.breadth);

        let maximizing = color == Color::White;
        let mut best_eval = Eval::mated(color);
        let is_root = depth == self.root_depth;

        for mve in moves {
            let unmake_move_state = self.board.make_move(mve);
            #[cfg(debug_assertions)]
            {
                if let Err(e) = self.board.validate() {
                    panic!("Validation failed after {}: {}", mve, e);
                }
            }
            self.path.push(mve);

            let eval = self.minimax(color.opposite(), depth - 1, alpha, beta);

            self.path.pop();
            self.board.unmake_move(unmake_move_state);

            let improved = if maximizing {
                eval > best_eval
            } else {
                eval < best_eval
            };

            if is_root {
                debug!("Root move {}: {}", mve, eval);
                if eval != Eval::mate_by(self.params.color) {
                    self.forcing_lines.clear();
                }
                if improved || self.best_move.is_none() {
                    self.best_move = Some(mve);
                }
            }

            if improved {
                best_eval = eval;
            }
            if maximizing {
                alpha = alpha.max(eval);
            } else {
                beta = beta.min(eval);
            }
            if beta <= alpha {
                self.stats.plies[ply].cutoffs += 1;
                break;
            }
        }

        best_eval
    }
}
