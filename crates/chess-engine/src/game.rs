//! Game session management.
//!
//! The [`Game`] struct owns the live board and the turn state, and is the
//! only place either is written. Moves submitted through it are checked
//! against the move generator before they touch the board.

use crate::config::EngineConfig;
use crate::execute::{execute_move, MoveOutcome};
use crate::movegen::{generate_all, generate_moves};
use crate::search::select_move;
use crate::{Board, MoveList};
use chess_core::{Color, MoveRecord, Piece, Placement, PlacementError, Square};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, info};

/// Error type for game operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The game has already ended.
    #[error("game has already ended")]
    GameAlreadyOver,
    /// No piece stands on the square, or the square is off the board.
    #[error("no piece on {0}")]
    EmptySquare(Square),
    /// The piece belongs to the side not on move.
    #[error("the {piece} cannot move while {to_move} is to move")]
    WrongSide { piece: Piece, to_move: Color },
    /// The move is not among the generated moves for its piece.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    /// The coordinate string could not be parsed.
    #[error("invalid move notation: {0}")]
    InvalidNotation(String),
    /// The side to move has no moves at all.
    #[error("{0} has no moves")]
    NoLegalMoves(Color),
    /// The starting placement could not be parsed.
    #[error(transparent)]
    InvalidPlacement(#[from] PlacementError),
}

/// Whose turn it is and whether the game has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnState {
    to_move: Color,
    turn: u32,
    game_over: bool,
    winner: Option<Color>,
}

impl TurnState {
    fn new(to_move: Color) -> Self {
        TurnState {
            to_move,
            turn: 0,
            game_over: false,
            winner: None,
        }
    }

    /// Hands the move to the other side and records any winner. Once set,
    /// game over stays set.
    fn advance(&mut self, winner: Option<Color>) {
        self.to_move = self.to_move.opposite();
        self.turn += 1;
        if let Some(color) = winner {
            self.game_over = true;
            self.winner = Some(color);
        }
    }

    fn end(&mut self, winner: Color) {
        self.game_over = true;
        self.winner = Some(winner);
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// Number of moves applied so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }
}

/// A single game between two sides, either of which may be the engine.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    start: Board,
    start_to_move: Color,
    state: TurnState,
    history: Vec<MoveRecord>,
    config: EngineConfig,
    rng: StdRng,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Game {
    /// Creates a new game laid out by `config.setup`, White to move.
    ///
    /// A pandemonium board is drawn from the game's own generator, so a
    /// seeded configuration always produces the same board.
    pub fn new(config: EngineConfig) -> Self {
        let mut game = Self::from_board(Board::empty(), Color::White, config);
        let board = game.config.setup.board(&mut game.rng);
        game.board = board;
        game.start = board;
        game
    }

    /// Creates a game from a custom board.
    pub fn from_board(board: Board, to_move: Color, config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Game {
            board,
            start: board,
            start_to_move: to_move,
            state: TurnState::new(to_move),
            history: Vec::new(),
            config,
            rng,
        }
    }

    /// Creates a game from a placement string such as
    /// `"4k3/8/8/8/8/8/8/4K2R w"`.
    pub fn from_placement(placement: &str, config: EngineConfig) -> Result<Self, GameError> {
        let placement = Placement::parse(placement)?;
        let board = Board::from_placement(&placement);
        Ok(Self::from_board(board, placement.side_to_move, config))
    }

    /// Restores the starting board and clears the history. The random
    /// generator is reseeded when the configuration carries a seed.
    pub fn reset(&mut self) {
        self.board = self.start;
        self.state = TurnState::new(self.start_to_move);
        self.history.clear();
        if let Some(seed) = self.config.seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
    }

    /// Returns the live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn turn_state(&self) -> TurnState {
        self.state
    }

    /// Returns the piece on `sq`, or `None` for an empty or off-board square.
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.board.piece_at(sq)
    }

    /// Returns the surviving pieces of `color`.
    pub fn roster(&self, color: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.board.roster(color)
    }

    pub fn color_to_move(&self) -> Color {
        self.state.to_move()
    }

    /// Number of moves applied since the start.
    pub fn turn_count(&self) -> u32 {
        self.state.turn()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn winner(&self) -> Option<Color> {
        self.state.winner()
    }

    /// Returns the applied moves, oldest first.
    pub fn move_history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Returns true if the engine plays the side to move.
    pub fn is_engine_turn(&self) -> bool {
        self.config.engine_color == Some(self.state.to_move())
    }

    /// Returns the moves available to the piece on `sq`, whichever side it
    /// belongs to.
    pub fn generate_moves(&self, sq: Square) -> Result<MoveList, GameError> {
        if self.board.piece_at(sq).is_none() {
            return Err(GameError::EmptySquare(sq));
        }
        Ok(generate_moves(&self.board, sq))
    }

    /// Returns every move for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        generate_all(&self.board, self.state.to_move())
    }

    /// Applies a move to the live board and hands the turn over.
    ///
    /// Only the origin, destination and castle flag of `mv` are trusted.
    /// The record actually executed is the one the generator produces for
    /// the current board, carrying over `mv`'s score.
    pub fn apply_move(&mut self, mv: &MoveRecord) -> Result<MoveOutcome, GameError> {
        if self.state.is_game_over() {
            return Err(GameError::GameAlreadyOver);
        }
        let piece = *self
            .board
            .piece_at(mv.from)
            .ok_or(GameError::EmptySquare(mv.from))?;
        let to_move = self.state.to_move();
        if piece.color != to_move {
            return Err(GameError::WrongSide { piece, to_move });
        }
        let generated = generate_moves(&self.board, mv.from)
            .find(mv)
            .copied()
            .ok_or_else(|| GameError::IllegalMove(mv.to_coordinate()))?;
        let record = MoveRecord {
            score: mv.score,
            ..generated
        };

        let outcome = execute_move(&mut self.board, &record, self.config.win_condition);
        self.history.push(record);
        self.state.advance(outcome.winner);

        debug!(
            turn = self.state.turn(),
            mv = %record,
            "{}",
            record.describe()
        );
        if let Some(winner) = outcome.winner {
            info!(%winner, turn = self.state.turn(), "game over");
        }
        Ok(outcome)
    }

    /// Applies a move given in coordinate notation (e.g., "e2e4"). A castle
    /// is written as the king's move.
    pub fn apply_coordinate(&mut self, text: &str) -> Result<MoveOutcome, GameError> {
        let invalid = || GameError::InvalidNotation(text.to_string());
        if text.len() != 4 || !text.is_ascii() {
            return Err(invalid());
        }
        let from = Square::from_algebraic(&text[..2]).ok_or_else(invalid)?;
        let to = Square::from_algebraic(&text[2..]).ok_or_else(invalid)?;
        if self.state.is_game_over() {
            return Err(GameError::GameAlreadyOver);
        }
        if self.board.piece_at(from).is_none() {
            return Err(GameError::EmptySquare(from));
        }
        let mv = generate_moves(&self.board, from)
            .into_iter()
            .find(|m| m.to == to)
            .ok_or_else(|| GameError::IllegalMove(text.to_string()))?;
        self.apply_move(&mv)
    }

    /// Chooses a move for the side to move using the configured strategy.
    /// The live board is not modified.
    pub fn select_engine_move(&mut self) -> Result<MoveRecord, GameError> {
        if self.state.is_game_over() {
            return Err(GameError::GameAlreadyOver);
        }
        let to_move = self.state.to_move();
        select_move(&self.board, to_move, &self.config.search(), &mut self.rng)
            .ok_or(GameError::NoLegalMoves(to_move))
    }

    /// Selects and applies an engine move.
    pub fn play_engine_move(&mut self) -> Result<(MoveRecord, MoveOutcome), GameError> {
        let mv = self.select_engine_move()?;
        let outcome = self.apply_move(&mv)?;
        Ok((mv, outcome))
    }

    /// Resigns the game for the side to move.
    pub fn resign(&mut self) -> Result<(), GameError> {
        if self.state.is_game_over() {
            return Err(GameError::GameAlreadyOver);
        }
        let winner = self.state.to_move().opposite();
        self.state.end(winner);
        info!(%winner, turn = self.state.turn(), "resignation");
        Ok(())
    }
}
