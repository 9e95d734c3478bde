//! High-level game management

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    board::{Board, Cell, Player, Position},
    lines::{TerminalState, evaluate_terminal},
};
use crate::{
    analysis::TierStats,
    policy::{AiPlayer, DifficultyTier},
};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: Position,
    pub player: Player,
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

/// Who is playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Two people share the board
    TwoPlayer,
    /// A person plays against the AI, which plays `ai` at the given tier
    SinglePlayer { tier: DifficultyTier, ai: Player },
}

/// X always opens
pub const FIRST_PLAYER: Player = Player::X;

/// The AI's side in single-player games unless configured otherwise
pub const DEFAULT_AI_PLAYER: Player = Player::O;

/// One running game plus the statistics of every finished single-player game.
///
/// Starting a new game clears the board and the move history but keeps the
/// per-tier statistics.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    to_move: Player,
    mode: GameMode,
    moves: Vec<Move>,
    outcome: Option<GameOutcome>,
    stats: TierStats,
}

impl GameSession {
    pub fn new(mode: GameMode) -> Self {
        Self {
            board: Board::new(),
            to_move: FIRST_PLAYER,
            mode,
            moves: Vec::new(),
            outcome: None,
            stats: TierStats::new(),
        }
    }

    /// Begin a new game in `mode`, keeping statistics
    pub fn start(&mut self, mode: GameMode) {
        self.board = Board::new();
        self.to_move = FIRST_PLAYER;
        self.mode = mode;
        self.moves.clear();
        self.outcome = None;
    }

    /// Begin a new game in the current mode
    pub fn restart(&mut self) {
        self.start(self.mode);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snapshot(&self) -> [[Cell; 3]; 3] {
        self.board.snapshot()
    }

    pub fn to_move(&self) -> Player {
        self.to_move
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn stats(&self) -> &TierStats {
        &self.stats
    }

    pub fn state(&self) -> TerminalState {
        evaluate_terminal(&self.board)
    }

    /// The AI's mark in single-player mode
    pub fn ai_player(&self) -> Option<Player> {
        match self.mode {
            GameMode::SinglePlayer { ai, .. } => Some(ai),
            GameMode::TwoPlayer => None,
        }
    }

    /// The human's mark in single-player mode
    pub fn human_player(&self) -> Option<Player> {
        self.ai_player().map(Player::opponent)
    }

    pub fn is_ai_turn(&self) -> bool {
        self.outcome.is_none() && self.ai_player() == Some(self.to_move)
    }

    /// Play the side to move at (row, col).
    ///
    /// In single-player mode only the human side may use this.
    ///
    /// # Errors
    ///
    /// `GameOver` after the game has finished, `WrongTurn` when it is the
    /// AI's turn, and the placement errors of [`Board::place`]. The turn does
    /// not advance on error.
    pub fn play(&mut self, row: usize, col: usize) -> crate::Result<TerminalState> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }
        if let Some(ai) = self.ai_player()
            && ai == self.to_move
        {
            return Err(crate::Error::WrongTurn {
                expected: ai,
                attempted: ai.opponent(),
            });
        }
        self.apply(Position::new(row, col))
    }

    /// Let the single-player AI take its turn at the session's tier
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` outside single-player mode or when `ai` does
    /// not play the session's AI side; otherwise as [`GameSession::play_ai`].
    pub fn ai_move(&mut self, ai: &mut AiPlayer) -> crate::Result<Move> {
        match self.mode {
            GameMode::SinglePlayer { tier, ai: side } if ai.mark() == side => {
                self.play_ai(ai, tier)
            }
            GameMode::SinglePlayer { ai: side, .. } => Err(crate::Error::InvalidConfiguration {
                message: format!("session AI plays {side}, not {}", ai.mark()),
            }),
            GameMode::TwoPlayer => Err(crate::Error::InvalidConfiguration {
                message: "two-player games have no AI side".to_string(),
            }),
        }
    }

    /// Let `ai` choose and place a move for the side to move at `tier`.
    ///
    /// Unlike [`GameSession::ai_move`] this may drive either side, e.g. a
    /// scripted opponent standing in for the human.
    ///
    /// # Errors
    ///
    /// `GameOver` after the game has finished, `WrongTurn` if `ai` does not
    /// play the side to move, `NoLegalMove` if the board is full.
    pub fn play_ai(&mut self, ai: &mut AiPlayer, tier: DifficultyTier) -> crate::Result<Move> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }
        if ai.mark() != self.to_move {
            return Err(crate::Error::WrongTurn {
                expected: self.to_move,
                attempted: ai.mark(),
            });
        }

        let player = self.to_move;
        let position = ai.choose_move(&mut self.board, tier)?;
        self.apply(position)?;
        Ok(Move { position, player })
    }

    fn apply(&mut self, position: Position) -> crate::Result<TerminalState> {
        let player = self.to_move;
        self.board.place(position.row, position.col, player)?;
        self.moves.push(Move { position, player });
        debug!(%player, %position, "move played");

        let state = evaluate_terminal(&self.board);
        match state {
            TerminalState::InProgress => self.to_move = player.opponent(),
            TerminalState::Won(winner) => self.finish(GameOutcome::Win(winner)),
            TerminalState::Drawn => self.finish(GameOutcome::Draw),
        }
        Ok(state)
    }

    fn finish(&mut self, outcome: GameOutcome) {
        self.outcome = Some(outcome);
        if let GameMode::SinglePlayer { tier, ai } = self.mode {
            self.stats.record(tier, outcome, ai);
        }
        info!(?outcome, moves = self.moves.len(), "game finished");
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(GameMode::TwoPlayer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::EngineConfig, policy::TierTable};

    #[test]
    fn test_two_player_game_to_win() {
        let mut session = GameSession::new(GameMode::TwoPlayer);
        // X: (0,0) (0,1) (0,2); O: (1,0) (1,1)
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            assert_eq!(session.play(row, col).unwrap(), TerminalState::InProgress);
        }
        assert_eq!(session.play(0, 2).unwrap(), TerminalState::Won(Player::X));
        assert_eq!(session.outcome(), Some(GameOutcome::Win(Player::X)));
        assert!(matches!(session.play(2, 2), Err(crate::Error::GameOver)));
        // Two-player games are not counted
        assert_eq!(session.stats().total_games(), 0);
    }

    #[test]
    fn test_rejected_move_keeps_turn() {
        let mut session = GameSession::new(GameMode::TwoPlayer);
        session.play(1, 1).unwrap();
        assert_eq!(session.to_move(), Player::O);
        assert!(matches!(
            session.play(1, 1),
            Err(crate::Error::CellOccupied { .. })
        ));
        assert!(matches!(
            session.play(5, 1),
            Err(crate::Error::InvalidPosition { .. })
        ));
        assert_eq!(session.to_move(), Player::O);
        assert_eq!(session.moves().len(), 1);
    }

    #[test]
    fn test_single_player_turn_order() {
        let mut session = GameSession::new(GameMode::SinglePlayer {
            tier: DifficultyTier::Hard,
            ai: Player::O,
        });
        let mut ai = AiPlayer::with_seed(Player::O, TierTable::default(), 3);

        assert!(matches!(
            session.ai_move(&mut ai),
            Err(crate::Error::WrongTurn { .. })
        ));
        session.play(0, 0).unwrap();
        assert!(session.is_ai_turn());
        assert!(matches!(
            session.play(2, 2),
            Err(crate::Error::WrongTurn { .. })
        ));
        let mv = session.ai_move(&mut ai).unwrap();
        assert_eq!(mv.player, Player::O);
        assert_eq!(session.to_move(), Player::X);
    }

    #[test]
    fn test_ai_win_updates_tier_stats() {
        let mut session = GameSession::new(GameMode::SinglePlayer {
            tier: DifficultyTier::Medium,
            ai: Player::O,
        });
        let mut ai = AiPlayer::with_seed(Player::O, TierTable::default(), 3);

        // Each X move is answered with the first best move in row-major order
        let script = [
            ((0, 0), Position::new(0, 1)), // nothing visible within 3 plies
            ((2, 0), Position::new(1, 0)), // block column 0
            ((0, 2), Position::new(1, 1)), // block the anti-diagonal
            ((2, 1), Position::new(1, 2)), // complete row 1
        ];
        for ((row, col), expected) in script {
            session.play(row, col).unwrap();
            let mv = session.ai_move(&mut ai).unwrap();
            assert_eq!(mv.position, expected);
        }

        assert_eq!(session.outcome(), Some(GameOutcome::Win(Player::O)));
        let stats = session.stats().get(DifficultyTier::Medium);
        assert_eq!(stats.wins, 1);
        assert_eq!(stats.total_games, 1);
        assert_eq!(session.stats().get(DifficultyTier::Hard).total_games, 0);
    }

    #[test]
    fn test_restart_keeps_stats() {
        let mut session = GameSession::new(GameMode::SinglePlayer {
            tier: DifficultyTier::Hard,
            ai: Player::O,
        });
        let mut ai = AiPlayer::with_seed(Player::O, TierTable::default(), 3);
        let mut opponent = AiPlayer::with_seed(Player::X, TierTable::default(), 4);
        while session.outcome().is_none() {
            if session.is_ai_turn() {
                session.ai_move(&mut ai).unwrap();
            } else {
                session.play_ai(&mut opponent, DifficultyTier::Hard).unwrap();
            }
        }
        assert_eq!(session.outcome(), Some(GameOutcome::Draw));

        session.restart();
        assert_eq!(session.board(), &Board::new());
        assert_eq!(session.to_move(), Player::X);
        assert!(session.moves().is_empty());
        assert_eq!(session.stats().get(DifficultyTier::Hard).draws, 1);
    }

    #[test]
    fn test_configured_x_ai_moves_first_and_keeps_its_side() {
        let config = EngineConfig {
            ai_player: Player::X,
            ..EngineConfig::default()
        }
        .with_seed(5);
        let mut session = GameSession::new(config.game_mode(DifficultyTier::Hard));
        let mut ai = config.ai();
        let mut stand_in = AiPlayer::with_seed(Player::O, TierTable::default(), 6);

        assert_eq!(session.ai_player(), Some(Player::X));
        assert_eq!(session.human_player(), Some(Player::O));
        assert!(session.is_ai_turn());
        assert!(matches!(
            session.play(1, 1),
            Err(crate::Error::WrongTurn { .. })
        ));

        let mv = session.ai_move(&mut ai).unwrap();
        assert_eq!(mv.player, Player::X);
        assert!(!session.is_ai_turn());

        // An AI for the other mark cannot take the human's turn
        assert!(matches!(
            session.ai_move(&mut stand_in),
            Err(crate::Error::InvalidConfiguration { .. })
        ));
        assert_eq!(session.moves().len(), 1);

        while session.outcome().is_none() {
            if session.is_ai_turn() {
                session.ai_move(&mut ai).unwrap();
            } else {
                session.play_ai(&mut stand_in, DifficultyTier::Hard).unwrap();
            }
        }
        assert_eq!(session.outcome(), Some(GameOutcome::Draw));
        assert_eq!(session.stats().get(DifficultyTier::Hard).draws, 1);
    }
}
