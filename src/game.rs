//! Match driver: alternates two players until the game ends.

use std::fmt;

use fastrand::Rng;
use tracing::debug;

use crate::board::GameStatus;
use crate::config::MctsConfig;
use crate::error::GameError;
use crate::player::{Player, PlayerKind, build_player};
use crate::rules::Rules;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    FirstWins,
    SecondWins,
    Draw,
}

impl MatchOutcome {
    /// Winning side as 1 or 2, or 0 for a draw.
    pub fn winner(self) -> u8 {
        match self {
            MatchOutcome::FirstWins => 1,
            MatchOutcome::SecondWins => 2,
            MatchOutcome::Draw => 0,
        }
    }

    /// Translate the status reported by the side that just received a move.
    fn from_update(status: GameStatus, updated_is_first: bool) -> Option<Self> {
        let (win, lose) = if updated_is_first {
            (MatchOutcome::FirstWins, MatchOutcome::SecondWins)
        } else {
            (MatchOutcome::SecondWins, MatchOutcome::FirstWins)
        };
        match status {
            GameStatus::Continuing => None,
            GameStatus::Win => Some(win),
            GameStatus::Lose => Some(lose),
            GameStatus::Draw => Some(MatchOutcome::Draw),
        }
    }
}

/// Play one game, `first` moving first.
pub fn play_match(
    first: &mut dyn Player,
    second: &mut dyn Player,
    rng: &mut Rng,
) -> Result<MatchOutcome, GameError> {
    loop {
        let cell = first.play(rng)?;
        debug!(player = first.name(), cell, "side 1 plays");
        if let Some(outcome) = MatchOutcome::from_update(second.update(cell)?, false) {
            return Ok(outcome);
        }

        let cell = second.play(rng)?;
        debug!(player = second.name(), cell, "side 2 plays");
        if let Some(outcome) = MatchOutcome::from_update(first.update(cell)?, true) {
            return Ok(outcome);
        }
    }
}

/// Outcome counts over a series of games.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchTally {
    pub first_wins: u32,
    pub second_wins: u32,
    pub draws: u32,
}

impl MatchTally {
    pub fn record(&mut self, outcome: MatchOutcome) {
        match outcome {
            MatchOutcome::FirstWins => self.first_wins += 1,
            MatchOutcome::SecondWins => self.second_wins += 1,
            MatchOutcome::Draw => self.draws += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.first_wins + self.second_wins + self.draws
    }
}

impl fmt::Display for MatchTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "side 1: {}  side 2: {}  draws: {}  ({} games)",
            self.first_wins,
            self.second_wins,
            self.draws,
            self.games()
        )
    }
}

/// Play `games` fresh games between two player kinds, sharing one random
/// source across the whole series.
pub fn play_series(
    rules: &Rules,
    first: PlayerKind,
    second: PlayerKind,
    config: &MctsConfig,
    games: u32,
    rng: &mut Rng,
) -> Result<MatchTally, GameError> {
    let mut tally = MatchTally::default();
    for _ in 0..games {
        let mut p1 = build_player(first, rules, config);
        let mut p2 = build_player(second, rules, config);
        tally.record(play_match(p1.as_mut(), p2.as_mut(), rng)?);
    }
    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Cell};

    /// Plays a fixed list of cells.
    struct Scripted {
        moves: Vec<usize>,
        board: Board,
        rules: Rules,
    }

    impl Scripted {
        fn new(moves: &[usize]) -> Self {
            let rules = Rules::new(3).unwrap();
            Self {
                moves: moves.iter().rev().copied().collect(),
                board: rules.empty_board(),
                rules,
            }
        }
    }

    impl Player for Scripted {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn play(&mut self, _rng: &mut Rng) -> Result<usize, GameError> {
            let cell = self.moves.pop().ok_or(GameError::NoVacantCell)?;
            self.board.place(cell, Cell::Mine)?;
            Ok(cell)
        }

        fn update(&mut self, cell: usize) -> Result<GameStatus, GameError> {
            self.board.place(cell, Cell::Opponent)?;
            Ok(self.rules.judge(&self.board))
        }

        fn board(&self) -> &Board {
            &self.board
        }
    }

    #[test]
    fn test_first_player_wins_on_diagonal() {
        let mut a = Scripted::new(&[0, 4, 8]);
        let mut b = Scripted::new(&[1, 2]);
        let mut rng = Rng::with_seed(0);
        let outcome = play_match(&mut a, &mut b, &mut rng).unwrap();
        assert_eq!(outcome, MatchOutcome::FirstWins);
        assert_eq!(outcome.winner(), 1);
    }

    #[test]
    fn test_second_player_wins() {
        let mut a = Scripted::new(&[0, 1, 8]);
        let mut b = Scripted::new(&[3, 4, 5]);
        let mut rng = Rng::with_seed(0);
        let outcome = play_match(&mut a, &mut b, &mut rng).unwrap();
        assert_eq!(outcome, MatchOutcome::SecondWins);
        assert_eq!(outcome.winner(), 2);
    }

    #[test]
    fn test_draw() {
        // o x o / o x x / x o o
        let mut a = Scripted::new(&[0, 2, 3, 7, 8]);
        let mut b = Scripted::new(&[1, 4, 5, 6]);
        let mut rng = Rng::with_seed(0);
        assert_eq!(play_match(&mut a, &mut b, &mut rng), Ok(MatchOutcome::Draw));
    }

    #[test]
    fn test_illegal_move_surfaces_error() {
        let mut a = Scripted::new(&[0, 0]);
        let mut b = Scripted::new(&[1]);
        let mut rng = Rng::with_seed(0);
        assert_eq!(
            play_match(&mut a, &mut b, &mut rng),
            Err(GameError::Occupied(0))
        );
    }

    #[test]
    fn test_tally() {
        let mut tally = MatchTally::default();
        tally.record(MatchOutcome::FirstWins);
        tally.record(MatchOutcome::Draw);
        tally.record(MatchOutcome::Draw);
        assert_eq!(tally.games(), 3);
        assert_eq!(tally.to_string(), "side 1: 1  side 2: 0  draws: 2  (3 games)");
    }

    #[test]
    fn test_series_plays_every_game() {
        let rules = Rules::new(3).unwrap();
        let mut rng = Rng::with_seed(17);
        let tally = play_series(
            &rules,
            PlayerKind::Mcts,
            PlayerKind::Random,
            &MctsConfig::default(),
            20,
            &mut rng,
        )
        .unwrap();
        assert_eq!(tally.games(), 20);
    }
}
