//! Tictac-MCTS: N×N tic-tac-toe played by Monte Carlo Tree Search.
//!
//! The engine grows a UCB1 search tree one random rollout at a time and
//! keeps a cursor on the real game, so statistics survive from move to move.
//!
//! ## Modules
//!
//! - [`constants`] - Default sizes and search parameters
//! - [`board`] - Board state from one player's perspective
//! - [`rules`] - Winning alignments and the judge routine
//! - [`mcts`] - Search tree, UCB1 scoring, and the search engine
//! - [`playout`] - Random game simulation that extends the tree
//! - [`agent`] - The MCTS player
//! - [`player`] - Player contract plus random and heuristic players
//! - [`game`] - Match driver and series tally
//!
//! ## Example
//!
//! ```
//! use fastrand::Rng;
//! use tictac_mcts::agent::MctsPlayer;
//! use tictac_mcts::config::MctsConfig;
//! use tictac_mcts::game::play_match;
//! use tictac_mcts::player::RandomPlayer;
//! use tictac_mcts::rules::Rules;
//!
//! let rules = Rules::new(3).unwrap();
//! let mut engine = MctsPlayer::new(&rules, MctsConfig::default());
//! let mut random = RandomPlayer::new(&rules);
//! let mut rng = Rng::with_seed(42);
//!
//! let outcome = play_match(&mut engine, &mut random, &mut rng).unwrap();
//! println!("winner = {}", outcome.winner());
//! ```

pub mod agent;
pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod mcts;
pub mod player;
pub mod playout;
pub mod rules;

pub use board::{Board, Cell, GameStatus};
pub use error::GameError;
