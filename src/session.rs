//! Session driver: owns the live grid for one game and runs each turn as
//! resolve-move, spawn (only if the move changed the grid), terminal check.
//!
//! ```
//! use merge_architect::engine::Direction;
//! use merge_architect::session::{Session, SessionConfig};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut session = Session::new(&SessionConfig::default(), &mut rng);
//! assert_eq!(session.grid().count_empty(), 14);
//!
//! let mut turns = 0;
//! while !session.is_over() && turns < 8 {
//!     for dir in Direction::ALL {
//!         if session.play(dir, &mut rng).is_moved() { break; }
//!     }
//!     turns += 1;
//! }
//! assert!(session.moves() > 0);
//! ```

use crate::engine::{Direction, Grid, Score, Tile, GRID_SIZE};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Session knobs. Defaults match the standard 4x4 board seeded with two tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub size: usize,
    pub start_tiles: usize,
}

impl Default for SessionConfig {
    fn default() -> Self { Self { size: GRID_SIZE, start_tiles: 2 } }
}

/// What a single directional input did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// The game had already ended; the input was dropped.
    Ignored,
    /// Nothing could slide or merge in that direction.
    Blocked,
    Moved { gained: Score, game_over: bool },
}

impl Turn {
    #[inline]
    pub fn is_moved(self) -> bool { matches!(self, Turn::Moved { .. }) }
}

/// Final (or current) result of a session, as handed to the city view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub score: Score,
    pub highest_tile: Tile,
    pub moves: u32,
}

#[derive(Debug, Clone)]
pub struct Session {
    grid: Grid,
    score: Score,
    moves: u32,
    over: bool,
}

impl Session {
    pub fn new<R: Rng + ?Sized>(config: &SessionConfig, rng: &mut R) -> Self {
        let grid = (0..config.start_tiles)
            .fold(Grid::empty(config.size), |g, _| g.with_random_tile(rng));
        debug!(size = config.size, start_tiles = config.start_tiles, "new session");
        Self::from_grid(grid)
    }

    /// Resume from an existing grid with a zero score.
    pub fn from_grid(grid: Grid) -> Self {
        let over = grid.is_game_over();
        Session { grid, score: 0, moves: 0, over }
    }

    pub fn play<R: Rng + ?Sized>(&mut self, dir: Direction, rng: &mut R) -> Turn {
        if self.over {
            return Turn::Ignored;
        }
        let res = self.grid.resolve_move(dir);
        if !res.moved {
            debug!(%dir, "blocked move");
            return Turn::Blocked;
        }
        self.grid = res.grid.with_random_tile(rng);
        self.score += res.score;
        self.moves += 1;
        self.over = self.grid.is_game_over();
        debug!(%dir, gained = res.score, score = self.score, "moved");
        if self.over {
            info!(score = self.score, highest_tile = self.highest_tile(), moves = self.moves, "game over");
        }
        Turn::Moved { gained: res.score, game_over: self.over }
    }

    #[inline]
    pub fn grid(&self) -> &Grid { &self.grid }

    #[inline]
    pub fn score(&self) -> Score { self.score }

    #[inline]
    pub fn moves(&self) -> u32 { self.moves }

    #[inline]
    pub fn is_over(&self) -> bool { self.over }

    #[inline]
    pub fn highest_tile(&self) -> Tile { self.grid.highest_tile() }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary { score: self.score, highest_tile: self.highest_tile(), moves: self.moves }
    }
}
