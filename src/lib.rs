//! merge-architect: the tile-merging engine behind the Merge Architect city builder
//!
//! This crate provides:
//! - A square `Grid` with pure operations (`resolve_move`, `with_random_tile`, `is_game_over`, ...)
//! - A `Session` driver that runs turns and tracks the score (`session` module)
//! - Building tiers, persisted records and the city plot map fed by finished sessions
//!
//! Quick start:
//! ```
//! use merge_architect::engine::{Direction, Grid, GRID_SIZE};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic board initialization with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let g0 = Grid::empty(GRID_SIZE).with_random_tile(&mut rng).with_random_tile(&mut rng);
//! let res = g0.resolve_move(Direction::Left);
//! assert_eq!(res.grid.sum(), g0.sum());
//! ```
//!
//! The engine also exposes free functions mirroring the `Grid` methods
//! (`engine::create_empty_grid`, `engine::resolve_move`, ...).
//!
pub mod city;
pub mod engine;
pub mod input;
pub mod records;
pub mod session;
pub mod tiers;
