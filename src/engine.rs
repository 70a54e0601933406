use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the play board.
pub const GRID_SIZE: usize = 4;

pub type Tile = u64;
pub type Score = u64;

/// Largest tile `Grid::from_rows` accepts. Merges may double past it; a `u64`
/// cell only overflows after ~2^62 turns, which no game reaches.
pub const MAX_TILE: Tile = 1 << 32;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Clockwise quarter-turns that make this direction behave like `Left`.
    #[inline]
    fn quarter_turns(self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Down => 1,
            Direction::Right => 2,
            Direction::Up => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        };
        f.write_str(name)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("row {row} has {len} cells, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },
    #[error("cell ({row}, {col}) holds {value}, which is not a power of two >= 2")]
    InvalidTile { row: usize, col: usize, value: Tile },
    #[error("cell ({row}, {col}) holds {value}, above the {max} limit", max = MAX_TILE)]
    TileTooLarge { row: usize, col: usize, value: Tile },
}

/// Square N x N board stored row-major.
///
/// Every operation returns a fresh `Grid`; the receiver is never modified.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Tile>>", into = "Vec<Vec<Tile>>")]
pub struct Grid {
    size: usize,
    cells: Vec<Tile>,
}

/// Outcome of resolving one directional move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub grid: Grid,
    pub score: Score,
    pub moved: bool,
}

impl Grid {
    /// An N x N grid with every cell empty.
    ///
    /// ```
    /// use merge_architect::engine::Grid;
    /// let g = Grid::empty(4);
    /// assert_eq!(g.count_empty(), 16);
    /// assert_eq!(g.highest_tile(), 0);
    /// ```
    pub fn empty(size: usize) -> Self {
        Grid { size, cells: vec![0; size * size] }
    }

    /// Build a grid from rows, rejecting non-square input, non power-of-two tiles
    /// and tiles above [`MAX_TILE`].
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self, GridError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(GridError::NotSquare { row, len: values.len(), expected: size });
            }
            for (col, &value) in values.iter().enumerate() {
                if value != 0 && (value < 2 || !value.is_power_of_two()) {
                    return Err(GridError::InvalidTile { row, col, value });
                }
                if value > MAX_TILE {
                    return Err(GridError::TileTooLarge { row, col, value });
                }
            }
            cells.extend(values);
        }
        Ok(Grid { size, cells })
    }

    #[inline]
    pub fn size(&self) -> usize { self.size }

    /// Cell value at (`row`, `col`), or `None` when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        if row < self.size && col < self.size { Some(self.cells[row * self.size + col]) } else { None }
    }

    /// Row-major view of every cell.
    #[inline]
    pub fn cells(&self) -> &[Tile] { &self.cells }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        // chunks(0) panics; an empty grid simply has no rows
        self.cells.chunks(self.size.max(1))
    }

    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        self.rows().map(<[Tile]>::to_vec).collect()
    }

    /// Row-major indices of empty cells.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells.iter().enumerate().filter(|&(_, &v)| v == 0).map(|(idx, _)| idx)
    }

    #[inline]
    pub fn count_empty(&self) -> usize { self.empty_cells().count() }

    /// Sum of all tile values.
    pub fn sum(&self) -> Score { self.cells.iter().map(|&v| v as Score).sum() }

    /// Insert a random 2 (90%) or 4 (10%) tile into a uniformly chosen empty cell.
    ///
    /// A full grid comes back unchanged.
    ///
    /// ```
    /// use merge_architect::engine::Grid;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let g = Grid::empty(4).with_random_tile(&mut rng).with_random_tile(&mut rng);
    /// assert_eq!(g.count_empty(), 14);
    /// ```
    pub fn with_random_tile<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let empty: Vec<usize> = self.empty_cells().collect();
        if empty.is_empty() {
            return self.clone();
        }
        let idx = empty[rng.gen_range(0..empty.len())];
        let mut next = self.clone();
        next.cells[idx] = generate_random_tile(rng);
        next
    }

    /// Rotate a quarter-turn clockwise: the left column becomes the top row.
    pub fn rotate_clockwise(&self) -> Self {
        let n = self.size;
        let mut next = Grid::empty(n);
        for i in 0..n {
            for j in 0..n {
                next.cells[i * n + j] = self.cells[(n - 1 - j) * n + i];
            }
        }
        next
    }

    /// Rotate `turns` quarter-turns clockwise (taken modulo 4).
    pub fn rotate_quarter_turns(&self, turns: usize) -> Self {
        (0..turns % 4).fold(self.clone(), |g, _| g.rotate_clockwise())
    }

    /// Slide and merge every tile toward `dir`. No random insert.
    ///
    /// ```
    /// use merge_architect::engine::{Direction, Grid};
    /// let g = Grid::from_rows(vec![
    ///     vec![2, 0, 2, 0],
    ///     vec![0, 0, 0, 0],
    ///     vec![0, 0, 0, 0],
    ///     vec![0, 0, 0, 0],
    /// ]).unwrap();
    /// let res = g.resolve_move(Direction::Left);
    /// assert_eq!(res.grid.get(0, 0), Some(4));
    /// assert_eq!(res.score, 4);
    /// assert!(res.moved);
    /// ```
    pub fn resolve_move(&self, dir: Direction) -> MoveResult {
        let turns = dir.quarter_turns();
        let mut canonical = self.rotate_quarter_turns(turns);
        let n = canonical.size.max(1);
        let score = canonical.cells.chunks_mut(n).map(slide_row_left).sum::<Score>();
        let grid = canonical.rotate_quarter_turns(4 - turns);
        let moved = grid != *self;
        MoveResult { grid, score, moved }
    }

    /// True when no empty cell and no horizontally/vertically adjacent equal pair remain.
    pub fn is_game_over(&self) -> bool {
        if self.cells.contains(&0) {
            return false;
        }
        let n = self.size;
        for r in 0..n {
            for c in 0..n {
                let val = self.cells[r * n + c];
                if c + 1 < n && self.cells[r * n + c + 1] == val { return false; }
                if r + 1 < n && self.cells[(r + 1) * n + c] == val { return false; }
            }
        }
        true
    }

    /// Highest tile value present, 0 on an empty grid.
    pub fn highest_tile(&self) -> Tile { self.cells.iter().copied().max().unwrap_or(0) }
}

impl Default for Grid {
    fn default() -> Self { Grid::empty(GRID_SIZE) }
}

impl TryFrom<Vec<Vec<Tile>>> for Grid {
    type Error = GridError;
    fn try_from(rows: Vec<Vec<Tile>>) -> Result<Self, Self::Error> { Grid::from_rows(rows) }
}

impl From<Grid> for Vec<Vec<Tile>> {
    fn from(g: Grid) -> Self { g.to_rows() }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rows()).finish()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(self.size * 8);
        for (idx, row) in self.rows().enumerate() {
            if idx > 0 {
                writeln!(f, "{}", rule)?;
            }
            let cells: Vec<String> = row.iter().map(|&v| format_val(v)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

/// Slide a row toward index 0, merging adjacent equal pairs once each.
///
/// Returns the sum of the merged values. Merges never cascade: `[2, 2, 2, 0]`
/// becomes `[4, 2, 0, 0]`.
pub fn slide_row_left(row: &mut [Tile]) -> Score {
    let mut packed: Vec<Tile> = row.iter().copied().filter(|&v| v != 0).collect();
    let mut score = 0;
    let mut idx = 0;
    while idx + 1 < packed.len() {
        if packed[idx] == packed[idx + 1] {
            packed[idx] *= 2;
            packed[idx + 1] = 0;
            score += packed[idx] as Score;
            idx += 2;
        } else {
            idx += 1;
        }
    }
    row.fill(0);
    for (slot, val) in row.iter_mut().zip(packed.into_iter().filter(|&v| v != 0)) {
        *slot = val;
    }
    score
}

/// Empty N x N grid.
pub fn create_empty_grid(size: usize) -> Grid { Grid::empty(size) }

/// Insert a random tile using the provided RNG.
pub fn spawn_random_tile<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Grid { grid.with_random_tile(rng) }

/// Slide/merge tiles in the given direction. No randomness.
pub fn resolve_move(grid: &Grid, dir: Direction) -> MoveResult { grid.resolve_move(dir) }

/// True if no legal move remains.
pub fn is_game_over(grid: &Grid) -> bool { grid.is_game_over() }

/// Highest tile value on the grid.
pub fn max_value(grid: &Grid) -> Tile { grid.highest_tile() }

fn generate_random_tile<R: Rng + ?Sized>(rng: &mut R) -> Tile { if rng.gen_range(0..10) < 9 { 2 } else { 4 } }

fn format_val(val: Tile) -> String {
    match val {
        0 => " ".repeat(7),
        x => format!("{:^7}", x),
    }
}
