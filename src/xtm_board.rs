// Board generation: difficulty presets, mine placement and adjacency counts
// Also hosts the generic row-major grid used by every board layer

use rand::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

/// Difficulty presets, selected by index from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,   // 8x8, 10 mines
    Medium, // 16x16, 50 mines
    Hard,   // 24x24, 120 mines
}

impl Serialize for Difficulty {
    /// Serialize difficulty as a human-readable string (not an index)
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D>(deserializer: D) -> Result<Difficulty, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name() == s)
            .ok_or_else(|| serde::de::Error::custom("unknown difficulty"))
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Board dimensions as (rows, cols, mines)
    pub fn params(&self) -> (usize, usize, usize) {
        match self {
            Difficulty::Easy => (8, 8, 10),
            Difficulty::Medium => (16, 16, 50),
            Difficulty::Hard => (24, 24, 120),
        }
    }

    /// Stable identifier written to the config file
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn to_index(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    /// Any index past the known presets lands on Hard
    pub fn from_index(i: usize) -> Difficulty {
        match i {
            0 => Difficulty::Easy,
            1 => Difficulty::Medium,
            _ => Difficulty::Hard,
        }
    }

    /// Next preset in menu order, wrapping back to Easy
    pub fn next(&self) -> Difficulty {
        Difficulty::from_index((self.to_index() + 1) % Difficulty::ALL.len())
    }
}

/// Fixed-size 2D grid stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Grid {
            rows,
            cols,
            cells: vec![value; rows * cols],
        }
    }

    /// Overwrite every cell with `value`
    pub fn fill(&mut self, value: T) {
        for cell in self.cells.iter_mut() {
            *cell = value.clone();
        }
    }
}

impl<T> Grid<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if self.in_bounds(row, col) {
            self.cells.get(self.index(row, col))
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        if self.in_bounds(row, col) {
            let idx = self.index(row, col);
            self.cells.get_mut(idx)
        } else {
            None
        }
    }

    /// Store `value` at (row, col); out-of-range writes are dropped
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        if let Some(cell) = self.get_mut(row, col) {
            *cell = value;
        }
    }

    /// Cells with their coordinates, row by row
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize), &T)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| ((i / cols, i % cols), v))
    }

    pub fn count(&self, pred: impl Fn(&T) -> bool) -> usize {
        self.cells.iter().filter(|v| pred(v)).count()
    }

    /// Up to 8 surrounding coordinates, clipped at the edges (no wraparound)
    pub fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + use<T> {
        let (rows, cols) = (self.rows, self.cols);
        let last_row = rows.saturating_sub(1);
        let last_col = cols.saturating_sub(1);
        let in_grid = row < rows && col < cols;
        (row.saturating_sub(1)..=(row + 1).min(last_row))
            .flat_map(move |r| (col.saturating_sub(1)..=(col + 1).min(last_col)).map(move |c| (r, c)))
            .filter(move |&(r, c)| in_grid && (r, c) != (row, col))
    }
}

/// What a cell shows once opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjacency {
    Mine,
    Count(u8), // 0-8 mined neighbours
}

impl Adjacency {
    pub fn is_mine(self) -> bool {
        matches!(self, Adjacency::Mine)
    }

    pub fn count(self) -> Option<u8> {
        match self {
            Adjacency::Mine => None,
            Adjacency::Count(n) => Some(n),
        }
    }
}

pub type MineGrid = Grid<bool>;
pub type AdjacencyGrid = Grid<Adjacency>;

/// Place `mine_count` mines uniformly at random and derive the adjacency grid
pub fn generate(rows: usize, cols: usize, mine_count: usize) -> (MineGrid, AdjacencyGrid) {
    generate_with(&mut thread_rng(), rows, cols, mine_count)
}

pub fn generate_with<R: Rng + ?Sized>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    mine_count: usize,
) -> (MineGrid, AdjacencyGrid) {
    let mut mines = Grid::filled(rows, cols, false);
    // a request for more mines than cells would never finish sampling
    let target = mine_count.min(rows * cols);
    let mut placed = 0;
    while placed < target {
        let r = rng.gen_range(0..rows);
        let c = rng.gen_range(0..cols);
        if let Some(cell) = mines.get_mut(r, c) {
            if !*cell {
                *cell = true;
                placed += 1;
            }
        }
    }
    let adjacency = compute_adjacency(&mines);
    (mines, adjacency)
}

/// Derive adjacency counts from the mine layout in a single pass
pub fn compute_adjacency(mines: &MineGrid) -> AdjacencyGrid {
    let mut adjacency = Grid::filled(mines.rows(), mines.cols(), Adjacency::Count(0));
    for ((r, c), &mined) in mines.iter() {
        let value = if mined {
            Adjacency::Mine
        } else {
            let n = mines
                .neighbors(r, c)
                .filter(|&(nr, nc)| mines.get(nr, nc).copied().unwrap_or(false))
                .count();
            Adjacency::Count(n as u8)
        };
        adjacency.set(r, c, value);
    }
    adjacency
}

/// Move the mine under a first click somewhere else and recount adjacency
pub fn relocate_mine(mines: MineGrid, row: usize, col: usize) -> (MineGrid, AdjacencyGrid) {
    relocate_mine_with(&mut thread_rng(), mines, row, col)
}

pub fn relocate_mine_with<R: Rng + ?Sized>(
    rng: &mut R,
    mut mines: MineGrid,
    row: usize,
    col: usize,
) -> (MineGrid, AdjacencyGrid) {
    if !mines.get(row, col).copied().unwrap_or(false) {
        let adjacency = compute_adjacency(&mines);
        return (mines, adjacency);
    }
    // with every other cell mined there is nowhere to move to
    let free_elsewhere = mines.count(|m| !*m);
    if free_elsewhere == 0 {
        let adjacency = compute_adjacency(&mines);
        return (mines, adjacency);
    }

    mines.set(row, col, false);
    loop {
        let r = rng.gen_range(0..mines.rows());
        let c = rng.gen_range(0..mines.cols());
        if (r, c) == (row, col) {
            continue;
        }
        if let Some(cell) = mines.get_mut(r, c) {
            if !*cell {
                *cell = true;
                debug!(from = ?(row, col), to = ?(r, c), "relocated first-click mine");
                break;
            }
        }
    }
    let adjacency = compute_adjacency(&mines);
    (mines, adjacency)
}
