// A single game in progress: the four grids plus timer and counters
// Owns first-click relocation and turns player moves into game events

use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::xtm_board::{self, AdjacencyGrid, Difficulty, Grid, MineGrid, compute_adjacency};
use crate::xtm_reveal::{self, RevealedGrid};
use crate::xtm_score::compute_score;

pub type FlagGrid = Grid<bool>;

/// Discrete signals for the audio and screen layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    MineRelocated,
    Revealed(usize), // number of cells opened by the move
    Exploded,
    Victory,
    Flagged,
    Unflagged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    Ignored,
    Revealed(usize),
    Exploded,
    Won,
}

pub struct GameSession {
    pub difficulty: Difficulty,
    pub rows: usize,
    pub cols: usize,
    pub mine_count: usize,
    pub mines: MineGrid,
    pub adjacency: AdjacencyGrid,
    pub revealed: RevealedGrid,
    pub flags: FlagGrid,
    pub flags_placed: usize,
    first_click: bool,              // relocation still possible
    start_time: Option<Instant>,    // set while the timer runs
    elapsed: Duration,              // frozen value once stopped
    outcome: Outcome,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Start a fresh game with a random board for `difficulty`
    pub fn new(difficulty: Difficulty) -> Self {
        let (rows, cols, mines) = difficulty.params();
        let (mine_grid, _) = xtm_board::generate(rows, cols, mines);
        info!(difficulty = difficulty.name(), rows, cols, mines, "new game");
        GameSession::with_board(mine_grid, difficulty)
    }

    /// Start a game on a known mine layout
    pub fn with_board(mines: MineGrid, difficulty: Difficulty) -> Self {
        let (rows, cols) = (mines.rows(), mines.cols());
        let adjacency = compute_adjacency(&mines);
        GameSession {
            difficulty,
            rows,
            cols,
            mine_count: mines.count(|m| *m),
            mines,
            adjacency,
            revealed: Grid::filled(rows, cols, false),
            flags: Grid::filled(rows, cols, false),
            flags_placed: 0,
            first_click: true,
            start_time: None,
            elapsed: Duration::ZERO,
            outcome: Outcome::Ongoing,
            events: Vec::new(),
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome != Outcome::Ongoing
    }

    pub fn timer_running(&self) -> bool {
        self.start_time.is_some()
    }

    pub fn elapsed_secs(&self) -> u64 {
        match self.start_time {
            Some(t0) => t0.elapsed().as_secs(),
            None => self.elapsed.as_secs(),
        }
    }

    /// Mine counter shown to the player; negative when over-flagged
    pub fn remaining_mines(&self) -> isize {
        self.mine_count as isize - self.flags_placed as isize
    }

    /// Points for the game as it stands now
    pub fn score(&self) -> u64 {
        compute_score(self.difficulty.to_index(), self.elapsed_secs())
    }

    /// Mines are drawn face-up once the game is lost
    pub fn show_all_mines(&self) -> bool {
        self.outcome == Outcome::Lost
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn start_timer(&mut self) {
        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }
    }

    fn stop_timer(&mut self) {
        if let Some(t0) = self.start_time.take() {
            self.elapsed = t0.elapsed();
        }
    }

    /// Player opens a cell
    pub fn reveal_cell(&mut self, row: usize, col: usize) -> RevealOutcome {
        if self.is_over() || !self.revealed.in_bounds(row, col) {
            return RevealOutcome::Ignored;
        }
        if self.revealed.get(row, col) == Some(&true) || self.flags.get(row, col) == Some(&true) {
            return RevealOutcome::Ignored;
        }

        if self.first_click {
            self.first_click = false;
            if self.mines.get(row, col) == Some(&true) {
                let mines = std::mem::replace(&mut self.mines, Grid::filled(0, 0, false));
                let (mines, adjacency) = xtm_board::relocate_mine(mines, row, col);
                self.mines = mines;
                self.adjacency = adjacency;
                self.revealed.fill(false);
                self.flags.fill(false);
                self.flags_placed = 0;
                self.events.push(GameEvent::MineRelocated);
            }
        }

        if self.mines.get(row, col) == Some(&true) {
            self.revealed.set(row, col, true);
            self.stop_timer();
            self.outcome = Outcome::Lost;
            self.events.push(GameEvent::Exploded);
            info!(row, col, secs = self.elapsed_secs(), "mine hit");
            return RevealOutcome::Exploded;
        }

        self.start_timer();
        let opened = xtm_reveal::reveal(&mut self.revealed, &self.adjacency, row, col);
        self.clear_flags_on_revealed();
        self.events.push(GameEvent::Revealed(opened));
        debug!(row, col, opened, "cells revealed");

        if xtm_reveal::check_victory(&self.revealed, &self.mines) {
            self.stop_timer();
            self.outcome = Outcome::Won;
            self.events.push(GameEvent::Victory);
            info!(secs = self.elapsed_secs(), "board cleared");
            return RevealOutcome::Won;
        }
        RevealOutcome::Revealed(opened)
    }

    // A flood can sweep over flagged cells; an open cell never keeps its flag.
    fn clear_flags_on_revealed(&mut self) {
        let stale: Vec<(usize, usize)> = self
            .flags
            .iter()
            .filter(|&((r, c), &flagged)| flagged && self.revealed.get(r, c) == Some(&true))
            .map(|(pos, _)| pos)
            .collect();
        for (r, c) in stale {
            self.flags.set(r, c, false);
            self.flags_placed = self.flags_placed.saturating_sub(1);
        }
    }

    /// Player toggles a flag; returns whether anything changed
    pub fn toggle_flag(&mut self, row: usize, col: usize) -> bool {
        if self.is_over() || !self.flags.in_bounds(row, col) || self.revealed.get(row, col) == Some(&true) {
            return false;
        }
        let now_flagged = !self.flags.get(row, col).copied().unwrap_or(false);
        self.flags.set(row, col, now_flagged);
        if now_flagged {
            self.flags_placed += 1;
            self.events.push(GameEvent::Flagged);
        } else {
            self.flags_placed = self.flags_placed.saturating_sub(1);
            self.events.push(GameEvent::Unflagged);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(rows: usize, cols: usize, coords: &[(usize, usize)]) -> MineGrid {
        let mut g = Grid::filled(rows, cols, false);
        for &(r, c) in coords {
            g.set(r, c, true);
        }
        g
    }

    #[test]
    fn first_click_on_mine_relocates_it() {
        let mut session = GameSession::new(Difficulty::Easy);
        let ((r, c), _) = session.mines.iter().find(|(_, m)| **m).unwrap();
        let flag_at = if (r, c) == (0, 0) { (0, 1) } else { (0, 0) };
        session.toggle_flag(flag_at.0, flag_at.1);

        let outcome = session.reveal_cell(r, c);

        assert_ne!(outcome, RevealOutcome::Exploded);
        assert_ne!(outcome, RevealOutcome::Ignored);
        assert_eq!(session.mines.get(r, c), Some(&false));
        assert_eq!(session.mines.count(|m| *m), 10);
        assert_eq!(session.revealed.get(r, c), Some(&true));
        assert_eq!(session.flags_placed, 0);
        assert!(session.drain_events().contains(&GameEvent::MineRelocated));
        assert_ne!(session.outcome(), Outcome::Lost);
    }

    #[test]
    fn second_click_on_mine_loses() {
        let mut session = GameSession::with_board(layout(3, 3, &[(2, 2)]), Difficulty::Easy);
        assert_eq!(session.reveal_cell(1, 1), RevealOutcome::Revealed(1));
        assert_eq!(session.reveal_cell(2, 2), RevealOutcome::Exploded);
        assert_eq!(session.outcome(), Outcome::Lost);
        assert!(session.show_all_mines());
        assert!(!session.timer_running());
        assert_eq!(session.reveal_cell(0, 0), RevealOutcome::Ignored);
    }

    #[test]
    fn clearing_board_wins() {
        let mut session = GameSession::with_board(layout(3, 3, &[(2, 2)]), Difficulty::Easy);
        assert_eq!(session.reveal_cell(0, 0), RevealOutcome::Won);
        assert_eq!(session.outcome(), Outcome::Won);
        assert!(!session.timer_running());
        let events = session.drain_events();
        assert_eq!(events.last(), Some(&GameEvent::Victory));
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn flags_block_reveal_and_track_count() {
        let mut session = GameSession::with_board(layout(3, 3, &[(2, 2)]), Difficulty::Easy);
        assert!(session.toggle_flag(1, 1));
        assert_eq!(session.flags_placed, 1);
        assert_eq!(session.remaining_mines(), 0);
        assert_eq!(session.reveal_cell(1, 1), RevealOutcome::Ignored);
        assert!(session.toggle_flag(1, 1));
        assert_eq!(session.flags_placed, 0);
        assert!(!session.toggle_flag(7, 7));
    }

    #[test]
    fn revealed_cells_cannot_be_flagged() {
        let mut session = GameSession::with_board(layout(3, 3, &[(2, 2)]), Difficulty::Easy);
        session.reveal_cell(1, 1);
        assert!(!session.toggle_flag(1, 1));
        assert_eq!(session.flags.get(1, 1), Some(&false));
    }

    #[test]
    fn flood_clears_flags_it_covers() {
        let mut session = GameSession::with_board(layout(4, 4, &[(3, 3)]), Difficulty::Easy);
        session.toggle_flag(0, 3);
        session.reveal_cell(0, 0);
        assert_eq!(session.flags.get(0, 3), Some(&false));
        assert_eq!(session.flags_placed, 0);
        for ((r, c), &f) in session.flags.iter() {
            assert!(!(f && session.revealed.get(r, c) == Some(&true)));
        }
    }

    #[test]
    fn timer_starts_on_first_safe_reveal() {
        let mut session = GameSession::with_board(layout(3, 3, &[(2, 2)]), Difficulty::Medium);
        assert!(!session.timer_running());
        session.reveal_cell(1, 1);
        assert!(session.timer_running());
        assert_eq!(session.score(), 2000);
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut session = GameSession::with_board(layout(2, 2, &[(0, 0)]), Difficulty::Easy);
        assert_eq!(session.reveal_cell(2, 0), RevealOutcome::Ignored);
        assert_eq!(session.reveal_cell(0, 9), RevealOutcome::Ignored);
    }
}
