// Reveal engine: flood-fill opening of cells and the victory check

use crate::xtm_board::{AdjacencyGrid, Grid, MineGrid};

pub type RevealedGrid = Grid<bool>;

/// Open the cell at (row, col), cascading through zero-count regions.
///
/// Mines and already-open cells are left alone; the caller decides what a
/// mine click means. Returns how many cells were newly opened.
pub fn reveal(revealed: &mut RevealedGrid, adjacency: &AdjacencyGrid, row: usize, col: usize) -> usize {
    let mut opened = 0;
    let mut pending = vec![(row, col)];
    while let Some((r, c)) = pending.pop() {
        let Some(cell) = adjacency.get(r, c).copied() else {
            continue;
        };
        if cell.is_mine() || revealed.get(r, c).copied().unwrap_or(true) {
            continue;
        }
        revealed.set(r, c, true);
        opened += 1;
        if cell.count() == Some(0) {
            pending.extend(
                adjacency
                    .neighbors(r, c)
                    .filter(|&(nr, nc)| !revealed.get(nr, nc).copied().unwrap_or(true)),
            );
        }
    }
    opened
}

/// True once every mine-free cell is open, whatever the flags say
pub fn check_victory(revealed: &RevealedGrid, mines: &MineGrid) -> bool {
    mines
        .iter()
        .all(|((r, c), &mined)| mined || revealed.get(r, c).copied().unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xtm_board::{compute_adjacency, Adjacency};

    fn board(rows: usize, cols: usize, coords: &[(usize, usize)]) -> (MineGrid, AdjacencyGrid) {
        let mut mines = Grid::filled(rows, cols, false);
        for &(r, c) in coords {
            mines.set(r, c, true);
        }
        let adjacency = compute_adjacency(&mines);
        (mines, adjacency)
    }

    #[test]
    fn empty_board_opens_in_one_call() {
        let (_, adjacency) = board(24, 24, &[]);
        let mut revealed = Grid::filled(24, 24, false);
        assert_eq!(reveal(&mut revealed, &adjacency, 10, 3), 24 * 24);
        assert_eq!(revealed.count(|v| *v), 24 * 24);
    }

    #[test]
    fn reveal_is_idempotent() {
        let (_, adjacency) = board(5, 5, &[(4, 4), (0, 4)]);
        let mut once = Grid::filled(5, 5, false);
        reveal(&mut once, &adjacency, 0, 0);
        let mut twice = once.clone();
        assert_eq!(reveal(&mut twice, &adjacency, 0, 0), 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn numbered_cell_does_not_expand() {
        let (_, adjacency) = board(3, 3, &[(0, 0)]);
        let mut revealed = Grid::filled(3, 3, false);
        assert_eq!(adjacency.get(1, 1), Some(&Adjacency::Count(1)));
        assert_eq!(reveal(&mut revealed, &adjacency, 1, 1), 1);
        assert_eq!(revealed.count(|v| *v), 1);
    }

    #[test]
    fn flood_stops_at_numbers_and_skips_mines() {
        // mine in the middle column splits nothing: zeros on the left open up to the numbers
        let (mines, adjacency) = board(3, 5, &[(1, 2)]);
        let mut revealed = Grid::filled(3, 5, false);
        reveal(&mut revealed, &adjacency, 1, 0);
        assert_eq!(revealed.get(1, 1), Some(&true)); // count 1, shown
        assert_eq!(revealed.get(1, 2), Some(&false)); // mine
        assert_eq!(revealed.get(1, 4), Some(&false)); // other side, not reached
        assert!(!check_victory(&revealed, &mines));
    }

    #[test]
    fn reveal_on_mine_is_ignored() {
        let (_, adjacency) = board(2, 2, &[(0, 0)]);
        let mut revealed = Grid::filled(2, 2, false);
        assert_eq!(reveal(&mut revealed, &adjacency, 0, 0), 0);
        assert_eq!(revealed.count(|v| *v), 0);
    }

    #[test]
    fn victory_requires_every_safe_cell() {
        let (mines, adjacency) = board(3, 3, &[(2, 2)]);
        let mut revealed = Grid::filled(3, 3, false);
        assert!(!check_victory(&revealed, &mines));

        // exactly one safe cell
        assert_eq!(reveal(&mut revealed, &adjacency, 1, 1), 1);
        assert!(!check_victory(&revealed, &mines));

        // all but one safe cell
        for ((r, c), _) in adjacency.iter() {
            if (r, c) != (2, 2) && (r, c) != (2, 1) {
                revealed.set(r, c, true);
            }
        }
        assert!(!check_victory(&revealed, &mines));

        revealed.set(2, 1, true);
        assert!(check_victory(&revealed, &mines));
    }

    #[test]
    fn flood_from_corner_wins_single_mine_board() {
        let (mines, adjacency) = board(3, 3, &[(2, 2)]);
        let mut revealed = Grid::filled(3, 3, false);
        reveal(&mut revealed, &adjacency, 0, 0);
        assert!(check_victory(&revealed, &mines));
        assert_eq!(revealed.get(2, 2), Some(&false));
    }

    #[test]
    fn single_cell_board_without_mines_wins_on_first_reveal() {
        let (mines, adjacency) = board(1, 1, &[]);
        let mut revealed = Grid::filled(1, 1, false);
        assert!(!check_victory(&revealed, &mines));
        assert_eq!(reveal(&mut revealed, &adjacency, 0, 0), 1);
        assert!(check_victory(&revealed, &mines));
    }
}
