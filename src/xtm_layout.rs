// Screen geometry: board placement, cell size and pointer-to-cell mapping
// Pure arithmetic on terminal cells, kept apart from the game rules

use ratatui::layout::Rect;

pub const PREFERRED_CELL_W: u16 = 3; // " 1 "
pub const MIN_CELL_W: u16 = 2;       // "1 "
pub const MARGIN: u16 = 1;           // gap kept around the bordered board

/// Where the board's cells sit on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    pub origin_x: u16, // first cell column, inside the border
    pub origin_y: u16,
    pub cell_w: u16,
    pub rows: usize,
    pub cols: usize,
}

impl BoardGeometry {
    /// Largest cell width that fits `area`, centered in it
    pub fn fit(area: Rect, rows: usize, cols: usize) -> BoardGeometry {
        let chrome = 2 * MARGIN + 2; // margin plus border on both sides
        let avail_w = area.width.saturating_sub(chrome);
        let mut cell_w = PREFERRED_CELL_W;
        while cell_w > MIN_CELL_W && (cols as u16).saturating_mul(cell_w) > avail_w {
            cell_w -= 1;
        }
        let board_w = (cols as u16).saturating_mul(cell_w);
        let board_h = rows as u16;
        BoardGeometry {
            origin_x: area.x + area.width.saturating_sub(board_w) / 2,
            origin_y: area.y + area.height.saturating_sub(board_h) / 2,
            cell_w,
            rows,
            cols,
        }
    }

    /// Area covered by the cells
    pub fn inner(&self) -> Rect {
        Rect::new(
            self.origin_x,
            self.origin_y,
            (self.cols as u16).saturating_mul(self.cell_w),
            self.rows as u16,
        )
    }

    /// Cells plus the surrounding border
    pub fn outer(&self) -> Rect {
        let inner = self.inner();
        Rect::new(
            inner.x.saturating_sub(1),
            inner.y.saturating_sub(1),
            inner.width + 2,
            inner.height + 2,
        )
    }

    /// Board cell under a terminal position, as (row, col)
    pub fn cell_at(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        if column < self.origin_x || row < self.origin_y || self.cell_w == 0 {
            return None;
        }
        let c = ((column - self.origin_x) / self.cell_w) as usize;
        let r = (row - self.origin_y) as usize;
        if r < self.rows && c < self.cols { Some((r, c)) } else { None }
    }
}

pub fn contains(r: Rect, column: u16, row: u16) -> bool {
    column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
}

pub fn center_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

pub fn bottom_centered_block(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + r.height.saturating_sub(height);
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_area_uses_preferred_cells() {
        let g = BoardGeometry::fit(Rect::new(0, 0, 60, 20), 8, 8);
        assert_eq!(g.cell_w, 3);
        assert_eq!(g.inner(), Rect::new(18, 6, 24, 8));
        assert_eq!(g.outer(), Rect::new(17, 5, 26, 10));
    }

    #[test]
    fn narrow_area_shrinks_cells() {
        let g = BoardGeometry::fit(Rect::new(0, 0, 60, 30), 24, 24);
        assert_eq!(g.cell_w, 2);
        assert_eq!(g.inner().width, 48);
    }

    #[test]
    fn pointer_maps_to_cells() {
        let g = BoardGeometry::fit(Rect::new(0, 0, 60, 20), 8, 8);
        assert_eq!(g.cell_at(18, 6), Some((0, 0)));
        assert_eq!(g.cell_at(20, 6), Some((0, 0)));
        assert_eq!(g.cell_at(21, 7), Some((1, 1)));
        assert_eq!(g.cell_at(41, 13), Some((7, 7)));
        assert_eq!(g.cell_at(17, 6), None);
        assert_eq!(g.cell_at(42, 6), None);
        assert_eq!(g.cell_at(18, 14), None);
    }

    #[test]
    fn centered_blocks_stay_inside() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(center_rect(10, 4, area), Rect::new(5, 3, 10, 4));
        assert_eq!(bottom_centered_block(10, 4, area), Rect::new(5, 6, 10, 4));
        assert_eq!(center_rect(40, 40, area), area);
        assert!(contains(area, 19, 9));
        assert!(!contains(area, 20, 9));
    }
}
