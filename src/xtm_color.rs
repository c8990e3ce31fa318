use ratatui::style::Color;
use term_color_support::ColorSupport;

/// Colour depth the terminal can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    TrueColor,
    Ansi256,
    Basic,
}

/// Game colours resolved for the current terminal.
/// Every entry carries an exact RGB value, a stable 256-colour index and a basic ANSI fallback.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    depth: Depth,
}

// Format: ((R, G, B), ANSI_256_Index, basic 16-colour fallback)
type Swatch = ((u8, u8, u8), u8, Color);

const NUMBERS: [Swatch; 8] = [
    ((59, 120, 255), 63, Color::LightBlue),   // 1
    ((19, 161, 14), 28, Color::Green),        // 2
    ((231, 72, 86), 203, Color::LightRed),    // 3
    ((0, 55, 218), 20, Color::Blue),          // 4
    ((197, 15, 31), 160, Color::Red),         // 5
    ((58, 150, 221), 38, Color::Cyan),        // 6
    ((180, 0, 158), 163, Color::Magenta),     // 7
    ((204, 204, 204), 250, Color::Gray),      // 8
];

const PODIUM: [Swatch; 3] = [
    ((255, 215, 0), 220, Color::Yellow),      // gold
    ((192, 192, 192), 250, Color::Gray),      // silver
    ((205, 127, 50), 173, Color::LightRed),   // bronze
];

const BOARD_BG: Swatch = ((118, 118, 118), 243, Color::DarkGray);
const HIDDEN: Swatch = ((204, 204, 204), 250, Color::Gray);
const MINE: Swatch = ((12, 12, 12), 232, Color::Black);
const FLAG: Swatch = ((197, 15, 31), 160, Color::Red);
const CURSOR: Swatch = ((59, 120, 255), 63, Color::LightBlue);
const ACCENT: Swatch = ((193, 156, 0), 178, Color::Yellow);
const PRESSED: Swatch = ((19, 161, 14), 28, Color::Green);
const WIN_BG: Swatch = ((66, 245, 69), 83, Color::LightGreen);
const LOSS_BG: Swatch = ((197, 15, 31), 160, Color::Red);
const TEXT: Swatch = ((242, 242, 242), 255, Color::White);
const INK: Swatch = ((12, 12, 12), 232, Color::Black);

impl Palette {
    /// Probe stdout for colour support
    pub fn detect() -> Self {
        let support = ColorSupport::stdout();
        let depth = if support.has_16m {
            Depth::TrueColor
        } else if support.has_256 {
            Depth::Ansi256
        } else {
            Depth::Basic
        };
        Palette { depth }
    }

    fn pick(&self, swatch: Swatch) -> Color {
        let ((r, g, b), index256, basic) = swatch;
        match self.depth {
            Depth::TrueColor => Color::Rgb(r, g, b),
            Depth::Ansi256 => Color::Indexed(index256),
            Depth::Basic => basic,
        }
    }

    /// Colour for an adjacency count 1..=8
    pub fn number(&self, n: u8) -> Color {
        let i = (n.clamp(1, 8) - 1) as usize;
        self.pick(NUMBERS[i])
    }

    /// Colour for places 1-3 on the score table
    pub fn podium(&self, place: usize) -> Option<Color> {
        place.checked_sub(1).and_then(|i| PODIUM.get(i)).map(|s| self.pick(*s))
    }

    pub fn board_bg(&self) -> Color { self.pick(BOARD_BG) }
    pub fn hidden(&self) -> Color { self.pick(HIDDEN) }
    pub fn mine(&self) -> Color { self.pick(MINE) }
    pub fn flag(&self) -> Color { self.pick(FLAG) }
    pub fn cursor(&self) -> Color { self.pick(CURSOR) }
    pub fn accent(&self) -> Color { self.pick(ACCENT) }
    pub fn pressed(&self) -> Color { self.pick(PRESSED) }
    pub fn win_bg(&self) -> Color { self.pick(WIN_BG) }
    pub fn loss_bg(&self) -> Color { self.pick(LOSS_BG) }
    pub fn text(&self) -> Color { self.pick(TEXT) }
    pub fn ink(&self) -> Color { self.pick(INK) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_selects_representation() {
        assert_eq!(Palette { depth: Depth::TrueColor }.number(1), Color::Rgb(59, 120, 255));
        assert_eq!(Palette { depth: Depth::Ansi256 }.number(1), Color::Indexed(63));
        assert_eq!(Palette { depth: Depth::Basic }.number(1), Color::LightBlue);
    }

    #[test]
    fn podium_covers_top_three_only() {
        let p = Palette { depth: Depth::Basic };
        assert_eq!(p.podium(1), Some(Color::Yellow));
        assert_eq!(p.podium(3), Some(Color::LightRed));
        assert_eq!(p.podium(0), None);
        assert_eq!(p.podium(4), None);
    }

    #[test]
    fn out_of_range_counts_are_clamped() {
        let p = Palette { depth: Depth::Basic };
        assert_eq!(p.number(0), p.number(1));
        assert_eq!(p.number(9), p.number(8));
    }
}
