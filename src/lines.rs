//! The catalog of winning lines and win detection
//!
//! A line is any `SIZE` collinear cells that span the cube: the rows,
//! columns and pillars along each axis, the two diagonals of every slice
//! perpendicular to an axis, and the four space diagonals joining opposite
//! corners. For a 4x4x4 cube that is 48 + 24 + 4 = 76 lines.

use once_cell::sync::Lazy;

use crate::{
    board::{Board, Coord, Player},
    CELLS, SIZE,
};

/// The number of winning lines in the cube
pub const NUM_LINES: usize = 3 * SIZE * SIZE + 6 * SIZE + 4;

static CATALOG: Lazy<LineCatalog> = Lazy::new(LineCatalog::build);

/// One winning line, with its cells in order from one end to the other
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Line {
    cells: [Coord; SIZE],
    mask: u64,
}

impl Line {
    fn new(start: [i32; 3], step: [i32; 3]) -> Self {
        let mut cells = [Coord::new(0, 0, 0); SIZE];
        let mut mask = 0;
        for (i, cell) in cells.iter_mut().enumerate() {
            let i = i as i32;
            *cell = Coord::new(
                (start[0] + i * step[0]) as usize,
                (start[1] + i * step[1]) as usize,
                (start[2] + i * step[2]) as usize,
            );
            mask |= cell.bit();
        }
        Self { cells, mask }
    }

    pub fn cells(&self) -> &[Coord; SIZE] {
        &self.cells
    }

    /// Bitmap of the line's cells, in the board's storage order
    pub fn mask(&self) -> u64 {
        self.mask
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.in_range() && self.mask & coord.bit() != 0
    }

    /// Whether `player` owns every cell of the line
    pub fn is_owned_by(&self, board: &Board, player: Player) -> bool {
        board.player_mask(player) & self.mask == self.mask
    }
}

/// Every winning line, built once and shared for the life of the process
pub struct LineCatalog {
    lines: Vec<Line>,
    // indices into `lines` of the lines through each cell
    through: Vec<Vec<usize>>,
}

impl LineCatalog {
    fn build() -> Self {
        let far = SIZE as i32 - 1;
        let mut lines = Vec::with_capacity(NUM_LINES);

        // rows, columns and pillars
        for a in 0..SIZE as i32 {
            for b in 0..SIZE as i32 {
                lines.push(Line::new([0, a, b], [1, 0, 0]));
                lines.push(Line::new([a, 0, b], [0, 1, 0]));
                lines.push(Line::new([a, b, 0], [0, 0, 1]));
            }
        }

        // diagonals within each slice, for slices perpendicular to z, y then x
        for layer in 0..SIZE as i32 {
            lines.push(Line::new([0, 0, layer], [1, 1, 0]));
            lines.push(Line::new([0, far, layer], [1, -1, 0]));
        }
        for layer in 0..SIZE as i32 {
            lines.push(Line::new([0, layer, 0], [1, 0, 1]));
            lines.push(Line::new([0, layer, far], [1, 0, -1]));
        }
        for layer in 0..SIZE as i32 {
            lines.push(Line::new([layer, 0, 0], [0, 1, 1]));
            lines.push(Line::new([layer, 0, far], [0, 1, -1]));
        }

        // corner to corner through the middle of the cube
        lines.push(Line::new([0, 0, 0], [1, 1, 1]));
        lines.push(Line::new([0, far, 0], [1, -1, 1]));
        lines.push(Line::new([far, 0, 0], [-1, 1, 1]));
        lines.push(Line::new([far, far, 0], [-1, -1, 1]));

        let mut through = vec![Vec::new(); CELLS];
        for (i, line) in lines.iter().enumerate() {
            for cell in line.cells.iter() {
                through[cell.index()].push(i);
            }
        }

        Self { lines, through }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The lines passing through one cell, in catalog order
    pub fn lines_through(&self, coord: Coord) -> impl Iterator<Item = &Line> + '_ {
        let indices: &[usize] = if coord.in_range() {
            &self.through[coord.index()]
        } else {
            &[]
        };
        indices.iter().map(move |&i| &self.lines[i])
    }
}

/// The shared line catalog
pub fn catalog() -> &'static LineCatalog {
    &CATALOG
}

/// Returns the first line in catalog order that `player` fully occupies
pub fn has_win(board: &Board, player: Player) -> Option<&'static Line> {
    CATALOG
        .lines
        .iter()
        .find(|line| line.is_owned_by(board, player))
}

/// Checks only the lines through `coord`, for use right after a move there
pub fn winning_line_through(board: &Board, player: Player, coord: Coord) -> Option<&'static Line> {
    CATALOG
        .lines_through(coord)
        .find(|line| line.is_owned_by(board, player))
}

/// A full board where neither player owns a line
pub fn is_draw(board: &Board) -> bool {
    board.is_full() && has_win(board, Player::X).is_none() && has_win(board, Player::O).is_none()
}
