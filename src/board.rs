use std::fmt;

use crate::{error::GameError, CELLS, SIZE};

mod static_masks {
    use crate::CELLS;

    pub const fn full_board_mask() -> u64 {
        u64::MAX >> (64 - CELLS)
    }
}

/// One of the two sides of a game
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    fn index(self) -> usize {
        match self {
            Player::X => 0,
            Player::O => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        player.cell()
    }
}

/// A zero-based position in the cube
///
/// Cells are stored with `x` varying fastest, then `y`, then `z` (the layer).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Coord {
    /// Creates a coordinate without checking that it lies inside the cube
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Creates a coordinate, failing if any axis is outside `[0, SIZE)`
    pub fn checked(x: usize, y: usize, z: usize) -> Result<Self, GameError> {
        let coord = Self::new(x, y, z);
        if coord.in_range() {
            Ok(coord)
        } else {
            Err(GameError::out_of_range(coord))
        }
    }

    /// Creates a coordinate from the 1-based values players type in
    pub fn from_one_based(x: usize, y: usize, z: usize) -> Result<Self, GameError> {
        match (x.checked_sub(1), y.checked_sub(1), z.checked_sub(1)) {
            (Some(x0), Some(y0), Some(z0)) if Self::new(x0, y0, z0).in_range() => {
                Ok(Self::new(x0, y0, z0))
            }
            _ => Err(GameError::OutOfRangeCoordinate { x, y, z }),
        }
    }

    pub const fn from_index(index: usize) -> Self {
        Self {
            x: index % SIZE,
            y: (index / SIZE) % SIZE,
            z: index / (SIZE * SIZE),
        }
    }

    pub fn in_range(&self) -> bool {
        self.x < SIZE && self.y < SIZE && self.z < SIZE
    }

    pub(crate) const fn index(&self) -> usize {
        self.x + self.y * SIZE + self.z * SIZE * SIZE
    }

    pub(crate) const fn bit(&self) -> u64 {
        1 << self.index()
    }

    /// Closeness to the centre of the cube, higher is closer
    pub fn priority(&self) -> Result<i32, GameError> {
        if self.in_range() {
            Ok(priority(self.index()))
        } else {
            Err(GameError::out_of_range(*self))
        }
    }

    /// Whether this is one of the 8 cells surrounding the geometric centre
    pub fn is_central(&self) -> bool {
        self.priority() == Ok(MAX_PRIORITY)
    }

    pub fn one_based(&self) -> (usize, usize, usize) {
        (self.x + 1, self.y + 1, self.z + 1)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y, z) = self.one_based();
        write!(f, "({}, {}, {})", x, y, z)
    }
}

// doubled distances keep the centre, which falls between cells, on integers
const fn priority(index: usize) -> i32 {
    let coord = Coord::from_index(index);
    let far = SIZE as i32 - 1;
    -((2 * coord.x as i32 - far).abs()
        + (2 * coord.y as i32 - far).abs()
        + (2 * coord.z as i32 - far).abs())
}

const MAX_PRIORITY: i32 = priority(Coord::new(SIZE / 2, SIZE / 2, SIZE / 2).index());

/// Returns every cell index ordered from the centre of the cube outwards,
/// as central cells take part in the most winning lines.
/// Cells of equal priority keep their raster order.
pub const fn move_order() -> [usize; CELLS] {
    let mut order = [0; CELLS];
    let mut i = 0;
    while i < CELLS {
        // insertion sort, stable for equal priorities
        let mut pos = i;
        while pos != 0 && priority(order[pos - 1]) < priority(i) {
            order[pos] = order[pos - 1];
            pos -= 1;
        }
        order[pos] = i;
        i += 1;
    }
    order
}

static MOVE_ORDER: [usize; CELLS] = move_order();

/// A candidate move: a cell plus its ordering priority
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Move {
    pub coord: Coord,
    pub priority: i32,
}

impl Move {
    fn from_index(index: usize) -> Self {
        Self {
            coord: Coord::from_index(index),
            priority: priority(index),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
pub struct Board {
    // one mask of occupied cells per player, bit `index` for each cell
    masks: [u64; 2],
}

impl Board {
    pub fn new() -> Self {
        Self { masks: [0; 2] }
    }

    /// Parses a board from `CELLS` characters in storage order (whitespace is
    /// ignored), using `X`, `O` and `-` or `.` for empty cells
    pub fn from_layout<S: AsRef<str>>(layout: S) -> Result<Self, GameError> {
        let mut board = Self::new();
        let mut index = 0;

        for symbol in layout.as_ref().chars().filter(|c| !c.is_whitespace()) {
            if index >= CELLS {
                return Err(GameError::InvalidLayout(format!(
                    "more than {} cells given",
                    CELLS
                )));
            }
            let cell = match symbol {
                'X' | 'x' => Cell::X,
                'O' | 'o' => Cell::O,
                '-' | '.' => Cell::Empty,
                _ => {
                    return Err(GameError::InvalidLayout(format!(
                        "could not parse '{}' as a cell",
                        symbol
                    )))
                }
            };
            board.write(index, cell);
            index += 1;
        }
        if index != CELLS {
            return Err(GameError::InvalidLayout(format!(
                "expected {} cells, found {}",
                CELLS, index
            )));
        }
        Ok(board)
    }

    /// The board in the format read by [`Board::from_layout`]
    pub fn layout(&self) -> String {
        (0..CELLS).map(|index| self.read(index).symbol()).collect()
    }

    pub fn cell_at(&self, coord: Coord) -> Result<Cell, GameError> {
        Self::check_range(coord)?;
        Ok(self.read(coord.index()))
    }

    /// Writes a cell without checking that it was empty, which is the
    /// caller's responsibility
    pub fn set_cell(&mut self, coord: Coord, cell: Cell) -> Result<(), GameError> {
        Self::check_range(coord)?;
        self.write(coord.index(), cell);
        Ok(())
    }

    pub fn is_empty(&self, coord: Coord) -> Result<bool, GameError> {
        Ok(self.cell_at(coord)?.is_empty())
    }

    /// All empty cells, most central first
    pub fn empty_cells(&self) -> Vec<Coord> {
        self.candidate_moves().map(|m| m.coord).collect()
    }

    /// The empty cells as moves, most central first
    ///
    /// The iterator works from a snapshot of the board, so the board can be
    /// modified while iterating.
    pub fn candidate_moves(&self) -> impl Iterator<Item = Move> {
        let occupied = self.board_mask();
        MOVE_ORDER
            .iter()
            .filter(move |&&index| occupied & (1 << index) == 0)
            .map(|&index| Move::from_index(index))
    }

    pub fn is_full(&self) -> bool {
        self.board_mask() == static_masks::full_board_mask()
    }

    pub fn num_moves(&self) -> usize {
        self.board_mask().count_ones() as usize
    }

    pub fn count(&self, player: Player) -> usize {
        self.masks[player.index()].count_ones() as usize
    }

    pub fn clear(&mut self) {
        self.masks = [0; 2];
    }

    pub fn player_mask(&self, player: Player) -> u64 {
        self.masks[player.index()]
    }

    pub fn board_mask(&self) -> u64 {
        self.masks[0] | self.masks[1]
    }

    // unchecked accessors for the search, which only ever visits reported empty cells
    pub(crate) fn play(&mut self, coord: Coord, player: Player) {
        self.masks[player.index()] |= coord.bit();
    }

    pub(crate) fn undo(&mut self, coord: Coord) {
        let keep = !coord.bit();
        self.masks[0] &= keep;
        self.masks[1] &= keep;
    }

    fn read(&self, index: usize) -> Cell {
        let bit = 1 << index;
        if self.masks[0] & bit != 0 {
            Cell::X
        } else if self.masks[1] & bit != 0 {
            Cell::O
        } else {
            Cell::Empty
        }
    }

    fn write(&mut self, index: usize, cell: Cell) {
        let coord = Coord::from_index(index);
        self.undo(coord);
        if let Some(player) = cell.player() {
            self.play(coord, player);
        }
    }

    fn check_range(coord: Coord) -> Result<(), GameError> {
        if coord.in_range() {
            Ok(())
        } else {
            Err(GameError::out_of_range(coord))
        }
    }
}
