//! Board state: pawn placements, column fill heights and the side to move.

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use crate::constants::{
    COLS, DIRECTIONS, EMPTY_GLYPH, PLAYER_A_GLYPH, PLAYER_B_GLYPH, ROWS, WIN_LENGTH,
};
use crate::error::{GameError, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Pawn {
    PlayerA,
    PlayerB,
}

impl Pawn {
    pub fn opponent(self) -> Self {
        match self {
            Pawn::PlayerA => Pawn::PlayerB,
            Pawn::PlayerB => Pawn::PlayerA,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Pawn::PlayerA => PLAYER_A_GLYPH,
            Pawn::PlayerB => PLAYER_B_GLYPH,
        }
    }

    /// Decode a cell glyph. Returns `None` for an unknown glyph.
    pub fn from_glyph(ch: char) -> Option<Cell> {
        match ch {
            EMPTY_GLYPH => Some(None),
            PLAYER_A_GLYPH => Some(Some(Pawn::PlayerA)),
            PLAYER_B_GLYPH => Some(Some(Pawn::PlayerB)),
            _ => None,
        }
    }
}

impl FromStr for Pawn {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "0" => Ok(Pawn::PlayerA),
            "1" => Ok(Pawn::PlayerB),
            other => Err(GameError::InvalidPawn(other.to_string())),
        }
    }
}

impl fmt::Display for Pawn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// A cell is either empty or holds a pawn.
pub type Cell = Option<Pawn>;

/// Grid indexed `[row][col]`, row 0 at the bottom.
pub type Grid = [[Cell; COLS]; ROWS];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    turn: Pawn,
    fill: [usize; COLS],
}

impl Board {
    /// An empty board with `turn` to move.
    pub fn new(turn: Pawn) -> Self {
        Self {
            grid: [[None; COLS]; ROWS],
            turn,
            fill: [0; COLS],
        }
    }

    /// Build a board from a grid, deriving the fill heights.
    ///
    /// Fails with [`GameError::FloatingPawn`] if a pawn sits above an empty cell.
    pub fn from_grid(grid: Grid, turn: Pawn) -> Result<Self> {
        let mut fill = [0; COLS];
        for (col, height) in fill.iter_mut().enumerate() {
            *height = (0..ROWS).take_while(|&row| grid[row][col].is_some()).count();
            if let Some(row) = (*height..ROWS).find(|&row| grid[row][col].is_some()) {
                return Err(GameError::FloatingPawn { row, col });
            }
        }
        Ok(Self { grid, turn, fill })
    }

    /// Build a board from a grid and explicit fill heights, which must agree.
    pub fn with_fill(grid: Grid, turn: Pawn, fill: [usize; COLS]) -> Result<Self> {
        let board = Self::from_grid(grid, turn)?;
        if let Some(col) = (0..COLS).find(|&col| board.fill[col] != fill[col]) {
            return Err(GameError::FillMismatch { col });
        }
        Ok(board)
    }

    /// Parse the text format: `ROWS` lines of `COLS` glyphs, top row first.
    pub fn parse(text: &str, turn: Pawn) -> Result<Self> {
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }
        if lines.len() != ROWS {
            return Err(GameError::RowCount(lines.len()));
        }

        let mut grid: Grid = [[None; COLS]; ROWS];
        for (i, line) in lines.iter().enumerate() {
            let row = ROWS - 1 - i;
            let width = line.chars().count();
            if width != COLS {
                return Err(GameError::RowWidth { row, width });
            }
            for (col, glyph) in line.chars().enumerate() {
                grid[row][col] = Pawn::from_glyph(glyph)
                    .ok_or(GameError::MalformedCell { row, col, glyph })?;
            }
        }
        Self::from_grid(grid, turn)
    }

    /// Read and parse a board from any reader.
    pub fn read_from<R: Read>(mut reader: R, turn: Pawn) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text, turn)
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row >= ROWS || col >= COLS {
            return None;
        }
        self.grid[row][col]
    }

    pub fn turn(&self) -> Pawn {
        self.turn
    }

    pub fn fill(&self, col: usize) -> usize {
        self.fill[col]
    }

    /// Number of pawns on the board.
    pub fn pawn_count(&self) -> usize {
        self.fill.iter().sum()
    }

    /// Drop the side to move's pawn into `col` and pass the turn.
    ///
    /// Returns `&mut self` so moves can be chained; a full or out-of-range
    /// column leaves the board untouched.
    pub fn play(&mut self, col: usize) -> Result<&mut Self> {
        if !self.is_valid_move(col) {
            return Err(GameError::IllegalMove(col));
        }
        self.grid[self.fill[col]][col] = Some(self.turn);
        self.fill[col] += 1;
        self.turn = self.turn.opponent();
        Ok(self)
    }

    pub fn is_valid_move(&self, col: usize) -> bool {
        col < COLS && self.fill[col] < ROWS
    }

    /// Playable columns in ascending order.
    pub fn legal_moves(&self) -> impl Iterator<Item = usize> + '_ {
        (0..COLS).filter(|&col| self.is_valid_move(col))
    }

    /// True when no empty cell remains. A full board without a winner is a draw.
    pub fn has_finished(&self) -> bool {
        self.fill.iter().all(|&h| h == ROWS)
    }

    /// The owner of the first run of `WIN_LENGTH` aligned pawns, if any.
    pub fn find_winner(&self) -> Option<Pawn> {
        for row in 0..ROWS {
            for col in 0..COLS {
                let Some(pawn) = self.grid[row][col] else {
                    continue;
                };
                if DIRECTIONS
                    .iter()
                    .any(|&(dr, dc)| self.check_run(row, col, dr, dc, pawn))
                {
                    return Some(pawn);
                }
            }
        }
        None
    }

    fn check_run(&self, row: usize, col: usize, dr: isize, dc: isize, pawn: Pawn) -> bool {
        (1..WIN_LENGTH as isize).all(|i| {
            let r = row as isize + dr * i;
            let c = col as isize + dc * i;
            r >= 0
                && c >= 0
                && (r as usize) < ROWS
                && (c as usize) < COLS
                && self.grid[r as usize][c as usize] == Some(pawn)
        })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.grid.iter().rev() {
            for cell in row {
                let ch = cell.map_or(EMPTY_GLYPH, Pawn::glyph);
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
