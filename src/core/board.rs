//! 9x9 NoGo board and move legality
//!
//! NoGo uses Go placement with inverted capture semantics: a move is
//! illegal if it would leave the placed stone's group without a liberty
//! (suicide) or remove the last liberty of any adjacent enemy group
//! (capture). There is no passing; the first player without a legal
//! placement loses.

use anyhow::{bail, Result};
use std::fmt;
use std::str::FromStr;

use super::side::Side;

pub const SIZE: usize = 9;
pub const AREA: usize = SIZE * SIZE;

/// Board state: cell contents plus whose turn it is
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Side>; AREA],
    to_move: Side,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; AREA],
            to_move: Side::Black,
        }
    }

    pub fn side_to_move(&self) -> Side {
        self.to_move
    }

    pub fn set_side_to_move(&mut self, side: Side) {
        self.to_move = side;
    }

    /// Cell contents by coordinate; `None` for off-board coordinates
    pub fn cell(&self, x: i32, y: i32) -> Option<Option<Side>> {
        if x < 0 || x >= SIZE as i32 || y < 0 || y >= SIZE as i32 {
            return None;
        }
        Some(self.cells[y as usize * SIZE + x as usize])
    }

    pub fn stone(&self, pos: usize) -> Option<Side> {
        self.cells[pos]
    }

    /// Whether `side` may place at `pos` under the NoGo rules
    pub fn legal(&self, pos: usize, side: Side) -> bool {
        if pos >= AREA || self.cells[pos].is_some() {
            return false;
        }

        let mut after = *self;
        after.cells[pos] = Some(side);

        // suicide: the placed stone's own group must keep a liberty
        if !after.group_has_liberty(pos) {
            return false;
        }

        // capture: every adjacent enemy group must keep a liberty
        for n in neighbors(pos) {
            if after.cells[n] == Some(!side) && !after.group_has_liberty(n) {
                return false;
            }
        }

        true
    }

    /// Place a stone for the side to move; flips the turn on success.
    /// An illegal placement leaves the board untouched and returns false.
    pub fn place(&mut self, pos: usize) -> bool {
        if !self.legal(pos, self.to_move) {
            return false;
        }
        self.cells[pos] = Some(self.to_move);
        self.to_move = !self.to_move;
        true
    }

    /// Unchecked placement without a turn flip; scratch-copy use only
    pub(crate) fn put(&mut self, pos: usize, side: Side) {
        self.cells[pos] = Some(side);
    }

    pub fn legal_moves(&self, side: Side) -> usize {
        (0..AREA).filter(|&pos| self.legal(pos, side)).count()
    }

    pub fn has_legal_move(&self, side: Side) -> bool {
        (0..AREA).any(|pos| self.legal(pos, side))
    }

    fn group_has_liberty(&self, start: usize) -> bool {
        let color = match self.cells[start] {
            Some(color) => color,
            None => return true,
        };

        let mut seen = [false; AREA];
        let mut stack = vec![start];
        seen[start] = true;

        while let Some(pos) = stack.pop() {
            for n in neighbors(pos) {
                match self.cells[n] {
                    None => return true,
                    Some(c) if c == color && !seen[n] => {
                        seen[n] = true;
                        stack.push(n);
                    }
                    _ => {}
                }
            }
        }

        false
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Orthogonal neighbors of a cell
pub fn neighbors(pos: usize) -> impl Iterator<Item = usize> {
    let (x, y) = (pos % SIZE, pos / SIZE);
    [
        (x > 0).then(|| pos - 1),
        (x + 1 < SIZE).then(|| pos + 1),
        (y > 0).then(|| pos - SIZE),
        (y + 1 < SIZE).then(|| pos + SIZE),
    ]
    .into_iter()
    .flatten()
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..SIZE {
            for x in 0..SIZE {
                let c = match self.cells[y * SIZE + x] {
                    None => '.',
                    Some(Side::Black) => 'x',
                    Some(Side::White) => 'o',
                };
                write!(f, "{}", c)?;
                if x + 1 < SIZE {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;

    /// Parse a fixture grid: `.` empty, `x` black, `o` white, whitespace
    /// ignored. Black to move by default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [None; AREA];
        let mut i = 0;
        for token in s.chars().filter(|c| !c.is_whitespace()) {
            if i >= AREA {
                bail!("Too many cells in board fixture");
            }
            cells[i] = match token {
                '.' => None,
                'x' | 'X' => Some(Side::Black),
                'o' | 'O' => Some(Side::White),
                _ => bail!("Unknown board cell: {}", token),
            };
            i += 1;
        }
        if i != AREA {
            bail!("Expected {} cells in board fixture, got {}", AREA, i);
        }
        Ok(Self {
            cells,
            to_move: Side::Black,
        })
    }
}
