use crate::state::{Position, TileNumber};

/// Classified view of a raw map cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    /// `0`: nothing here, always passable.
    Empty,
    /// `-2`: parsed; the payload lives in the block registry.
    Resolved,
    /// A dictionary tile id.
    Tile(TileNumber),
    /// Any other negative value.
    Invalid(i32),
}

impl Cell {
    pub const EMPTY: i32 = 0;
    pub const RESOLVED: i32 = -2;

    pub fn classify(raw: i32) -> Self {
        match raw {
            Self::EMPTY => Self::Empty,
            Self::RESOLVED => Self::Resolved,
            raw => match u32::try_from(raw) {
                Ok(number) => Self::Tile(TileNumber(number)),
                Err(_) => Self::Invalid(raw),
            },
        }
    }
}

/// One layer's row-major grid of raw tile ids.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct LayerGrid {
    rows: Vec<Vec<i32>>,
}

impl LayerGrid {
    pub fn new(rows: Vec<Vec<i32>>) -> Self {
        Self { rows }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<i32>] {
        &self.rows
    }

    /// Index of the first row whose length differs from the first row.
    pub(crate) fn ragged_row(&self) -> Option<(usize, usize)> {
        let width = self.width();
        self.rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != width)
            .map(|(index, row)| (index, row.len()))
    }

    fn index(position: Position) -> Option<(usize, usize)> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        Some((x, y))
    }

    pub fn get(&self, position: Position) -> Option<i32> {
        let (x, y) = Self::index(position)?;
        self.rows.get(y)?.get(x).copied()
    }

    pub fn cell(&self, position: Position) -> Option<Cell> {
        self.get(position).map(Cell::classify)
    }

    /// Writes a raw value; returns false when the position is outside the grid.
    pub fn set(&mut self, position: Position, value: i32) -> bool {
        let Some((x, y)) = Self::index(position) else {
            return false;
        };
        match self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Row-major iteration over every cell.
    pub fn cells(&self) -> impl Iterator<Item = (Position, i32)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .map(move |(x, raw)| (Position::new(x as i32, y as i32), *raw))
        })
    }
}
