//! Snapshot grids.
//!
//! Raw simulation values share one numeric domain: negative sentinels encode
//! terrain and non-negative values encode pheromone intensity. Values are
//! classified once, when a grid is parsed, so nothing downstream ever handles
//! an unknown code.

use crate::replay::error::GridError;

impl GridError {
    /// Rewrites a row index into a source line number.
    fn at_line(self, line: impl Fn(usize) -> usize) -> Self {
        match self {
            GridError::Ragged {
                row,
                expected,
                found,
            } => GridError::Ragged {
                row: line(row),
                expected,
                found,
            },
            GridError::InvalidNumber { row, col, text } => GridError::InvalidNumber {
                row: line(row),
                col,
                text,
            },
            GridError::InvalidValue { row, col, value } => GridError::InvalidValue {
                row: line(row),
                col,
                value,
            },
            GridError::Empty => GridError::Empty,
        }
    }
}

/// Fixed terrain categories written by the simulation engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Terrain {
    Wall,
    Food,
    Nest,
}

impl Terrain {
    pub const ALL: [Terrain; 3] = [Terrain::Wall, Terrain::Food, Terrain::Nest];

    /// Sentinel value used for this terrain in snapshot files.
    #[must_use]
    pub fn code(self) -> f64 {
        match self {
            Terrain::Wall => -1.0,
            Terrain::Food => -2.0,
            Terrain::Nest => -3.0,
        }
    }

    #[must_use]
    #[allow(clippy::float_cmp)] // Sentinels are written as exact integers
    pub fn from_code(value: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == value)
    }
}

/// A classified cell: either terrain or a pheromone intensity `>= 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell {
    Structural(Terrain),
    Intensity(f64),
}

impl Cell {
    /// Classifies a raw value, returning `None` for anything outside both domains.
    #[must_use]
    pub fn classify(value: f64) -> Option<Self> {
        if value.is_finite() && value >= 0.0 {
            Some(Cell::Intensity(value))
        } else {
            Terrain::from_code(value).map(Cell::Structural)
        }
    }
}

/// Immutable row-major grid of classified cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid from raw rows, validating shape and every value.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, GridError> {
        let width = rows.first().map(Vec::len).ok_or(GridError::Empty)?;
        if width == 0 {
            return Err(GridError::Empty);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, values) in rows.iter().enumerate() {
            if values.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                let cell = Cell::classify(value).ok_or(GridError::InvalidValue { row, col, value })?;
                cells.push(cell);
            }
        }

        Ok(Self {
            width,
            height: rows.len(),
            cells,
        })
    }

    /// Parses comma-separated rows, one per line. Blank lines are skipped.
    ///
    /// Row numbers in errors are zero-based line numbers of `text`.
    pub fn parse_csv(text: &str) -> Result<Self, GridError> {
        let lines: Vec<(usize, &str)> = text
            .lines()
            .map(str::trim)
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .collect();

        let rows = lines
            .iter()
            .map(|&(row, line)| {
                line.split(',')
                    .enumerate()
                    .map(|(col, field)| {
                        let field = field.trim();
                        field.parse::<f64>().map_err(|_| GridError::InvalidNumber {
                            row,
                            col,
                            text: field.to_owned(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_rows(&rows).map_err(|err| err.at_line(|row| lines[row].0))
    }

    /// Returns the grid with rows and columns swapped.
    #[must_use]
    pub fn transposed(&self) -> Self {
        let mut cells = Vec::with_capacity(self.cells.len());
        for col in 0..self.width {
            for row in 0..self.height {
                cells.push(self.cells[row * self.width + col]);
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.height && col < self.width {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Cells of one row, left to right; `None` past the last row.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row < self.height {
            Some(&self.cells[row * self.width..(row + 1) * self.width])
        } else {
            None
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
