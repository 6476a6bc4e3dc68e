//! Square output grid of cell codes handed to the renderer

use super::types::CellCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<CellCode>,
}

impl Grid {
    pub fn filled(size: usize, fill: CellCode) -> Self {
        Self {
            size,
            cells: vec![fill; size * size],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<CellCode> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells.get(row * self.size + col).copied()
    }

    /// Write a cell; out of range writes are ignored
    pub fn set(&mut self, row: usize, col: usize, code: CellCode) {
        if row < self.size && col < self.size {
            self.cells[row * self.size + col] = code;
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellCode]> {
        self.cells.chunks(self.size.max(1))
    }

    /// Raw integer codes, row by row
    pub fn to_codes(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|cell| cell.code()).collect())
            .collect()
    }

    pub fn count(&self, code: CellCode) -> usize {
        self.cells.iter().filter(|&&cell| cell == code).count()
    }

    /// One line of symbols per row
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for row in self.rows() {
            out.extend(row.iter().map(|cell| cell.symbol()));
            out.push('\n');
        }
        out
    }
}
