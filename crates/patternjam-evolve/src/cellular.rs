//! Cellular strategy: Conway-rule evolution on a 2-D boolean grid.

use patternjam_core::{Element, Pattern};
use patternjam_core::theory::Scale;

/// A width x height boolean grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Map a pattern onto the grid, row-major by element index; indices
    /// past the grid wrap around the rows.
    pub fn encode(pattern: &Pattern, width: usize, height: usize) -> Self {
        let mut cells = vec![false; width * height];
        for index in 0..pattern.len() {
            let x = index % width;
            let y = (index / width) % height;
            cells[y * width + x] = true;
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn is_live(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    /// One Conway step: a live cell survives with 2-3 live neighbors, a
    /// dead cell is born with exactly 3. Edges do not wrap.
    pub fn step(&self) -> Self {
        let mut next = vec![false; self.width * self.height];
        for y in 0..self.height {
            for x in 0..self.width {
                let alive = self.live_neighbors(x, y);
                let live = self.is_live(x, y);
                next[y * self.width + x] = if live {
                    alive == 2 || alive == 3
                } else {
                    alive == 3
                };
            }
        }
        Self {
            width: self.width,
            height: self.height,
            cells: next,
        }
    }

    fn live_neighbors(&self, x: usize, y: usize) -> usize {
        let mut count = 0;
        for dy in -1isize..=1 {
            for dx in -1isize..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || ny < 0 || nx >= self.width as isize || ny >= self.height as isize {
                    continue;
                }
                if self.is_live(nx as usize, ny as usize) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Emit one sixteenth-note element per live cell, ordered by
    /// (row, column); the row picks a scale degree, top rows higher.
    pub fn decode(&self, scale: Scale) -> Pattern {
        let mut elements = Vec::with_capacity(self.live_count());
        for y in 0..self.height {
            for x in 0..self.width {
                if !self.is_live(x, y) {
                    continue;
                }
                let degree = self.height - 1 - y;
                let pitch = 60 + scale.degree_semitones(degree);
                elements.push(Element::note(pitch, 0.25, 0.8));
            }
        }
        Pattern::new(elements)
    }
}
