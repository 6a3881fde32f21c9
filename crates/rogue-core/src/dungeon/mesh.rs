//! Cell mesh
//!
//! A flat row-major grid of cell codes; cell `(x, y)` lives at index
//! `x + y * width`.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{CellType, Room, Section};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mesh {
    width: i32,
    height: i32,
    cells: Vec<CellType>,
}

impl Mesh {
    /// Create a blank mesh. Non-positive dimensions yield an empty mesh.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![CellType::Blank; width as usize * height as usize],
        }
    }

    /// Create a blank mesh, or `None` if the cells cannot be allocated
    pub fn try_new(width: i32, height: i32) -> Option<Self> {
        let width = width.max(0);
        let height = height.max(0);
        let len = (width as usize).checked_mul(height as usize)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).ok()?;
        cells.resize(len, CellType::Blank);
        Some(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells (`width * height`)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[CellType] {
        &self.cells
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Flat index of a cell
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| x as usize + y as usize * self.width as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<CellType> {
        self.index_of(x, y).map(|i| self.cells[i])
    }

    /// Write a cell; writes outside the grid are ignored
    pub fn set(&mut self, x: i32, y: i32, cell: CellType) {
        if let Some(i) = self.index_of(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Carve a room: walls on its outer ring, floor inside, then its doors.
    ///
    /// Corner cells belong to the vertical walls.
    pub fn carve_room(&mut self, room: &Room) {
        for x in room.left..room.right() {
            for y in room.top..room.bottom() {
                let cell = if x == room.left || x == room.right() - 1 {
                    CellType::VWall
                } else if y == room.top || y == room.bottom() - 1 {
                    CellType::HWall
                } else {
                    CellType::Floor
                };
                self.set(x, y, cell);
            }
        }
        for (face, _) in room.doors.iter() {
            if let Some((x, y)) = room.door_cell(face) {
                self.set(x, y, CellType::Door);
            }
        }
    }

    /// Mark the outer ring of a section as [`CellType::Temporary`]
    pub fn mark_section_boundary(&mut self, section: &Section) {
        for x in section.left..section.right() {
            self.set(x, section.top, CellType::Temporary);
            self.set(x, section.bottom() - 1, CellType::Temporary);
        }
        for y in section.top..section.bottom() {
            self.set(section.left, y, CellType::Temporary);
            self.set(section.right() - 1, y, CellType::Temporary);
        }
    }

    /// Reset every temporary marker to blank; returns how many were cleared
    pub fn clear_temporary(&mut self) -> usize {
        let mut cleared = 0;
        for cell in self.cells.iter_mut().filter(|c| **c == CellType::Temporary) {
            *cell = CellType::Blank;
            cleared += 1;
        }
        cleared
    }

    /// Count cells of one type
    pub fn count(&self, cell: CellType) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Iterate over rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[CellType]> {
        // chunks() rejects a zero size; an empty mesh simply has no rows
        self.cells.chunks(self.width.max(1) as usize)
    }

    /// Render as text, one line per row, each line ending in a newline
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.height as usize);
        for row in self.rows() {
            out.extend(row.iter().map(CellType::symbol));
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{Face, RoomBuilder, SectionId};

    #[test]
    fn test_indexing_is_row_major() {
        let mut mesh = Mesh::new(4, 3);
        assert_eq!(mesh.len(), 12);
        assert_eq!(mesh.index_of(1, 2), Some(9));
        assert_eq!(mesh.index_of(4, 0), None);
        assert_eq!(mesh.index_of(0, -1), None);
        mesh.set(3, 1, CellType::Door);
        assert_eq!(mesh.cells()[7], CellType::Door);
        mesh.set(9, 9, CellType::Door);
        assert_eq!(mesh.count(CellType::Door), 1);
    }

    #[test]
    fn test_carve_room() {
        let mut mesh = Mesh::new(8, 6);
        let mut builder = RoomBuilder::new(0, 1, 6, 5, SectionId(0));
        builder.add_door(Face::RIGHT, 2).add_door(Face::TOP, 3);
        mesh.carve_room(&builder.build());
        assert_eq!(
            mesh.to_text(),
            concat!(
                " |-+--| \n",
                " |....| \n",
                " |....+ \n",
                " |....| \n",
                " |----| \n",
                "        \n",
            )
        );
    }

    #[test]
    fn test_boundary_marking_and_clearing() {
        let mut mesh = Mesh::new(5, 4);
        mesh.mark_section_boundary(&Section::root(5, 4));
        assert_eq!(mesh.count(CellType::Temporary), 14);
        assert_eq!(mesh.get(2, 1), Some(CellType::Blank));
        assert_eq!(mesh.clear_temporary(), 14);
        assert_eq!(mesh.count(CellType::Blank), 20);
    }

    #[test]
    fn test_rows_follow_grid_width() {
        let mut mesh = Mesh::new(3, 2);
        mesh.set(2, 0, CellType::Corridor);
        mesh.set(0, 1, CellType::Floor);
        assert_eq!(mesh.to_text(), "  #\n.  \n");
        assert_eq!(mesh.rows().count(), 2);
        assert_eq!(format!("{mesh}"), mesh.to_text());
    }

    #[test]
    fn test_try_new() {
        let mesh = Mesh::try_new(4, 3).unwrap();
        assert_eq!(mesh, Mesh::new(4, 3));
        assert!(Mesh::try_new(i32::MAX, i32::MAX).is_none());
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = Mesh::new(0, 5);
        assert!(mesh.is_empty());
        assert_eq!(mesh.to_text(), "");
    }
}
