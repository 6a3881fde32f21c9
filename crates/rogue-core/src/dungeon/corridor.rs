//! Corridor routing
//!
//! Corridors are built from straight one-cell-wide runs ("coves") in
//! four phases:
//! 1. Mark each room's section boundary and door exits as temporary
//! 2. Run a cove from every door out to its section's boundary
//! 3. Along each boundary a section shares with its sibling, join the
//!    first and last corridor cell found on that line
//! 4. Stamp the joining coves and clear the temporary markers
//!
//! Every leaf carries a door towards each split line it touches, so the
//! joins of phase 3 link sibling subtrees level by level up to the root.

use serde::{Deserialize, Serialize};

use super::{CellType, Face, Mesh, Room, Section, SectionTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// A straight corridor run
///
/// Covers the half-open span `left..right` on row `top` when horizontal,
/// or `top..bottom` on column `left` when vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cove {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub direction: Direction,
}

impl Cove {
    /// Create a cove starting at `(from_x, from_y)` extending `len` cells
    /// along `direction`; a negative `len` extends towards lower
    /// coordinates.
    pub fn new(from_x: i32, from_y: i32, direction: Direction, len: i32) -> Self {
        match direction {
            Direction::Horizontal => Self {
                left: from_x.min(from_x + len),
                top: from_y,
                right: from_x.max(from_x + len),
                bottom: from_y,
                direction,
            },
            Direction::Vertical => Self {
                left: from_x,
                top: from_y.min(from_y + len),
                right: from_x,
                bottom: from_y.max(from_y + len),
                direction,
            },
        }
    }

    /// Number of cells covered
    pub fn len(&self) -> usize {
        let span = match self.direction {
            Direction::Horizontal => self.right - self.left,
            Direction::Vertical => self.bottom - self.top,
        };
        span.max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cells covered by this cove
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let cove = *self;
        let (start, end) = match cove.direction {
            Direction::Horizontal => (cove.left, cove.right),
            Direction::Vertical => (cove.top, cove.bottom),
        };
        (start..end).map(move |i| match cove.direction {
            Direction::Horizontal => (i, cove.bottom),
            Direction::Vertical => (cove.right, i),
        })
    }
}

/// Mark the straight path from each door to its section boundary as
/// temporary. The boundary itself must already be marked; each probe stops
/// at the first temporary cell (or the grid edge).
pub fn mark_door_probes(mesh: &mut Mesh, room: &Room) {
    let probes = [
        (Face::RIGHT, 1, 0),
        (Face::LEFT, -1, 0),
        (Face::BOTTOM, 0, 1),
        (Face::TOP, 0, -1),
    ];
    for (face, dx, dy) in probes {
        let Some((door_x, door_y)) = room.door_cell(face) else {
            continue;
        };
        let (mut x, mut y) = (door_x + dx, door_y + dy);
        while let Some(cell) = mesh.get(x, y) {
            if cell == CellType::Temporary {
                break;
            }
            mesh.set(x, y, CellType::Temporary);
            x += dx;
            y += dy;
        }
    }
}

/// Coves from each of a room's doors out to the matching boundary of the
/// section it sits in, in left, right, top, bottom order.
pub fn door_coves(room: &Room, section: &Section) -> Vec<Cove> {
    let mut coves = Vec::with_capacity(room.door_count());
    if let Some(y) = room.door(Face::LEFT) {
        coves.push(Cove::new(room.left, y, Direction::Horizontal, section.left - room.left));
    }
    if let Some(y) = room.door(Face::RIGHT) {
        coves.push(Cove::new(
            room.right(),
            y,
            Direction::Horizontal,
            section.right() - room.right(),
        ));
    }
    if let Some(x) = room.door(Face::TOP) {
        coves.push(Cove::new(x, section.top, Direction::Vertical, room.top - section.top));
    }
    if let Some(x) = room.door(Face::BOTTOM) {
        coves.push(Cove::new(
            x,
            room.bottom(),
            Direction::Vertical,
            section.bottom() - room.bottom(),
        ));
    }
    coves
}

/// Coves joining corridor stubs that meet a section's left column or top
/// row, for every section that has a sibling.
///
/// Reads the mesh as it stands; the returned coves are not stamped.
pub fn sibling_coves(tree: &SectionTree, mesh: &Mesh) -> Vec<Cove> {
    let mut coves = Vec::new();
    for &a in tree.registry() {
        if tree.siblings(a).next().is_none() {
            continue;
        }
        let section = &tree[a];

        let column = (section.top..section.bottom())
            .filter(|&y| mesh.get(section.left, y) == Some(CellType::Corridor));
        if let Some((first, last)) = first_and_last(column) {
            coves.push(Cove::new(section.left, first, Direction::Vertical, last - first));
        }

        let row = (section.left..section.right())
            .filter(|&x| mesh.get(x, section.top) == Some(CellType::Corridor));
        if let Some((first, last)) = first_and_last(row) {
            coves.push(Cove::new(first, section.top, Direction::Horizontal, last - first));
        }
    }
    coves
}

/// First and last items of an iterator holding at least two
fn first_and_last(mut iter: impl Iterator<Item = i32>) -> Option<(i32, i32)> {
    let first = iter.next()?;
    let last = iter.last()?;
    Some((first, last))
}

/// Write every cove into the mesh as corridor
pub fn stamp(mesh: &mut Mesh, coves: &[Cove]) {
    for cove in coves {
        for (x, y) in cove.cells() {
            mesh.set(x, y, CellType::Corridor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::{RoomBuilder, SectionId};

    #[test]
    fn test_cove_normalises_negative_length() {
        let cove = Cove::new(10, 4, Direction::Horizontal, -3);
        assert_eq!((cove.left, cove.right), (7, 10));
        assert_eq!(cove.cells().collect::<Vec<_>>(), [(7, 4), (8, 4), (9, 4)]);

        let cove = Cove::new(2, 5, Direction::Vertical, 2);
        assert_eq!(cove.cells().collect::<Vec<_>>(), [(2, 5), (2, 6)]);
        assert_eq!(cove.len(), 2);
        assert!(Cove::new(0, 0, Direction::Vertical, 0).is_empty());
    }

    fn sample() -> (Section, Room) {
        let section = Section {
            left: 0,
            top: 0,
            width: 12,
            height: 10,
            faces: Face::LEFT | Face::RIGHT | Face::TOP | Face::BOTTOM,
            parent: Some(SectionId(0)),
        };
        let mut builder = RoomBuilder::new(3, 3, 6, 5, SectionId(1));
        builder
            .add_door(Face::LEFT, 5)
            .add_door(Face::RIGHT, 4)
            .add_door(Face::TOP, 5)
            .add_door(Face::BOTTOM, 6);
        (section, builder.build())
    }

    #[test]
    fn test_door_coves_reach_boundary() {
        let (section, room) = sample();
        let coves = door_coves(&room, &section);
        assert_eq!(coves.len(), 4);

        let left: Vec<_> = coves[0].cells().collect();
        assert_eq!(left, [(0, 5), (1, 5), (2, 5)]);
        let right: Vec<_> = coves[1].cells().collect();
        assert_eq!(right, [(9, 4), (10, 4), (11, 4)]);
        let top: Vec<_> = coves[2].cells().collect();
        assert_eq!(top, [(5, 0), (5, 1), (5, 2)]);
        let bottom: Vec<_> = coves[3].cells().collect();
        assert_eq!(bottom, [(6, 8), (6, 9)]);
    }

    #[test]
    fn test_probes_cover_the_same_cells_as_door_coves() {
        let (section, room) = sample();
        let mut mesh = Mesh::new(12, 10);
        mesh.carve_room(&room);
        mesh.mark_section_boundary(&section);
        mark_door_probes(&mut mesh, &room);

        for cove in door_coves(&room, &section) {
            for (x, y) in cove.cells() {
                assert_eq!(mesh.get(x, y), Some(CellType::Temporary), "({x}, {y})");
            }
        }
        assert_eq!(mesh.count(CellType::Door), 4);
    }

    #[test]
    fn test_sibling_join_spans_first_to_last() {
        let mut rng = rogue_rng::XorShift128::new(42);
        let tree = SectionTree::partition(40, 20, 2, &mut rng).unwrap();
        let right = tree[tree.leaves()[1]];
        let mut mesh = Mesh::new(40, 20);
        mesh.set(right.left, 3, CellType::Corridor);
        mesh.set(right.left, 9, CellType::Corridor);
        mesh.set(right.left, 14, CellType::Corridor);

        let coves = sibling_coves(&tree, &mesh);
        assert_eq!(coves.len(), 1);
        assert_eq!(coves[0].direction, Direction::Vertical);
        assert_eq!((coves[0].top, coves[0].bottom), (3, 14));

        stamp(&mut mesh, &coves);
        for y in 3..=14 {
            assert_eq!(mesh.get(right.left, y), Some(CellType::Corridor));
        }
        assert_eq!(mesh.count(CellType::Corridor), 12);
    }

    #[test]
    fn test_one_join_per_line() {
        let dungeon = crate::generate(70, 40, 10, Some(42)).unwrap();
        let coves = sibling_coves(dungeon.sections(), dungeon.mesh());
        for (i, a) in coves.iter().enumerate() {
            assert!(!coves[i + 1..].contains(a), "{a:?} emitted twice");
        }
        // one scan per registry section that has a sibling: all but the root
        let scanned = dungeon.sections().registry().len() - 1;
        assert!(coves.len() <= 2 * scanned);
    }

    #[test]
    fn test_single_corridor_cell_is_not_joined() {
        let mut rng = rogue_rng::XorShift128::new(42);
        let tree = SectionTree::partition(40, 20, 2, &mut rng).unwrap();
        let right = tree[tree.leaves()[1]];
        let mut mesh = Mesh::new(40, 20);
        mesh.set(right.left, 3, CellType::Corridor);
        assert!(sibling_coves(&tree, &mesh).is_empty());
    }
}
