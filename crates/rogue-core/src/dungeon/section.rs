//! Partition tree (recursive space subdivision)
//!
//! The grid is split `room_num - 1` times, each time cutting the largest
//! remaining region across its longer side. The two children overlap by
//! one row or column, which becomes the wall they share. Every region that
//! was ever split stays in the registry so corridors can later be merged
//! along the boundaries between siblings.

use std::ops::Index;

use log::trace;
use rogue_rng::XorShift128;
use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::{SECTION_MIN, SPLIT_MARGIN, SPLIT_MIN};

use super::Face;

/// Index of a section in its tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(pub usize);

/// A rectangular region of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Left x coordinate
    pub left: i32,
    /// Top y coordinate
    pub top: i32,
    pub width: i32,
    pub height: i32,
    /// Sides adjoining a sibling region somewhere up the tree
    pub faces: Face,
    /// Region this one was split from (`None` for the root)
    pub parent: Option<SectionId>,
}

impl Section {
    /// Create the root section covering the whole grid
    pub fn root(width: i32, height: i32) -> Self {
        Self {
            left: 0,
            top: 0,
            width,
            height,
            faces: Face::NONE,
            parent: None,
        }
    }

    /// One past the rightmost column
    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    /// One past the bottom row
    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Check if a room with one cell of margin on every side fits
    pub fn can_hold_room(&self) -> bool {
        self.width >= SECTION_MIN && self.height >= SECTION_MIN
    }

    /// Check if a cell lies inside this section (boundary included)
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    /// Check if a cell lies on this section's outer ring
    pub fn on_boundary(&self, x: i32, y: i32) -> bool {
        self.contains(x, y)
            && (x == self.left || x == self.right() - 1 || y == self.top || y == self.bottom() - 1)
    }

    /// Wider sections are cut by a vertical line, others by a horizontal one
    pub fn splits_vertically(&self) -> bool {
        self.width > self.height
    }

    /// Split into two children sharing one row or column.
    ///
    /// Returns `None` when the side being cut is shorter than
    /// [`SPLIT_MIN`]; nothing is drawn in that case.
    fn divide(&self, id: SectionId, rng: &mut XorShift128) -> Option<(Section, Section)> {
        if self.splits_vertically() {
            if self.width < SPLIT_MIN {
                return None;
            }
            let d = rng.next_int(SPLIT_MARGIN, self.width - SPLIT_MARGIN);
            let first = Section {
                width: d,
                faces: self.faces | Face::RIGHT,
                parent: Some(id),
                ..*self
            };
            let second = Section {
                left: first.right() - 1,
                width: self.width - d + 1,
                faces: self.faces | Face::LEFT,
                parent: Some(id),
                ..*self
            };
            Some((first, second))
        } else {
            if self.height < SPLIT_MIN {
                return None;
            }
            let d = rng.next_int(SPLIT_MARGIN, self.height - SPLIT_MARGIN);
            let first = Section {
                height: d,
                faces: self.faces | Face::BOTTOM,
                parent: Some(id),
                ..*self
            };
            let second = Section {
                top: first.bottom() - 1,
                height: self.height - d + 1,
                faces: self.faces | Face::TOP,
                parent: Some(id),
                ..*self
            };
            Some((first, second))
        }
    }
}

/// Arena holding every section ever created during a partition
#[derive(Debug, Clone)]
pub struct SectionTree {
    /// All sections in creation order; ids index into this
    sections: Vec<Section>,
    /// Split sections in split order, followed by the leaves
    registry: Vec<SectionId>,
    /// Leaves in working-list order, one room each
    leaves: Vec<SectionId>,
}

impl SectionTree {
    /// Partition a `width` x `height` grid into `room_num` leaves.
    pub fn partition(
        width: i32,
        height: i32,
        room_num: i32,
        rng: &mut XorShift128,
    ) -> Result<Self, GenerateError> {
        check_request(width, height, room_num)?;

        let mut sections = vec![Section::root(width, height)];
        let mut leaves = vec![SectionId(0)];
        let mut split = Vec::new();

        for _ in 1..room_num {
            divide_largest(&mut sections, &mut leaves, &mut split, rng).map_err(|s| {
                GenerateError::ConfigurationExhausted {
                    room_num,
                    width,
                    height,
                    reason: format!(
                        "after {} regions the largest, {}x{} at ({}, {}), is too small to split",
                        leaves.len(),
                        s.width,
                        s.height,
                        s.left,
                        s.top
                    ),
                }
            })?;
        }

        let mut registry = split;
        registry.extend_from_slice(&leaves);

        Ok(Self {
            sections,
            registry,
            leaves,
        })
    }

    /// Get a section by id
    pub fn get(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(id.0)
    }

    /// Leaves in the order rooms are placed in them
    pub fn leaves(&self) -> &[SectionId] {
        &self.leaves
    }

    /// Every section that took part in the partition: split sections in
    /// split order, then the leaves
    pub fn registry(&self) -> &[SectionId] {
        &self.registry
    }

    /// Number of sections in the arena
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate over all sections with their ids
    pub fn iter(&self) -> impl Iterator<Item = (SectionId, &Section)> {
        self.sections.iter().enumerate().map(|(i, s)| (SectionId(i), s))
    }

    /// Sections sharing `id`'s parent, `id` itself excluded
    pub fn siblings(&self, id: SectionId) -> impl Iterator<Item = SectionId> + '_ {
        let parent = self.get(id).and_then(|s| s.parent);
        self.registry
            .iter()
            .copied()
            .filter(move |&other| other != id && parent.is_some() && self[other].parent == parent)
    }

    /// Number of splits between the root and `id`
    pub fn depth(&self, id: SectionId) -> usize {
        let mut depth = 0;
        let mut current = self.get(id).and_then(|s| s.parent);
        while let Some(parent) = current {
            depth += 1;
            current = self[parent].parent;
        }
        depth
    }
}

impl Index<SectionId> for SectionTree {
    type Output = Section;

    fn index(&self, id: SectionId) -> &Section {
        &self.sections[id.0]
    }
}

/// Reject non-positive grid sides and room counts below one
pub(crate) fn check_request(width: i32, height: i32, room_num: i32) -> Result<(), GenerateError> {
    if width <= 0 {
        return Err(GenerateError::invalid("width", width, "must be positive"));
    }
    if height <= 0 {
        return Err(GenerateError::invalid("height", height, "must be positive"));
    }
    if room_num < 1 {
        return Err(GenerateError::invalid("room_num", room_num, "must be at least 1"));
    }
    Ok(())
}

/// Split the largest leaf and replace it with its two children.
///
/// On failure the leaf that could not be split is handed back and the
/// working lists are left untouched.
fn divide_largest(
    sections: &mut Vec<Section>,
    leaves: &mut Vec<SectionId>,
    split: &mut Vec<SectionId>,
    rng: &mut XorShift128,
) -> Result<(), Section> {
    // Stable sort: among equally large leaves the earliest stays in front
    leaves.sort_by(|a, b| sections[b.0].area().cmp(&sections[a.0].area()));
    let target = leaves[0];
    let parent = sections[target.0];
    let (first, second) = parent.divide(target, rng).ok_or(parent)?;

    trace!(
        "split {}x{} at ({}, {}) into {}x{} + {}x{}",
        parent.width,
        parent.height,
        parent.left,
        parent.top,
        first.width,
        first.height,
        second.width,
        second.height
    );

    leaves.remove(0);
    for child in [first, second] {
        leaves.push(SectionId(sections.len()));
        sections.push(child);
    }
    split.push(target);
    Ok(())
}
