//! Rooms and doors
//!
//! One room is placed strictly inside every leaf section, with a door on
//! each side of the section that adjoins a sibling region.

use log::trace;
use rogue_rng::XorShift128;
use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::{MAX_SPAN_ATTEMPTS, ROOM_MIN};

use super::{Face, Section, SectionId};

/// Door positions indexed by face slot
///
/// A door on the left or right wall stores its row, a door on the top or
/// bottom wall stores its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Doors([Option<i32>; 4]);

impl Doors {
    /// Wire value of an empty door slot
    pub const NO_DOOR: i32 = -1;

    /// Door coordinate on a face
    pub fn get(&self, face: Face) -> Option<i32> {
        self.0[face.index()]
    }

    pub fn set(&mut self, face: Face, pos: i32) {
        self.0[face.index()] = Some(pos);
    }

    /// Faces that carry a door
    pub fn faces(&self) -> Face {
        self.iter().fold(Face::NONE, |acc, (face, _)| acc | face)
    }

    /// Iterate over `(face, position)` pairs in slot order
    pub fn iter(&self) -> impl Iterator<Item = (Face, i32)> + '_ {
        Face::SIDES
            .iter()
            .zip(self.0.iter())
            .filter_map(|(&face, pos)| pos.map(|p| (face, p)))
    }

    pub fn count(&self) -> usize {
        self.0.iter().flatten().count()
    }

    /// Slots as wire values, [`Doors::NO_DOOR`] for empty ones
    pub fn to_array(&self) -> [i32; 4] {
        self.0.map(|pos| pos.unwrap_or(Self::NO_DOOR))
    }

    pub fn from_array(slots: [i32; 4]) -> Self {
        Self(slots.map(|pos| (pos >= 0).then_some(pos)))
    }
}

// Serialized with the NO_DOOR sentinel, matching the flat wire format
impl Serialize for Doors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_array().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Doors {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let slots = <[i32; 4]>::deserialize(deserializer)?;
        Ok(Doors::from_array(slots))
    }
}

/// A placed room
///
/// The rectangle includes its walls: columns `left` and `right() - 1` are
/// vertical walls, rows `top` and `bottom() - 1` horizontal walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub top: i32,
    pub left: i32,
    pub width: i32,
    pub height: i32,
    /// Leaf section the room was placed in
    pub section: SectionId,
    #[serde(rename = "door")]
    pub doors: Doors,
}

impl Room {
    /// One past the rightmost column
    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    /// One past the bottom row
    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn door(&self, face: Face) -> Option<i32> {
        self.doors.get(face)
    }

    pub fn has_door(&self, face: Face) -> bool {
        self.doors.get(face).is_some()
    }

    pub fn door_count(&self) -> usize {
        self.doors.count()
    }

    /// Wall cell holding the door on `face`
    pub fn door_cell(&self, face: Face) -> Option<(i32, i32)> {
        let pos = self.door(face)?;
        if face == Face::LEFT {
            Some((self.left, pos))
        } else if face == Face::RIGHT {
            Some((self.right() - 1, pos))
        } else if face == Face::TOP {
            Some((pos, self.top))
        } else {
            Some((pos, self.bottom() - 1))
        }
    }

    /// Check if a cell lies within the room rectangle (walls included)
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right() && y >= self.top && y < self.bottom()
    }

    /// Check if two room rectangles share any cell
    pub fn intersects(&self, other: &Room) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// Check if the room keeps at least one cell of margin inside `section`
    pub fn is_inside(&self, section: &Section) -> bool {
        self.left > section.left
            && self.right() < section.right()
            && self.top > section.top
            && self.bottom() < section.bottom()
    }
}

/// Staging struct for a room whose doors are still being drawn
#[derive(Debug, Clone)]
pub struct RoomBuilder {
    top: i32,
    left: i32,
    width: i32,
    height: i32,
    section: SectionId,
    doors: Doors,
}

impl RoomBuilder {
    pub fn new(top: i32, left: i32, width: i32, height: i32, section: SectionId) -> Self {
        Self {
            top,
            left,
            width,
            height,
            section,
            doors: Doors::default(),
        }
    }

    pub fn add_door(&mut self, face: Face, pos: i32) -> &mut Self {
        self.doors.set(face, pos);
        self
    }

    pub fn build(self) -> Room {
        Room {
            top: self.top,
            left: self.left,
            width: self.width,
            height: self.height,
            section: self.section,
            doors: self.doors,
        }
    }
}

/// Place a room strictly inside a leaf section.
///
/// Draws are consumed in a fixed order: the horizontal span, the vertical
/// span, then one door each for the right, left, bottom and top faces that
/// the section carries.
pub fn place_room(
    id: SectionId,
    section: &Section,
    rng: &mut XorShift128,
) -> Result<Room, GenerateError> {
    let (left, width) = draw_span(rng, section.left + 1, section.right() - 1)
        .ok_or_else(|| too_small("width", section.width))?;
    let (top, height) = draw_span(rng, section.top + 1, section.bottom() - 1)
        .ok_or_else(|| too_small("height", section.height))?;

    let mut builder = RoomBuilder::new(top, left, width, height, id);
    let faces = section.faces;
    if faces.contains(Face::RIGHT) {
        builder.add_door(Face::RIGHT, rng.next_int(top + 1, top + height - 2));
    }
    if faces.contains(Face::LEFT) {
        builder.add_door(Face::LEFT, rng.next_int(top + 1, top + height - 2));
    }
    if faces.contains(Face::BOTTOM) {
        builder.add_door(Face::BOTTOM, rng.next_int(left + 1, left + width - 2));
    }
    if faces.contains(Face::TOP) {
        builder.add_door(Face::TOP, rng.next_int(left + 1, left + width - 2));
    }

    let room = builder.build();
    trace!(
        "room {}x{} at ({}, {}) in section {}, doors {:?}",
        room.width,
        room.height,
        room.left,
        room.top,
        id.0,
        room.doors.to_array()
    );
    Ok(room)
}

/// Draw two coordinates in `[lo, hi]` until they are at least
/// [`ROOM_MIN`] apart; returns the smaller one and the distance.
fn draw_span(rng: &mut XorShift128, lo: i32, hi: i32) -> Option<(i32, i32)> {
    if hi - lo < ROOM_MIN {
        return None;
    }
    for _ in 0..MAX_SPAN_ATTEMPTS {
        let a = rng.next_int(lo, hi);
        let b = rng.next_int(lo, hi);
        if (a - b).abs() >= ROOM_MIN {
            return Some((a.min(b), (a - b).abs()));
        }
    }
    None
}

fn too_small(name: &'static str, extent: i32) -> GenerateError {
    GenerateError::invalid(
        name,
        extent,
        format!("a region {extent} cells across cannot hold a room of at least {ROOM_MIN}"),
    )
}
