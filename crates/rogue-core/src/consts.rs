//! Layout constants

/// Minimum extent of a room along either axis, walls included
pub const ROOM_MIN: i32 = 5;

/// Minimum distance between a split line and either edge of the section
/// being split
pub const SPLIT_MARGIN: i32 = ROOM_MIN + 3;

/// Smallest section extent along either axis that can still hold a room
/// with one cell of margin on each side
pub const SECTION_MIN: i32 = ROOM_MIN + 2;

/// Smallest extent a section must have along an axis to be split on it
pub const SPLIT_MIN: i32 = 2 * SPLIT_MARGIN;

/// Number of coordinate pairs drawn before room placement gives up
pub const MAX_SPAN_ATTEMPTS: u32 = 10_000;

/// Largest grid accepted, in cells (`width * height`)
pub const MAX_CELLS: i64 = 1 << 26;

/// Default grid width
pub const DEFAULT_WIDTH: i32 = 70;

/// Default grid height
pub const DEFAULT_HEIGHT: i32 = 40;

/// Default number of rooms
pub const DEFAULT_ROOM_NUM: i32 = 10;
