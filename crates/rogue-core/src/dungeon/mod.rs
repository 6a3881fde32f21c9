//! Dungeon layout
//!
//! Contains the partition tree, rooms, the cell mesh and the corridor
//! router, plus the orchestration that runs them in order.

mod cell;
mod connectivity;
mod corridor;
mod face;
mod generation;
mod mesh;
mod room;
mod section;

pub use cell::CellType;
pub use connectivity::ConnectivityTracker;
pub use corridor::{door_coves, mark_door_probes, sibling_coves, stamp, Cove, Direction};
pub use face::Face;
pub use generation::{generate, generate_with, Dungeon};
pub use mesh::Mesh;
pub use room::{place_room, Doors, Room, RoomBuilder};
pub use section::{Section, SectionId, SectionTree};
