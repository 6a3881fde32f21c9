//! rogue-core: partition-tree dungeon generator
//!
//! Splits a rectangular grid into one region per room, places a room in
//! every region and routes corridors from each door to the boundaries its
//! region shares with its siblings. The output is a flat row-major grid of
//! cell codes plus the list of placed rooms.
//!
//! Generation is deterministic for a given seed and runs in one
//! synchronous pass. Only the options file loader touches the filesystem.

pub mod dungeon;
mod consts;
mod error;
mod options;

pub use consts::*;
pub use dungeon::{generate, generate_with, Dungeon};
pub use error::GenerateError;
pub use options::{GeneratorOptions, OptionsError, OutputFormat};
pub use rogue_rng::XorShift128;
