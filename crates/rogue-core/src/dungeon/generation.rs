//! Map generation
//!
//! Runs the phases in a fixed order: partition the grid, place rooms,
//! carve them while marking region boundaries, route door corridors, join
//! sibling corridors, and finally clear the boundary markers.

use log::debug;
use rogue_rng::XorShift128;
use serde::{Serialize, Serializer};

use crate::error::GenerateError;
use crate::options::GeneratorOptions;
use crate::{MAX_CELLS, SECTION_MIN};

use super::connectivity::ConnectivityTracker;
use super::corridor::{door_coves, mark_door_probes, sibling_coves, stamp};
use super::room::place_room;
use super::section::check_request;
use super::{CellType, Mesh, Room, SectionTree};

/// A finished map
#[derive(Debug, Clone, Serialize)]
pub struct Dungeon {
    width: i32,
    height: i32,
    /// Seed the run used, whether supplied or drawn
    seed: u32,
    #[serde(serialize_with = "cells_only")]
    mesh: Mesh,
    rooms: Vec<Room>,
    #[serde(skip)]
    sections: SectionTree,
}

/// Generate a map.
///
/// Without a seed one is drawn at random; [`Dungeon::seed`] reports it.
/// Seeds are reduced modulo 2^32.
pub fn generate(
    width: i32,
    height: i32,
    room_num: i32,
    seed: Option<i64>,
) -> Result<Dungeon, GenerateError> {
    let mut rng = match seed {
        Some(seed) => XorShift128::new(seed as u32),
        None => XorShift128::from_entropy(),
    };
    Dungeon::with_rng(width, height, room_num, &mut rng)
}

/// Generate a map from a set of options
pub fn generate_with(options: &GeneratorOptions) -> Result<Dungeon, GenerateError> {
    generate(options.width, options.height, options.room_num, options.seed)
}

impl Dungeon {
    /// Generate a map drawing from an existing generator
    pub fn with_rng(
        width: i32,
        height: i32,
        room_num: i32,
        rng: &mut XorShift128,
    ) -> Result<Self, GenerateError> {
        validate(width, height, room_num)?;
        let seed = rng.seed();
        let mut mesh = Mesh::try_new(width, height).ok_or_else(|| {
            GenerateError::invalid(
                "height",
                height,
                format!("cannot allocate a {width}x{height} grid"),
            )
        })?;

        let sections = SectionTree::partition(width, height, room_num, rng)?;
        debug!(
            "partitioned {}x{} into {} regions ({} sections)",
            width,
            height,
            sections.leaves().len(),
            sections.registry().len()
        );

        let rooms = sections
            .leaves()
            .iter()
            .map(|&id| place_room(id, &sections[id], rng))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            "placed {} rooms with {} doors",
            rooms.len(),
            rooms.iter().map(Room::door_count).sum::<usize>()
        );

        for room in &rooms {
            mesh.carve_room(room);
            mesh.mark_section_boundary(&sections[room.section]);
            mark_door_probes(&mut mesh, room);
        }

        let door_runs: Vec<_> = rooms
            .iter()
            .flat_map(|room| door_coves(room, &sections[room.section]))
            .collect();
        stamp(&mut mesh, &door_runs);

        let joins = sibling_coves(&sections, &mesh);
        stamp(&mut mesh, &joins);
        let cleared = mesh.clear_temporary();
        debug!(
            "routed {} door corridors and {} sibling joins, cleared {} markers",
            door_runs.len(),
            joins.len(),
            cleared
        );

        Ok(Self {
            width,
            height,
            seed,
            mesh,
            rooms,
            sections,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Seed the run used
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Rooms in placement order, one per leaf section
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn sections(&self) -> &SectionTree {
        &self.sections
    }

    /// Room whose rectangle (walls included) covers a cell
    pub fn room_at(&self, x: i32, y: i32) -> Option<&Room> {
        self.rooms.iter().find(|room| room.contains(x, y))
    }

    /// Group rooms by which ones can reach each other over passable cells
    pub fn connectivity(&self) -> ConnectivityTracker {
        ConnectivityTracker::from_mesh(&self.mesh, &self.rooms)
    }

    /// Check if every room can reach every other room
    pub fn all_rooms_connected(&self) -> bool {
        self.connectivity().all_connected()
    }

    /// Number of corridor cells on the map
    pub fn corridor_count(&self) -> usize {
        self.mesh.count(CellType::Corridor)
    }

    /// Render the map as text, one line per row
    pub fn to_text(&self) -> String {
        self.mesh.to_text()
    }
}

fn validate(width: i32, height: i32, room_num: i32) -> Result<(), GenerateError> {
    check_request(width, height, room_num)?;
    if width < SECTION_MIN {
        return Err(GenerateError::invalid(
            "width",
            width,
            format!("must be at least {SECTION_MIN} to hold a room"),
        ));
    }
    if height < SECTION_MIN {
        return Err(GenerateError::invalid(
            "height",
            height,
            format!("must be at least {SECTION_MIN} to hold a room"),
        ));
    }
    let cells = i64::from(width) * i64::from(height);
    if cells > MAX_CELLS {
        return Err(GenerateError::invalid(
            "cells",
            cells,
            format!("a {width}x{height} grid exceeds the limit of {MAX_CELLS} cells"),
        ));
    }
    Ok(())
}

fn cells_only<S: Serializer>(mesh: &Mesh, serializer: S) -> Result<S::Ok, S::Error> {
    mesh.cells().serialize(serializer)
}
