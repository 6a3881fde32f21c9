//! Room connectivity analysis

use std::collections::VecDeque;

use super::{Mesh, Room};

/// Tracks room connectivity using equivalence classes
#[derive(Debug, Clone)]
pub struct ConnectivityTracker {
    /// Each room's equivalence class (rooms in same class are connected)
    classes: Vec<usize>,
}

impl ConnectivityTracker {
    /// Create a new tracker for the given number of rooms
    pub fn new(num_rooms: usize) -> Self {
        // Initially, each room is its own equivalence class
        Self {
            classes: (0..num_rooms).collect(),
        }
    }

    /// Build a tracker by flood-filling the mesh from every room.
    ///
    /// Floor, corridor and door cells are passable, moving in the four
    /// cardinal directions.
    pub fn from_mesh(mesh: &Mesh, rooms: &[Room]) -> Self {
        let mut tracker = Self::new(rooms.len());
        let mut component = vec![usize::MAX; mesh.len()];

        for (i, room) in rooms.iter().enumerate() {
            let Some(start) = mesh.index_of(room.left + 1, room.top + 1) else {
                continue;
            };
            if component[start] != usize::MAX {
                tracker.merge(component[start], i);
                continue;
            }
            flood(mesh, start, i, &mut component);
        }
        tracker
    }

    /// Check if two rooms are connected (in same equivalence class)
    pub fn are_connected(&self, a: usize, b: usize) -> bool {
        if a >= self.classes.len() || b >= self.classes.len() {
            return false;
        }
        self.classes[a] == self.classes[b]
    }

    /// Merge equivalence classes when rooms are connected
    pub fn merge(&mut self, a: usize, b: usize) {
        if a >= self.classes.len() || b >= self.classes.len() {
            return;
        }

        let old_class = self.classes[b];
        let new_class = self.classes[a];

        for eq in &mut self.classes {
            if *eq == old_class {
                *eq = new_class;
            }
        }
    }

    /// Check if all rooms are connected
    pub fn all_connected(&self) -> bool {
        match self.classes.first() {
            None => true,
            Some(&first) => self.classes.iter().all(|&c| c == first),
        }
    }

    /// Number of distinct groups of mutually reachable rooms
    pub fn group_count(&self) -> usize {
        let mut seen: Vec<usize> = self.classes.clone();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }
}

/// Label every passable cell reachable from `start` with `label`
fn flood(mesh: &Mesh, start: usize, label: usize, component: &mut [usize]) {
    let width = mesh.width().max(1) as usize;
    let cells = mesh.cells();
    if !cells[start].is_passable() {
        return;
    }

    let mut queue = VecDeque::from([start]);
    component[start] = label;
    while let Some(idx) = queue.pop_front() {
        let x = (idx % width) as i32;
        let y = (idx / width) as i32;
        for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
            let Some(next) = mesh.index_of(x + dx, y + dy) else {
                continue;
            };
            if component[next] == usize::MAX && cells[next].is_passable() {
                component[next] = label;
                queue.push_back(next);
            }
        }
    }
}
