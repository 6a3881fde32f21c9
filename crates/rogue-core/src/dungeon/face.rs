//! Section faces

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Sides of a section that adjoin a sibling region
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Face: u8 {
        const TOP = 1 << 0;
        const LEFT = 1 << 1;
        const RIGHT = 1 << 2;
        const BOTTOM = 1 << 3;
    }
}

impl Face {
    /// No adjoining side
    pub const NONE: Face = Face::empty();

    /// The four single faces in slot order
    pub const SIDES: [Face; 4] = [Face::TOP, Face::LEFT, Face::RIGHT, Face::BOTTOM];

    /// Door slot of a single face (the bit position)
    pub fn index(self) -> usize {
        debug_assert_eq!(self.bits().count_ones(), 1, "index of a compound face");
        self.bits().trailing_zeros() as usize
    }

    /// Face on the other side of a shared boundary
    pub fn opposite(self) -> Face {
        let mut out = Face::NONE;
        out.set(Face::BOTTOM, self.contains(Face::TOP));
        out.set(Face::TOP, self.contains(Face::BOTTOM));
        out.set(Face::RIGHT, self.contains(Face::LEFT));
        out.set(Face::LEFT, self.contains(Face::RIGHT));
        out
    }
}

// Manual serde impl: the raw bit pattern
impl Serialize for Face {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Face {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Face::from_bits_truncate(bits))
    }
}
