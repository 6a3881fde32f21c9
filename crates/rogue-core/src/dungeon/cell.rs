//! Map cell codes

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Cell code stored in the mesh
///
/// The discriminant of each variant is the ASCII code of its display
/// character, so a serialized mesh carries the same integers the text
/// rendering prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
#[repr(u8)]
pub enum CellType {
    #[default]
    Blank = b' ',
    Floor = b'.',
    Corridor = b'#',
    VWall = b'|',
    HWall = b'-',
    Door = b'+',
    /// Internal boundary marker, cleared before generation returns
    Temporary = b'T',
}

impl CellType {
    /// Numeric code of this cell
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// Get the display character for this cell type
    pub const fn symbol(&self) -> char {
        self.code() as char
    }

    /// Look up a cell type by its numeric code
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            b' ' => Some(CellType::Blank),
            b'.' => Some(CellType::Floor),
            b'#' => Some(CellType::Corridor),
            b'|' => Some(CellType::VWall),
            b'-' => Some(CellType::HWall),
            b'+' => Some(CellType::Door),
            b'T' => Some(CellType::Temporary),
            _ => None,
        }
    }

    /// Look up a cell type by its display character
    pub fn from_symbol(symbol: char) -> Option<Self> {
        u8::try_from(symbol).ok().and_then(Self::from_code)
    }

    /// Check if this is a wall type
    pub const fn is_wall(&self) -> bool {
        matches!(self, CellType::VWall | CellType::HWall)
    }

    /// Check if this is passable (can walk through)
    pub const fn is_passable(&self) -> bool {
        matches!(self, CellType::Floor | CellType::Corridor | CellType::Door)
    }
}

// Serialized as the bare cell code
impl Serialize for CellType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.code().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CellType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let code = u8::deserialize(deserializer)?;
        CellType::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown cell code {code}")))
    }
}
