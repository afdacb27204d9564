use crate::coords::CubeCoord;
use barrow_materials::MaterialId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapError {
    /// Material id not present in the catalog.
    InvalidMaterial(MaterialId),
    /// Cube coordinate outside the map extents.
    OutOfBounds(CubeCoord),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::InvalidMaterial(id) => write!(f, "unknown material id {}", id.0),
            MapError::OutOfBounds(c) => {
                write!(f, "cube coordinate ({}, {}, {}) outside map", c.x, c.y, c.z)
            }
        }
    }
}

impl std::error::Error for MapError {}
