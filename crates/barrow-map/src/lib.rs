//! Voxel terrain data model: cubes, faces, slopes, cells, and the map grid.
//!
//! This crate holds world state only. It never talks to the render cache:
//! mutating a cube does not dirty its cell, and face/slope derivation runs
//! only when a caller asks for it. The edit layer owns invalidation.
#![forbid(unsafe_code)]

pub mod cell;
pub mod coords;
pub mod cube;
pub mod error;
pub mod facet;
pub mod map;
pub mod slope;

pub use cell::{Cell, DrawListRange};
pub use coords::{CellCoord, CubeCoord};
pub use cube::{Cube, Face};
pub use error::MapError;
pub use facet::{ALL_FACETS, Facet};
pub use map::Map;
pub use slope::{NeighborPattern, Slope, SlopeKind, slope_for};
