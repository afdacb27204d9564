//! Terrain edits and render-cache invalidation.
//!
//! The data model never dirties anything on its own; every mutation of the
//! world goes through this crate, which rewrites the touched cube, refreshes
//! derived faces and slopes around it, and marks the affected cells dirty.
#![forbid(unsafe_code)]

use barrow_map::{ALL_FACETS, CellCoord, CubeCoord, Map, MapError};
use barrow_materials::{MaterialCatalog, MaterialId};

/// Removes the cube's substance, leaving open space.
pub fn dig(map: &mut Map, pos: CubeCoord) -> Result<Vec<CellCoord>, MapError> {
    {
        let cube = map.cube_at_mut(pos)?;
        cube.set_solid(false);
        cube.set_liquid(false);
        cube.clear_faces();
        cube.clear_slope();
    }
    log::debug!("dig at ({}, {}, {})", pos.x, pos.y, pos.z);
    finish_edit(map, pos)
}

/// Fills the cube with solid material.
pub fn fill(
    map: &mut Map,
    pos: CubeCoord,
    material: MaterialId,
    catalog: &MaterialCatalog,
) -> Result<Vec<CellCoord>, MapError> {
    {
        let cube = map.cube_at_mut(pos)?;
        cube.set_material(material, catalog)?;
        cube.set_solid(true);
    }
    log::debug!(
        "fill material {} at ({}, {}, {})",
        material.0,
        pos.x,
        pos.y,
        pos.z
    );
    finish_edit(map, pos)
}

/// Floods the cube with liquid material.
pub fn flood(
    map: &mut Map,
    pos: CubeCoord,
    material: MaterialId,
    catalog: &MaterialCatalog,
) -> Result<Vec<CellCoord>, MapError> {
    {
        let cube = map.cube_at_mut(pos)?;
        cube.set_material(material, catalog)?;
        cube.set_liquid(true);
    }
    log::debug!(
        "flood material {} at ({}, {}, {})",
        material.0,
        pos.x,
        pos.y,
        pos.z
    );
    finish_edit(map, pos)
}

/// Refreshes derived state around an edited cube and dirties the cells
/// whose cached geometry the edit can change.
fn finish_edit(map: &mut Map, pos: CubeCoord) -> Result<Vec<CellCoord>, MapError> {
    map.refresh_cube(pos)?;
    for facet in ALL_FACETS {
        let neighbor = pos.step(facet);
        if map.contains(neighbor) {
            map.refresh_cube(neighbor)?;
        }
    }
    let affected = affected_cells(map, pos);
    for coord in &affected {
        if let Some(cell) = map.cell_mut(*coord) {
            cell.mark_dirty();
        }
    }
    Ok(affected)
}

/// Cells whose cached geometry depends on the cube: the owning cell, plus
/// each neighbor cell sharing the boundary the cube sits on (within one
/// cube of a cell edge). Sorted and deduplicated.
pub fn affected_cells(map: &Map, pos: CubeCoord) -> Vec<CellCoord> {
    let cc = map.cell_coord_of(pos);
    let edge = map.edge() as i32;
    let lx = pos.x - cc.cx * edge;
    let ly = pos.y - cc.cy * edge;
    let lz = pos.z - cc.cz * edge;

    let mut offsets_x = vec![0];
    let mut offsets_y = vec![0];
    let mut offsets_z = vec![0];
    if lx == 0 {
        offsets_x.push(-1);
    }
    if lx == edge - 1 {
        offsets_x.push(1);
    }
    if ly == 0 {
        offsets_y.push(-1);
    }
    if ly == edge - 1 {
        offsets_y.push(1);
    }
    if lz == 0 {
        offsets_z.push(-1);
    }
    if lz == edge - 1 {
        offsets_z.push(1);
    }

    let mut affected = Vec::new();
    for dx in &offsets_x {
        for dy in &offsets_y {
            for dz in &offsets_z {
                let coord = cc.offset(*dx, *dy, *dz);
                if map.contains_cell(coord) {
                    affected.push(coord);
                }
            }
        }
    }
    affected.sort();
    affected.dedup();
    affected
}
