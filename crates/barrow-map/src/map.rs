use crate::cell::Cell;
use crate::coords::{CellCoord, CubeCoord};
use crate::cube::{Cube, Face};
use crate::error::MapError;
use crate::facet::{ALL_FACETS, Facet};
use crate::slope::{NeighborPattern, SlopeKind, slope_for};
use barrow_materials::MaterialId;

/// 3D grid of cells; owns all world state and answers spatial queries.
///
/// Cube coordinates resolve to `(cell, local)` by division/modulo against
/// the configured cell edge length. All coordinate queries are
/// bounds-checked: out-of-range access is `MapError::OutOfBounds`, while
/// adjacency walking off the map edge is a plain `None`.
#[derive(Clone, Debug)]
pub struct Map {
    cells: Vec<Cell>,
    cells_x: usize,
    cells_y: usize,
    cells_z: usize,
    edge: usize,
}

impl Map {
    pub fn new(cells_x: usize, cells_y: usize, cells_z: usize, edge: usize) -> Self {
        assert!(edge >= 1, "cell edge length must be at least 1");
        let mut cells = Vec::with_capacity(cells_x * cells_y * cells_z);
        for cz in 0..cells_z {
            for cy in 0..cells_y {
                for cx in 0..cells_x {
                    cells.push(Cell::new(
                        CellCoord::new(cx as i32, cy as i32, cz as i32),
                        edge,
                    ));
                }
            }
        }
        Self {
            cells,
            cells_x,
            cells_y,
            cells_z,
            edge,
        }
    }

    #[inline]
    pub fn edge(&self) -> usize {
        self.edge
    }

    #[inline]
    pub fn cells_x(&self) -> usize {
        self.cells_x
    }

    #[inline]
    pub fn cells_y(&self) -> usize {
        self.cells_y
    }

    #[inline]
    pub fn cells_z(&self) -> usize {
        self.cells_z
    }

    #[inline]
    pub fn cubes_x(&self) -> usize {
        self.cells_x * self.edge
    }

    #[inline]
    pub fn cubes_y(&self) -> usize {
        self.cells_y * self.edge
    }

    #[inline]
    pub fn cubes_z(&self) -> usize {
        self.cells_z * self.edge
    }

    /// A map with no cells is treated as "not ready" by the pipeline.
    #[inline]
    pub fn is_ready(&self) -> bool {
        !self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, pos: CubeCoord) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.z >= 0
            && (pos.x as usize) < self.cubes_x()
            && (pos.y as usize) < self.cubes_y()
            && (pos.z as usize) < self.cubes_z()
    }

    #[inline]
    pub fn contains_cell(&self, coord: CellCoord) -> bool {
        coord.cx >= 0
            && coord.cy >= 0
            && coord.cz >= 0
            && (coord.cx as usize) < self.cells_x
            && (coord.cy as usize) < self.cells_y
            && (coord.cz as usize) < self.cells_z
    }

    /// Cell grid coordinate containing a cube coordinate (unchecked).
    #[inline]
    pub fn cell_coord_of(&self, pos: CubeCoord) -> CellCoord {
        let e = self.edge as i32;
        CellCoord::new(
            pos.x.div_euclid(e),
            pos.y.div_euclid(e),
            pos.z.div_euclid(e),
        )
    }

    #[inline]
    fn cell_index(&self, coord: CellCoord) -> Option<usize> {
        if !self.contains_cell(coord) {
            return None;
        }
        let (cx, cy, cz) = (coord.cx as usize, coord.cy as usize, coord.cz as usize);
        Some((cz * self.cells_y + cy) * self.cells_x + cx)
    }

    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        self.cell_index(coord).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, coord: CellCoord) -> Option<&mut Cell> {
        self.cell_index(coord).map(move |i| &mut self.cells[i])
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// The cell owning a cube coordinate, if it is on the map.
    pub fn cell_at_cube(&self, pos: CubeCoord) -> Option<&Cell> {
        if !self.contains(pos) {
            return None;
        }
        self.cell(self.cell_coord_of(pos))
    }

    /// Resolves a cube coordinate to its cell index and local offsets.
    fn locate(&self, pos: CubeCoord) -> Result<(usize, usize, usize, usize), MapError> {
        if !self.contains(pos) {
            return Err(MapError::OutOfBounds(pos));
        }
        let e = self.edge as i32;
        let cell = self
            .cell_index(self.cell_coord_of(pos))
            .ok_or(MapError::OutOfBounds(pos))?;
        Ok((
            cell,
            pos.x.rem_euclid(e) as usize,
            pos.y.rem_euclid(e) as usize,
            pos.z.rem_euclid(e) as usize,
        ))
    }

    pub fn cube_at(&self, pos: CubeCoord) -> Result<&Cube, MapError> {
        let (cell, x, y, z) = self.locate(pos)?;
        Ok(self.cells[cell].cube(x, y, z))
    }

    pub fn cube_at_mut(&mut self, pos: CubeCoord) -> Result<&mut Cube, MapError> {
        let (cell, x, y, z) = self.locate(pos)?;
        Ok(self.cells[cell].cube_mut(x, y, z))
    }

    /// The neighbor one step out of the named facet, crossing cell
    /// boundaries transparently; `None` at map edges.
    pub fn adjacent_cube(&self, pos: CubeCoord, facet: Facet) -> Option<&Cube> {
        self.cube_at(pos.step(facet)).ok()
    }

    /// Solidity of the four orthogonal neighbors (edges read as open).
    pub fn neighbor_pattern(&self, pos: CubeCoord) -> NeighborPattern {
        let solid = |facet| {
            self.adjacent_cube(pos, facet)
                .map(Cube::is_solid)
                .unwrap_or(false)
        };
        NeighborPattern::new(
            solid(Facet::North),
            solid(Facet::East),
            solid(Facet::South),
            solid(Facet::West),
        )
    }

    /// Slope variant for the cube per the fixed decision table; `None` for
    /// open/liquid cubes and for cubes buried under a solid neighbor.
    pub fn determine_slope(&self, pos: CubeCoord) -> Result<Option<SlopeKind>, MapError> {
        let cube = self.cube_at(pos)?;
        if !cube.is_solid() {
            return Ok(None);
        }
        if let Some(above) = self.adjacent_cube(pos, Facet::Up)
            && above.is_solid()
        {
            return Ok(None);
        }
        Ok(slope_for(self.neighbor_pattern(pos)))
    }

    /// Material to render on a facet, or `None` for "do not render".
    ///
    /// A solid facet renders when it is exposed to a non-solid neighbor or
    /// the map edge; a slope suppresses the Up face. A liquid cube renders
    /// only its surface (Up, when not capped by solid or more liquid).
    pub fn facet_material(
        &self,
        pos: CubeCoord,
        facet: Facet,
    ) -> Result<Option<MaterialId>, MapError> {
        let cube = self.cube_at(pos)?;
        if cube.is_open() {
            return Ok(None);
        }
        if cube.is_liquid() {
            if facet != Facet::Up {
                return Ok(None);
            }
            return Ok(match self.adjacent_cube(pos, Facet::Up) {
                Some(n) if n.is_solid() || n.is_liquid() => None,
                _ => Some(cube.material()),
            });
        }
        if facet == Facet::Up && cube.slope().is_some() {
            return Ok(None);
        }
        Ok(match self.adjacent_cube(pos, facet) {
            Some(n) if n.is_solid() => None,
            _ => Some(cube.material()),
        })
    }

    /// Recomputes the cube's slope and faces from current adjacency.
    ///
    /// Slope first, faces second: the Up-face rule reads the fresh slope.
    pub fn refresh_cube(&mut self, pos: CubeCoord) -> Result<(), MapError> {
        let slope = self.determine_slope(pos)?;
        {
            let cube = self.cube_at_mut(pos)?;
            match slope {
                Some(kind) => cube.set_slope(kind),
                None => cube.clear_slope(),
            }
        }
        let mut materials = [None; 6];
        for facet in ALL_FACETS {
            materials[facet.index()] = self.facet_material(pos, facet)?;
        }
        let cube = self.cube_at_mut(pos)?;
        for facet in ALL_FACETS {
            match materials[facet.index()] {
                Some(m) => cube.set_face(Face::new(facet, m)),
                None => cube.clear_face(facet),
            }
        }
        debug_assert!(!(cube.slope().is_some() && cube.face(Facet::Up).is_some()));
        Ok(())
    }

    /// Refreshes every cube in the map (worldgen / load finalization).
    pub fn refresh_all(&mut self) -> Result<(), MapError> {
        for z in 0..self.cubes_z() as i32 {
            for y in 0..self.cubes_y() as i32 {
                for x in 0..self.cubes_x() as i32 {
                    self.refresh_cube(CubeCoord::new(x, y, z))?;
                }
            }
        }
        Ok(())
    }

    /// Invalidates every cell's cached geometry (e.g. when the shading mode
    /// flips and all compiled intensities go stale).
    pub fn mark_all_dirty(&mut self) {
        for cell in &mut self.cells {
            cell.mark_dirty();
        }
    }
}
