use crate::coords::CellCoord;
use crate::cube::Cube;
use barrow_geom::Vec3;

/// Contiguous range of compiled-geometry handles owned by a cell,
/// one handle per camera-facing diagonal orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawListRange {
    pub first: u32,
    pub count: u32,
}

/// Fixed-size group of cubes; the unit of render caching.
///
/// The cached handles are replayable only while `dirty` is false. The cell
/// never dirties itself: any mutation of its cubes must be followed by an
/// explicit `mark_dirty` from the terrain-edit layer.
#[derive(Clone, Debug)]
pub struct Cell {
    coord: CellCoord,
    position: Vec3,
    edge: usize,
    cubes: Vec<Cube>,
    lists: Option<DrawListRange>,
    dirty: bool,
    triangles: u32,
}

impl Cell {
    /// New cell with all-open cubes; starts dirty with no compiled lists.
    pub fn new(coord: CellCoord, edge: usize) -> Self {
        let half = edge as f32 * 0.5;
        let position = Vec3::new(
            coord.cx as f32 * edge as f32 + half,
            coord.cy as f32 * edge as f32 + half,
            coord.cz as f32 * edge as f32 + half,
        );
        Self {
            coord,
            position,
            edge,
            cubes: vec![Cube::default(); edge * edge * edge],
            lists: None,
            dirty: true,
            triangles: 0,
        }
    }

    #[inline]
    pub fn coord(&self) -> CellCoord {
        self.coord
    }

    /// World-space center, the anchor for sphere-vs-frustum culling.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn edge(&self) -> usize {
        self.edge
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.edge + y) * self.edge + x
    }

    #[inline]
    pub fn cube(&self, x: usize, y: usize, z: usize) -> &Cube {
        &self.cubes[self.idx(x, y, z)]
    }

    #[inline]
    pub fn cube_mut(&mut self, x: usize, y: usize, z: usize) -> &mut Cube {
        let i = self.idx(x, y, z);
        &mut self.cubes[i]
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn cached_triangles(&self) -> u32 {
        self.triangles
    }

    #[inline]
    pub fn set_triangles(&mut self, count: u32) {
        self.triangles = count;
    }

    #[inline]
    pub fn lists(&self) -> Option<DrawListRange> {
        self.lists
    }

    #[inline]
    pub fn set_lists(&mut self, range: DrawListRange) {
        self.lists = Some(range);
    }

    /// Removes and returns the handle range, e.g. before freeing it on rebuild.
    #[inline]
    pub fn take_lists(&mut self) -> Option<DrawListRange> {
        self.lists.take()
    }
}
