//! Frame traversal: cull, replay clean cells, rebuild dirty ones.

use crate::atlas::TextureAtlas;
use crate::backend::{CaptureMode, RenderBackend};
use crate::camera::{ALL_ORIENTATIONS, Camera};
use crate::emit;
use crate::error::RenderError;
use crate::picking::PickingColors;
use barrow_map::{CellCoord, DrawListRange, Map};
use barrow_materials::MaterialCatalog;

/// Drives one frame of terrain drawing.
///
/// Cells walk bottom-up in z so levels above the camera's look level slice
/// away wholesale. Each visible cell either replays its compiled draw list
/// for the current orientation or rebuilds all four lists; only the
/// executed rebuild pass contributes to the frame triangle count.
pub struct RenderPipeline {
    shaded_draw: bool,
    fullscreen: bool,
    frame_triangles: u32,
    picking: PickingColors,
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPipeline {
    pub fn new() -> Self {
        Self {
            shaded_draw: true,
            fullscreen: false,
            frame_triangles: 0,
            picking: PickingColors::new(),
        }
    }

    /// Per-frame picking-color sequence, restarted by `render`.
    #[inline]
    pub fn picking(&mut self) -> &mut PickingColors {
        &mut self.picking
    }

    #[inline]
    pub fn shaded_draw(&self) -> bool {
        self.shaded_draw
    }

    /// Flips depth shading. Compiled lists bake their colors, so every
    /// cell goes dirty when the mode actually changes.
    pub fn set_shaded_draw(&mut self, map: &mut Map, enabled: bool) {
        if self.shaded_draw != enabled {
            self.shaded_draw = enabled;
            map.mark_all_dirty();
            log::debug!("shaded draw {}", if enabled { "on" } else { "off" });
        }
    }

    /// Triangles drawn by the most recent `render` call.
    #[inline]
    pub fn frame_triangles(&self) -> u32 {
        self.frame_triangles
    }

    /// Brightness for a z level: full at the look level, fading linearly
    /// to black over the camera's view depth. Unshaded mode is always 1.0.
    pub fn shading(&self, z: i32, camera: &dyn Camera) -> f32 {
        if !self.shaded_draw {
            return 1.0;
        }
        let depth = camera.look_level() - z;
        if depth < 0 {
            return 0.0;
        }
        let levels = camera.view_levels().max(1);
        if depth >= levels {
            return 0.0;
        }
        1.0 - depth as f32 / levels as f32
    }

    /// Whether a z level sits inside the camera's view window: at or below
    /// the look level, within the view depth.
    #[inline]
    pub fn in_slice(&self, z: i32, camera: &dyn Camera) -> bool {
        let depth = camera.look_level() - z;
        depth >= 0 && depth < camera.view_levels().max(1)
    }

    /// Draws the map for one frame. Returns `Ok(false)` without touching
    /// the backend when there is no world to draw.
    pub fn render<B: RenderBackend>(
        &mut self,
        backend: &mut B,
        map: &mut Map,
        camera: &dyn Camera,
        atlas: &dyn TextureAtlas,
        catalog: &MaterialCatalog,
    ) -> Result<bool, RenderError> {
        if !map.is_ready() {
            return Ok(false);
        }
        self.frame_triangles = 0;
        self.picking.reset();
        backend.begin_frame();
        backend.bind_atlas(atlas.handle());
        let edge = map.edge() as i32;
        // Center-to-corner distance, rounded up to the full edge length.
        let radius = map.edge() as f32;
        for cz in 0..map.cells_z() as i32 {
            let base_z = cz * edge;
            if base_z > camera.look_level() {
                break;
            }
            let top_z = (base_z + edge - 1).min(camera.look_level());
            for cy in 0..map.cells_y() as i32 {
                for cx in 0..map.cells_x() as i32 {
                    let coord = CellCoord::new(cx, cy, cz);
                    let (position, dirty, lists) = match map.cell(coord) {
                        Some(cell) => (cell.position(), cell.is_dirty(), cell.lists()),
                        None => continue,
                    };
                    if !camera.sphere_in_frustum(position, radius) {
                        continue;
                    }
                    backend.set_intensity(self.shading(top_z, camera));
                    match lists {
                        Some(range) if !dirty => {
                            backend.call_list(range.first + camera.orientation().index() as u32);
                            if let Some(cell) = map.cell(coord) {
                                self.frame_triangles += cell.cached_triangles();
                            }
                        }
                        _ => self.rebuild_cell(backend, map, coord, camera, atlas, catalog)?,
                    }
                }
            }
        }
        backend.end_frame();
        Ok(true)
    }

    /// Recompiles a cell's four per-orientation lists, freeing the old
    /// range first. The pass matching the camera's orientation draws while
    /// it records; the other three compile silently.
    fn rebuild_cell<B: RenderBackend>(
        &mut self,
        backend: &mut B,
        map: &mut Map,
        coord: CellCoord,
        camera: &dyn Camera,
        atlas: &dyn TextureAtlas,
        catalog: &MaterialCatalog,
    ) -> Result<(), RenderError> {
        if let Some(cell) = map.cell_mut(coord)
            && let Some(range) = cell.take_lists()
        {
            backend.free_lists(range.first, range.count);
        }
        let count = ALL_ORIENTATIONS.len() as u32;
        let first = backend.alloc_lists(count)?;
        let mut executed = 0;
        for orientation in ALL_ORIENTATIONS {
            let mode = if orientation == camera.orientation() {
                CaptureMode::CompileAndExecute
            } else {
                CaptureMode::Compile
            };
            backend.begin_list(first + orientation.index() as u32, mode);
            let triangles = match map.cell(coord) {
                Some(cell) => {
                    emit::draw_cell(backend, cell, atlas, catalog, orientation.facet_order())
                }
                None => 0,
            };
            backend.end_list();
            if mode == CaptureMode::CompileAndExecute {
                executed = triangles;
            }
        }
        if let Some(cell) = map.cell_mut(coord) {
            cell.set_lists(DrawListRange { first, count });
            cell.set_triangles(executed);
            cell.clear_dirty();
        }
        self.frame_triangles += executed;
        Ok(())
    }

    pub fn resize<B: RenderBackend>(&mut self, backend: &mut B, width: u32, height: u32) {
        backend.resize(width, height);
        log::info!("viewport {}x{}", width, height);
    }

    /// Flips between windowed and fullscreen; returns the new state.
    pub fn toggle_fullscreen<B: RenderBackend>(&mut self, backend: &mut B) -> bool {
        self.fullscreen = !self.fullscreen;
        backend.set_fullscreen(self.fullscreen);
        self.fullscreen
    }
}
