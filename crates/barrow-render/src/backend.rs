//! Backend seam between the pipeline and whatever executes geometry.
//!
//! The pipeline compiles each cell into reusable draw lists, one per camera
//! orientation, and replays them by handle on clean frames. The trait is the
//! whole contract; `RecordingBackend` is the headless implementation used by
//! the binary and the test suite.

use crate::error::RenderError;
use barrow_geom::Vec3;
use hashbrown::HashMap;

/// How a draw list is recorded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureMode {
    /// Record commands into the list without drawing them.
    Compile,
    /// Record commands and draw them in the same pass.
    CompileAndExecute,
}

/// Rendering device abstraction.
///
/// Geometry arrives either immediately (outside any capture) or into the
/// list opened by `begin_list`. Handles come from `alloc_lists` in
/// contiguous ranges and must be freed before their range is re-requested.
pub trait RenderBackend {
    /// Clears the target and resets per-frame drawing state.
    fn begin_frame(&mut self);
    /// Restores state and presents the frame.
    fn end_frame(&mut self);
    /// Reserves `count` contiguous draw-list handles, returning the first.
    fn alloc_lists(&mut self, count: u32) -> Result<u32, RenderError>;
    /// Returns a handle range to the pool and drops its recorded commands.
    fn free_lists(&mut self, first: u32, count: u32);
    /// Opens a list for recording. Nested captures are not supported.
    fn begin_list(&mut self, id: u32, mode: CaptureMode);
    /// Closes the list opened by `begin_list`.
    fn end_list(&mut self);
    /// Draws a previously recorded list.
    fn call_list(&mut self, id: u32);
    /// One textured triangle.
    fn triangle(&mut self, verts: [Vec3; 3], uvs: [[f32; 2]; 3]);
    /// Brightness multiplier applied to subsequent drawing.
    fn set_intensity(&mut self, value: f32);
    /// Selects the texture atlas for subsequent drawing.
    fn bind_atlas(&mut self, handle: u32);
    fn resize(&mut self, width: u32, height: u32);
    fn set_fullscreen(&mut self, enabled: bool);
}

#[derive(Clone, Copy, Debug)]
struct RecordedTriangle {
    #[allow(dead_code)]
    verts: [Vec3; 3],
    #[allow(dead_code)]
    uvs: [[f32; 2]; 3],
}

/// In-memory backend: stores compiled lists in a bounded handle pool and
/// counts every triangle that reaches the (virtual) screen.
pub struct RecordingBackend {
    capacity: u32,
    next: u32,
    free: Vec<(u32, u32)>,
    lists: HashMap<u32, Vec<RecordedTriangle>>,
    capture: Option<(u32, CaptureMode)>,
    intensity: f32,
    atlas: Option<u32>,
    executed_triangles: u64,
    frames: u64,
    width: u32,
    height: u32,
    fullscreen: bool,
}

impl RecordingBackend {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            next: 0,
            free: Vec::new(),
            lists: HashMap::new(),
            capture: None,
            intensity: 1.0,
            atlas: None,
            executed_triangles: 0,
            frames: 0,
            width: 0,
            height: 0,
            fullscreen: false,
        }
    }

    /// Handles currently allocated out of the pool.
    pub fn live_handles(&self) -> usize {
        self.lists.len()
    }

    /// Total triangles drawn since construction (immediate, executed
    /// captures, and replays all count).
    pub fn executed_triangles(&self) -> u64 {
        self.executed_triangles
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    pub fn bound_atlas(&self) -> Option<u32> {
        self.atlas
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn list_len(&self, id: u32) -> Option<usize> {
        self.lists.get(&id).map(Vec::len)
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderBackend for RecordingBackend {
    fn begin_frame(&mut self) {
        self.intensity = 1.0;
    }

    fn end_frame(&mut self) {
        debug_assert!(self.capture.is_none(), "frame ended inside a capture");
        self.frames += 1;
    }

    fn alloc_lists(&mut self, count: u32) -> Result<u32, RenderError> {
        if let Some(i) = self.free.iter().position(|(_, c)| *c >= count) {
            let (first, avail) = self.free.swap_remove(i);
            if avail > count {
                self.free.push((first + count, avail - count));
            }
            for id in first..first + count {
                self.lists.insert(id, Vec::new());
            }
            return Ok(first);
        }
        if self.next + count > self.capacity {
            return Err(RenderError::ResourceExhausted {
                requested: count,
                capacity: self.capacity,
            });
        }
        let first = self.next;
        self.next += count;
        for id in first..first + count {
            self.lists.insert(id, Vec::new());
        }
        Ok(first)
    }

    fn free_lists(&mut self, first: u32, count: u32) {
        for id in first..first + count {
            self.lists.remove(&id);
        }
        self.free.push((first, count));
    }

    fn begin_list(&mut self, id: u32, mode: CaptureMode) {
        debug_assert!(self.capture.is_none(), "nested draw-list capture");
        debug_assert!(self.lists.contains_key(&id), "capture into unallocated list");
        self.lists.insert(id, Vec::new());
        self.capture = Some((id, mode));
    }

    fn end_list(&mut self) {
        debug_assert!(self.capture.is_some(), "end_list without begin_list");
        self.capture = None;
    }

    fn call_list(&mut self, id: u32) {
        match self.lists.get(&id) {
            Some(list) => self.executed_triangles += list.len() as u64,
            None => log::warn!("replay of unallocated draw list {id}"),
        }
    }

    fn triangle(&mut self, verts: [Vec3; 3], uvs: [[f32; 2]; 3]) {
        let tri = RecordedTriangle { verts, uvs };
        match self.capture {
            Some((id, mode)) => {
                if let Some(list) = self.lists.get_mut(&id) {
                    list.push(tri);
                }
                if mode == CaptureMode::CompileAndExecute {
                    self.executed_triangles += 1;
                }
            }
            None => self.executed_triangles += 1,
        }
    }

    fn set_intensity(&mut self, value: f32) {
        self.intensity = value;
    }

    fn bind_atlas(&mut self, handle: u32) {
        self.atlas = Some(handle);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn set_fullscreen(&mut self, enabled: bool) {
        self.fullscreen = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(b: &mut RecordingBackend) {
        b.triangle([Vec3::ZERO; 3], [[0.0, 0.0]; 3]);
    }

    #[test]
    fn alloc_respects_capacity() {
        let mut b = RecordingBackend::new(4);
        assert_eq!(b.alloc_lists(4).unwrap(), 0);
        assert_eq!(
            b.alloc_lists(1),
            Err(RenderError::ResourceExhausted {
                requested: 1,
                capacity: 4
            })
        );
    }

    #[test]
    fn freed_ranges_are_reused() {
        let mut b = RecordingBackend::new(4);
        let first = b.alloc_lists(4).unwrap();
        b.free_lists(first, 4);
        assert_eq!(b.alloc_lists(4).unwrap(), first);
        assert_eq!(b.live_handles(), 4);
    }

    #[test]
    fn compile_defers_execution_until_replay() {
        let mut b = RecordingBackend::new(1);
        let id = b.alloc_lists(1).unwrap();
        b.begin_list(id, CaptureMode::Compile);
        tri(&mut b);
        tri(&mut b);
        b.end_list();
        assert_eq!(b.executed_triangles(), 0);
        b.call_list(id);
        assert_eq!(b.executed_triangles(), 2);
    }

    #[test]
    fn compile_and_execute_draws_once_while_recording() {
        let mut b = RecordingBackend::new(1);
        let id = b.alloc_lists(1).unwrap();
        b.begin_list(id, CaptureMode::CompileAndExecute);
        tri(&mut b);
        b.end_list();
        assert_eq!(b.executed_triangles(), 1);
        b.call_list(id);
        assert_eq!(b.executed_triangles(), 2);
    }

    #[test]
    fn recapture_replaces_list_contents() {
        let mut b = RecordingBackend::new(1);
        let id = b.alloc_lists(1).unwrap();
        b.begin_list(id, CaptureMode::Compile);
        tri(&mut b);
        tri(&mut b);
        b.end_list();
        b.begin_list(id, CaptureMode::Compile);
        tri(&mut b);
        b.end_list();
        assert_eq!(b.list_len(id), Some(1));
    }
}
