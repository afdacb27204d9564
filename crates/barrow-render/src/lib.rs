//! Cached terrain rendering over an abstract backend.
//!
//! Frames traverse the map's cells bottom-up, cull against the camera
//! frustum, and either replay each cell's compiled draw list or rebuild
//! the per-orientation set when an edit dirtied it.
#![forbid(unsafe_code)]

pub mod atlas;
pub mod backend;
pub mod camera;
pub mod emit;
pub mod error;
pub mod picking;
pub mod pipeline;

pub use atlas::{GridAtlas, TextureAtlas};
pub use backend::{CaptureMode, RecordingBackend, RenderBackend};
pub use camera::{ALL_ORIENTATIONS, Camera, Frustum, IsoCamera, Orientation};
pub use error::RenderError;
pub use picking::PickingColors;
pub use pipeline::RenderPipeline;
