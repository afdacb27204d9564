#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderError {
    /// The backend's compiled-geometry handle pool is out of space.
    ResourceExhausted { requested: u32, capacity: u32 },
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::ResourceExhausted {
                requested,
                capacity,
            } => write!(
                f,
                "draw-list pool exhausted: requested {} handles of {}",
                requested, capacity
            ),
        }
    }
}

impl std::error::Error for RenderError {}
