//! Off-screen picking colors.
//!
//! Pickable items draw in a flat unique color during a picking pass; the
//! color read back under the cursor maps straight back to the item index.
//! The generator hands out colors in sequence and is reset at the start of
//! every frame so indices stay stable within a frame. Index 0 encodes as
//! color 1, keeping pure black for "nothing here".

#[derive(Clone, Copy, Debug, Default)]
pub struct PickingColors {
    next: u32,
}

impl PickingColors {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Restarts the sequence; called once per frame.
    pub fn reset(&mut self) {
        self.next = 0;
    }

    /// Color for the next pickable item this frame.
    pub fn next_color(&mut self) -> [u8; 3] {
        let color = Self::color_for(self.next);
        self.next += 1;
        color
    }

    /// Unique flat color for a pickable index.
    pub fn color_for(index: u32) -> [u8; 3] {
        let id = index + 1;
        [
            (id & 0xff) as u8,
            ((id >> 8) & 0xff) as u8,
            ((id >> 16) & 0xff) as u8,
        ]
    }

    /// Inverse of `color_for`; `None` for the background color.
    pub fn index_for(color: [u8; 3]) -> Option<u32> {
        let id = color[0] as u32 | (color[1] as u32) << 8 | (color[2] as u32) << 16;
        id.checked_sub(1)
    }
}
