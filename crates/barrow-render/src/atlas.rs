//! Texture atlas lookup for material tiles.

/// Maps material tile coordinates into normalized UV rectangles.
pub trait TextureAtlas {
    /// Backend handle of the atlas texture.
    fn handle(&self) -> u32;
    /// Atlas dimensions in pixels, the UV scaling basis.
    fn pixel_size(&self) -> (u32, u32);
    /// `(min, max)` UV corners of a tile.
    fn tile_uv(&self, tile: (u32, u32)) -> ([f32; 2], [f32; 2]);
}

/// Aggregate texture cut into a uniform grid of square tiles.
#[derive(Clone, Copy, Debug)]
pub struct GridAtlas {
    handle: u32,
    width: u32,
    height: u32,
    tile: u32,
}

impl GridAtlas {
    /// `width`/`height` are the texture's pixel dimensions, `tile` the
    /// pixel edge of one square tile. Panics when the texture cannot hold
    /// at least one tile.
    pub fn new(handle: u32, width: u32, height: u32, tile: u32) -> Self {
        assert!(tile > 0 && width >= tile && height >= tile);
        Self {
            handle,
            width,
            height,
            tile,
        }
    }

    fn columns(&self) -> u32 {
        self.width / self.tile
    }

    fn rows(&self) -> u32 {
        self.height / self.tile
    }
}

impl TextureAtlas for GridAtlas {
    fn handle(&self) -> u32 {
        self.handle
    }

    fn pixel_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn tile_uv(&self, tile: (u32, u32)) -> ([f32; 2], [f32; 2]) {
        let tx = tile.0.min(self.columns() - 1);
        let ty = tile.1.min(self.rows() - 1);
        let w = self.tile as f32 / self.width as f32;
        let h = self.tile as f32 / self.height as f32;
        let min = [tx as f32 * w, ty as f32 * h];
        let max = [min[0] + w, min[1] + h];
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_partition_the_texture() {
        // 64x32 texture, 16px tiles: 4 columns, 2 rows.
        let atlas = GridAtlas::new(1, 64, 32, 16);
        let (min, max) = atlas.tile_uv((0, 0));
        assert_eq!(min, [0.0, 0.0]);
        assert_eq!(max, [0.25, 0.5]);
        let (min, max) = atlas.tile_uv((3, 1));
        assert_eq!(min, [0.75, 0.5]);
        assert_eq!(max, [1.0, 1.0]);
    }

    #[test]
    fn out_of_range_tiles_clamp_to_the_last_cell() {
        let atlas = GridAtlas::new(1, 32, 32, 16);
        assert_eq!(atlas.tile_uv((9, 9)), atlas.tile_uv((1, 1)));
    }

    #[test]
    #[should_panic]
    fn oversized_tile_is_rejected() {
        let _ = GridAtlas::new(1, 8, 8, 16);
    }

    #[test]
    fn pixel_size_reports_the_texture_extent() {
        let atlas = GridAtlas::new(7, 256, 128, 16);
        assert_eq!(atlas.pixel_size(), (256, 128));
        assert_eq!(atlas.handle(), 7);
    }
}
