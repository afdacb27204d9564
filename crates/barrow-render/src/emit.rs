//! Geometry emission: cubes, faces, and slopes into backend triangles.
//!
//! Emission reads only derived state (face slots and slopes); it never
//! samples adjacency. Whatever the map refresh left on the cube is what
//! gets drawn, so a stale cube draws stale geometry until its cell rebuilds.

use crate::atlas::TextureAtlas;
use crate::backend::RenderBackend;
use barrow_geom::Vec3;
use barrow_map::{Cell, Cube, Facet, SlopeKind};
use barrow_materials::MaterialCatalog;

/// Unit-cube corner offsets per facet, counter-clockwise from outside.
fn facet_corners(facet: Facet) -> [Vec3; 4] {
    match facet {
        Facet::North => [
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
        ],
        Facet::South => [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(0.0, 0.0, 1.0),
        ],
        Facet::East => [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
        ],
        Facet::West => [
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
        ],
        Facet::Up => [
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
        ],
        Facet::Down => [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
        ],
    }
}

/// Top-corner heights `[sw, se, ne, nw]` and whether to split along the
/// sw-ne diagonal. Corners and inner corners split through their odd
/// corner so the fold line lands on the shape's crease.
fn slope_surface(kind: SlopeKind) -> ([f32; 4], bool) {
    use SlopeKind::*;
    match kind {
        RampNorth => ([0.0, 0.0, 1.0, 1.0], true),
        RampEast => ([0.0, 1.0, 1.0, 0.0], true),
        RampSouth => ([1.0, 1.0, 0.0, 0.0], true),
        RampWest => ([1.0, 0.0, 0.0, 1.0], true),
        CornerNortheast => ([0.0, 0.0, 1.0, 0.0], true),
        CornerSoutheast => ([0.0, 1.0, 0.0, 0.0], false),
        CornerSouthwest => ([1.0, 0.0, 0.0, 0.0], true),
        CornerNorthwest => ([0.0, 0.0, 0.0, 1.0], false),
        InnerNorth => ([1.0, 1.0, 1.0, 0.0], false),
        InnerEast => ([1.0, 1.0, 0.0, 1.0], true),
        InnerSouth => ([1.0, 0.0, 1.0, 1.0], false),
        InnerWest => ([0.0, 1.0, 1.0, 1.0], true),
    }
}

fn quad<B: RenderBackend + ?Sized>(
    backend: &mut B,
    corners: [Vec3; 4],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
) -> u32 {
    let uvs = [
        uv_min,
        [uv_max[0], uv_min[1]],
        uv_max,
        [uv_min[0], uv_max[1]],
    ];
    backend.triangle(
        [corners[0], corners[1], corners[2]],
        [uvs[0], uvs[1], uvs[2]],
    );
    backend.triangle(
        [corners[0], corners[2], corners[3]],
        [uvs[0], uvs[2], uvs[3]],
    );
    2
}

fn slope<B: RenderBackend + ?Sized>(
    backend: &mut B,
    origin: Vec3,
    kind: SlopeKind,
    uv_min: [f32; 2],
    uv_max: [f32; 2],
) -> u32 {
    let (heights, split_sw_ne) = slope_surface(kind);
    let at = |x: f32, y: f32, h: f32| origin + Vec3::new(x, y, h);
    let uv = |x: f32, y: f32| {
        [
            uv_min[0] + x * (uv_max[0] - uv_min[0]),
            uv_min[1] + y * (uv_max[1] - uv_min[1]),
        ]
    };
    let sw = at(0.0, 0.0, heights[0]);
    let se = at(1.0, 0.0, heights[1]);
    let ne = at(1.0, 1.0, heights[2]);
    let nw = at(0.0, 1.0, heights[3]);
    let (uv_sw, uv_se, uv_ne, uv_nw) = (uv(0.0, 0.0), uv(1.0, 0.0), uv(1.0, 1.0), uv(0.0, 1.0));
    if split_sw_ne {
        backend.triangle([sw, se, ne], [uv_sw, uv_se, uv_ne]);
        backend.triangle([sw, ne, nw], [uv_sw, uv_ne, uv_nw]);
    } else {
        backend.triangle([sw, se, nw], [uv_sw, uv_se, uv_nw]);
        backend.triangle([se, ne, nw], [uv_se, uv_ne, uv_nw]);
    }
    2
}

/// Draws one cube's visible geometry in the given facet order.
/// Returns the number of triangles emitted.
pub fn draw_cube<B: RenderBackend + ?Sized>(
    backend: &mut B,
    cube: &Cube,
    origin: Vec3,
    atlas: &dyn TextureAtlas,
    catalog: &MaterialCatalog,
    order: [Facet; 6],
) -> u32 {
    let mut triangles = 0;
    for facet in order {
        if facet == Facet::Up
            && let Some(s) = cube.slope()
        {
            let Some(material) = catalog.get(cube.material()) else {
                continue;
            };
            let (uv_min, uv_max) = atlas.tile_uv(material.tile);
            triangles += slope(backend, origin, s.kind, uv_min, uv_max);
            continue;
        }
        let Some(face) = cube.face(facet) else {
            continue;
        };
        if !face.visible {
            continue;
        }
        let Some(material) = catalog.get(face.material) else {
            continue;
        };
        let (uv_min, uv_max) = atlas.tile_uv(material.tile);
        let corners = facet_corners(facet).map(|c| origin + c);
        triangles += quad(backend, corners, uv_min, uv_max);
    }
    triangles
}

/// Draws every cube in a cell, bottom level first. Returns the triangle
/// count so the caller can cache it alongside the compiled lists.
pub fn draw_cell<B: RenderBackend + ?Sized>(
    backend: &mut B,
    cell: &Cell,
    atlas: &dyn TextureAtlas,
    catalog: &MaterialCatalog,
    order: [Facet; 6],
) -> u32 {
    let edge = cell.edge();
    let base = Vec3::new(
        (cell.coord().cx * edge as i32) as f32,
        (cell.coord().cy * edge as i32) as f32,
        (cell.coord().cz * edge as i32) as f32,
    );
    let mut triangles = 0;
    for z in 0..edge {
        for y in 0..edge {
            for x in 0..edge {
                let cube = cell.cube(x, y, z);
                if cube.is_open() {
                    continue;
                }
                let origin = base + Vec3::new(x as f32, y as f32, z as f32);
                triangles += draw_cube(backend, cube, origin, atlas, catalog, order);
            }
        }
    }
    triangles
}
