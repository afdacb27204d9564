//! Noise-driven terrain seeding for the demo world.

use crate::config::TerrainConfig;
use barrow_map::{CubeCoord, Map};
use barrow_materials::{MaterialCatalog, MaterialId};
use fastnoise_lite::{FastNoiseLite, NoiseType};
use std::error::Error;

fn material_id(catalog: &MaterialCatalog, key: &str) -> Result<MaterialId, Box<dyn Error>> {
    catalog
        .get_id(key)
        .ok_or_else(|| format!("terrain references unknown material '{key}'").into())
}

/// Fills the map with a heightmap of solid terrain, a surface layer, and
/// standing water below sea level, then derives all faces and slopes.
pub fn generate(
    map: &mut Map,
    catalog: &MaterialCatalog,
    terrain: &TerrainConfig,
    seed: i32,
) -> Result<(), Box<dyn Error>> {
    let surface = material_id(catalog, &terrain.surface)?;
    let fill = material_id(catalog, &terrain.fill)?;
    let liquid = material_id(catalog, &terrain.liquid)?;

    let mut noise = FastNoiseLite::with_seed(seed);
    noise.set_noise_type(Some(NoiseType::OpenSimplex2));
    noise.set_frequency(Some(terrain.frequency));

    let depth = map.cubes_z() as f32;
    let base = (depth * terrain.base_ratio) as i32;
    let amplitude = depth * terrain.amplitude_ratio;
    let sea_level = (depth * terrain.sea_level_ratio) as i32;
    let max_z = map.cubes_z() as i32 - 1;

    for x in 0..map.cubes_x() as i32 {
        for y in 0..map.cubes_y() as i32 {
            let n = noise.get_noise_2d(x as f32, y as f32);
            let height = (base + ((n + 1.0) * 0.5 * amplitude) as i32).clamp(0, max_z);
            for z in 0..=height {
                let cube = map.cube_at_mut(CubeCoord::new(x, y, z))?;
                let material = if z == height { surface } else { fill };
                cube.set_material(material, catalog)?;
                cube.set_solid(true);
            }
            for z in (height + 1)..=sea_level.min(max_z) {
                let cube = map.cube_at_mut(CubeCoord::new(x, y, z))?;
                cube.set_material(liquid, catalog)?;
                cube.set_liquid(true);
            }
        }
    }

    map.refresh_all()?;
    log::info!(
        "generated {}x{}x{} terrain, sea level {}",
        map.cubes_x(),
        map.cubes_y(),
        map.cubes_z(),
        sea_level
    );
    Ok(())
}

/// Topmost solid level of a column, if any.
pub fn surface_level(map: &Map, x: i32, y: i32) -> Option<i32> {
    (0..map.cubes_z() as i32)
        .rev()
        .find(|&z| {
            map.cube_at(CubeCoord::new(x, y, z))
                .map(|c| c.is_solid())
                .unwrap_or(false)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> MaterialCatalog {
        MaterialCatalog::from_toml_str(
            r#"
            [materials]
            stone = [0, 0]
            grass = [1, 0]
            water = { tile = [2, 0], translucent = true }
            "#,
        )
        .unwrap()
    }

    #[test]
    fn terrain_is_grounded_and_capped() {
        let cat = catalog();
        let mut map = Map::new(2, 2, 2, 4);
        generate(&mut map, &cat, &TerrainConfig::default(), 42).unwrap();
        for x in 0..map.cubes_x() as i32 {
            for y in 0..map.cubes_y() as i32 {
                // Every column has a floor.
                assert!(map.cube_at(CubeCoord::new(x, y, 0)).unwrap().is_solid());
                let top = surface_level(&map, x, y).unwrap();
                // Nothing solid floats above the surface.
                for z in (top + 1)..map.cubes_z() as i32 {
                    assert!(!map.cube_at(CubeCoord::new(x, y, z)).unwrap().is_solid());
                }
            }
        }
    }

    #[test]
    fn unknown_material_key_is_an_error() {
        let cat = catalog();
        let mut map = Map::new(1, 1, 1, 2);
        let terrain = TerrainConfig {
            fill: "basalt".into(),
            ..TerrainConfig::default()
        };
        assert!(generate(&mut map, &cat, &terrain, 1).is_err());
    }

    #[test]
    fn same_seed_generates_the_same_world() {
        let cat = catalog();
        let terrain = TerrainConfig::default();
        let mut a = Map::new(2, 2, 2, 4);
        let mut b = Map::new(2, 2, 2, 4);
        generate(&mut a, &cat, &terrain, 7).unwrap();
        generate(&mut b, &cat, &terrain, 7).unwrap();
        for x in 0..a.cubes_x() as i32 {
            for y in 0..a.cubes_y() as i32 {
                assert_eq!(surface_level(&a, x, y), surface_level(&b, x, y));
            }
        }
    }
}
