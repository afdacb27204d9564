use serde::Deserialize;
use std::error::Error;
use std::path::Path;

/// Top-level engine configuration, loadable from TOML. Every field has a
/// default so an absent file or empty table still yields a runnable setup.
#[derive(Clone, Debug, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_cells_x")] pub cells_x: usize,
    #[serde(default = "default_cells_y")] pub cells_y: usize,
    #[serde(default = "default_cells_z")] pub cells_z: usize,
    #[serde(default = "default_edge")] pub edge: usize,
    #[serde(default = "default_seed")] pub seed: i32,
    #[serde(default)] pub terrain: TerrainConfig,
    #[serde(default)] pub view: ViewConfig,
}

fn default_cells_x() -> usize { 4 }
fn default_cells_y() -> usize { 4 }
fn default_cells_z() -> usize { 2 }
fn default_edge() -> usize { 8 }
fn default_seed() -> i32 { 1337 }

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cells_x: default_cells_x(),
            cells_y: default_cells_y(),
            cells_z: default_cells_z(),
            edge: default_edge(),
            seed: default_seed(),
            terrain: TerrainConfig::default(),
            view: ViewConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct TerrainConfig {
    #[serde(default = "default_frequency")] pub frequency: f32,
    #[serde(default = "default_base_ratio")] pub base_ratio: f32,
    #[serde(default = "default_amplitude_ratio")] pub amplitude_ratio: f32,
    #[serde(default = "default_sea_ratio")] pub sea_level_ratio: f32,
    #[serde(default = "default_surface")] pub surface: String,
    #[serde(default = "default_fill")] pub fill: String,
    #[serde(default = "default_liquid")] pub liquid: String,
}

fn default_frequency() -> f32 { 0.02 }
fn default_base_ratio() -> f32 { 0.25 }
fn default_amplitude_ratio() -> f32 { 0.5 }
fn default_sea_ratio() -> f32 { 0.3 }
fn default_surface() -> String { "grass".into() }
fn default_fill() -> String { "stone".into() }
fn default_liquid() -> String { "water".into() }

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            base_ratio: default_base_ratio(),
            amplitude_ratio: default_amplitude_ratio(),
            sea_level_ratio: default_sea_ratio(),
            surface: default_surface(),
            fill: default_fill(),
            liquid: default_liquid(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct ViewConfig {
    #[serde(default = "default_distance")] pub distance: f32,
    #[serde(default = "default_half_width")] pub half_width: f32,
    #[serde(default = "default_half_height")] pub half_height: f32,
    #[serde(default = "default_view_levels")] pub view_levels: i32,
    #[serde(default = "default_width")] pub width: u32,
    #[serde(default = "default_height")] pub height: u32,
    #[serde(default)] pub fullscreen: bool,
}

fn default_distance() -> f32 { 128.0 }
fn default_half_width() -> f32 { 64.0 }
fn default_half_height() -> f32 { 48.0 }
fn default_view_levels() -> i32 { 6 }
fn default_width() -> u32 { 1280 }
fn default_height() -> u32 { 720 }

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            distance: default_distance(),
            half_width: default_half_width(),
            half_height: default_half_height(),
            view_levels: default_view_levels(),
            width: default_width(),
            height: default_height(),
            fullscreen: false,
        }
    }
}

impl EngineConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        match path {
            Some(p) => {
                let text = std::fs::read_to_string(p)?;
                let cfg = toml::from_str(&text)?;
                Ok(cfg)
            }
            None => Ok(Self::default()),
        }
    }
}
