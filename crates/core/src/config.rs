//! Per-map generation parameters and the indexed map set they are selected from.
//!
//! Map sets are plain configuration data. They load from `.json` (via
//! `serde_json`) or `.toml` (via `toml`), and every entry is validated before a
//! set is handed out, so generation never sees a malformed config.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::coord::Coord;
use crate::error::{ConfigError, ConfigFileError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapSize {
    pub width: i32,
    pub height: i32,
}

impl MapSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Cell count; zero for non-positive dimensions.
    pub fn cells(self) -> usize {
        if self.width <= 0 || self.height <= 0 {
            return 0;
        }
        self.width as usize * self.height as usize
    }
}

/// Linear RGB, carried through to renderers untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Colour {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Componentwise blend; `t` is clamped to `[0, 1]`.
    pub fn lerp(self, other: Colour, t: f32) -> Colour {
        let t = t.clamp(0.0, 1.0);
        Colour {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }
}

/// How the placement engine decides it has tried enough candidates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMode {
    /// Offer exactly `target` free candidates; rejected offers still count.
    #[default]
    AttemptBudget,
    /// Keep offering candidates until `target` obstacles stand or candidates run out.
    FillToTarget,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub size: MapSize,
    pub obstacle_density: f32,
    pub seed: u64,
    pub min_obstacle_height: f32,
    pub max_obstacle_height: f32,
    #[serde(default)]
    pub boundary_obstacles: bool,
    #[serde(default)]
    pub placement: PlacementMode,
    #[serde(default)]
    pub foreground_colour: Colour,
    #[serde(default)]
    pub background_colour: Colour,
}

impl MapConfig {
    pub fn new(width: i32, height: i32, obstacle_density: f32, seed: u64) -> Self {
        Self {
            size: MapSize::new(width, height),
            obstacle_density,
            seed,
            min_obstacle_height: 1.0,
            max_obstacle_height: 1.0,
            boundary_obstacles: false,
            placement: PlacementMode::AttemptBudget,
            foreground_colour: Colour::default(),
            background_colour: Colour::default(),
        }
    }

    pub fn with_heights(mut self, min_obstacle_height: f32, max_obstacle_height: f32) -> Self {
        self.min_obstacle_height = min_obstacle_height;
        self.max_obstacle_height = max_obstacle_height;
        self
    }

    pub fn with_boundary_obstacles(mut self, enabled: bool) -> Self {
        self.boundary_obstacles = enabled;
        self
    }

    pub fn with_placement(mut self, placement: PlacementMode) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_colours(mut self, foreground: Colour, background: Colour) -> Self {
        self.foreground_colour = foreground;
        self.background_colour = background;
        self
    }

    /// Obstacle shade for row `y`: foreground at the bottom row, fading
    /// toward background at the top.
    pub fn obstacle_colour(&self, y: i32) -> Colour {
        let t = y as f32 / self.size.height as f32;
        self.foreground_colour.lerp(self.background_colour, t)
    }

    pub fn center(&self) -> Coord {
        Coord { x: self.size.width / 2, y: self.size.height / 2 }
    }

    /// `floor(width * height * density)`, computed in single precision and
    /// capped at the cell count.
    pub fn target_obstacle_count(&self) -> usize {
        let cells = self.size.cells();
        let target = (cells as f32 * self.obstacle_density).floor();
        if target.is_nan() || target <= 0.0 {
            return 0;
        }
        (target as usize).min(cells)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size.width <= 0 || self.size.height <= 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.size.width,
                height: self.size.height,
            });
        }
        if !self.obstacle_density.is_finite() || !(0.0..=1.0).contains(&self.obstacle_density) {
            return Err(ConfigError::InvalidDensity(self.obstacle_density));
        }
        if !self.min_obstacle_height.is_finite()
            || !self.max_obstacle_height.is_finite()
            || self.min_obstacle_height > self.max_obstacle_height
        {
            return Err(ConfigError::InvalidHeightRange {
                min: self.min_obstacle_height,
                max: self.max_obstacle_height,
            });
        }
        Ok(())
    }
}

/// On-disk shape of a map set; only reachable through [`MapSet::new`] validation.
#[derive(Deserialize, Serialize)]
struct MapSetFile {
    maps: Vec<MapConfig>,
}

/// Non-empty, validated list of map configs selected by index.
#[derive(Clone, Debug, PartialEq)]
pub struct MapSet {
    maps: Vec<MapConfig>,
}

impl MapSet {
    pub fn new(maps: Vec<MapConfig>) -> Result<Self, ConfigFileError> {
        if maps.is_empty() {
            return Err(ConfigFileError::Invalid { index: 0, source: ConfigError::EmptyMapSet });
        }
        for (index, map) in maps.iter().enumerate() {
            map.validate().map_err(|source| ConfigFileError::Invalid { index, source })?;
        }
        Ok(Self { maps })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigFileError> {
        let file: MapSetFile = serde_json::from_str(raw)?;
        Self::new(file.maps)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigFileError> {
        let file: MapSetFile = toml::from_str(raw)?;
        Self::new(file.maps)
    }

    /// Load a map set, picking the parser from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigFileError> {
        let extension =
            path.extension().and_then(|ext| ext.to_str()).unwrap_or_default().to_ascii_lowercase();
        let raw = fs::read_to_string(path)?;
        match extension.as_str() {
            "json" => Self::from_json_str(&raw),
            "toml" => Self::from_toml_str(&raw),
            other => Err(ConfigFileError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn to_json_string(&self) -> Result<String, ConfigFileError> {
        let file = MapSetFile { maps: self.maps.clone() };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    pub fn get(&self, index: usize) -> Result<&MapConfig, ConfigError> {
        self.maps.get(index).ok_or(ConfigError::IndexOutOfRange { index, len: self.maps.len() })
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MapConfig> {
        self.maps.iter()
    }
}

impl Default for MapSet {
    fn default() -> Self {
        Self {
            maps: vec![
                MapConfig::new(10, 10, 0.2, 42)
                    .with_heights(1.0, 3.0)
                    .with_colours(Colour::new(0.9, 0.4, 0.1), Colour::new(0.2, 0.1, 0.05)),
                MapConfig::new(15, 12, 0.3, 7)
                    .with_heights(0.5, 2.5)
                    .with_boundary_obstacles(true)
                    .with_colours(Colour::new(0.3, 0.6, 0.9), Colour::new(0.05, 0.1, 0.2)),
                MapConfig::new(21, 21, 0.35, 2_024)
                    .with_heights(1.0, 4.0)
                    .with_colours(Colour::new(0.5, 0.8, 0.3), Colour::new(0.1, 0.2, 0.05)),
            ],
        }
    }
}
