//! Error types for configuration, allocation, and map selection.

use std::io;

use thiserror::Error;

use crate::coord::Coord;

/// Rejected map configuration or map selection.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("map index {index} is out of range for {len} configured maps")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("map size {width}x{height} must be positive in both dimensions")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("obstacle density {0} must lie within [0, 1]")]
    InvalidDensity(f32),
    #[error("obstacle height range {min}..{max} is not a finite ascending range")]
    InvalidHeightRange { min: f32, max: f32 },
    #[error("map set contains no maps")]
    EmptyMapSet,
}

/// Failure while loading a map set from disk.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("map config I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid map config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid map config TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported map config format '{0}' (expected .json or .toml)")]
    UnsupportedFormat(String),
    #[error("map {index} is invalid: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: ConfigError,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AllocatorError {
    #[error("no open tiles available")]
    Exhausted,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum MapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no map has been generated yet")]
    NoActiveMap,
    #[error("tile handle from generation {issued} is stale (current generation {current})")]
    StaleHandle { issued: u64, current: u64 },
    #[error("tile {0} was removed from the open set")]
    TileRemoved(Coord),
    #[error("tile {0} lies outside the active map")]
    TileOutsideMap(Coord),
    #[error(transparent)]
    Allocator(#[from] AllocatorError),
}
