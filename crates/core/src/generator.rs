//! Map generation orchestration and the stateful generator service.
//!
//! [`generate`] is a pure function of a [`MapConfig`]: it enumerates every
//! tile, shuffles that list with the map seed to get the candidate order, runs
//! obstacle placement against it, and finally shuffles the surviving open tiles
//! with the same seed to seed the [`OpenTileAllocator`].
//!
//! [`MapGenerator`] holds the configured [`MapSet`] and the one active map.
//! Regeneration builds the replacement completely before swapping it in, so a
//! rejected request leaves the previous map authoritative. Every successful
//! swap bumps an epoch that invalidates previously issued [`TileHandle`]s.

use log::{debug, warn};

use crate::allocator::{CoordCycle, OpenTileAllocator};
use crate::config::{MapConfig, MapSet};
use crate::connectivity::ConnectivityValidator;
use crate::coord::Coord;
use crate::error::{AllocatorError, ConfigError, MapError};
use crate::grid::OccupancyGrid;
use crate::placement::{Obstacle, PlacementReport, place_obstacles};

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedMap {
    config: MapConfig,
    grid: OccupancyGrid,
    obstacles: Vec<Obstacle>,
    report: PlacementReport,
    tile_cycle: CoordCycle,
    open_tiles: OpenTileAllocator,
}

impl GeneratedMap {
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn report(&self) -> &PlacementReport {
        &self.report
    }

    pub fn open_tiles(&self) -> &OpenTileAllocator {
        &self.open_tiles
    }

    pub fn center(&self) -> Coord {
        self.config.center()
    }

    pub fn obstacle_count(&self) -> usize {
        self.grid.obstacle_count()
    }

    /// Draw from the all-tiles cycle, independent of occupancy.
    pub fn random_coord(&mut self) -> Option<Coord> {
        self.tile_cycle.draw()
    }

    /// Tile centre in world units, with the grid centred on the origin.
    pub fn world_position(&self, coord: Coord, tile_size: f32) -> (f32, f32) {
        let half_width = self.grid.width() as f32 / 2.0;
        let half_height = self.grid.height() as f32 / 2.0;
        (
            (-half_width + 0.5 + coord.x as f32) * tile_size,
            (-half_height + 0.5 + coord.y as f32) * tile_size,
        )
    }

    /// Stable byte form of the grid, obstacle heights, and open-tile order.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = self.grid.canonical_bytes();
        bytes.extend((self.obstacles.len() as u32).to_le_bytes());
        for obstacle in &self.obstacles {
            bytes.extend(obstacle.coord.x.to_le_bytes());
            bytes.extend(obstacle.coord.y.to_le_bytes());
            bytes.extend(obstacle.height.to_bits().to_le_bytes());
        }
        bytes.extend((self.open_tiles.len() as u32).to_le_bytes());
        for coord in self.open_tiles.iter() {
            bytes.extend(coord.x.to_le_bytes());
            bytes.extend(coord.y.to_le_bytes());
        }
        bytes
    }
}

pub fn generate(config: &MapConfig) -> Result<GeneratedMap, ConfigError> {
    config.validate()?;

    let mut grid = OccupancyGrid::new(config.size.width as usize, config.size.height as usize);
    let mut tile_cycle = CoordCycle::shuffled(grid.coords().collect(), config.seed);
    let mut validator = ConnectivityValidator::new();

    let outcome = place_obstacles(&mut grid, config, &mut tile_cycle, &mut validator);
    let open_tiles = OpenTileAllocator::new(outcome.open_coords, config.seed);

    Ok(GeneratedMap {
        config: config.clone(),
        grid,
        obstacles: outcome.obstacles,
        report: outcome.report,
        tile_cycle,
        open_tiles,
    })
}

/// Reference to an open tile issued by one generation of a [`MapGenerator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileHandle {
    epoch: u64,
    coord: Coord,
    index: usize,
}

impl TileHandle {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Row-major tile index, for collaborators keeping per-tile objects.
    pub fn index(&self) -> usize {
        self.index
    }
}

struct ActiveMap {
    index: usize,
    map: GeneratedMap,
}

/// Stateful front end: select a map by index, draw spawn tiles from it.
///
/// All operations take `&mut self`, so draws and regeneration are serialised
/// by ownership; share across threads behind a `Mutex`.
pub struct MapGenerator {
    maps: MapSet,
    active: Option<ActiveMap>,
    epoch: u64,
}

impl MapGenerator {
    pub fn new(maps: MapSet) -> Self {
        Self { maps, active: None, epoch: 0 }
    }

    pub fn maps(&self) -> &MapSet {
        &self.maps
    }

    /// Zero until the first successful generation.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn current_index(&self) -> Option<usize> {
        self.active.as_ref().map(|active| active.index)
    }

    pub fn current(&self) -> Result<&GeneratedMap, MapError> {
        self.active.as_ref().map(|active| &active.map).ok_or(MapError::NoActiveMap)
    }

    /// Replaces the active map with a fresh generation of map `index`.
    pub fn generate_map(&mut self, index: usize) -> Result<&GeneratedMap, MapError> {
        let map = self
            .maps
            .get(index)
            .and_then(generate)
            .inspect_err(|err| warn!("map {index} regeneration rejected: {err}"))?;

        self.epoch += 1;
        debug!(
            "generated map {index} (epoch {}): {} obstacles, {} open tiles",
            self.epoch,
            map.obstacle_count(),
            map.open_tiles().len()
        );

        let active = self.active.insert(ActiveMap { index, map });
        Ok(&active.map)
    }

    pub fn random_coord(&mut self) -> Result<Coord, MapError> {
        let map = self.active_map_mut()?;
        map.random_coord().ok_or(MapError::Allocator(AllocatorError::Exhausted))
    }

    /// Next spawn tile from the open-tile cycle.
    pub fn random_open_tile(&mut self) -> Result<TileHandle, MapError> {
        let epoch = self.epoch;
        let map = self.active_map_mut()?;
        let coord = map.open_tiles.next_open_tile()?;
        let index = map.grid.index_of(coord).ok_or(MapError::TileOutsideMap(coord))?;
        Ok(TileHandle { epoch, coord, index })
    }

    /// Permanently excludes `coord` from open-tile draws until the next generation.
    pub fn remove_open_tile(&mut self, coord: Coord) -> Result<bool, MapError> {
        let map = self.active_map_mut()?;
        Ok(map.open_tiles.remove_tile(coord))
    }

    /// Coordinate behind `handle`, if it was issued by the active generation
    /// and has not been removed from the open set since.
    pub fn resolve(&self, handle: TileHandle) -> Result<Coord, MapError> {
        let map = self.current()?;
        if handle.epoch != self.epoch {
            return Err(MapError::StaleHandle { issued: handle.epoch, current: self.epoch });
        }
        if !map.open_tiles.contains(handle.coord) {
            return Err(MapError::TileRemoved(handle.coord));
        }
        Ok(handle.coord)
    }

    fn active_map_mut(&mut self) -> Result<&mut GeneratedMap, MapError> {
        self.active.as_mut().map(|active| &mut active.map).ok_or(MapError::NoActiveMap)
    }
}
