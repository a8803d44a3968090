//! Level building: a generated maze turned into a castable map.
//!
//! Maze rows grow downward while map `y` grows upward, so maze row `r`
//! lands on map row `height - 1 - r`. With that flip the maze's `Top`
//! neighbour (row − 1) is the map's `Top` neighbour (`y` + 1), and side
//! names carry over unchanged.

use serde::{Deserialize, Serialize};

use crate::error::{GridcastError, Result};
use crate::map::{validate_dimensions, Map, MapCell, Material, Side};
use crate::maze::Maze;
use crate::raycast::{cast, cast_fan, RayHit};

/// Facing angle a new player starts with, in radians.
pub const SPAWN_FACING: f64 = 0.0625;

/// Materials used when translating a maze into a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Transparent material for open space.
    pub floor: Material,
    /// Reported when a ray leaves the map.
    pub out_of_bounds: Material,
    /// Material for top and bottom walls.
    pub horizontal_wall: Material,
    /// Material for left and right walls.
    pub vertical_wall: Material,
}

impl Default for Palette {
    /// ANSI colour codes: black floor, bright black boundary,
    /// bright blue and blue walls.
    fn default() -> Self {
        Self {
            floor: Material(0),
            out_of_bounds: Material(8),
            horizontal_wall: Material(12),
            vertical_wall: Material(4),
        }
    }
}

impl Palette {
    /// Wall material for a side.
    #[must_use]
    pub const fn wall_for(&self, side: Side) -> Material {
        match side {
            Side::Top | Side::Bottom => self.horizontal_wall,
            Side::Left | Side::Right => self.vertical_wall,
        }
    }
}

/// Level generation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Level width in cells.
    pub width: u32,
    /// Level height in cells.
    pub height: u32,
    /// Seed for maze generation.
    pub seed: u64,
    /// Materials.
    pub palette: Palette,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            seed: 12345,
            palette: Palette::default(),
        }
    }
}

impl LevelConfig {
    /// Set the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the level dimensions.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Parse a config from RON text. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GridcastError::ConfigParse`] if the text is not valid RON
    /// for this type.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        ron::from_str(text).map_err(|e| GridcastError::ConfigParse(e.to_string()))
    }

    /// Check dimensions and palette without building anything.
    ///
    /// # Errors
    ///
    /// Returns [`GridcastError::InvalidDimensions`] or
    /// [`GridcastError::DimensionTooLarge`] for unusable sizes, and
    /// [`GridcastError::InvalidPalette`] when a wall material equals the
    /// floor material (such walls would be see-through).
    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.width, self.height)?;
        let palette = &self.palette;
        for (name, wall) in [
            ("horizontal_wall", palette.horizontal_wall),
            ("vertical_wall", palette.vertical_wall),
        ] {
            if wall == palette.floor {
                return Err(GridcastError::InvalidPalette(format!(
                    "{name} uses the floor material {}",
                    wall.code()
                )));
            }
        }
        Ok(())
    }

    /// Serialize to pretty RON.
    ///
    /// # Errors
    ///
    /// Returns [`GridcastError::ConfigParse`] if serialization fails.
    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| GridcastError::ConfigParse(e.to_string()))
    }
}

/// Translate maze walls into map materials.
///
/// Every cell is built as solid floor; each present maze wall becomes the
/// palette's wall material on the matching map side.
///
/// # Errors
///
/// Propagates map construction errors.
pub fn build_map(maze: &Maze, palette: &Palette) -> Result<Map> {
    let mut map = Map::new(maze.width(), maze.height())?;

    let last_row = maze.height() - 1;
    for row in 0..maze.height() {
        for col in 0..maze.width() {
            let mut cell = MapCell::solid(palette.floor);
            for side in Side::ALL {
                if maze.has_wall(col, row, side) {
                    cell.set_material(side, palette.wall_for(side));
                }
            }
            map.set_cell(col, last_row - row, cell);
        }
    }

    Ok(map)
}

/// A generated maze together with the map built from it.
#[derive(Debug, Clone)]
pub struct Level {
    config: LevelConfig,
    maze: Maze,
    map: Map,
}

impl Level {
    /// Generate the maze for `config` and build its map.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails [`LevelConfig::validate`].
    pub fn generate(config: LevelConfig) -> Result<Self> {
        config.validate()?;
        let mut maze = Maze::new(config.width, config.height)?;
        maze.generate_seeded(config.seed);
        let map = build_map(&maze, &config.palette)?;

        tracing::debug!(
            width = config.width,
            height = config.height,
            seed = config.seed,
            "Level built"
        );

        Ok(Self { config, maze, map })
    }

    /// Configuration the level was built from.
    #[must_use]
    pub const fn config(&self) -> &LevelConfig {
        &self.config
    }

    /// The generated maze.
    #[must_use]
    pub const fn maze(&self) -> &Maze {
        &self.maze
    }

    /// The castable map.
    #[must_use]
    pub const fn map(&self) -> &Map {
        &self.map
    }

    /// Centre of the entrance cell: maze `(0, 0)`, map `(0, height - 1)`.
    #[must_use]
    pub fn spawn_point(&self) -> (f64, f64) {
        (0.5, f64::from(self.map.height()) - 0.5)
    }

    /// Cast a ray using the palette's floor and out-of-bounds materials.
    #[must_use]
    pub fn cast(&self, x: f64, y: f64, facing: f64, relative: f64) -> RayHit {
        let palette = &self.config.palette;
        cast(
            &self.map,
            x,
            y,
            facing,
            relative,
            palette.floor,
            palette.out_of_bounds,
        )
    }

    /// Cast one ray per relative angle using the palette's sentinels.
    #[must_use]
    pub fn cast_fan(&self, x: f64, y: f64, facing: f64, relative_angles: &[f64]) -> Vec<RayHit> {
        let palette = &self.config.palette;
        cast_fan(
            &self.map,
            x,
            y,
            facing,
            relative_angles,
            palette.floor,
            palette.out_of_bounds,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LevelConfig::default();
        assert_eq!((config.width, config.height), (32, 32));
        assert_eq!(config.seed, 12345);
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn test_ron_partial_config_uses_defaults() {
        let config = LevelConfig::from_ron_str("(width: 8, seed: 3)").unwrap();
        assert_eq!(config.width, 8);
        assert_eq!(config.height, 32);
        assert_eq!(config.seed, 3);
    }

    #[test]
    fn test_ron_round_trip() {
        let config = LevelConfig::default().with_size(5, 7).with_seed(77);
        let text = config.to_ron_string().unwrap();
        assert_eq!(LevelConfig::from_ron_str(&text).unwrap(), config);
    }

    #[test]
    fn test_bad_ron_is_reported() {
        let err = LevelConfig::from_ron_str("(width: \"wide\")").unwrap_err();
        assert!(matches!(err, GridcastError::ConfigParse(_)));
    }

    #[test]
    fn test_validate() {
        assert!(LevelConfig::default().validate().is_ok());
        assert!(matches!(
            LevelConfig::default().with_size(4, 0).validate(),
            Err(GridcastError::InvalidDimensions { .. })
        ));

        let mut config = LevelConfig::default();
        config.palette.vertical_wall = config.palette.floor;
        assert!(matches!(
            config.validate(),
            Err(GridcastError::InvalidPalette(_))
        ));
    }

    #[test]
    fn test_build_map_flips_rows() {
        let mut maze = Maze::new(3, 2).unwrap();
        // open the edge between maze (0, 0) and maze (0, 1)
        maze.remove_wall(0, 0, Side::Bottom);
        let palette = Palette::default();
        let map = build_map(&maze, &palette).unwrap();

        // maze row 0 is map row 1
        let top_left = map.get_cell(0, 1).unwrap();
        assert_eq!(top_left.bottom, palette.floor);
        assert_eq!(top_left.top, palette.horizontal_wall);
        assert_eq!(top_left.left, palette.vertical_wall);

        let below = map.get_cell(0, 0).unwrap();
        assert_eq!(below.top, palette.floor);
        assert_eq!(below.bottom, palette.horizontal_wall);
    }

    #[test]
    fn test_build_map_translates_every_side() {
        let mut maze = Maze::new(5, 4).unwrap();
        maze.generate_seeded(21);
        let palette = Palette::default();
        let map = build_map(&maze, &palette).unwrap();

        for row in 0..4 {
            for col in 0..5 {
                let cell = map.get_cell(col, 3 - row).unwrap();
                for side in Side::ALL {
                    let expected = if maze.has_wall(col, row, side) {
                        palette.wall_for(side)
                    } else {
                        palette.floor
                    };
                    assert_eq!(cell.material(side), expected);
                }
            }
        }
    }

    #[test]
    fn test_level_generation() {
        let level = Level::generate(LevelConfig::default().with_size(9, 6).with_seed(5)).unwrap();
        assert_eq!(level.map().width(), 9);
        assert_eq!(level.map().height(), 6);
        assert_eq!(level.spawn_point(), (0.5, 5.5));

        // entrance: left side of the spawn cell is open floor
        let spawn_cell = level.map().get_cell(0, 5).unwrap();
        assert_eq!(spawn_cell.left, level.config().palette.floor);
    }

    #[test]
    fn test_level_rejects_empty_dimensions() {
        assert!(Level::generate(LevelConfig::default().with_size(0, 4)).is_err());
    }

    #[test]
    fn test_level_cast_from_spawn_stays_inside() {
        let level = Level::generate(LevelConfig::default().with_size(8, 8)).unwrap();
        let (x, y) = level.spawn_point();
        let hit = level.cast(x, y, SPAWN_FACING, 0.0);
        assert!(hit.distance > 0.0);
        assert!(hit.distance < 8.0 * std::f64::consts::SQRT_2);
    }
}
