//! Level geometry and the built-in level catalog
//!
//! Levels are static data: bounds, start and goal positions, spikes, static
//! polygons and rotating platforms (stored at angle 0). Every loader validates
//! the geometry so the simulation never starts on malformed input.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::SPIKE_RADIUS;
use crate::sim::geometry::Polygon;
use crate::sim::platform::RotatingPlatform;

/// Built-in levels shipped with the game
const BUILTIN_LEVELS: &str = include_str!("../assets/levels.json");

/// A circular hazard
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spike {
    pub center: Vec2,
    #[serde(default = "default_spike_radius")]
    pub radius: f32,
}

fn default_spike_radius() -> f32 {
    SPIKE_RADIUS
}

/// One playable level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: u32,
    pub width: f32,
    /// Also the floor: falling below it loses the attempt
    pub height: f32,
    pub ball_start: Vec2,
    /// Goal position
    pub flag: Vec2,
    #[serde(default)]
    pub spikes: Vec<Spike>,
    #[serde(default)]
    pub platforms: Vec<Polygon>,
    #[serde(default)]
    pub rotating_platforms: Vec<RotatingPlatform>,
}

/// Why a level could not be loaded
#[derive(Debug)]
pub enum LevelError {
    Parse(serde_json::Error),
    UnknownLevel(u32),
    EmptyCatalog,
    InvalidBounds { level: u32 },
    NonFinite { level: u32, what: &'static str },
    TooFewVertices { level: u32, polygon: usize, count: usize },
    DegeneratePolygon { level: u32, polygon: usize },
    InvalidSpike { level: u32, spike: usize },
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::Parse(err) => write!(f, "failed to parse level data: {}", err),
            LevelError::UnknownLevel(id) => write!(f, "no level with id {}", id),
            LevelError::EmptyCatalog => write!(f, "level catalog is empty"),
            LevelError::InvalidBounds { level } => {
                write!(f, "level {}: width and height must be positive", level)
            }
            LevelError::NonFinite { level, what } => {
                write!(f, "level {}: non-finite value in {}", level, what)
            }
            LevelError::TooFewVertices {
                level,
                polygon,
                count,
            } => write!(
                f,
                "level {}: polygon {} has {} vertices, need at least 3",
                level, polygon, count
            ),
            LevelError::DegeneratePolygon { level, polygon } => {
                write!(f, "level {}: polygon {} has no edge of non-zero length", level, polygon)
            }
            LevelError::InvalidSpike { level, spike } => {
                write!(f, "level {}: spike {} needs a positive radius", level, spike)
            }
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(err: serde_json::Error) -> Self {
        LevelError::Parse(err)
    }
}

impl Level {
    /// Level dimensions as a vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Check the geometry. Polygons are numbered static first, then rotating.
    pub fn validate(&self) -> Result<(), LevelError> {
        let level = self.id;
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err(LevelError::NonFinite { level, what: "bounds" });
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(LevelError::InvalidBounds { level });
        }
        if !self.ball_start.is_finite() {
            return Err(LevelError::NonFinite { level, what: "ball start" });
        }
        if !self.flag.is_finite() {
            return Err(LevelError::NonFinite { level, what: "flag" });
        }

        for (index, spike) in self.spikes.iter().enumerate() {
            if !spike.center.is_finite() {
                return Err(LevelError::NonFinite { level, what: "spike" });
            }
            if !(spike.radius.is_finite() && spike.radius > 0.0) {
                return Err(LevelError::InvalidSpike { level, spike: index });
            }
        }

        let polygons = self
            .platforms
            .iter()
            .chain(self.rotating_platforms.iter().map(|p| &p.base));
        for (index, polygon) in polygons.enumerate() {
            validate_polygon(level, index, polygon)?;
        }

        for platform in &self.rotating_platforms {
            if !(platform.pivot.is_finite()
                && platform.angular_speed.is_finite()
                && platform.angle.is_finite())
            {
                return Err(LevelError::NonFinite { level, what: "rotating platform" });
            }
        }

        Ok(())
    }

    /// Static polygons followed by the rotating platforms at their current angle.
    /// This is the geometry collision queries and published frames see.
    pub fn all_polygons(&self, rotating: &[RotatingPlatform]) -> Vec<Polygon> {
        let mut polygons = self.platforms.clone();
        polygons.extend(rotating.iter().map(RotatingPlatform::rotated));
        polygons
    }
}

fn validate_polygon(level: u32, index: usize, polygon: &Polygon) -> Result<(), LevelError> {
    let count = polygon.vertices.len();
    if count < 3 {
        return Err(LevelError::TooFewVertices {
            level,
            polygon: index,
            count,
        });
    }
    if polygon.vertices.iter().any(|v| !v.is_finite()) {
        return Err(LevelError::NonFinite { level, what: "polygon" });
    }
    let degenerate = polygon.degenerate_edge_count();
    if degenerate == count {
        return Err(LevelError::DegeneratePolygon { level, polygon: index });
    }
    if degenerate > 0 {
        log::warn!(
            "Level {}: polygon {} has {} zero-length edge(s); they will be skipped",
            level,
            index,
            degenerate
        );
    }
    Ok(())
}

#[derive(Deserialize)]
struct CatalogFile {
    levels: Vec<Level>,
}

/// An ordered set of validated levels
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    /// The levels shipped with the game
    pub fn builtin() -> Result<Self, LevelError> {
        Self::from_json(BUILTIN_LEVELS)
    }

    /// Parse a catalog of the form `{ "levels": [ ... ] }`
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        if file.levels.is_empty() {
            return Err(LevelError::EmptyCatalog);
        }
        for level in &file.levels {
            level.validate()?;
        }
        log::info!("Loaded {} levels", file.levels.len());
        Ok(Self {
            levels: file.levels,
        })
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.levels.iter().map(|l| l.id)
    }

    /// Load a level by id
    pub fn load(&self, id: u32) -> Result<Level, LevelError> {
        self.levels
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or(LevelError::UnknownLevel(id))
    }

    /// Load a level by id, falling back to the first level for unknown ids
    pub fn load_or_first(&self, id: u32) -> Level {
        match self.load(id) {
            Ok(level) => level,
            Err(_) => {
                log::warn!("Unknown level {}, using level {}", id, self.levels[0].id);
                self.levels[0].clone()
            }
        }
    }
}
