use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Stable identity of an attraction inside a catalog. Zero is never a valid id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct AttractionId(u32);

impl AttractionId {
    pub fn new(raw: u32) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for AttractionId {
    type Error = ExplorerError;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or(ExplorerError::InvalidId(raw))
    }
}

impl From<AttractionId> for u32 {
    fn from(id: AttractionId) -> Self {
        id.0
    }
}

impl fmt::Display for AttractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Render size of the map container in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Tunables shared by the viewport controller, the camera and the hover debouncer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub default_center: GeoPoint,
    pub default_zoom: f64,
    pub detail_zoom: f64,
    /// Padding in pixels kept around fitted bounds on every side.
    pub fit_padding: f32,
    pub fit_max_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub fly_duration_ms: u64,
    pub leave_debounce_ms: u64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            default_center: GeoPoint::new(7.9465, -1.0232),
            default_zoom: 7.0,
            detail_zoom: 13.0,
            fit_padding: 48.0,
            fit_max_zoom: 12.0,
            min_zoom: 3.0,
            max_zoom: 19.0,
            fly_duration_ms: 1500,
            leave_debounce_ms: 60,
        }
    }
}

impl ExplorerConfig {
    /// Reads a JSON config file; missing fields fall back to defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> ExplorerResult<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn fly_duration(&self) -> Duration {
        Duration::from_millis(self.fly_duration_ms)
    }

    pub fn leave_debounce(&self) -> Duration {
        Duration::from_millis(self.leave_debounce_ms)
    }
}

/// The only ways shared selection/hover/query state may change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    Select { id: AttractionId },
    ClearSelection,
    Hover { id: AttractionId },
    Leave,
    SetQuery { text: String },
}

/// Common error type for catalog loading and lookups.
#[derive(thiserror::Error, Debug)]
pub enum ExplorerError {
    #[error("invalid attraction id {0}")]
    InvalidId(u32),
    #[error("duplicate attraction id {0}")]
    DuplicateId(AttractionId),
    #[error("attraction {id} has coordinates out of range ({lat}, {lng})")]
    InvalidCoordinate { id: AttractionId, lat: f64, lng: f64 },
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    #[error("unknown attraction id {0}")]
    UnknownAttraction(u32),
    #[error("malformed catalog or config: {0}")]
    Format(#[from] serde_json::Error),
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExplorerResult<T> = Result<T, ExplorerError>;
