use crate::prelude::{AttractionId, GeoPoint};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Image shown whenever an attraction has no usable picture.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Fixed set of attraction categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Historical,
    Nature,
    Wildlife,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Historical, Category::Nature, Category::Wildlife];

    pub fn label(self) -> &'static str {
        match self {
            Category::Historical => "Historical",
            Category::Nature => "Nature",
            Category::Wildlife => "Wildlife",
        }
    }

    /// Badge colors as `(background, foreground)` RGB triples.
    pub fn palette(self) -> ([u8; 3], [u8; 3]) {
        match self {
            Category::Historical => ([0xfe, 0xf3, 0xc7], [0x92, 0x40, 0x0e]),
            Category::Nature => ([0xd1, 0xfa, 0xe5], [0x06, 0x5f, 0x46]),
            Category::Wildlife => ([0xff, 0xed, 0xd5], [0x9a, 0x34, 0x12]),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One point of interest. Records are immutable once they enter a catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Attraction {
    pub id: AttractionId,
    pub name: String,
    pub category: Category,
    pub rating: f32,
    pub duration: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub location: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
}

impl Attraction {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    pub fn image_or_placeholder(&self) -> &str {
        match self.image.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => path,
            _ => PLACEHOLDER_IMAGE,
        }
    }
}
