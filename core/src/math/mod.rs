pub mod bounds;
pub mod easing;
pub mod mercator;

pub use bounds::GeoBounds;
pub use mercator::{MercatorPoint, TILE_SIZE};
