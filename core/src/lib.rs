//! Core of the attraction explorer: the catalog, the shared selection, hover
//! and search state, and the projections that keep the list, the map markers,
//! the detail overlay and the camera in agreement.
//!
//! Every state change goes through an [`Intent`](prelude::Intent) dispatched to
//! [`Explorer`]; the views only read derived models.

pub mod catalog;
pub mod controller;
pub mod map;
pub mod math;
pub mod prelude;
pub mod search;
pub mod state;
pub mod telemetry;
pub mod view;
pub mod viewport;

pub use catalog::{Attraction, Catalog, Category};
pub use controller::{Explorer, Outcome, Transition};
pub use prelude::{AttractionId, ExplorerConfig, ExplorerError, ExplorerResult, GeoPoint, Intent};
