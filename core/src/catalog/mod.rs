pub mod attraction;
pub mod builtin;
pub mod store;

pub use attraction::{Attraction, Category, PLACEHOLDER_IMAGE};
pub use store::Catalog;
