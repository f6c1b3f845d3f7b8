pub mod catalog;
pub mod template;
