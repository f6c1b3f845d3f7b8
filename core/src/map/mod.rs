pub mod camera;
pub mod engine;
pub mod scene;
pub mod supervisor;

pub use camera::{Camera, CameraCommand, CameraPose};
pub use engine::{MapEngine, MapFault};
pub use scene::SceneEngine;
pub use supervisor::{MapHealth, MapSupervisor};
