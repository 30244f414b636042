pub mod camera;
pub mod cli;
pub mod frame;
pub mod loaders;
pub mod mesh;
pub mod renderer;
pub mod scene;
pub mod scenes;
pub mod tour;
pub mod types;

pub use scenes::create_house_scene;
pub use tour::{Pose, TourController, TourPhase};
