mod texture;

pub use texture::{load_painting, spawn_painting_load, PaintingImage};
