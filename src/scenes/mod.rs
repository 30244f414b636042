mod house;

pub use house::create_house_scene;
