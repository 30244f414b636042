use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

/// Decoded RGBA painting image, ready for GPU upload.
pub struct PaintingImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decodes the painting image from disk.
pub fn load_painting(path: impl AsRef<Path>) -> Result<PaintingImage> {
    let path = path.as_ref();
    println!("Loading painting texture: {:?}", path);

    let img = image::open(path)
        .context(format!("Failed to load painting texture: {:?}", path))?
        .to_rgba8();

    let (width, height) = img.dimensions();
    Ok(PaintingImage {
        width,
        height,
        pixels: img.into_raw(),
    })
}

/// Fire-and-forget load on a background thread. The render loop polls the
/// returned channel once per frame; the tour has no dependency on the load
/// completing. A failed load logs a warning and the scene simply omits the
/// paintings.
pub fn spawn_painting_load(path: PathBuf) -> Receiver<PaintingImage> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || match load_painting(&path) {
        Ok(img) => {
            println!("Painting texture loaded: {}x{}", img.width, img.height);
            let _ = tx.send(img);
        }
        Err(e) => {
            log::warn!("Painting texture unavailable, paintings omitted: {e:#}");
        }
    });

    rx
}
