// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "house-tour")]
#[command(about = "Animated house scene walkthrough", long_about = None)]
pub struct Cli {
    /// Disable the automated tour and fly the camera manually
    #[arg(long = "free-cam", default_value = "false")]
    pub free_cam: bool,

    /// Image shown on the interior paintings
    #[arg(long, default_value = "assets/painting.jpg")]
    pub painting: PathBuf,

    /// Initial window width in pixels
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value = "600")]
    pub height: u32,
}
