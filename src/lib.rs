// Karasu URL Builder Library
// Builds and signs imgproxy-compatible image transformation URLs

pub mod builder;
pub mod config;
pub mod error;
pub mod logging;
pub mod options;
pub mod signing;
pub mod store;

pub use builder::ImgProxy;
pub use config::BuilderConfig;
pub use error::BuilderError;
pub use options::{
    Adjust, Color, Crop, Extend, GifOptions, Gravity, GravityType, JpegOptions, OptionSet,
    OptionValue, Padding, PngOptions, Resize, ResizingAlgorithm, ResizingType, RgbColor, Size,
    Trim, Watermark, WatermarkPosition,
};
