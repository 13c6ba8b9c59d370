//! Raster loading error types.

/// Errors returned while loading or georeferencing a raster.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// The image file could not be opened or decoded.
    #[error("image load error: {0}")]
    Image(#[from] image::ImageError),

    /// The geographic bounds are empty, inverted, or not finite.
    #[error("invalid raster bounds: {0}")]
    InvalidBounds(String),

    /// The image has no pixels.
    #[error("raster image is empty ({width}x{height})")]
    EmptyImage {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },
}
