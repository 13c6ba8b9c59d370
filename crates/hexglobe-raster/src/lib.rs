//! World-imagery color sampling for globe faces.
//!
//! [`ColorSampler`] is the contract the mesh assembler depends on;
//! [`EquirectRaster`] implements it over a georeferenced plate carrée image.

mod equirect;
mod error;

pub use equirect::{EquirectRaster, GeoBounds, MAX_RASTER_ALLOC};
pub use error::RasterError;

/// Color returned for positions outside the raster.
pub const NO_DATA_COLOR: [u8; 3] = [0, 0, 0];

/// Looks up an RGB color for a geographic position.
///
/// Implementations must be shareable across worker threads and must never
/// fail: positions without imagery resolve to a fallback color.
pub trait ColorSampler: Sync {
    /// RGB color at `lat`/`lon` in degrees. Longitude may be up to one turn
    /// outside `[-180, 180]`.
    fn sample_color(&self, lat: f64, lon: f64) -> [u8; 3];
}

impl<F> ColorSampler for F
where
    F: Fn(f64, f64) -> [u8; 3] + Sync,
{
    fn sample_color(&self, lat: f64, lon: f64) -> [u8; 3] {
        self(lat, lon)
    }
}
