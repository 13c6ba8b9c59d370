//! Nearest-pixel sampling of an equirectangular (plate carrée) world image.

use std::path::Path;
use std::time::Instant;

use image::{ImageError, ImageReader, Limits, RgbImage};
use tracing::info;

use crate::{ColorSampler, NO_DATA_COLOR, RasterError};

/// Decoder allocation ceiling. A 21600×10800 RGB world mosaic needs about
/// 670 MiB, above the `image` crate's 512 MiB default.
pub const MAX_RASTER_ALLOC: u64 = 4 << 30;

/// Geographic extent of a raster, in degrees.
///
/// The top-left pixel corner sits at `(west, north)` and the bottom-right
/// corner at `(east, south)`. Always supplied by the caller; embedded GeoTIFF
/// georeferencing is not consulted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds {
    /// Longitude of the left edge.
    pub west: f64,
    /// Latitude of the top edge.
    pub north: f64,
    /// Longitude of the right edge.
    pub east: f64,
    /// Latitude of the bottom edge.
    pub south: f64,
}

impl GeoBounds {
    /// The whole globe, `[-180, 180] × [-90, 90]`.
    pub const WORLD: Self = Self {
        west: -180.0,
        north: 90.0,
        east: 180.0,
        south: -90.0,
    };

    fn validate(&self) -> Result<(), RasterError> {
        let all_finite = [self.west, self.north, self.east, self.south]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(RasterError::InvalidBounds(format!(
                "non-finite bounds {:?}",
                self
            )));
        }
        if self.east <= self.west {
            return Err(RasterError::InvalidBounds(format!(
                "east {} must be greater than west {}",
                self.east, self.west
            )));
        }
        if self.north <= self.south {
            return Err(RasterError::InvalidBounds(format!(
                "north {} must be greater than south {}",
                self.north, self.south
            )));
        }
        Ok(())
    }
}

impl Default for GeoBounds {
    fn default() -> Self {
        Self::WORLD
    }
}

/// A georeferenced RGB image sampled by nearest pixel.
///
/// Immutable after construction, so a single instance is shared by reference
/// across all assembly workers.
#[derive(Clone, Debug)]
pub struct EquirectRaster {
    image: RgbImage,
    bounds: GeoBounds,
    /// Degrees of longitude per pixel column.
    pixel_width: f64,
    /// Degrees of latitude per pixel row.
    pixel_height: f64,
}

impl EquirectRaster {
    /// Wrap an in-memory image covering `bounds`.
    pub fn new(image: RgbImage, bounds: GeoBounds) -> Result<Self, RasterError> {
        bounds.validate()?;
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyImage { width, height });
        }

        Ok(Self {
            pixel_width: (bounds.east - bounds.west) / width as f64,
            pixel_height: (bounds.north - bounds.south) / height as f64,
            image,
            bounds,
        })
    }

    /// Load an image file (PNG, JPEG or TIFF) covering `bounds`.
    pub fn open(path: &Path, bounds: GeoBounds) -> Result<Self, RasterError> {
        let start = Instant::now();
        let mut limits = Limits::default();
        limits.max_alloc = Some(MAX_RASTER_ALLOC);

        let mut reader = ImageReader::open(path)
            .and_then(ImageReader::with_guessed_format)
            .map_err(ImageError::IoError)?;
        reader.limits(limits);
        let image = reader.decode()?.into_rgb8();
        info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Loaded raster"
        );
        Self::new(image, bounds)
    }

    /// Image dimensions in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Geographic extent of the image.
    pub fn bounds(&self) -> GeoBounds {
        self.bounds
    }

    /// Pixel `(col, row)` containing `lat`/`lon`, or `None` outside the image.
    ///
    /// Longitude is not wrapped here.
    pub fn pixel_index(&self, lat: f64, lon: f64) -> Option<(u32, u32)> {
        let col = ((lon - self.bounds.west) / self.pixel_width).floor();
        let row = ((self.bounds.north - lat) / self.pixel_height).floor();
        let (width, height) = self.image.dimensions();

        if !(0.0..width as f64).contains(&col) || !(0.0..height as f64).contains(&row) {
            return None;
        }
        Some((col as u32, row as u32))
    }
}

impl ColorSampler for EquirectRaster {
    fn sample_color(&self, lat: f64, lon: f64) -> [u8; 3] {
        match self.pixel_index(lat, wrap_longitude(lon)) {
            Some((col, row)) => self.image.get_pixel(col, row).0,
            None => NO_DATA_COLOR,
        }
    }
}

/// Bring a longitude up to one turn outside `[-180, 180]` back into range.
#[inline]
fn wrap_longitude(lon: f64) -> f64 {
    if lon < -180.0 {
        lon + 360.0
    } else if lon > 180.0 {
        lon - 360.0
    } else {
        lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 4×2 world image: top row red/green/blue/white, bottom row all grey.
    fn world_raster() -> EquirectRaster {
        let top = [[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 255]];
        let image = RgbImage::from_fn(4, 2, |x, y| {
            if y == 0 {
                image::Rgb(top[x as usize])
            } else {
                image::Rgb([128, 128, 128])
            }
        });
        EquirectRaster::new(image, GeoBounds::WORLD).unwrap()
    }

    #[test]
    fn test_quadrant_lookup() {
        let raster = world_raster();
        assert_eq!(raster.sample_color(45.0, -135.0), [255, 0, 0]);
        assert_eq!(raster.sample_color(45.0, -45.0), [0, 255, 0]);
        assert_eq!(raster.sample_color(45.0, 45.0), [0, 0, 255]);
        assert_eq!(raster.sample_color(45.0, 135.0), [255, 255, 255]);
        assert_eq!(raster.sample_color(-45.0, 0.0), [128, 128, 128]);
    }

    #[test]
    fn test_longitude_wraps() {
        let raster = world_raster();
        // 225° east is 135° west.
        assert_eq!(raster.sample_color(45.0, 225.0), [255, 0, 0]);
        assert_eq!(raster.sample_color(45.0, -225.0), [255, 255, 255]);
    }

    #[test]
    fn test_out_of_bounds_is_black() {
        let image = RgbImage::from_pixel(10, 10, image::Rgb([200, 100, 50]));
        let europe = GeoBounds {
            west: -10.0,
            north: 60.0,
            east: 30.0,
            south: 35.0,
        };
        let raster = EquirectRaster::new(image, europe).unwrap();
        assert_eq!(raster.sample_color(48.0, 2.0), [200, 100, 50]);
        assert_eq!(raster.sample_color(-33.0, 151.0), NO_DATA_COLOR);
        assert_eq!(raster.sample_color(70.0, 2.0), NO_DATA_COLOR);
    }

    #[test]
    fn test_south_pole_edge_is_black() {
        let raster = world_raster();
        // The bottom edge is the exclusive end of the last row.
        assert_eq!(raster.sample_color(-90.0, 0.0), NO_DATA_COLOR);
        assert_eq!(raster.sample_color(90.0, 0.0), [0, 0, 255]);
    }

    #[test]
    fn test_pixel_index() {
        let raster = world_raster();
        assert_eq!(raster.pixel_index(89.9, -179.9), Some((0, 0)));
        assert_eq!(raster.pixel_index(-89.9, 179.9), Some((3, 1)));
        assert_eq!(raster.pixel_index(0.0, 181.0), None);
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let image = RgbImage::new(2, 2);
        let inverted = GeoBounds {
            west: 10.0,
            north: 0.0,
            east: -10.0,
            south: 5.0,
        };
        let err = EquirectRaster::new(image, inverted).unwrap_err();
        assert!(matches!(err, RasterError::InvalidBounds(_)));
    }

    #[test]
    fn test_empty_image_rejected() {
        let err = EquirectRaster::new(RgbImage::new(0, 0), GeoBounds::WORLD).unwrap_err();
        assert!(matches!(err, RasterError::EmptyImage { .. }));
    }

    #[test]
    fn test_open_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.png");
        RgbImage::from_pixel(8, 4, image::Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();

        let raster = EquirectRaster::open(&path, GeoBounds::WORLD).unwrap();
        assert_eq!(raster.dimensions(), (8, 4));
        assert_eq!(raster.sample_color(0.0, 0.0), [10, 20, 30]);
    }

    #[test]
    fn test_open_tiff_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.tif");
        let image = RgbImage::from_fn(8, 4, |x, y| {
            if x == 6 && y == 1 {
                image::Rgb([250, 125, 5])
            } else {
                image::Rgb([0, 80, 160])
            }
        });
        image.save(&path).unwrap();

        let raster = EquirectRaster::open(&path, GeoBounds::WORLD).unwrap();
        assert_eq!(raster.dimensions(), (8, 4));
        // Column 6 spans 90..135 E, row 1 spans 0..45 N.
        assert_eq!(raster.sample_color(20.0, 100.0), [250, 125, 5]);
        assert_eq!(raster.sample_color(-60.0, -170.0), [0, 80, 160]);
    }

    #[test]
    fn test_open_full_resolution_world_mosaic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.png");
        // Solid color keeps the file small while the decoded image is ~670 MiB.
        RgbImage::from_pixel(21600, 10800, image::Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();

        let raster = EquirectRaster::open(&path, GeoBounds::WORLD).unwrap();
        assert_eq!(raster.dimensions(), (21600, 10800));
        assert_eq!(raster.sample_color(51.5, -0.1), [10, 20, 30]);
    }

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(190.0), -170.0);
        assert_eq!(wrap_longitude(-190.0), 170.0);
        assert_eq!(wrap_longitude(180.0), 180.0);
        assert_eq!(wrap_longitude(-12.5), -12.5);
    }

    #[test]
    fn test_open_missing_file() {
        let err = EquirectRaster::open(Path::new("/nonexistent/world.tif"), GeoBounds::WORLD)
            .unwrap_err();
        assert!(matches!(err, RasterError::Image(_)));
    }
}
