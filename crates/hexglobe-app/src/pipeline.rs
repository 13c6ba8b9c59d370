//! End-to-end globe generation: geometry, coloring, rotation and export.

use std::path::PathBuf;
use std::time::Instant;

use glam::DVec3;
use hexglobe_config::Config;
use hexglobe_export::{MeshBuffers, rotate_positions};
use hexglobe_geodesic::{FaceCensus, GeodesicSphere, build_dual};
use hexglobe_raster::{ColorSampler, EquirectRaster, GeoBounds};
use tracing::{info, warn};

use crate::{AppError, assemble_globe, resolve_workers};

/// Knobs for [`build_globe`] that do not affect the geometry itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildOptions {
    /// Assembly worker threads (0 = one per CPU).
    pub workers: usize,
    /// Rotation about +X applied to the finished mesh, in degrees.
    pub rotate_x_degrees: f64,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            workers: 0,
            rotate_x_degrees: -90.0,
        }
    }
}

/// A colored globe mesh ready for export.
#[derive(Clone, Debug)]
pub struct Globe {
    /// Flat-shaded triangle buffers.
    pub mesh: MeshBuffers,
    /// Face tally of the underlying Goldberg polyhedron.
    pub census: FaceCensus,
    /// Subdivision depth the globe was built at.
    pub frequency: u32,
}

/// What [`run`] produced.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// File the GLB was written to.
    pub output: PathBuf,
    /// Face tally of the exported globe.
    pub census: FaceCensus,
    /// Vertices in the exported mesh.
    pub vertices: usize,
    /// Triangles in the exported mesh.
    pub triangles: usize,
}

/// Build the Goldberg globe at `frequency`, colored by `sampler`.
pub fn build_globe<S: ColorSampler + ?Sized>(
    frequency: u32,
    sampler: &S,
    options: &BuildOptions,
) -> Result<Globe, AppError> {
    let sphere = GeodesicSphere::new(frequency)?;
    let dual = build_dual(&sphere.pool, &sphere.faces)?;
    drop(sphere);

    let census = dual.census();
    info!(
        hexagons = census.hexagons,
        pentagons = census.pentagons,
        "Dual polyhedron built"
    );
    if census.pentagons != 12 || census.other != 0 {
        warn!(
            pentagons = census.pentagons,
            other = census.other,
            "Unexpected face census"
        );
    }

    let mut mesh = assemble_globe(&dual, sampler, resolve_workers(options.workers))?;
    rotate_positions(&mut mesh.positions, DVec3::X, options.rotate_x_degrees);

    Ok(Globe {
        mesh,
        census,
        frequency,
    })
}

/// Load the configured raster, build the globe and write it as GLB.
pub fn run(config: &Config) -> Result<RunSummary, AppError> {
    let start = Instant::now();
    let raster_cfg = &config.raster;
    let bounds = GeoBounds {
        west: raster_cfg.west,
        north: raster_cfg.north,
        east: raster_cfg.east,
        south: raster_cfg.south,
    };
    let raster = EquirectRaster::open(&raster_cfg.path, bounds)?;

    let options = BuildOptions {
        workers: config.globe.workers,
        rotate_x_degrees: config.export.rotate_x_degrees,
    };
    let globe = build_globe(config.globe.frequency, &raster, &options)?;

    let output = config.globe.output_path();
    globe.mesh.export_glb(&output)?;

    let summary = RunSummary {
        output,
        census: globe.census,
        vertices: globe.mesh.vertex_count(),
        triangles: globe.mesh.triangle_count(),
    };
    info!(
        output = %summary.output.display(),
        frequency = globe.frequency,
        vertices = summary.vertices,
        triangles = summary.triangles,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Globe exported"
    );
    Ok(summary)
}
