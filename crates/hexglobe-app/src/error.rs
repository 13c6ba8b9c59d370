//! Application-level error type.

use hexglobe_export::ExportError;
use hexglobe_geodesic::GeodesicError;
use hexglobe_raster::RasterError;

/// Anything that can abort a globe build.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Mesh construction hit an invariant violation.
    #[error("geometry invariant violated: {0}")]
    Geometry(#[from] GeodesicError),

    /// The world imagery could not be loaded.
    #[error(transparent)]
    Raster(#[from] RasterError),

    /// The model could not be encoded or written.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// The assembled mesh would not fit `u32` vertex indices.
    #[error("mesh needs {0} vertices, more than u32 indices can address")]
    MeshTooLarge(usize),

    /// A worker thread could not be started.
    #[error("failed to spawn assembly worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),
}
