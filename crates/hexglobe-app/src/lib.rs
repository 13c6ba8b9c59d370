//! hexglobe application: turns a Goldberg polyhedron into a raster-colored GLB globe.
//!
//! [`build_globe`] runs geometry and assembly in memory; [`run`] adds raster
//! loading and file export driven by a [`hexglobe_config::Config`].

mod assemble;
mod error;
mod pipeline;

pub use assemble::{assemble_globe, face_color, resolve_workers};
pub use error::AppError;
pub use pipeline::{BuildOptions, Globe, RunSummary, build_globe, run};
