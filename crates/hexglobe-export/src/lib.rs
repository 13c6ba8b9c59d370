//! Binary glTF (`.glb`) export of flat-colored triangle meshes.
//!
//! Buffers are validated in full before anything is encoded, and files are
//! written through a temporary sibling so a failed export never leaves a
//! truncated model at the destination.

mod buffers;
mod error;
mod glb;
mod transform;

pub use buffers::MeshBuffers;
pub use error::ExportError;
pub use glb::{GLB_MAGIC, GLB_VERSION, encode_glb, export_glb};
pub use transform::rotate_positions;
