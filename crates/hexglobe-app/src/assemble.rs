//! Parallel conversion of dual faces into flat-colored triangle buffers.
//!
//! Each face depends only on its own points, so faces are split into
//! contiguous chunks, one per worker thread. Workers build independent
//! [`MeshBuffers`] that are concatenated in chunk order afterwards, which makes
//! the output identical for any worker count.

use std::time::Instant;

use glam::DVec3;
use hexglobe_export::{ExportError, MeshBuffers};
use hexglobe_geodesic::{DualFace, DualMesh, cartesian_to_spherical, fan_triangulate};
use hexglobe_raster::ColorSampler;
use tracing::info;

use crate::AppError;

/// Resolve a configured worker count: 0 means one per logical CPU.
pub fn resolve_workers(configured: usize) -> usize {
    if configured == 0 {
        num_cpus::get().max(1)
    } else {
        configured
    }
}

/// Normalized RGB color for a face, sampled at its centroid.
///
/// The centroid is pushed back onto the unit sphere before conversion to
/// latitude/longitude; wrapping is left to the sampler.
pub fn face_color<S: ColorSampler + ?Sized>(face: &DualFace, sampler: &S) -> [f32; 3] {
    let position = cartesian_to_spherical(face.normal());
    let [r, g, b] = sampler.sample_color(position.lat, position.lon);
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0]
}

/// Fan-triangulate and color every face of `dual` using `workers` threads.
///
/// Every triangle gets three fresh vertices carrying its face's color, so the
/// result renders with hard per-face color boundaries.
pub fn assemble_globe<S: ColorSampler + ?Sized>(
    dual: &DualMesh,
    sampler: &S,
    workers: usize,
) -> Result<MeshBuffers, AppError> {
    let start = Instant::now();
    let vertex_total = dual.fan_triangle_count() * 3;
    if u32::try_from(vertex_total).is_err() {
        return Err(AppError::MeshTooLarge(vertex_total));
    }

    let workers = workers.clamp(1, dual.len().max(1));
    info!(
        faces = dual.len(),
        workers, "Assembling globe mesh"
    );

    let mesh = if workers == 1 {
        face_buffers(&dual.faces, sampler)?
    } else {
        let chunk_size = dual.len().div_ceil(workers);
        std::thread::scope(|scope| -> Result<MeshBuffers, AppError> {
            let mut handles = Vec::with_capacity(workers);
            for chunk in dual.faces.chunks(chunk_size) {
                let handle = std::thread::Builder::new()
                    .name("globe-assembly-worker".into())
                    .spawn_scoped(scope, move || face_buffers(chunk, sampler))
                    .map_err(AppError::WorkerSpawn)?;
                handles.push(handle);
            }

            let mut mesh = MeshBuffers::with_capacity(vertex_total, vertex_total / 3);
            for handle in handles {
                match handle.join() {
                    Ok(part) => mesh.append(part?)?,
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            Ok(mesh)
        })?
    };

    info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Globe mesh assembled"
    );
    Ok(mesh)
}

/// Triangulate and color a run of faces into one buffer set.
fn face_buffers<S: ColorSampler + ?Sized>(
    faces: &[DualFace],
    sampler: &S,
) -> Result<MeshBuffers, ExportError> {
    let triangles: usize = faces.iter().map(DualFace::len).sum();
    let mut mesh = MeshBuffers::with_capacity(triangles * 3, triangles);

    for face in faces {
        let color = face_color(face, sampler);
        for [a, b, c] in fan_triangulate(&face.points) {
            let i0 = mesh.push_vertex(to_f32(a), color)?;
            let i1 = mesh.push_vertex(to_f32(b), color)?;
            let i2 = mesh.push_vertex(to_f32(c), color)?;
            mesh.indices.extend_from_slice(&[i0, i1, i2]);
        }
    }

    Ok(mesh)
}

#[inline]
fn to_f32(p: DVec3) -> [f32; 3] {
    p.as_vec3().to_array()
}
