//! GLB container encoding.
//!
//! ## Binary Layout
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 4 | Magic bytes `glTF` |
//! | 4 | 4 | Container version (`u32`, always 2) |
//! | 8 | 4 | Total file length (`u32`) |
//! | 12 | 4 | JSON chunk length J (`u32`) |
//! | 16 | 4 | Chunk type `JSON` |
//! | 20 | J | glTF JSON document, space-padded to 4 bytes |
//! | 20+J | 4 | BIN chunk length B (`u32`) |
//! | 24+J | 4 | Chunk type `BIN\0` |
//! | 28+J | B | positions ‖ indices ‖ colors, zero-padded to 4 bytes |
//!
//! All integers are little-endian. The JSON document describes one buffer,
//! three buffer views, three accessors, and a single mesh/node/scene.

use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::ExportError;

/// Magic bytes identifying a GLB container.
pub const GLB_MAGIC: [u8; 4] = *b"glTF";

/// GLB container version.
pub const GLB_VERSION: u32 = 2;

const CHUNK_JSON: [u8; 4] = *b"JSON";
const CHUNK_BIN: [u8; 4] = *b"BIN\0";

/// Byte size of one `VEC3` of `f32`.
const VEC3_F32_STRIDE: usize = 12;
/// Byte size of one `u32` index.
const INDEX_STRIDE: usize = 4;

const TARGET_ARRAY_BUFFER: u32 = 34962;
const TARGET_ELEMENT_ARRAY_BUFFER: u32 = 34963;
const COMPONENT_FLOAT: u32 = 5126;
const COMPONENT_UNSIGNED_INT: u32 = 5125;

#[derive(Serialize)]
struct Document {
    asset: Asset,
    scene: u32,
    scenes: Vec<Scene>,
    nodes: Vec<Node>,
    meshes: Vec<Mesh>,
    buffers: Vec<Buffer>,
    #[serde(rename = "bufferViews")]
    buffer_views: Vec<BufferView>,
    accessors: Vec<Accessor>,
}

#[derive(Serialize)]
struct Asset {
    version: &'static str,
    generator: &'static str,
}

#[derive(Serialize)]
struct Scene {
    nodes: Vec<u32>,
}

#[derive(Serialize)]
struct Node {
    mesh: u32,
}

#[derive(Serialize)]
struct Mesh {
    primitives: Vec<Primitive>,
}

#[derive(Serialize)]
struct Primitive {
    attributes: Attributes,
    indices: u32,
}

#[derive(Serialize)]
struct Attributes {
    #[serde(rename = "POSITION")]
    position: u32,
    #[serde(rename = "COLOR_0")]
    color: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Buffer {
    byte_length: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BufferView {
    buffer: u32,
    byte_offset: usize,
    byte_length: usize,
    target: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Accessor {
    buffer_view: u32,
    byte_offset: usize,
    component_type: u32,
    count: usize,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<[f32; 3]>,
}

/// Validate raw mesh buffers and encode them into a GLB container.
///
/// `vertex_data` and `color_data` hold `vertex_count` × 3 `f32`s each;
/// `index_data` holds `index_count` `u32`s forming whole triangles. Every
/// check runs before any output is produced.
pub fn encode_glb(
    vertex_data: &[u8],
    index_data: &[u8],
    color_data: &[u8],
    vertex_count: usize,
    index_count: usize,
) -> Result<Vec<u8>, ExportError> {
    validate(vertex_data, index_data, color_data, vertex_count, index_count)?;

    let (min, max) = position_bounds(vertex_data);
    let index_offset = vertex_data.len();
    let color_offset = index_offset + index_data.len();
    let bin_len = color_offset + color_data.len();

    let document = Document {
        asset: Asset {
            version: "2.0",
            generator: concat!("hexglobe ", env!("CARGO_PKG_VERSION")),
        },
        scene: 0,
        scenes: vec![Scene { nodes: vec![0] }],
        nodes: vec![Node { mesh: 0 }],
        meshes: vec![Mesh {
            primitives: vec![Primitive {
                attributes: Attributes {
                    position: 0,
                    color: 2,
                },
                indices: 1,
            }],
        }],
        buffers: vec![Buffer {
            byte_length: bin_len,
        }],
        buffer_views: vec![
            BufferView {
                buffer: 0,
                byte_offset: 0,
                byte_length: vertex_data.len(),
                target: TARGET_ARRAY_BUFFER,
            },
            BufferView {
                buffer: 0,
                byte_offset: index_offset,
                byte_length: index_data.len(),
                target: TARGET_ELEMENT_ARRAY_BUFFER,
            },
            BufferView {
                buffer: 0,
                byte_offset: color_offset,
                byte_length: color_data.len(),
                target: TARGET_ARRAY_BUFFER,
            },
        ],
        accessors: vec![
            Accessor {
                buffer_view: 0,
                byte_offset: 0,
                component_type: COMPONENT_FLOAT,
                count: vertex_count,
                kind: "VEC3",
                min: Some(min),
                max: Some(max),
            },
            Accessor {
                buffer_view: 1,
                byte_offset: 0,
                component_type: COMPONENT_UNSIGNED_INT,
                count: index_count,
                kind: "SCALAR",
                min: None,
                max: None,
            },
            Accessor {
                buffer_view: 2,
                byte_offset: 0,
                component_type: COMPONENT_FLOAT,
                count: vertex_count,
                kind: "VEC3",
                min: None,
                max: None,
            },
        ],
    };

    let mut json = serde_json::to_vec(&document)?;
    json.resize(padded(json.len()), b' ');
    let bin_padded = padded(bin_len);

    let total = 12 + 8 + json.len() + 8 + bin_padded;
    let total_u32 = u32::try_from(total).map_err(|_| ExportError::TooLarge(total))?;

    let mut buf = Vec::with_capacity(total);

    // Header
    buf.extend_from_slice(&GLB_MAGIC);
    buf.extend_from_slice(&GLB_VERSION.to_le_bytes());
    buf.extend_from_slice(&total_u32.to_le_bytes());

    // JSON chunk
    buf.extend_from_slice(&(json.len() as u32).to_le_bytes());
    buf.extend_from_slice(&CHUNK_JSON);
    buf.extend_from_slice(&json);

    // BIN chunk
    buf.extend_from_slice(&(bin_padded as u32).to_le_bytes());
    buf.extend_from_slice(&CHUNK_BIN);
    buf.extend_from_slice(vertex_data);
    buf.extend_from_slice(index_data);
    buf.extend_from_slice(color_data);
    buf.resize(total, 0);

    Ok(buf)
}

/// Validate, encode, and write a GLB file.
///
/// The container is written to `<path>.tmp` and renamed into place, so on
/// any failure `path` is left untouched.
pub fn export_glb(
    path: &Path,
    vertex_data: &[u8],
    index_data: &[u8],
    color_data: &[u8],
    vertex_count: usize,
    index_count: usize,
) -> Result<(), ExportError> {
    let start = Instant::now();
    let bytes = encode_glb(vertex_data, index_data, color_data, vertex_count, index_count)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = std::path::PathBuf::from(tmp_name);

    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    std::fs::write(&tmp_path, &bytes).map_err(io_err)?;
    if let Err(source) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(io_err(source));
    }

    info!(
        path = %path.display(),
        bytes = bytes.len(),
        vertices = vertex_count,
        triangles = index_count / 3,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Exported GLB"
    );
    Ok(())
}

fn validate(
    vertex_data: &[u8],
    index_data: &[u8],
    color_data: &[u8],
    vertex_count: usize,
    index_count: usize,
) -> Result<(), ExportError> {
    for (buffer, data, stride) in [
        ("positions", vertex_data, VEC3_F32_STRIDE),
        ("indices", index_data, INDEX_STRIDE),
        ("colors", color_data, VEC3_F32_STRIDE),
    ] {
        if data.len() % stride != 0 {
            return Err(ExportError::Misaligned {
                buffer,
                len: data.len(),
                stride,
            });
        }
    }

    if index_count % 3 != 0 {
        return Err(ExportError::IncompleteTriangle(index_count));
    }

    for (buffer, data, expected) in [
        ("positions", vertex_data, vertex_count * VEC3_F32_STRIDE),
        ("indices", index_data, index_count * INDEX_STRIDE),
        ("colors", color_data, vertex_count * VEC3_F32_STRIDE),
    ] {
        if data.len() != expected {
            return Err(ExportError::BufferLength {
                buffer,
                expected,
                actual: data.len(),
            });
        }
    }

    if vertex_count == 0 || index_count == 0 {
        return Err(ExportError::EmptyMesh);
    }

    for chunk in index_data.chunks_exact(INDEX_STRIDE) {
        let index = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        if index as usize >= vertex_count {
            return Err(ExportError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
    }

    Ok(())
}

/// Component-wise min/max of the position buffer, required on POSITION accessors.
fn position_bounds(vertex_data: &[u8]) -> ([f32; 3], [f32; 3]) {
    let mut min = [f32::INFINITY; 3];
    let mut max = [f32::NEG_INFINITY; 3];
    for vertex in vertex_data.chunks_exact(VEC3_F32_STRIDE) {
        for (axis, c) in vertex.chunks_exact(4).enumerate() {
            let v = f32::from_le_bytes([c[0], c[1], c[2], c[3]]);
            min[axis] = min[axis].min(v);
            max[axis] = max[axis].max(v);
        }
    }
    (min, max)
}

fn padded(len: usize) -> usize {
    len.div_ceil(4) * 4
}
