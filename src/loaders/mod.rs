pub mod gltf;

pub use gltf::{compute_normals, load_mesh, load_mesh_from_slice, MeshData};
