//! Shader programs: WGSL compile + reflection on the CPU, then a wgpu
//! pipeline whose uniforms are driven through
//! [`UniformProgram`](glviewer_bindings::UniformProgram).

mod error;
mod reflect;
mod shader;
mod source;
mod store;

pub use error::ProgramError;
pub use reflect::{CompiledModule, UniformDecl};
pub use shader::{ActiveProgram, ShaderProgram};
pub use source::{FRAGMENT_ENTRY, ProgramSource, VERTEX_ENTRY};
