/// Entry point the vertex stage is linked from.
pub const VERTEX_ENTRY: &str = "vs_main";
/// Entry point the fragment stage is linked from.
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Vertex and fragment WGSL sources making up one program.
///
/// Both stages are compiled as a single module, so declarations (structs,
/// uniforms) are shared between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSource {
    pub vertex: String,
    pub fragment: String,
}

impl ProgramSource {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    pub(crate) fn compose(&self) -> String {
        let mut out = String::with_capacity(self.vertex.len() + self.fragment.len() + 2);
        out.push_str(&self.vertex);
        out.push('\n');
        out.push_str(&self.fragment);
        out.push('\n');
        out
    }
}
