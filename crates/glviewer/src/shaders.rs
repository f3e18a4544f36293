use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glviewer_engine::render::program::ProgramSource;

/// Built-in vertex stage: passes the full-screen quad through.
pub const DEFAULT_VERTEX: &str = include_str!("../shaders/vertex.wgsl");

/// Built-in fragment stage, used when no shader file is given.
pub const DEFAULT_FRAGMENT: &str = include_str!("../shaders/plasma.wgsl");

/// Declarations prepended to fragment shaders loaded from disk.
pub const INTERFACE_HEADER: &str = include_str!("../shaders/header.wgsl");

/// Prepends [`INTERFACE_HEADER`] to a user fragment shader.
pub fn with_header(fragment: &str) -> String {
    format!("{INTERFACE_HEADER}\n{fragment}")
}

/// Reads a fragment shader from disk and prepends the interface header.
pub fn load_fragment(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read fragment shader {}", path.display()))?;
    log::info!("loaded fragment shader {} ({} bytes)", path.display(), text.len());
    Ok(with_header(&text))
}

/// The program to run: the built-in shaders, or the built-in vertex stage
/// with the fragment stage read from `fragment`.
pub fn program_source(fragment: Option<&Path>) -> Result<ProgramSource> {
    let fragment = match fragment {
        Some(path) => load_fragment(path)?,
        None => DEFAULT_FRAGMENT.to_string(),
    };
    Ok(ProgramSource::new(DEFAULT_VERTEX, fragment))
}
