//! GlViewer: previews a WGSL fragment shader over the whole window.
//!
//! The shader's `time`, `resolution` and `mouse` uniforms, when declared,
//! are driven by a clock tick, window resizes and captured pointer motion.

mod cli;
mod host;
mod shaders;
mod viewer;

use anyhow::{Context, Result};
use glviewer_bindings::BindingConfig;
use glviewer_engine::device::GpuInit;
use glviewer_engine::logging::{LoggingConfig, init_logging};
use glviewer_engine::render::program::CompiledModule;
use glviewer_engine::window::{Runtime, RuntimeConfig, WindowMode};
use winit::dpi::LogicalSize;

use crate::cli::Cli;
use crate::viewer::Viewer;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    // Shaders are compiled before any window exists so a bad file fails fast.
    let source = shaders::program_source(cli.fragment_shader.as_deref())?;
    let module = CompiledModule::compile(&source).context("invalid shader program")?;

    let runtime = RuntimeConfig {
        title: "GlViewer".to_string(),
        initial_size: LogicalSize::new(640.0, 480.0),
        resizable: true,
        mode: if cli.fullscreen {
            WindowMode::Fullscreen
        } else {
            WindowMode::Windowed
        },
    };

    // Match a plain GL default framebuffer: no sRGB encode on write.
    let gpu_init = GpuInit {
        prefer_srgb: false,
        ..GpuInit::default()
    };

    let viewer = Viewer::new(
        module,
        BindingConfig {
            tick_interval: cli.tick_interval(),
        },
    );

    Runtime::run(runtime, gpu_init, viewer)
}
