use std::num::NonZeroU64;

use glviewer_bindings::{UniformError, UniformProgram, UniformSet, UniformValue};

use super::reflect::{CompiledModule, UniformDecl};
use super::source::{FRAGMENT_ENTRY, VERTEX_ENTRY};
use super::store::UniformStore;
use crate::render::quad::{FullscreenQuad, QuadVertex};

/// Uniform buffers are sized in 16-byte units.
const UNIFORM_ALIGN: u64 = 16;

fn buffer_size(decl: &UniformDecl) -> u64 {
    decl.size.max(UNIFORM_ALIGN).next_multiple_of(UNIFORM_ALIGN)
}

/// A linked render pipeline plus one uniform buffer per declared uniform.
///
/// Uniform writes land in host memory and are uploaded when the program is
/// activated. Buffers start zeroed, so unwritten uniforms read as zero.
pub struct ShaderProgram {
    pipeline: wgpu::RenderPipeline,
    bind_group: Option<wgpu::BindGroup>,
    buffers: Vec<wgpu::Buffer>,
    store: UniformStore,
}

impl ShaderProgram {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        module: &CompiledModule,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("glviewer program shader"),
            source: wgpu::ShaderSource::Wgsl(module.source().into()),
        });

        let decls = module.uniforms();

        let buffers: Vec<wgpu::Buffer> = decls
            .iter()
            .map(|d| {
                device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(&format!("glviewer uniform `{}`", d.name)),
                    size: buffer_size(d),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                })
            })
            .collect();

        let layout_entries: Vec<wgpu::BindGroupLayoutEntry> = decls
            .iter()
            .map(|d| wgpu::BindGroupLayoutEntry {
                binding: d.binding,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(d.size),
                },
                count: None,
            })
            .collect();

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("glviewer program bgl"),
            entries: &layout_entries,
        });

        let bind_group = if decls.is_empty() {
            None
        } else {
            let entries: Vec<wgpu::BindGroupEntry<'_>> = decls
                .iter()
                .zip(&buffers)
                .map(|(d, buffer)| wgpu::BindGroupEntry {
                    binding: d.binding,
                    resource: buffer.as_entire_binding(),
                })
                .collect();

            Some(device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("glviewer program bind group"),
                layout: &bind_group_layout,
                entries: &entries,
            }))
        };

        // A program without uniforms binds no group at all.
        let bind_group_layouts: &[&wgpu::BindGroupLayout] = if bind_group.is_some() {
            &[&bind_group_layout]
        } else {
            &[]
        };
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("glviewer program pipeline layout"),
            bind_group_layouts,
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("glviewer program pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[QuadVertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::info!(
            "program linked: {} uniform buffer(s), target {:?}",
            buffers.len(),
            surface_format
        );

        Self {
            pipeline,
            bind_group,
            buffers,
            store: UniformStore::new(decls),
        }
    }

    /// Uploads pending uniform writes and makes the program current.
    ///
    /// Uniforms cannot be written while the returned guard is alive.
    pub fn activate(&mut self, queue: &wgpu::Queue) -> ActiveProgram<'_> {
        let mut uploads = 0usize;
        for (index, value) in self.store.drain_dirty() {
            queue.write_buffer(
                &self.buffers[index],
                0,
                bytemuck::cast_slice(value.components()),
            );
            uploads += 1;
        }
        if uploads > 0 {
            log::trace!("uploaded {uploads} uniform(s)");
        }

        ActiveProgram { program: self }
    }
}

impl UniformProgram for ShaderProgram {
    fn declared_uniforms(&self) -> &UniformSet {
        self.store.declared()
    }

    fn uniform_value(&self, name: &str) -> Option<UniformValue> {
        self.store.get(name)
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), UniformError> {
        self.store.set(name, value)
    }
}

/// A program bound for drawing. Dropping it deactivates the program.
pub struct ActiveProgram<'p> {
    program: &'p ShaderProgram,
}

impl ActiveProgram<'_> {
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, quad: &FullscreenQuad) {
        rpass.set_pipeline(&self.program.pipeline);
        if let Some(bind_group) = &self.program.bind_group {
            rpass.set_bind_group(0, bind_group, &[]);
        }
        quad.draw(rpass);
    }

    pub fn deactivate(self) {}
}
