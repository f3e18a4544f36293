/// What a draw callback needs from the GPU layer for one frame.
///
/// Uniform uploads go through `queue`; they land before the frame's command
/// buffer is submitted.
pub struct RenderCtx<'a> {
    pub queue: &'a wgpu::Queue,
}

impl<'a> RenderCtx<'a> {
    pub fn new(queue: &'a wgpu::Queue) -> Self {
        Self { queue }
    }
}

/// The frame being recorded: its encoder and swapchain view.
pub struct RenderTarget<'a> {
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub color_view: &'a wgpu::TextureView,
}

impl<'a> RenderTarget<'a> {
    pub fn new(encoder: &'a mut wgpu::CommandEncoder, color_view: &'a wgpu::TextureView) -> Self {
        Self { encoder, color_view }
    }

    /// Begins a single-attachment render pass on the target.
    pub fn begin_pass(
        &mut self,
        label: &str,
        load: wgpu::LoadOp<wgpu::Color>,
    ) -> wgpu::RenderPass<'_> {
        self.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: self.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}
