//! Render target abstraction
//!
//! Bundles the attachments of one frame: the color view drawn into, the view
//! it resolves to when multisampled, and the depth view.

/// Attachments for a single render pass.
pub struct RenderTarget<'a> {
    pub(crate) color_view: &'a wgpu::TextureView,
    pub(crate) resolve_view: Option<&'a wgpu::TextureView>,
    pub(crate) depth_view: Option<&'a wgpu::TextureView>,
}

impl<'a> RenderTarget<'a> {
    /// Draw straight into `view`.
    pub fn direct(view: &'a wgpu::TextureView, depth_view: Option<&'a wgpu::TextureView>) -> Self {
        Self {
            color_view: view,
            resolve_view: None,
            depth_view,
        }
    }

    /// Draw into a multisampled `msaa_view` and resolve into `view`.
    pub fn multisampled(
        msaa_view: &'a wgpu::TextureView,
        view: &'a wgpu::TextureView,
        depth_view: Option<&'a wgpu::TextureView>,
    ) -> Self {
        Self {
            color_view: msaa_view,
            resolve_view: Some(view),
            depth_view,
        }
    }

    /// Begin a render pass that clears color to `clear` and depth to 1.0.
    pub fn begin_render_pass<'p>(
        &self,
        encoder: &'p mut wgpu::CommandEncoder,
        clear: [f64; 4],
    ) -> wgpu::RenderPass<'p> {
        let [r, g, b, a] = clear;
        let color_attachment = wgpu::RenderPassColorAttachment {
            view: self.color_view,
            resolve_target: self.resolve_view,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                store: if self.resolve_view.is_some() {
                    wgpu::StoreOp::Discard
                } else {
                    wgpu::StoreOp::Store
                },
            },
            depth_slice: None,
        };

        let depth_attachment = self
            .depth_view
            .map(|view| wgpu::RenderPassDepthStencilAttachment {
                view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            });

        encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("frame pass"),
            color_attachments: &[Some(color_attachment)],
            depth_stencil_attachment: depth_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        })
    }
}
