//! Render state configurations
//!
//! Small enums mapped onto wgpu pipeline state.

/// Blend state configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendState {
    /// No blending (opaque).
    #[default]
    Opaque,
    /// Standard alpha blending. Objects are drawn in insertion order, so
    /// transparent objects must be added back to front.
    Alpha,
    /// Additive blending.
    Additive,
}

impl BlendState {
    /// Convert to wgpu blend state.
    pub fn to_wgpu(self) -> Option<wgpu::BlendState> {
        match self {
            BlendState::Opaque => None,
            BlendState::Alpha => Some(wgpu::BlendState::ALPHA_BLENDING),
            BlendState::Additive => {
                let add = wgpu::BlendComponent {
                    src_factor: wgpu::BlendFactor::One,
                    dst_factor: wgpu::BlendFactor::One,
                    operation: wgpu::BlendOperation::Add,
                };
                Some(wgpu::BlendState {
                    color: add,
                    alpha: add,
                })
            }
        }
    }
}

/// Depth test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthState {
    /// Test against and write to the depth buffer.
    #[default]
    ReadWrite,
    /// Test only; used for transparent geometry.
    ReadOnly,
    /// Always pass, never write.
    Disabled,
}

impl DepthState {
    /// Convert to wgpu depth stencil state.
    pub fn to_wgpu(self, format: wgpu::TextureFormat) -> wgpu::DepthStencilState {
        let (write, compare) = match self {
            DepthState::ReadWrite => (true, wgpu::CompareFunction::Less),
            DepthState::ReadOnly => (false, wgpu::CompareFunction::Less),
            DepthState::Disabled => (false, wgpu::CompareFunction::Always),
        };
        wgpu::DepthStencilState {
            format,
            depth_write_enabled: write,
            depth_compare: compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }
}

/// Cull mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullState {
    /// No culling.
    #[default]
    None,
    /// Cull front faces.
    Front,
    /// Cull back faces.
    Back,
}

impl CullState {
    /// Convert to wgpu cull mode.
    pub fn to_wgpu(self) -> Option<wgpu::Face> {
        match self {
            CullState::None => None,
            CullState::Front => Some(wgpu::Face::Front),
            CullState::Back => Some(wgpu::Face::Back),
        }
    }
}
