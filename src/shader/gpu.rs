//! wgpu execution of the per-pixel program (feature `gpu`).
//!
//! One fullscreen-triangle render pass: source texture + sampler + the
//! [`UniformSet`] buffer. The uniform buffer is created once and rewritten
//! in place every frame; nothing else is allocated per frame.

use anyhow::Context as _;
use wgpu::util::DeviceExt as _;

use crate::foundation::error::{VisimError, VisimResult};
use crate::shader::uniforms::{UniformLayout, UniformSet};
use crate::shader::IMPAIRMENT_WGSL;

/// The impairment render pass and its long-lived GPU resources.
pub struct GpuPass {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    uniform_buffer: wgpu::Buffer,
    sampler: wgpu::Sampler,
    layout: UniformLayout,
}

impl GpuPass {
    /// Compile the program and allocate the uniform buffer.
    ///
    /// Validates the condition catalog against both the uniform struct and
    /// the WGSL source up front: a missing slot is a packaging bug and must
    /// fail here, never at frame time.
    pub fn new(device: &wgpu::Device, render_format: wgpu::TextureFormat) -> VisimResult<Self> {
        let layout = UniformLayout::new()?;
        for &c in crate::catalog::condition::Condition::ALL {
            // The WGSL struct uses the snake_case field spellings.
            let field = snake_field(c.uniform_name());
            if !IMPAIRMENT_WGSL.contains(&field) {
                return Err(VisimError::catalog(format!(
                    "WGSL program is missing uniform field '{field}'"
                )));
            }
        }

        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("impairment"),
            source: wgpu::ShaderSource::Wgsl(IMPAIRMENT_WGSL.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("impairment-bgl"),
            entries: &[
                // @binding(0) source texture
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                // @binding(1) sampler
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
                // @binding(2) uniforms
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("impairment-layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("impairment-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: Some("vs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: Some("fs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: render_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("impairment-uniforms"),
            contents: bytemuck::bytes_of(&UniformSet::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("impairment-sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Ok(Self {
            pipeline,
            bind_group_layout,
            uniform_buffer,
            sampler,
            layout,
        })
    }

    /// The validated uniform layout.
    pub fn layout(&self) -> &UniformLayout {
        &self.layout
    }

    /// Rewrite the long-lived uniform buffer with this frame's table.
    pub fn write_uniforms(&self, queue: &wgpu::Queue, uniforms: &UniformSet) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Encode one pass reading `input_view` and writing `output_view`.
    pub fn encode(
        &self,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        input_view: &wgpu::TextureView,
        output_view: &wgpu::TextureView,
    ) {
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("impairment-bg"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(input_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: self.uniform_buffer.as_entire_binding(),
                },
            ],
        });

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("impairment-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.draw(0..3, 0..1);
    }
}

/// Block on adapter/device acquisition. Convenience for offline callers; an
/// interactive host will already own a device.
pub fn request_device_blocking() -> VisimResult<(wgpu::Device, wgpu::Queue)> {
    pollster::block_on(async {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions::default())
            .await
            .context("no suitable GPU adapter")?;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await
            .context("GPU device request failed")?;
        Ok((device, queue))
    })
}

/// `protanopiaIntensity` → `protanopia`, the WGSL field spelling.
fn snake_field(uniform_name: &str) -> String {
    let base = uniform_name.strip_suffix("Intensity").unwrap_or(uniform_name);
    let mut out = String::with_capacity(base.len() + 4);
    for ch in base.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_field_conversion() {
        assert_eq!(snake_field("protanopiaIntensity"), "protanopia");
        assert_eq!(
            snake_field("macularDegenerationIntensity"),
            "macular_degeneration"
        );
        assert_eq!(snake_field("nightBlindnessIntensity"), "night_blindness");
    }
}
