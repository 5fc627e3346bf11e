//! wgpu backend: rasterizes an Unfold [`Scene`].
//!
//! Three instanced pipelines (rounded rects, SDF border rings, glyph quads
//! over an R8 coverage atlas). Clip nodes in the scene become scissor
//! batches: nodes are grouped by the clip rect in effect and each batch is
//! drawn with its own scissor, which is what keeps scrolled content from
//! painting over the navbar.

use std::borrow::Cow;
use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont, point};
use fontdb::Database;
use wgpu::util::DeviceExt;

use unfold_core::{Color, Rect, Scene, SceneNode};

pub struct WgpuBackend {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    rect_pipeline: wgpu::RenderPipeline,
    border_pipeline: wgpu::RenderPipeline,
    text_pipeline: wgpu::RenderPipeline,
    text_bind_layout: wgpu::BindGroupLayout,

    font: FontArc,
    atlas: Atlas,
}

struct Atlas {
    tex: wgpu::Texture,
    view: wgpu::TextureView,
    sampler: wgpu::Sampler,
    size: u32,
    next_x: u32,
    next_y: u32,
    row_h: u32,
    map: HashMap<(char, u32), GlyphInfo>,
}

#[derive(Clone, Copy)]
struct GlyphInfo {
    u0: f32,
    v0: f32,
    u1: f32,
    v1: f32,
    w: f32,
    h: f32,
    bearing_x: f32,
    bearing_y: f32,
    advance: f32,
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct RectInstance {
    // xy in NDC, wh in NDC extents
    xywh: [f32; 4],
    radius: f32,
    color: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct BorderInstance {
    xywh: [f32; 4],
    radius_outer: f32,
    stroke: f32,
    color: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GlyphInstance {
    xywh: [f32; 4],
    uv: [f32; 4],
    color: [f32; 4],
}

/// One scissor's worth of instances.
struct Batch {
    scissor: Option<Rect>,
    rects: Range<u32>,
    borders: Range<u32>,
    glyphs: Range<u32>,
}

impl WgpuBackend {
    pub fn new(window: Arc<winit::window::Window>) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::from_env_or_default());
        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|_| anyhow::anyhow!("no compatible GPU adapter"))?;

        let (device, queue) =
            pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
                label: Some("unfold device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            }))?;

        let size = window.inner_size();

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(caps.formats[0]);
        let present_mode = caps
            .present_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::PresentMode::Mailbox || *m == wgpu::PresentMode::Immediate)
            .unwrap_or(wgpu::PresentMode::Fifo);
        let alpha_mode = caps.alpha_modes[0];

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let rect_pipeline = build_pipeline(
            &device,
            config.format,
            "rect",
            include_str!("shaders/rect.wgsl"),
            &[],
            std::mem::size_of::<RectInstance>() as u64,
            &[
                vattr(0, 0, wgpu::VertexFormat::Float32x4),
                vattr(1, 16, wgpu::VertexFormat::Float32),
                vattr(2, 20, wgpu::VertexFormat::Float32x4),
            ],
        );
        let border_pipeline = build_pipeline(
            &device,
            config.format,
            "border",
            include_str!("shaders/border.wgsl"),
            &[],
            std::mem::size_of::<BorderInstance>() as u64,
            &[
                vattr(0, 0, wgpu::VertexFormat::Float32x4),
                vattr(1, 16, wgpu::VertexFormat::Float32),
                vattr(2, 20, wgpu::VertexFormat::Float32),
                vattr(3, 24, wgpu::VertexFormat::Float32x4),
            ],
        );

        let text_bind_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("text bind layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let text_pipeline = build_pipeline(
            &device,
            config.format,
            "text",
            include_str!("shaders/text.wgsl"),
            &[&text_bind_layout],
            std::mem::size_of::<GlyphInstance>() as u64,
            &[
                vattr(0, 0, wgpu::VertexFormat::Float32x4),
                vattr(1, 16, wgpu::VertexFormat::Float32x4),
                vattr(2, 32, wgpu::VertexFormat::Float32x4),
            ],
        );

        let (font, atlas) = Self::init_font_and_atlas(&device)?;

        Ok(Self {
            surface,
            device,
            queue,
            config,
            rect_pipeline,
            border_pipeline,
            text_pipeline,
            text_bind_layout,
            font,
            atlas,
        })
    }

    fn init_font_and_atlas(device: &wgpu::Device) -> anyhow::Result<(FontArc, Atlas)> {
        let mut db = Database::new();
        db.load_system_fonts();

        let query = fontdb::Query {
            families: &[fontdb::Family::SansSerif],
            ..Default::default()
        };
        let id = db
            .query(&query)
            .ok_or_else(|| anyhow::anyhow!("no system sans-serif font found"))?;

        let (source, _face_index) = db
            .face_source(id)
            .ok_or_else(|| anyhow::anyhow!("font face not found"))?;

        let font = match source {
            fontdb::Source::Binary(data) => {
                let bytes: &[u8] = data.as_ref().as_ref();
                FontArc::try_from_vec(bytes.to_vec())
                    .map_err(|_| anyhow::anyhow!("failed to parse system font"))?
            }
            fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => {
                let bytes = std::fs::read(path)?;
                FontArc::try_from_vec(bytes)
                    .map_err(|_| anyhow::anyhow!("failed to parse system font"))?
            }
        };

        let size = 1024u32;
        let tex = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("glyph atlas"),
            size: wgpu::Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = tex.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("glyph atlas sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Linear,
            ..Default::default()
        });

        Ok((
            font,
            Atlas {
                tex,
                view,
                sampler,
                size,
                next_x: 1,
                next_y: 1,
                row_h: 0,
                map: HashMap::new(),
            },
        ))
    }

    fn atlas_bind_group(&self) -> wgpu::BindGroup {
        self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("atlas bind"),
            layout: &self.text_bind_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&self.atlas.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.atlas.sampler),
                },
            ],
        })
    }

    fn upload_glyph(&mut self, ch: char, px: u32) -> Option<GlyphInfo> {
        let key = (ch, px);
        if let Some(info) = self.atlas.map.get(&key) {
            return Some(*info);
        }

        let scaled = self.font.as_scaled(PxScale::from(px as f32));
        let glyph_id = scaled.glyph_id(ch);
        let glyph = glyph_id.with_scale_and_position(PxScale::from(px as f32), point(0.0, 0.0));

        let outlined = scaled.outline_glyph(glyph)?;
        let bb = outlined.px_bounds();

        let w = (bb.max.x - bb.min.x).ceil().max(1.0) as u32;
        let h = (bb.max.y - bb.min.y).ceil().max(1.0) as u32;

        if self.atlas.next_x + w + 1 >= self.atlas.size {
            self.atlas.next_x = 1;
            self.atlas.next_y += self.atlas.row_h + 1;
            self.atlas.row_h = 0;
        }
        if self.atlas.next_y + h + 1 >= self.atlas.size {
            log::warn!("glyph atlas full; dropping glyph {ch:?}@{px}");
            return None;
        }
        let x = self.atlas.next_x;
        let y = self.atlas.next_y;
        self.atlas.next_x += w + 1;
        self.atlas.row_h = self.atlas.row_h.max(h + 1);

        let mut buf = vec![0u8; (w * h) as usize];
        outlined.draw(|gx, gy, cov| {
            let idx = (gy * w + gx) as usize;
            if idx < buf.len() {
                buf[idx] = (cov * 255.0) as u8;
            }
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfoBase {
                texture: &self.atlas.tex,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            &buf,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d {
                width: w,
                height: h,
                depth_or_array_layers: 1,
            },
        );

        let info = GlyphInfo {
            u0: x as f32 / self.atlas.size as f32,
            v0: y as f32 / self.atlas.size as f32,
            u1: (x + w) as f32 / self.atlas.size as f32,
            v1: (y + h) as f32 / self.atlas.size as f32,
            w: w as f32,
            h: h as f32,
            bearing_x: bb.min.x,
            bearing_y: -bb.min.y,
            advance: scaled.h_advance(glyph_id),
        };
        self.atlas.map.insert(key, info);
        Some(info)
    }

    pub fn configure_surface(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn frame(&mut self, scene: &Scene) {
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(_) => {
                self.surface.configure(&self.device, &self.config);
                match self.surface.get_current_texture() {
                    Ok(f) => f,
                    Err(e) => {
                        log::error!("failed to acquire frame after reconfigure: {e:?}");
                        return;
                    }
                }
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let fb_w = self.config.width as f32;
        let fb_h = self.config.height as f32;

        fn to_ndc_len(px: f32, fb_w: f32, fb_h: f32) -> f32 {
            ((px / fb_w) * 2.0).min((px / fb_h) * 2.0)
        }

        // Group instances into scissor batches along clip boundaries.
        let mut rects: Vec<RectInstance> = vec![];
        let mut borders: Vec<BorderInstance> = vec![];
        let mut glyphs: Vec<GlyphInstance> = vec![];
        let mut batches: Vec<Batch> = vec![];
        let mut clip_stack: Vec<Rect> = vec![];
        let mut batch_open = Batch {
            scissor: None,
            rects: 0..0,
            borders: 0..0,
            glyphs: 0..0,
        };

        macro_rules! close_batch {
            () => {{
                batch_open.rects.end = rects.len() as u32;
                batch_open.borders.end = borders.len() as u32;
                batch_open.glyphs.end = glyphs.len() as u32;
                let next_scissor = clip_stack.last().copied();
                let finished = std::mem::replace(
                    &mut batch_open,
                    Batch {
                        scissor: next_scissor,
                        rects: rects.len() as u32..rects.len() as u32,
                        borders: borders.len() as u32..borders.len() as u32,
                        glyphs: glyphs.len() as u32..glyphs.len() as u32,
                    },
                );
                if finished.rects.start != finished.rects.end
                    || finished.borders.start != finished.borders.end
                    || finished.glyphs.start != finished.glyphs.end
                {
                    batches.push(finished);
                }
            }};
        }

        for node in &scene.nodes {
            match node {
                SceneNode::PushClip { rect } => {
                    close_batch!();
                    clip_stack.push(*rect);
                    batch_open.scissor = Some(*rect);
                }
                SceneNode::PopClip => {
                    close_batch!();
                    clip_stack.pop();
                    batch_open.scissor = clip_stack.last().copied();
                }
                SceneNode::Rect {
                    rect,
                    color,
                    radius,
                } => {
                    rects.push(RectInstance {
                        xywh: to_ndc_quad(rect.x, rect.y, rect.w, rect.h, fb_w, fb_h),
                        radius: to_ndc_len(*radius, fb_w, fb_h),
                        color: color.to_linear(),
                    });
                }
                SceneNode::Border {
                    rect,
                    color,
                    width,
                    radius,
                } => {
                    borders.push(BorderInstance {
                        xywh: to_ndc_quad(rect.x, rect.y, rect.w, rect.h, fb_w, fb_h),
                        radius_outer: to_ndc_len(*radius, fb_w, fb_h),
                        stroke: to_ndc_len(*width, fb_w, fb_h),
                        color: color.to_linear(),
                    });
                }
                SceneNode::Text {
                    pos,
                    text,
                    color,
                    size,
                } => {
                    self.push_text(
                        &mut glyphs,
                        pos.x,
                        pos.y,
                        text,
                        *color,
                        *size,
                        fb_w,
                        fb_h,
                    );
                }
            }
        }
        close_batch!();

        let rect_buf = make_buf(&self.device, "rect instances", &rects);
        let border_buf = make_buf(&self.device, "border instances", &borders);
        let glyph_buf = make_buf(&self.device, "glyph instances", &glyphs);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: scene.clear_color.0 as f64 / 255.0,
                            g: scene.clear_color.1 as f64 / 255.0,
                            b: scene.clear_color.2 as f64 / 255.0,
                            a: scene.clear_color.3 as f64 / 255.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let bind = self.atlas_bind_group();
            for batch in &batches {
                let (sx, sy, sw, sh) = scissor_px(batch.scissor, fb_w, fb_h);
                if sw == 0 || sh == 0 {
                    continue;
                }
                rpass.set_scissor_rect(sx, sy, sw, sh);

                if batch.rects.start != batch.rects.end {
                    if let Some(buf) = &rect_buf {
                        rpass.set_pipeline(&self.rect_pipeline);
                        rpass.set_vertex_buffer(0, buf.slice(..));
                        rpass.draw(0..6, batch.rects.clone());
                    }
                }
                if batch.borders.start != batch.borders.end {
                    if let Some(buf) = &border_buf {
                        rpass.set_pipeline(&self.border_pipeline);
                        rpass.set_vertex_buffer(0, buf.slice(..));
                        rpass.draw(0..6, batch.borders.clone());
                    }
                }
                if batch.glyphs.start != batch.glyphs.end {
                    if let Some(buf) = &glyph_buf {
                        rpass.set_pipeline(&self.text_pipeline);
                        rpass.set_bind_group(0, &bind, &[]);
                        rpass.set_vertex_buffer(0, buf.slice(..));
                        rpass.draw(0..6, batch.glyphs.clone());
                    }
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
    }

    #[allow(clippy::too_many_arguments)]
    fn push_text(
        &mut self,
        glyphs: &mut Vec<GlyphInstance>,
        x: f32,
        y: f32,
        text: &str,
        color: Color,
        size: f32,
        fb_w: f32,
        fb_h: f32,
    ) {
        let px = size.clamp(8.0, 96.0) as u32;
        let ascent = self
            .font
            .as_scaled(PxScale::from(px as f32))
            .ascent();
        let baseline = y + ascent;
        let mut pen_x = x;
        for ch in text.chars() {
            if let Some(info) = self.upload_glyph(ch, px) {
                let gx = pen_x + info.bearing_x;
                let gy = baseline - info.bearing_y;
                glyphs.push(GlyphInstance {
                    xywh: to_ndc_quad(gx, gy, info.w, info.h, fb_w, fb_h),
                    // v flipped: NDC y grows upward
                    uv: [info.u0, info.v1, info.u1, info.v0],
                    color: color.to_linear(),
                });
                pen_x += info.advance;
            } else {
                // No outline (e.g. space): advance only.
                let scaled = self.font.as_scaled(PxScale::from(px as f32));
                pen_x += scaled.h_advance(scaled.glyph_id(ch));
            }
        }
    }
}

fn to_ndc_quad(x: f32, y: f32, w: f32, h: f32, fb_w: f32, fb_h: f32) -> [f32; 4] {
    let x0 = (x / fb_w) * 2.0 - 1.0;
    let y0 = 1.0 - (y / fb_h) * 2.0;
    let x1 = ((x + w) / fb_w) * 2.0 - 1.0;
    let y1 = 1.0 - ((y + h) / fb_h) * 2.0;
    [x0.min(x1), y0.min(y1), (x1 - x0).abs(), (y1 - y0).abs()]
}

fn scissor_px(clip: Option<Rect>, fb_w: f32, fb_h: f32) -> (u32, u32, u32, u32) {
    match clip {
        None => (0, 0, fb_w as u32, fb_h as u32),
        Some(r) => {
            let x0 = r.x.clamp(0.0, fb_w);
            let y0 = r.y.clamp(0.0, fb_h);
            let x1 = (r.x + r.w).clamp(0.0, fb_w);
            let y1 = (r.y + r.h).clamp(0.0, fb_h);
            (
                x0 as u32,
                y0 as u32,
                (x1 - x0).max(0.0) as u32,
                (y1 - y0).max(0.0) as u32,
            )
        }
    }
}

fn make_buf<T: bytemuck::Pod>(
    device: &wgpu::Device,
    label: &str,
    items: &[T],
) -> Option<wgpu::Buffer> {
    if items.is_empty() {
        return None;
    }
    Some(
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(items),
            usage: wgpu::BufferUsages::VERTEX,
        }),
    )
}

fn vattr(location: u32, offset: u64, format: wgpu::VertexFormat) -> wgpu::VertexAttribute {
    wgpu::VertexAttribute {
        shader_location: location,
        offset,
        format,
    }
}

fn build_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    name: &str,
    wgsl: &str,
    bind_layouts: &[&wgpu::BindGroupLayout],
    stride: u64,
    attributes: &[wgpu::VertexAttribute],
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(name),
        source: wgpu::ShaderSource::Wgsl(Cow::Owned(wgsl.to_string())),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(name),
        bind_group_layouts: bind_layouts,
        immediate_size: 0,
    });
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(name),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: stride,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
