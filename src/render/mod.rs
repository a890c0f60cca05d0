use std::path::Path;

use kurbo::{Affine, Point, Shape, Stroke, Vec2};
use parley::{Alignment, FontStack, FontWeight, Layout, PositionedLayoutItem, StyleProperty};
use peniko::{Brush, BrushRef, Color, Fill, Mix};
use vello::{
  Renderer,
  wgpu::{self, TextureDescriptor},
};

use crate::{Error, Figure, Result};

mod texture;

pub(crate) struct Render {
  pub(crate) scene:      vello::Scene,
  pub(crate) background: Color,
  font:                  parley::FontContext,
  layout:                parley::LayoutContext<Brush>,
}

pub(crate) struct GpuHandle {
  pub(crate) device:  wgpu::Device,
  pub(crate) queue:   wgpu::Queue,
  pub(crate) texture: wgpu::Texture,
  pub(crate) view:    wgpu::TextureView,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct RenderConfig {
  pub(crate) width:  u32,
  pub(crate) height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) enum Align {
  #[default]
  Start,
  Center,
  End,
}

pub(crate) struct DrawText<'a> {
  pub text:             &'a str,
  pub family:           &'a str,
  pub size:             f32,
  pub weight:           FontWeight,
  pub brush:            Brush,
  pub position:         Point,
  /// Applied around `position`, after alignment.
  pub transform:        Affine,
  pub horizontal_align: Align,
  pub vertical_align:   Align,
}

impl Default for DrawText<'_> {
  fn default() -> Self {
    DrawText {
      text:             "",
      family:           "sans-serif",
      size:             12.0,
      weight:           FontWeight::NORMAL,
      brush:            Brush::Solid(Color::BLACK),
      position:         Point::ZERO,
      transform:        Affine::IDENTITY,
      horizontal_align: Align::Start,
      vertical_align:   Align::Start,
    }
  }
}

impl Align {
  fn offset(self, size: f64) -> f64 {
    match self {
      Align::Start => 0.0,
      Align::Center => -size / 2.0,
      Align::End => -size,
    }
  }
}

impl Figure<'_> {
  /// Renders the figure and writes it to `path` as a PNG.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let config = RenderConfig { width: self.width(), height: self.height() };

    let mut render = Render::new(self.theme().background);
    self.draw(&mut render)?;

    let handle = GpuHandle::new(&config)?;
    let mut renderer = Renderer::new(&handle.device, vello::RendererOptions::default())?;

    renderer.render_to_texture(
      &handle.device,
      &handle.queue,
      &render.scene,
      &handle.view,
      &vello::RenderParams {
        base_color:          render.background,
        width:               config.width,
        height:              config.height,
        antialiasing_method: vello::AaConfig::Msaa16,
      },
    )?;

    texture::save_png(&handle, config, path)?;
    log::info!("wrote {}x{} figure to {}", config.width, config.height, path.display());
    Ok(())
  }
}

impl Render {
  pub(crate) fn new(background: Color) -> Self {
    Render {
      scene: vello::Scene::new(),
      background,
      font: parley::FontContext::new(),
      layout: parley::LayoutContext::new(),
    }
  }

  pub(crate) fn fill<'b>(
    &mut self,
    shape: &impl Shape,
    transform: Affine,
    brush: impl Into<BrushRef<'b>>,
  ) {
    self.scene.fill(Fill::NonZero, transform, brush, None, shape);
  }

  pub(crate) fn stroke<'b>(
    &mut self,
    shape: &impl Shape,
    transform: Affine,
    brush: impl Into<BrushRef<'b>>,
    stroke: &Stroke,
  ) {
    self.scene.stroke(stroke, transform, brush, None, shape);
  }

  /// Everything drawn until `pop_clip` is clipped to `shape`.
  pub(crate) fn push_clip(&mut self, shape: &impl Shape) {
    self.scene.push_layer(Mix::Normal, 1.0, Affine::IDENTITY, shape);
  }

  pub(crate) fn pop_clip(&mut self) { self.scene.pop_layer(); }

  pub(crate) fn layout_text(&mut self, text: &DrawText) -> Layout<Brush> {
    let mut builder = self.layout.ranged_builder(&mut self.font, text.text, 1.0, true);

    builder.push_default(StyleProperty::FontStack(FontStack::from(text.family)));
    builder.push_default(StyleProperty::FontSize(text.size));
    builder.push_default(StyleProperty::FontWeight(text.weight));
    builder.push_default(StyleProperty::Brush(text.brush.clone()));

    let mut layout = builder.build(text.text);
    layout.break_all_lines(None);
    layout.align(None, Alignment::Start, Default::default());
    layout
  }

  pub(crate) fn draw_text(&mut self, text: DrawText) {
    let layout = self.layout_text(&text);
    self.draw_text_layout(layout, text);
  }

  pub(crate) fn draw_text_layout(&mut self, layout: Layout<Brush>, text: DrawText) {
    let offset = Vec2::new(
      text.horizontal_align.offset(f64::from(layout.width())),
      text.vertical_align.offset(f64::from(layout.height())),
    );
    let transform =
      Affine::translate(text.position.to_vec2()) * text.transform * Affine::translate(offset);

    for line in layout.lines() {
      for item in line.items() {
        let PositionedLayoutItem::GlyphRun(glyph_run) = item else { continue };

        let run = glyph_run.run();
        let mut x = glyph_run.offset();
        let baseline = glyph_run.baseline();

        self
          .scene
          .draw_glyphs(run.font())
          .brush(&glyph_run.style().brush)
          .hint(false)
          .transform(transform)
          .glyph_transform(
            run.synthesis().skew().map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0)),
          )
          .font_size(run.font_size())
          .normalized_coords(run.normalized_coords())
          .draw(
            Fill::NonZero,
            glyph_run.glyphs().map(|glyph| {
              let gx = x + glyph.x;
              let gy = baseline + glyph.y;
              x += glyph.advance;
              vello::Glyph { id: glyph.id.into(), x: gx, y: gy }
            }),
          );
      }
    }
  }
}

impl GpuHandle {
  pub(crate) fn new(config: &RenderConfig) -> Result<Self> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
    let adapter =
      pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions::default()))
        .map_err(|e| Error::Adapter(e.to_string()))?;
    log::debug!("rendering on {:?}", adapter.get_info());

    let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
      label:             None,
      required_features: wgpu::Features::empty(),
      required_limits:   wgpu::Limits::defaults(),
      memory_hints:      wgpu::MemoryHints::MemoryUsage,
      trace:             wgpu::Trace::Off,
    }))?;

    let texture = device.create_texture(&TextureDescriptor {
      label:           Some("Render Texture"),
      size:            config.extent_3d(),
      mip_level_count: 1,
      sample_count:    1,
      dimension:       wgpu::TextureDimension::D2,
      format:          wgpu::TextureFormat::Rgba8Unorm,
      usage:           wgpu::TextureUsages::STORAGE_BINDING | wgpu::TextureUsages::COPY_SRC,
      view_formats:    &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    Ok(GpuHandle { device, queue, texture, view })
  }
}

impl RenderConfig {
  pub(crate) fn extent_3d(&self) -> wgpu::Extent3d {
    wgpu::Extent3d { width: self.width, height: self.height, depth_or_array_layers: 1 }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn alignment_offsets() {
    assert_eq!(Align::Start.offset(40.0), 0.0);
    assert_eq!(Align::Center.offset(40.0), -20.0);
    assert_eq!(Align::End.offset(40.0), -40.0);
  }
}
