use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RenderFrame, Renderer, TextHAlign, TooltipOverlay};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
    pub tooltip_drawn: bool,
}

/// Cairo + Pango raster backend.
///
/// Draws into an owned image surface through `Renderer::render`, or into an
/// external context through `render_on_context`. Tooltip overlays are drawn at
/// their page position, which assumes the surface starts at the page origin.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Encodes the surface as PNG into `out`.
    pub fn write_png<W: std::io::Write>(&self, out: &mut W) -> ChartResult<()> {
        self.surface
            .write_to_png(out)
            .map_err(|err| ChartError::InvalidData(format!("failed to encode png: {err}")))
    }

    pub fn render_on_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, self.clear_color, 1.0);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();

        for line in &frame.lines {
            apply_color(context, line.color, 1.0);
            context.set_line_width(line.stroke_width);
            context.move_to(line.x1, line.y1);
            context.line_to(line.x2, line.y2);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke line", err))?;
            stats.lines_drawn += 1;
        }

        for rect in &frame.rects {
            if rect.opacity <= 0.0 {
                continue;
            }
            context.rectangle(rect.x, rect.y, rect.width, rect.height);
            apply_color(context, rect.fill_color, rect.opacity);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
            stats.rects_drawn += 1;
        }

        for text in &frame.texts {
            draw_text(
                context,
                &text.text,
                text.x,
                text.y,
                text.font_size_px,
                text.color,
                text.h_align,
                text.rotation_deg,
            )?;
            stats.texts_drawn += 1;
        }

        if let Some(tooltip) = &frame.tooltip {
            draw_tooltip(context, tooltip)?;
            stats.tooltip_drawn = true;
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_on_context(&context, frame)
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_text(
    context: &Context,
    text: &str,
    x: f64,
    y: f64,
    font_size_px: f64,
    color: Color,
    h_align: TextHAlign,
    rotation_deg: f64,
) -> ChartResult<()> {
    let layout = pangocairo::functions::create_layout(context);
    let font_description = FontDescription::from_string(&format!("Sans {font_size_px}"));
    layout.set_font_description(Some(&font_description));
    layout.set_text(text);

    let (text_width, text_height) = layout.pixel_size();
    let dx = match h_align {
        TextHAlign::Left => 0.0,
        TextHAlign::Center => -f64::from(text_width) / 2.0,
        TextHAlign::Right => -f64::from(text_width),
    };

    context
        .save()
        .map_err(|err| map_backend_error("failed to save context", err))?;
    context.translate(x, y);
    if rotation_deg != 0.0 {
        context.rotate(rotation_deg.to_radians());
    }
    apply_color(context, color, 1.0);
    context.move_to(dx, -f64::from(text_height) / 2.0);
    pangocairo::functions::show_layout(context, &layout);
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore context", err))
}

fn draw_tooltip(context: &Context, tooltip: &TooltipOverlay) -> ChartResult<()> {
    if tooltip.opacity <= 0.0 || tooltip.lines.is_empty() {
        return Ok(());
    }
    let line_height = 14.0;
    let height = line_height * tooltip.lines.len() as f64 + 8.0;
    let width = tooltip
        .lines
        .iter()
        .map(|line| line.chars().count() as f64 * 7.0)
        .fold(0.0, f64::max)
        + 8.0;

    context.rectangle(tooltip.left, tooltip.top, width, height);
    apply_color(context, Color::rgb(0.94, 0.94, 0.94), tooltip.opacity);
    context
        .fill()
        .map_err(|err| map_backend_error("failed to fill tooltip", err))?;

    for (row, line) in tooltip.lines.iter().enumerate() {
        let layout = pangocairo::functions::create_layout(context);
        layout.set_font_description(Some(&FontDescription::from_string("Sans 10")));
        layout.set_text(line);
        apply_color(context, Color::BLACK, tooltip.opacity);
        context.move_to(tooltip.left + 4.0, tooltip.top + 4.0 + row as f64 * line_height);
        pangocairo::functions::show_layout(context, &layout);
    }
    Ok(())
}

fn apply_color(context: &Context, color: Color, opacity: f64) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha * opacity);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
