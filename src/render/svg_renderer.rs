use std::fmt::Write as _;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, RenderFrame, Renderer, TextHAlign};

/// Renders frames to SVG markup. The tooltip overlay is emitted as a trailing
/// `<g class="tooltip">` so hosts can lift it into page space.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
    font_family: Option<String>,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_font_family(mut self, font_family: impl Into<String>) -> Self {
        self.font_family = Some(font_family.into());
        self
    }

    /// Markup of the most recent frame.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }

    fn write_frame(&self, frame: &RenderFrame) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        let (width, height) = (frame.viewport.width, frame.viewport.height);
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        )?;

        for line in &frame.lines {
            writeln!(
                out,
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"{}/>"#,
                line.x1,
                line.y1,
                line.x2,
                line.y2,
                line.color.to_hex(),
                line.stroke_width,
                alpha_attr("stroke-opacity", line.color),
            )?;
        }

        for rect in &frame.rects {
            writeln!(
                out,
                r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}" opacity="{}"{}/>"#,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                rect.fill_color.to_hex(),
                rect.opacity,
                alpha_attr("fill-opacity", rect.fill_color),
            )?;
        }

        let font_family = self.font_family.as_deref().unwrap_or("sans-serif");
        for text in &frame.texts {
            let anchor = match text.h_align {
                TextHAlign::Left => "start",
                TextHAlign::Center => "middle",
                TextHAlign::Right => "end",
            };
            let transform = if text.rotation_deg == 0.0 {
                String::new()
            } else {
                format!(
                    r#" transform="rotate({} {} {})""#,
                    text.rotation_deg, text.x, text.y
                )
            };
            writeln!(
                out,
                r#"  <text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}" text-anchor="{}"{}>{}</text>"#,
                text.x,
                text.y,
                escape_xml(font_family),
                text.font_size_px,
                text.color.to_hex(),
                anchor,
                transform,
                escape_xml(&text.text),
            )?;
        }

        if let Some(tooltip) = &frame.tooltip {
            writeln!(
                out,
                r#"  <g class="tooltip" opacity="{}" transform="translate({} {})">"#,
                tooltip.opacity, tooltip.left, tooltip.top
            )?;
            for (row, line) in tooltip.lines.iter().enumerate() {
                writeln!(
                    out,
                    r#"    <text x="0" y="{}" font-family="{}" font-size="12">{}</text>"#,
                    (row + 1) * 14,
                    escape_xml(font_family),
                    escape_xml(line),
                )?;
            }
            writeln!(out, "  </g>")?;
        }

        writeln!(out, "</svg>")?;
        Ok(out)
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.document = self
            .write_frame(frame)
            .map_err(|e| ChartError::InvalidData(format!("failed to write svg: {e}")))?;
        Ok(())
    }
}

fn alpha_attr(name: &str, color: Color) -> String {
    if color.alpha >= 1.0 {
        String::new()
    } else {
        format!(r#" {name}="{}""#, color.alpha)
    }
}

fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::SvgRenderer;
    use crate::core::Viewport;
    use crate::render::{Color, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive};

    #[test]
    fn writes_rects_with_opacity_and_escaped_text() {
        let frame = RenderFrame::new(Viewport::new(100, 50))
            .with_rect(RectPrimitive::new(1.0, 2.0, 3.0, 4.0, Color::BLACK).with_opacity(0.0))
            .with_text(
                TextPrimitive::new("a<b", 10.0, 20.0, 10.0, Color::BLACK, TextHAlign::Right)
                    .with_rotation(-45.0),
            );
        let mut renderer = SvgRenderer::new();
        renderer.render(&frame).expect("render svg");

        let svg = renderer.document();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r##"<rect x="1" y="2" width="3" height="4" fill="#000000" opacity="0"/>"##));
        assert!(svg.contains("a&lt;b"));
        assert!(svg.contains(r#"transform="rotate(-45 10 20)""#));
        assert!(svg.contains(r#"text-anchor="end""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
