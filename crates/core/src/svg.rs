//! SVG export: converts recorded `RenderCommand` lists into standalone SVG
//! documents.

use std::fmt::Write as _;

use buildlane_protocol::{GlyphRun, Paint, Rect, RenderCommand, Stroke};

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the viewBox. Glyph runs are emitted as
/// `<text>` with one x-coordinate per glyph, so the SVG keeps the exact
/// glyph placement even though the viewer picks its own font for
/// `font_family`.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, font_family: &str) -> String {
    render_svg_view(commands, Rect::new(0.0, 0.0, width, height), font_family)
}

/// Like [`render_svg`], for a scrolled canvas: `view` is the visible area in
/// canvas coordinates.
pub fn render_svg_view(commands: &[RenderCommand], view: Rect, font_family: &str) -> String {
    let mut svg = String::with_capacity(commands.len() * 160 + 256);
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}" font-family="{}">"#,
        view.x,
        view.y,
        view.w,
        view.h,
        view.w,
        view.h,
        escape_xml(font_family),
    );

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect { rect, fill, stroke } => {
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{}" height="{}"{}{}/>"#,
                    rect.x,
                    rect.y,
                    rect.w,
                    rect.h,
                    fill_attrs(fill),
                    stroke_attrs(stroke.as_ref()),
                );
            }
            RenderCommand::DrawRoundedRect {
                rect,
                radius,
                fill,
                stroke,
            } => {
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{radius}" ry="{radius}"{}{}/>"#,
                    rect.x,
                    rect.y,
                    rect.w,
                    rect.h,
                    fill_attrs(fill),
                    stroke_attrs(stroke.as_ref()),
                );
            }
            RenderCommand::DrawGlyphRun { run, paint } => {
                if !run.is_empty() {
                    write_glyph_run(&mut svg, run, paint);
                }
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

fn write_glyph_run(svg: &mut String, run: &GlyphRun, paint: &Paint) {
    let xs: Vec<String> = run.positions().map(|x| format!("{x:.2}")).collect();
    let _ = write!(
        svg,
        r#"<text x="{}" y="{}" font-size="{}"{} xml:space="preserve">{}</text>"#,
        xs.join(" "),
        run.origin.y,
        run.font_size,
        fill_attrs(paint),
        escape_xml(&run.text()),
    );
}

fn fill_attrs(paint: &Paint) -> String {
    let alpha = paint.effective_alpha();
    if alpha >= 1.0 {
        format!(r#" fill="{}""#, paint.color.to_hex_string())
    } else {
        format!(
            r#" fill="{}" fill-opacity="{alpha:.3}""#,
            paint.color.to_hex_string()
        )
    }
}

fn stroke_attrs(stroke: Option<&Stroke>) -> String {
    match stroke {
        Some(stroke) => format!(
            r#" stroke="{}" stroke-width="{}""#,
            stroke.paint.color.to_hex_string(),
            stroke.thickness
        ),
        None => String::new(),
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
