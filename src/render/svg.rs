use crate::{
    animation::ease::Ease,
    foundation::config::Palette,
    foundation::core::ViewBox,
    foundation::error::KakijunResult,
    glyph::model::GlyphStrokeSet,
    playback::frame::{FallbackFrame, Frame, LabelView, StrokeFrame, StrokeView, StyleState},
    render::sink::RenderSink,
};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// [`RenderSink`] that turns every frame into a standalone SVG document.
///
/// Strokes are drawn twice: a full-length guide in the pending color, and an ink layer that
/// reveals each stroke with `stroke-dasharray`/`stroke-dashoffset`, the way a browser
/// host would animate the same frame.
#[derive(Clone, Debug, Default)]
pub struct SvgSink {
    palette: Palette,
    document: String,
    presented: usize,
}

impl SvgSink {
    /// Sink using `palette`.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            document: String::new(),
            presented: 0,
        }
    }

    /// Document of the last presented frame; empty before the first one.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Number of frames presented so far.
    pub fn presented(&self) -> usize {
        self.presented
    }
}

impl RenderSink for SvgSink {
    fn present(&mut self, frame: &Frame<'_>) -> KakijunResult<()> {
        self.document = render_frame_svg(frame, &self.palette);
        self.presented += 1;
        Ok(())
    }
}

/// Render one frame as an SVG document.
pub fn render_frame_svg(frame: &Frame<'_>, palette: &Palette) -> String {
    match frame {
        Frame::Idle => empty_document(ViewBox::default(), "idle"),
        Frame::Loading { .. } => empty_document(ViewBox::default(), "loading"),
        Frame::Strokes(f) => stroke_document(f, palette),
        Frame::Fallback(f) => fallback_document(f, palette),
    }
}

fn open_svg(view_box: ViewBox, state: &str, character: Option<char>) -> String {
    let mut out = format!(
        r#"<svg xmlns="{SVG_NS}" viewBox="{view_box}" width="{}" height="{}" data-state="{state}""#,
        num(view_box.width),
        num(view_box.height),
    );
    if let Some(c) = character {
        out.push_str(&format!(r#" data-character="{}""#, escape_xml(&c.to_string())));
    }
    out.push_str(">\n");
    out
}

fn empty_document(view_box: ViewBox, state: &str) -> String {
    let mut out = open_svg(view_box, state, None);
    out.push_str("</svg>\n");
    out
}

fn stroke_document(frame: &StrokeFrame<'_>, palette: &Palette) -> String {
    let mut out = open_svg(frame.view_box, frame.status.as_str(), Some(frame.character));

    out.push_str(&format!(
        "<g class=\"guide\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\" stroke-linejoin=\"round\">\n",
        escape_xml(&palette.pending_stroke),
        num(palette.stroke_width),
    ));
    for s in &frame.strokes {
        out.push_str(&format!("<path d=\"{}\"/>\n", escape_xml(s.geometry)));
    }
    out.push_str("</g>\n");

    out.push_str(
        "<g class=\"ink\" fill=\"none\" stroke-linecap=\"round\" stroke-linejoin=\"round\">\n",
    );
    for s in frame.strokes.iter().filter(|s| s.visible_fraction > 0.0) {
        out.push_str(&ink_path(s, palette));
    }
    out.push_str("</g>\n");

    if !frame.labels.is_empty() {
        out.push_str("<g class=\"labels\" font-family=\"sans-serif\">\n");
        for l in &frame.labels {
            out.push_str(&label_text(l, palette));
        }
        out.push_str("</g>\n");
    }

    out.push_str("</svg>\n");
    out
}

fn ink_path(s: &StrokeView<'_>, palette: &Palette) -> String {
    let (color, width) = match s.style {
        StyleState::Active => (&palette.active_stroke, palette.active_stroke_width),
        StyleState::Done | StyleState::Pending => (&palette.done_stroke, palette.stroke_width),
    };
    format!(
        "<path d=\"{}\" stroke=\"{}\" stroke-width=\"{}\" stroke-dasharray=\"{}\" stroke-dashoffset=\"{}\" data-order=\"{}\"/>\n",
        escape_xml(s.geometry),
        escape_xml(color),
        num(width),
        num(s.length),
        num(s.dash_offset),
        s.order,
    )
}

fn label_text(l: &LabelView, palette: &Palette) -> String {
    let (color, size, weight) = match l.style {
        StyleState::Done => (&palette.done_label, palette.label_font_size, "normal"),
        StyleState::Active => (&palette.active_label, palette.active_label_font_size, "bold"),
        StyleState::Pending => (&palette.pending_label, palette.label_font_size, "normal"),
    };
    format!(
        "<text x=\"{}\" y=\"{}\" fill=\"{}\" font-size=\"{}\" font-weight=\"{weight}\">{}</text>\n",
        num(l.position.x),
        num(l.position.y),
        escape_xml(color),
        num(size),
        l.number,
    )
}

fn fallback_document(frame: &FallbackFrame, palette: &Palette) -> String {
    let vb = frame.view_box;
    let center = vb.center();
    let mut out = open_svg(vb, "error", Some(frame.character));
    out.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-size=\"{}\" fill=\"{}\">{}</text>\n",
        num(center.x),
        num(center.y),
        num(vb.height * 0.7),
        escape_xml(&palette.fallback),
        escape_xml(&frame.character.to_string()),
    ));
    out.push_str(&format!(
        "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-size=\"{}\" fill=\"{}\">{}</text>\n",
        num(center.x),
        num(vb.y + vb.height * 0.95),
        num(vb.height * 0.06),
        escape_xml(&palette.fallback),
        escape_xml(&palette.fallback_caption),
    ));
    out.push_str("</svg>\n");
    out
}

/// Settings for [`animated_svg`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Draw time of each stroke, in seconds.
    pub stroke_duration_s: f64,
    /// How much each stroke overlaps the previous one, in seconds.
    pub stroke_overlap_s: f64,
    /// Timing curve of the draw-in.
    pub ease: Ease,
    /// Draw the undrawn guide under the animated ink.
    pub show_guide: bool,
    /// Include stroke numbers.
    pub show_labels: bool,
    /// Colors and widths.
    pub palette: Palette,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            stroke_duration_s: 0.6,
            stroke_overlap_s: 0.15,
            ease: Ease::default(),
            show_guide: true,
            show_labels: true,
            palette: Palette::default(),
        }
    }
}

impl ExportOptions {
    /// Start time of stroke `order`, in seconds.
    pub fn delay_for(&self, order: usize) -> f64 {
        order as f64 * (self.stroke_duration_s - self.stroke_overlap_s).max(0.0)
    }
}

/// Standalone SVG whose strokes draw themselves with CSS keyframes, one after another.
pub fn animated_svg(glyph: &GlyphStrokeSet, opts: &ExportOptions) -> String {
    let palette = &opts.palette;
    let mut out = open_svg(glyph.view_box, "animated", Some(glyph.character));

    out.push_str(&format!(
        "<style>\n@keyframes kakijun-draw {{ to {{ stroke-dashoffset: 0; }} }}\n.kakijun-stroke {{ animation: kakijun-draw {}s {} forwards; }}\n</style>\n",
        num(opts.stroke_duration_s),
        opts.ease.css_timing_function(),
    ));

    if opts.show_guide {
        out.push_str(&format!(
            "<g class=\"guide\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\" stroke-linejoin=\"round\">\n",
            escape_xml(&palette.pending_stroke),
            num(palette.stroke_width),
        ));
        for s in &glyph.strokes {
            out.push_str(&format!("<path d=\"{}\"/>\n", escape_xml(&s.geometry)));
        }
        out.push_str("</g>\n");
    }

    out.push_str(&format!(
        "<g class=\"ink\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\" stroke-linejoin=\"round\">\n",
        escape_xml(&palette.done_stroke),
        num(palette.stroke_width),
    ));
    for s in &glyph.strokes {
        out.push_str(&format!(
            "<path class=\"kakijun-stroke\" d=\"{}\" stroke-dasharray=\"{len}\" stroke-dashoffset=\"{len}\" style=\"animation-delay: {}s\"/>\n",
            escape_xml(&s.geometry),
            num(opts.delay_for(s.order)),
            len = num(s.length),
        ));
    }
    out.push_str("</g>\n");

    if opts.show_labels && !glyph.labels.is_empty() {
        out.push_str(&format!(
            "<g class=\"labels\" font-family=\"sans-serif\" fill=\"{}\" font-size=\"{}\">\n",
            escape_xml(&palette.pending_label),
            num(palette.label_font_size),
        ));
        for l in &glyph.labels {
            out.push_str(&format!(
                "<text x=\"{}\" y=\"{}\">{}</text>\n",
                num(l.position.x),
                num(l.position.y),
                l.number,
            ));
        }
        out.push_str("</g>\n");
    }

    out.push_str("</svg>\n");
    out
}

/// Escape text for use in XML attribute values and character data.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Compact decimal: at most 3 fractional digits, trailing zeros removed.
fn num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
