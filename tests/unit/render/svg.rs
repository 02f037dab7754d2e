use super::*;
use crate::{
    foundation::config::PlaybackConfig,
    foundation::error::LoadError,
    glyph::normalize::normalize,
    glyph::source::MemoryGlyphSource,
    playback::controller::PlaybackController,
};

const MIZU: &str = include_str!("../../data/kanjivg/06c34.svg");

fn controller() -> PlaybackController {
    let mut c = PlaybackController::new(PlaybackConfig::default()).unwrap();
    let _ = c.load(&MemoryGlyphSource::new().with('水', MIZU), '水');
    c
}

fn parse_svg(doc: &str) -> roxmltree::Document<'_> {
    roxmltree::Document::parse(doc).unwrap()
}

#[test]
fn stroke_frame_is_well_formed_svg() {
    let mut c = controller();
    c.jump_to(2).unwrap();
    let mut sink = SvgSink::default();
    c.present(&mut sink).unwrap();
    assert_eq!(sink.presented(), 1);

    let doc = parse_svg(sink.document());
    let svg = doc.root_element();
    assert_eq!(svg.attribute("viewBox"), Some("0 0 109 109"));
    assert_eq!(svg.attribute("data-character"), Some("水"));
    assert_eq!(svg.attribute("data-state"), Some("ready"));

    let ink: Vec<_> = doc
        .descendants()
        .filter(|n| n.attribute("data-order").is_some())
        .collect();
    assert_eq!(ink.len(), 2);
    assert_eq!(ink[0].attribute("stroke-dashoffset"), Some("0"));
    assert_eq!(ink[0].attribute("stroke"), Some("#1a1a1a"));

    let texts: Vec<_> = doc
        .descendants()
        .filter(|n| n.has_tag_name("text"))
        .collect();
    assert_eq!(texts.len(), 4);
    assert_eq!(texts[0].attribute("fill"), Some("#1a1a1a"));
    assert_eq!(texts[2].attribute("fill"), Some("#999999"));
}

#[test]
fn active_stroke_carries_partial_dash_offset() {
    let mut c = controller();
    c.play().unwrap();
    c.tick(std::time::Duration::from_millis(400));
    let frame = c.frame();
    let f = frame.as_strokes().unwrap();
    let active = &f.strokes[0];
    assert_eq!(active.style, StyleState::Active);
    assert!(active.dash_offset > 0.0 && active.dash_offset < active.length);

    let doc_text = render_frame_svg(&frame, &Palette::default());
    let doc = parse_svg(&doc_text);
    let ink = doc
        .descendants()
        .find(|n| n.attribute("data-order") == Some("0"))
        .unwrap();
    assert_eq!(ink.attribute("stroke"), Some("#e11d48"));
    assert_eq!(ink.attribute("stroke-width"), Some("5"));
    assert_eq!(ink.attribute("stroke-dashoffset"), Some(num(active.dash_offset).as_str()));

    let first_label = doc.descendants().find(|n| n.has_tag_name("text")).unwrap();
    assert_eq!(first_label.attribute("font-weight"), Some("bold"));
    assert_eq!(first_label.attribute("font-size"), Some("12"));
}

#[test]
fn fallback_renders_character_and_caption() {
    let frame = Frame::Fallback(FallbackFrame {
        character: '<',
        view_box: ViewBox::default(),
        error: LoadError::Empty,
    });
    let text = render_frame_svg(&frame, &Palette::default());
    let doc = parse_svg(&text);
    let texts: Vec<_> = doc
        .descendants()
        .filter(|n| n.has_tag_name("text"))
        .filter_map(|n| n.text())
        .collect();
    assert_eq!(texts, vec!["<", "no stroke data"]);
}

#[test]
fn idle_and_loading_are_empty_documents() {
    let text = render_frame_svg(&Frame::Idle, &Palette::default());
    assert_eq!(parse_svg(&text).root_element().attribute("data-state"), Some("idle"));
    let text = render_frame_svg(&Frame::Loading { character: '水' }, &Palette::default());
    let doc = parse_svg(&text);
    assert_eq!(doc.root_element().attribute("data-state"), Some("loading"));
    assert_eq!(doc.root_element().children().filter(|n| n.is_element()).count(), 0);
}

#[test]
fn animated_export_staggers_strokes() {
    let glyph = normalize('水', MIZU).unwrap();
    let opts = ExportOptions::default();
    assert!((opts.delay_for(2) - 0.9).abs() < 1e-12);

    let text = animated_svg(&glyph, &opts);
    let doc = parse_svg(&text);
    let strokes: Vec<_> = doc
        .descendants()
        .filter(|n| n.attribute("class") == Some("kakijun-stroke"))
        .collect();
    assert_eq!(strokes.len(), 4);
    assert_eq!(strokes[0].attribute("style"), Some("animation-delay: 0s"));
    assert_eq!(strokes[1].attribute("style"), Some("animation-delay: 0.45s"));
    assert_eq!(strokes[3].attribute("style"), Some("animation-delay: 1.35s"));
    assert_eq!(
        strokes[0].attribute("stroke-dasharray"),
        strokes[0].attribute("stroke-dashoffset")
    );
    assert!(text.contains("@keyframes kakijun-draw"));
}

#[test]
fn escape_and_num() {
    assert_eq!(escape_xml(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&apos;");
    assert_eq!(num(4.0), "4");
    assert_eq!(num(0.45), "0.45");
    assert_eq!(num(100.0), "100");
    assert_eq!(num(-0.0001), "0");
}
