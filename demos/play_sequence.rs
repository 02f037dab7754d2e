use std::time::Duration;

use kakijun::{ControlCommand, MemoryGlyphSource, PlaybackConfig, SequenceChainer};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let source = MemoryGlyphSource::new()
        .with('水', include_str!("../tests/data/kanjivg/06c34.svg"))
        .with('山', include_str!("../tests/data/kanjivg/05c71.svg"));
    let mut chainer = SequenceChainer::new("山と水", PlaybackConfig::default(), source)?;

    chainer.apply(ControlCommand::SetSpeed(1.5))?;
    chainer.apply(ControlCommand::TogglePlay)?;

    for t in (0..=6000).step_by(250) {
        for event in chainer.tick(Duration::from_millis(t)) {
            println!("{t:>5}ms {}", serde_json::to_string(&event)?);
        }
    }

    if let Some(glyph) = chainer.current_controller().glyph() {
        println!(
            "{}: {} strokes, {:.1} units of ink",
            glyph.character,
            glyph.len(),
            glyph.total_length()
        );
    }

    let state = chainer.state();
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
