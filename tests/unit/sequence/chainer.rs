use super::*;
use crate::glyph::source::MemoryGlyphSource;

const MIZU: &str = include_str!("../../data/kanjivg/06c34.svg");
const YAMA: &str = include_str!("../../data/kanjivg/05c71.svg");

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn source() -> MemoryGlyphSource {
    MemoryGlyphSource::new().with('水', MIZU).with('山', YAMA)
}

fn chainer(text: &str) -> SequenceChainer<MemoryGlyphSource> {
    SequenceChainer::new(text, PlaybackConfig::default(), source()).unwrap()
}

#[test]
fn progress_counts_strokes_of_the_focused_character() {
    let mut c = chainer("水山");
    assert_eq!(c.state().progress, 0.0);
    c.play().unwrap();

    c.tick(ms(1600));
    let st = c.state();
    assert_eq!(st.character.current_stroke_index, 2);
    assert!((st.progress - 0.25).abs() < 1e-9);

    c.tick(ms(3200));
    assert!((c.state().progress - 0.5).abs() < 1e-9);

    c.tick(ms(4500));
    assert_eq!(c.current_index(), 1);
    assert!((c.state().progress - (1.0 + 1.0 / 3.0) / 2.0).abs() < 1e-9);
}

#[test]
fn empty_after_filtering_is_rejected() {
    let err = SequenceChainer::new("ひらがな、。 ", PlaybackConfig::default(), source()).unwrap_err();
    assert!(matches!(err, KakijunError::EmptySequence));
}

#[test]
fn filters_and_focuses_first_character() {
    let c = chainer("水と山。");
    assert_eq!(c.characters(), &['水', '山']);
    let st = c.state();
    assert_eq!(st.status, SequenceStatus::Ready);
    assert_eq!(st.current_character_index, 0);
    assert_eq!(st.marks, vec![CharacterMark::Current, CharacterMark::Upcoming]);
    assert_eq!(st.character.total_strokes, 4);
    assert_eq!(st.character.status, PlaybackStatus::Ready);
    assert_eq!(c.current_controller().character(), Some('水'));
}

#[test]
fn plays_through_to_complete() {
    let mut c = chainer("水山");
    c.play().unwrap();

    c.tick(ms(3200));
    assert_eq!(c.status(), SequenceStatus::Intermission);
    assert_eq!(c.current_index(), 0);

    c.tick(ms(3699));
    assert_eq!(c.status(), SequenceStatus::Intermission);

    let events = c.tick(ms(3700));
    assert!(events.contains(&SequenceEvent::CharacterStarted { character_index: 1 }));
    assert_eq!(c.status(), SequenceStatus::Playing);
    assert_eq!(c.current_index(), 1);

    c.tick(ms(6099));
    assert_eq!(c.status(), SequenceStatus::Playing);
    let events = c.tick(ms(6100));
    assert_eq!(events.last(), Some(&SequenceEvent::Complete));
    let st = c.state();
    assert_eq!(st.status, SequenceStatus::Complete);
    assert_eq!(st.progress, 1.0);
    assert_eq!(st.character.current_stroke_index, 3);
}

#[test]
fn one_late_tick_runs_the_whole_schedule() {
    let mut c = chainer("水山");
    c.play().unwrap();
    let events = c.tick(ms(60_000));
    let second_finished = events.iter().find_map(|e| match e {
        SequenceEvent::Stroke {
            character_index: 1,
            event: PlaybackEvent::Finished { at },
        } => Some(*at),
        _ => None,
    });
    assert_eq!(second_finished, Some(ms(6100)));
    assert_eq!(events.last(), Some(&SequenceEvent::Complete));
}

#[test]
fn pause_during_intermission_cancels_advance() {
    let mut c = chainer("水山");
    c.play().unwrap();
    c.tick(ms(3300));
    assert_eq!(c.status(), SequenceStatus::Intermission);

    c.pause();
    assert_eq!(c.status(), SequenceStatus::Paused);
    c.tick(ms(10_000));
    assert_eq!(c.current_index(), 0);
    assert_eq!(c.status(), SequenceStatus::Paused);

    // Resuming moves on to the next character right away.
    c.play().unwrap();
    assert_eq!(c.current_index(), 1);
    assert_eq!(c.status(), SequenceStatus::Playing);
    c.tick(ms(12_400));
    assert_eq!(c.status(), SequenceStatus::Complete);
}

#[test]
fn navigation_stops_and_resets_focused_character() {
    let mut c = chainer("水山");
    c.play().unwrap();
    c.tick(ms(1000));

    assert!(c.next_character());
    assert_eq!(c.status(), SequenceStatus::Ready);
    assert_eq!(c.current_index(), 1);
    assert_eq!(c.state().character.current_stroke_index, 0);
    assert!(!c.next_character());

    // Nothing left over from the first character's schedule.
    let events = c.tick(ms(20_000));
    assert!(events.is_empty());

    assert!(c.prev_character());
    assert_eq!(c.current_index(), 0);
    assert_eq!(c.state().character.current_stroke_index, 0);
    assert_eq!(c.state().character.status, PlaybackStatus::Ready);
    assert!(!c.prev_character());

    assert!(c.jump_to_character(2).is_err());
    c.jump_to_character(1).unwrap();
    assert_eq!(c.state().marks, vec![CharacterMark::Done, CharacterMark::Current]);
}

#[test]
fn play_after_complete_restarts() {
    let mut c = chainer("水山");
    c.play().unwrap();
    c.tick(ms(6100));
    assert_eq!(c.status(), SequenceStatus::Complete);

    c.play().unwrap();
    assert_eq!(c.current_index(), 0);
    assert_eq!(c.status(), SequenceStatus::Playing);
    let events = c.tick(ms(6100 + 800));
    assert!(events.contains(&SequenceEvent::Stroke {
        character_index: 0,
        event: PlaybackEvent::StrokeCompleted {
            index: 0,
            at: ms(6900)
        },
    }));
}

#[test]
fn reset_rewinds_to_first_character() {
    let mut c = chainer("水山");
    c.play().unwrap();
    c.tick(ms(4000));
    assert_eq!(c.current_index(), 1);

    c.reset();
    assert_eq!(c.status(), SequenceStatus::Ready);
    assert_eq!(c.current_index(), 0);
    assert!(c.tick(ms(30_000)).is_empty());
}

#[test]
fn missing_character_is_skipped_during_autoplay() {
    let src = MemoryGlyphSource::new().with('水', MIZU).with('山', YAMA);
    let mut c = SequenceChainer::new("水火山", PlaybackConfig::default(), src).unwrap();
    c.play().unwrap();

    c.tick(ms(3700));
    assert_eq!(c.current_index(), 1);
    assert!(c.frame().is_fallback());
    assert_eq!(c.state().character.status, PlaybackStatus::Error);
    assert_eq!(c.status(), SequenceStatus::Intermission);

    c.tick(ms(4200));
    assert_eq!(c.current_index(), 2);
    assert_eq!(c.status(), SequenceStatus::Playing);
    c.tick(ms(4200 + 2400));
    assert_eq!(c.status(), SequenceStatus::Complete);
}

#[test]
fn play_on_failed_character_moves_on() {
    let src = MemoryGlyphSource::new().with('水', MIZU);
    let mut c = SequenceChainer::new("火水", PlaybackConfig::default(), src).unwrap();
    assert!(c.frame().is_fallback());

    c.play().unwrap();
    assert_eq!(c.current_index(), 1);
    assert_eq!(c.status(), SequenceStatus::Playing);
    c.tick(ms(3200));
    assert_eq!(c.status(), SequenceStatus::Complete);
}

#[test]
fn speed_is_shared() {
    let mut c = chainer("水山");
    assert_eq!(c.set_speed(2.0).unwrap(), 2.0);
    assert!(c.set_speed(-1.0).is_err());
    c.play().unwrap();
    // 4 x 400 + 500 + 3 x 400
    c.tick(ms(3300));
    assert_eq!(c.status(), SequenceStatus::Complete);
    assert_eq!(c.state().speed, 2.0);
}

#[test]
fn steps_stop_autoplay() {
    let mut c = chainer("水山");
    c.apply(ControlCommand::TogglePlay).unwrap();
    c.tick(ms(100));
    c.apply(ControlCommand::StepForward).unwrap();
    assert_eq!(c.status(), SequenceStatus::Paused);
    assert_eq!(c.state().character.current_stroke_index, 1);
    c.apply(ControlCommand::NextCharacter).unwrap();
    assert_eq!(c.current_index(), 1);
    c.apply(ControlCommand::Reset).unwrap();
    assert_eq!(c.current_index(), 0);
}

#[test]
fn auto_play_config_starts_immediately() {
    let cfg = PlaybackConfig {
        auto_play: true,
        ..PlaybackConfig::default()
    };
    let mut c = SequenceChainer::new("水", cfg, source()).unwrap();
    assert_eq!(c.status(), SequenceStatus::Playing);
    let events = c.tick(ms(3200));
    assert_eq!(events.last(), Some(&SequenceEvent::Complete));
}
