use super::*;

#[test]
fn defaults_validate() {
    let cfg = PlaybackConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.stroke_duration(1.0), Duration::from_millis(800));
    assert_eq!(cfg.inter_character_pause(), Duration::from_millis(500));
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = PlaybackConfig::from_json_str(
        r#"{ "base_stroke_ms": 600, "auto_play": true, "palette": { "active_stroke": "red" } }"#,
    )
    .unwrap();
    assert_eq!(cfg.base_stroke_ms, 600);
    assert!(cfg.auto_play);
    assert_eq!(cfg.palette.active_stroke, "red");
    assert_eq!(cfg.palette.done_stroke, "#1a1a1a");
    assert_eq!(cfg.max_speed, 3.0);
}

#[test]
fn json_round_trips() {
    let cfg = PlaybackConfig {
        ease: Ease::Linear,
        ..PlaybackConfig::default()
    };
    let s = serde_json::to_string(&cfg).unwrap();
    assert_eq!(PlaybackConfig::from_json_str(&s).unwrap(), cfg);
}

#[test]
fn invalid_configs_are_rejected() {
    assert!(matches!(
        PlaybackConfig::from_json_str(r#"{ "min_speed": 4.0 }"#),
        Err(KakijunError::Validation(_))
    ));
    assert!(matches!(
        PlaybackConfig::from_json_str(r#"{ "base_stroke_ms": 0 }"#),
        Err(KakijunError::Validation(_))
    ));
    assert!(matches!(
        PlaybackConfig::from_json_str(r#"{ "palette": { "stroke_width": -1 } }"#),
        Err(KakijunError::Validation(_))
    ));
    assert!(matches!(
        PlaybackConfig::from_json_str("{ nope"),
        Err(KakijunError::Serde(_))
    ));
}

#[test]
fn missing_config_file_is_other_error() {
    let err = PlaybackConfig::from_path("definitely/not/here.json").unwrap_err();
    assert!(matches!(err, KakijunError::Other(_)));
    assert!(err.to_string().contains("read config"));
}

#[test]
fn speed_is_rejected_or_clamped() {
    let cfg = PlaybackConfig::default();
    assert!(matches!(cfg.clamp_speed(0.0), Err(KakijunError::InvalidSpeed(_))));
    assert!(matches!(cfg.clamp_speed(-2.0), Err(KakijunError::InvalidSpeed(_))));
    assert!(cfg.clamp_speed(f64::NAN).is_err());
    assert_eq!(cfg.clamp_speed(10.0).unwrap(), 3.0);
    assert_eq!(cfg.clamp_speed(0.01).unwrap(), 0.25);
    assert_eq!(cfg.clamp_speed(1.5).unwrap(), 1.5);
}

#[test]
fn stroke_duration_scales_inversely_with_speed() {
    let cfg = PlaybackConfig::default();
    assert_eq!(cfg.stroke_duration(2.0), Duration::from_millis(400));
    assert_eq!(cfg.stroke_duration(0.5), Duration::from_millis(1600));
    assert_eq!(cfg.stroke_duration(0.25), Duration::from_millis(3200));
}

#[test]
fn whole_speed_range_is_unclamped_by_default() {
    let cfg = PlaybackConfig::default();
    let normal = cfg.stroke_duration(cfg.clamp_speed(1.0).unwrap());
    let slowest = cfg.stroke_duration(cfg.clamp_speed(0.25).unwrap());
    let fastest = cfg.stroke_duration(cfg.clamp_speed(3.0).unwrap());
    assert_eq!(slowest, normal * 4);
    assert_eq!(fastest, Duration::from_nanos(266_666_667));
}

#[test]
fn duration_bounds_that_cut_into_speed_range_are_rejected() {
    assert!(matches!(
        PlaybackConfig::from_json_str(r#"{ "max_stroke_ms": 3000 }"#),
        Err(KakijunError::Validation(_))
    ));
    assert!(matches!(
        PlaybackConfig::from_json_str(r#"{ "base_stroke_ms": 300, "min_stroke_ms": 150 }"#),
        Err(KakijunError::Validation(_))
    ));
    PlaybackConfig::from_json_str(r#"{ "base_stroke_ms": 450, "min_stroke_ms": 150 }"#).unwrap();
}
