use super::*;

#[test]
fn empty_document_gives_defaults() {
    let cfg = RunConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, RunConfig::default());
    assert_eq!(cfg.fps, Fps { num: 30, den: 1 });
    assert!(!cfg.recording.enabled);
    assert_eq!(cfg.recording.frame_limit, None);
    assert_eq!(cfg.auto_record_after_frames, None);
    assert_eq!(cfg.seed, None);
}

#[test]
fn parses_partial_document() {
    let cfg = RunConfig::from_json_str(
        r#"{ "recording": { "enabled": true, "frame_limit": 300 }, "seed": 7 }"#,
    )
    .unwrap();
    assert!(cfg.recording.enabled);
    assert_eq!(cfg.recording.frame_limit, Some(300));
    assert_eq!(cfg.seed, Some(7));
    assert_eq!(cfg.auto_record_after_frames, None);
}

#[test]
fn rejects_invalid_values() {
    let err = RunConfig::from_json_str(r#"{ "fps": { "num": 30, "den": 0 } }"#).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
    let err = RunConfig::from_json_str(r#"{ "recording": { "frame_limit": 0 } }"#).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
    let err = RunConfig::from_json_str("not json").unwrap_err();
    assert!(matches!(err, ReelError::Serde(_)));
}

#[test]
fn json_round_trip() {
    let cfg = RunConfig::default().recording_from_start().with_seed(3);
    let text = cfg.to_json_pretty().unwrap();
    assert_eq!(RunConfig::from_json_str(&text).unwrap(), cfg);
}

#[test]
fn missing_file_is_wrapped() {
    let err = RunConfig::load("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, ReelError::Other(_)));
}
