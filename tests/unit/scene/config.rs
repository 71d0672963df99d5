use super::*;

const MINIMAL: &str = r##"{
    "id": "demo",
    "fps": { "num": 30, "den": 1 },
    "elements": [
        { "id": "a", "order_index": 0, "zone": "low", "base_color": "#3b82f6" },
        { "id": "b", "order_index": 1, "zone": "high" }
    ],
    "phases": [
        { "id": "only", "start_frame": 0, "end_frame": 60, "focus": { "kind": "fixed", "index": 1 } }
    ],
    "stack": { "element_extent": 40.0, "gap": 4.0 }
}"##;

#[test]
fn defaults_fill_optional_sections() {
    let cfg = SceneConfig::from_json_str(MINIMAL).unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.reveal, RevealSpec::default());
    assert_eq!(cfg.reveal.stagger, 15);
    assert_eq!(cfg.reveal.fade_in, 30);
    assert_eq!(cfg.highlight.dim, 0.4);
    assert_eq!(cfg.highlight.overview_factor(), 0.4);
    assert_eq!(cfg.highlight.focus_scale, 1.08);
    assert_eq!(cfg.camera_spring.damping, 30.0);
    assert_eq!(cfg.camera_spring.stiffness, 50.0);
    assert_eq!(cfg.elements[0].base_color, Rgba8::rgb(0x3b, 0x82, 0xf6));
    assert_eq!(cfg.script_scene_id(), "demo");
}

#[test]
fn json_roundtrip_preserves_config() {
    let cfg = SceneConfig::from_json_str(MINIMAL).unwrap();
    let back = SceneConfig::from_json_str(&cfg.to_json_pretty().unwrap()).unwrap();
    assert_eq!(cfg, back);
}

#[test]
fn malformed_json_is_serde_error() {
    let err = SceneConfig::from_json_str("{ \"id\": 3 }").unwrap_err();
    assert!(matches!(err, SceneError::Serde(_)));
}

#[test]
fn element_order_must_be_a_permutation() {
    let mut cfg = SceneConfig::from_json_str(MINIMAL).unwrap();
    cfg.elements[1].order_index = 0;
    assert!(cfg.validate().unwrap_err().is_config());

    cfg.elements[1].order_index = 2;
    assert!(cfg.validate().unwrap_err().is_config());

    cfg.elements[1].order_index = 1;
    cfg.elements[1].id = "a".to_owned();
    assert!(cfg.validate().unwrap_err().is_config());
}

#[test]
fn reveal_and_highlight_are_checked() {
    let mut cfg = SceneConfig::from_json_str(MINIMAL).unwrap();
    cfg.reveal.fade_in = 0;
    assert!(cfg.validate().unwrap_err().is_config());

    let mut cfg = SceneConfig::from_json_str(MINIMAL).unwrap();
    cfg.reveal.phase = Some("missing".to_owned());
    assert!(cfg.validate().unwrap_err().is_config());

    let mut cfg = SceneConfig::from_json_str(MINIMAL).unwrap();
    cfg.highlight.dim = 1.5;
    assert!(cfg.validate().unwrap_err().is_config());

    let mut cfg = SceneConfig::from_json_str(MINIMAL).unwrap();
    cfg.camera_spring.stiffness = 0.0;
    assert!(cfg.validate().unwrap_err().is_config());
}

#[test]
fn reveal_start_overflow_is_a_config_error() {
    let mut cfg = SceneConfig::from_json_str(MINIMAL).unwrap();
    cfg.reveal.delay = u64::MAX - 10;
    let err = cfg.validate().unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains("overflows"), "{err}");
    assert!(crate::scene::builder::Scene::new(cfg).unwrap_err().is_config());

    let mut cfg = SceneConfig::from_json_str(MINIMAL).unwrap();
    cfg.reveal.stagger = u64::MAX;
    assert!(cfg.validate().unwrap_err().is_config());
    assert!(cfg.reveal.start_frame(0, 0).is_ok());
    assert!(cfg.reveal.start_frame(0, 1).unwrap_err().is_config());

    let mut cfg = SceneConfig::from_json_str(MINIMAL).unwrap();
    cfg.reveal.delay = 5;
    cfg.reveal.stagger = 10;
    assert_eq!(cfg.reveal.start_frame(30, 1).unwrap(), 45);
    cfg.validate().unwrap();
}

#[test]
fn missing_file_reports_path() {
    let err = SceneConfig::from_path("does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"), "{err}");
}
