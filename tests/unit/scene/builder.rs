use super::*;
use crate::{
    animation::spring::SpringConfig,
    camera::offset::{Axis, StackLayout},
    foundation::color::Rgba8,
    scene::config::{HighlightSpec, OverlaySpec, PhaseSpec, RevealSpec},
};

fn phase(id: &str, start: u64, end: u64, focus: FocusRule) -> PhaseSpec {
    PhaseSpec {
        id: id.to_owned(),
        start_frame: start,
        end_frame: end,
        focus,
        emphasis: None,
        overlays: vec![],
    }
}

fn config() -> SceneConfig {
    let elements = ["a", "b", "c"]
        .iter()
        .enumerate()
        .map(|(i, id)| VisualElement {
            id: (*id).to_owned(),
            order_index: i,
            zone: "z".to_owned(),
            base_color: Rgba8::rgb(10, 20, 30),
            label: None,
        })
        .collect();
    let mut intro = phase("intro", 0, 30, FocusRule::None);
    intro.overlays.push(OverlaySpec {
        id: "hello".to_owned(),
        text: "Hello".to_owned(),
        opacity: Curve::from_pairs(&[(0.0, 0.0), (10.0, 1.0)]).unwrap(),
    });
    SceneConfig {
        id: "demo".to_owned(),
        fps: Fps::new(30, 1).unwrap(),
        elements,
        phases: vec![
            intro,
            phase(
                "walk",
                30,
                90,
                FocusRule::Pan {
                    from: 0,
                    to: 2,
                    dwell: 20,
                },
            ),
            phase("outro", 90, 120, FocusRule::None),
        ],
        stack: StackLayout {
            element_extent: 50.0,
            gap: 10.0,
            axis: Axis::Vertical,
        },
        reveal: RevealSpec {
            stagger: 5,
            fade_in: 10,
            ..RevealSpec::default()
        },
        highlight: HighlightSpec::default(),
        camera_spring: SpringConfig::new(30.0, 50.0),
        focus_spring: SpringConfig::new(20.0, 100.0),
        script_scene: None,
    }
}

fn scene() -> Scene {
    Scene::new(config()).unwrap()
}

#[test]
fn negative_frames_are_range_errors() {
    assert!(scene().eval_frame(-1).unwrap_err().is_range());
}

#[test]
fn reveal_is_staggered_by_order() {
    let s = scene();
    let st = s.eval_frame(5).unwrap();
    assert_eq!(st.element("a").unwrap().opacity, 0.5);
    assert_eq!(st.element("b").unwrap().opacity, 0.0);
    let st = s.eval_frame(10).unwrap();
    assert_eq!(st.element("b").unwrap().opacity, 0.5);
    assert_eq!(st.element("c").unwrap().opacity, 0.0);
    let st = s.eval_frame(25).unwrap();
    assert!(st.elements.values().all(|e| e.opacity == 1.0));
}

#[test]
fn focus_highlights_and_dims() {
    let s = scene();
    let st = s.eval_frame(0).unwrap();
    assert_eq!(st.focus, None);
    assert!(st.elements.values().all(|e| e.highlight == 0.4 && !e.focal));

    let st = s.eval_frame(30).unwrap();
    assert_eq!(st.phase, "walk");
    assert_eq!(st.local_frame, 0);
    assert_eq!(st.focus.as_deref(), Some("a"));
    let a = st.element("a").unwrap();
    assert!(a.focal);
    assert_eq!(a.highlight, 1.0);
    assert_eq!(a.scale, 1.0);
    assert_eq!(st.element("b").unwrap().highlight, 0.4);
    assert_eq!(a.effective_opacity(), 1.0);
    assert_eq!(st.element("b").unwrap().effective_opacity(), 0.4);

    // Still fading in: highlight scales the reveal opacity.
    let st = s.eval_frame(15).unwrap();
    let c = st.element("c").unwrap();
    assert!(c.opacity > 0.0 && c.opacity < 1.0);
    assert_eq!(c.effective_opacity(), c.opacity * 0.4);

    let st = s.eval_frame(49).unwrap();
    let a = st.element("a").unwrap();
    assert!(a.scale > 1.07 && a.scale <= 1.08, "scale {}", a.scale);
    assert!(a.glow > 0.9, "glow {}", a.glow);
}

#[test]
fn released_element_eases_back_to_rest() {
    let s = scene();
    let before = s.eval_frame(49).unwrap();
    let at = s.eval_frame(50).unwrap();
    assert_eq!(at.focus.as_deref(), Some("b"));
    let (a0, a1) = (before.element("a").unwrap(), at.element("a").unwrap());
    assert_eq!(a0.scale, a1.scale);
    assert_eq!(a0.glow, a1.glow);

    let later = s.eval_frame(69).unwrap();
    let a = later.element("a").unwrap();
    assert!((a.scale - 1.0).abs() < 0.002, "scale {}", a.scale);
    assert!(a.glow < 0.05, "glow {}", a.glow);
}

#[test]
fn overview_factor_overrides_dim_without_focus() {
    let mut cfg = config();
    cfg.highlight.overview = Some(1.0);
    let s = Scene::new(cfg).unwrap();
    let st = s.eval_frame(0).unwrap();
    assert!(st.elements.values().all(|e| e.highlight == 1.0));
    let st = s.eval_frame(30).unwrap();
    assert_eq!(st.element("c").unwrap().highlight, 0.4);
}

#[test]
fn overlays_are_phase_local_and_hidden_at_zero() {
    let s = scene();
    assert!(s.eval_frame(0).unwrap().overlays.is_empty());
    let st = s.eval_frame(5).unwrap();
    assert_eq!(st.overlay("hello").unwrap().opacity, 0.5);
    assert!(s.eval_frame(30).unwrap().overlay("hello").is_none());
}

#[test]
fn frames_past_end_hold_final_state() {
    let s = scene();
    let end = s.eval_frame(120).unwrap();
    let late = s.eval_frame(10_000).unwrap();
    assert_eq!(late.held_frame, end.held_frame);
    assert_eq!(late.frame, FrameIndex(10_000));
    assert_eq!(late.elements, end.elements);
    assert_eq!(late.camera_offset, end.camera_offset);
    assert_eq!(late.phase, "outro");
}

#[test]
fn evaluation_is_deterministic() {
    let s = scene();
    for f in [0i64, 33, 71, 119, 50, 7] {
        assert_eq!(s.eval_frame(f).unwrap(), scene().eval_frame(f).unwrap());
    }
}

#[test]
fn camera_offset_is_shared_by_all_elements() {
    let st = scene().eval_frame(80).unwrap();
    assert!(st.elements.values().all(|e| e.offset == st.camera_offset));
}

#[test]
fn captions_follow_scene_frames() {
    let line = |text: &str, start, end, scene: &str| CaptionEntry {
        text: text.to_owned(),
        start_frame: start,
        end_frame: end,
        scene_id: scene.to_owned(),
    };
    let script = ScriptTimeline::new(vec![
        line("Before.", 0, 1000, "other"),
        line("First.", 1000, 1060, "demo"),
        line("Second.", 1060, 1120, "demo"),
    ])
    .unwrap();
    let s = scene().with_script(&script).unwrap();
    assert_eq!(s.eval_frame(59).unwrap().caption.as_deref(), Some("First."));
    assert_eq!(s.eval_frame(60).unwrap().caption.as_deref(), Some("Second."));
    assert_eq!(s.eval_frame(120).unwrap().caption, None);

    let none = ScriptTimeline::new(vec![line("Only.", 0, 10, "other")]).unwrap();
    assert!(scene().with_script(&none).unwrap_err().is_config());
}

#[test]
fn invalid_structure_is_config_error() {
    let mut cfg = config();
    cfg.phases[1].start_frame = 31;
    assert!(Scene::new(cfg).unwrap_err().is_config());

    let mut cfg = config();
    cfg.phases[1].focus = FocusRule::Fixed { index: 3 };
    assert!(Scene::new(cfg).unwrap_err().is_config());
}
