use crate::{
    animation::curve::{Curve, CurveKey},
    animation::ease::Ease,
    animation::spring::SpringConfig,
    camera::offset::{Axis, StackLayout},
    foundation::color::Rgba8,
    foundation::core::Fps,
    foundation::error::SceneResult,
    scene::builder::Scene,
    scene::config::{HighlightSpec, OverlaySpec, PhaseSpec, RevealSpec, SceneConfig, VisualElement},
    timeline::focus::FocusRule,
};

/// Configuration of the title card: the letters O, N, I fade in one after another, then the
/// tagline eases in. 210 frames at 30 fps, no focus.
pub fn title_config() -> SceneResult<SceneConfig> {
    let elements = ["O", "N", "I"]
        .iter()
        .enumerate()
        .map(|(i, letter)| VisualElement {
            id: (*letter).to_owned(),
            order_index: i,
            zone: "letters".to_owned(),
            base_color: Rgba8::rgb(0xff, 0xff, 0xff),
            label: Some((*letter).to_owned()),
        })
        .collect();

    let tagline = Curve::new(vec![
        CurveKey::eased(100.0, 0.0, Ease::InOutCubic),
        CurveKey::new(140.0, 1.0),
    ])?;

    Ok(SceneConfig {
        id: "title".to_owned(),
        fps: Fps::new(30, 1)?,
        elements,
        phases: vec![PhaseSpec {
            id: "title".to_owned(),
            start_frame: 0,
            end_frame: 210,
            focus: FocusRule::None,
            emphasis: None,
            overlays: vec![OverlaySpec {
                id: "tagline".to_owned(),
                text: "OPEN NEUROSECURITY INTEROPERABILITY".to_owned(),
                opacity: tagline,
            }],
        }],
        stack: StackLayout {
            element_extent: 140.0,
            gap: 12.0,
            axis: Axis::Horizontal,
        },
        reveal: RevealSpec {
            phase: None,
            delay: 35,
            stagger: 8,
            fade_in: 50,
            ease: Ease::InOutCubic,
        },
        highlight: HighlightSpec {
            overview: Some(1.0),
            ..HighlightSpec::default()
        },
        camera_spring: SpringConfig::default(),
        focus_spring: SpringConfig::new(20.0, 100.0),
        script_scene: None,
    })
}

/// Compiled title scene.
pub fn title_scene() -> SceneResult<Scene> {
    Scene::new(title_config()?)
}
