use crate::{
    animation::curve::Curve,
    animation::spring::SpringConfig,
    camera::offset::{Axis, StackLayout},
    foundation::color::Rgba8,
    foundation::core::Fps,
    foundation::error::SceneResult,
    scene::builder::Scene,
    scene::config::{
        EmphasisSpec, HighlightSpec, OverlaySpec, PhaseSpec, RevealSpec, SceneConfig,
        VisualElement,
    },
    timeline::focus::FocusRule,
};

const LAYERS: [(&str, &str, &str, Rgba8); 14] = [
    ("L1", "Physical Carrier", "silicon", Rgba8::rgb(0x1e, 0x3a, 0x8a)),
    ("L2", "Signal Processing", "silicon", Rgba8::rgb(0x1d, 0x4e, 0xd8)),
    ("L3", "Protocol", "silicon", Rgba8::rgb(0x25, 0x63, 0xeb)),
    ("L4", "Transport", "silicon", Rgba8::rgb(0x3b, 0x82, 0xf6)),
    ("L5", "Session", "silicon", Rgba8::rgb(0x60, 0xa5, 0xfa)),
    ("L6", "Presentation", "silicon", Rgba8::rgb(0x93, 0xc5, 0xfd)),
    ("L7", "Application Interface", "silicon", Rgba8::rgb(0xbf, 0xdb, 0xfe)),
    ("L8", "Neural Gateway", "gateway", Rgba8::rgb(0xf5, 0x9e, 0x0b)),
    ("L9", "Ion Channel Encoding", "biology", Rgba8::rgb(0xbb, 0xf7, 0xd0)),
    ("L10", "Spike Train", "biology", Rgba8::rgb(0x86, 0xef, 0xac)),
    ("L11", "Neural Population", "biology", Rgba8::rgb(0x4a, 0xde, 0x80)),
    ("L12", "Circuit Dynamics", "biology", Rgba8::rgb(0x22, 0xc5, 0x5e)),
    ("L13", "Cognitive Function", "biology", Rgba8::rgb(0x16, 0xa3, 0x4a)),
    ("L14", "Identity & Ethics", "biology", Rgba8::rgb(0x15, 0x80, 0x3d)),
];

/// Configuration of the 14-layer stack walkthrough (1200 frames at 30 fps).
///
/// | phase    | frames      | focus                    |
/// |----------|-------------|--------------------------|
/// | intro    | 0..150      | none, intro text         |
/// | silicon  | 150..450    | L1..L7, 40 frames each   |
/// | gateway  | 450..750    | L8 zoom and glow         |
/// | biology  | 750..1050   | L9..L14, 50 frames each  |
/// | overview | 1050..1200  | none                     |
pub fn layers_config() -> SceneResult<SceneConfig> {
    let elements = LAYERS
        .iter()
        .enumerate()
        .map(|(i, &(id, label, zone, color))| VisualElement {
            id: id.to_owned(),
            order_index: i,
            zone: zone.to_owned(),
            base_color: color,
            label: Some(label.to_owned()),
        })
        .collect();

    let phase = |id: &str, start: u64, end: u64, focus: FocusRule| PhaseSpec {
        id: id.to_owned(),
        start_frame: start,
        end_frame: end,
        focus,
        emphasis: None,
        overlays: vec![],
    };

    let mut intro = phase("intro", 0, 150, FocusRule::None);
    intro.overlays.push(OverlaySpec {
        id: "intro".to_owned(),
        text: "14 layers spanning silicon to synapse".to_owned(),
        opacity: Curve::from_pairs(&[(0.0, 0.0), (30.0, 1.0), (120.0, 1.0), (150.0, 0.0)])?,
    });

    let mut gateway = phase("gateway", 450, 750, FocusRule::Fixed { index: 7 });
    gateway.emphasis = Some(EmphasisSpec {
        zone: Some("gateway".to_owned()),
        scale: Some(Curve::from_pairs(&[
            (0.0, 1.0),
            (100.0, 1.8),
            (200.0, 1.8),
            (300.0, 1.0),
        ])?),
        glow: Some(Curve::from_pairs(&[
            (0.0, 0.0),
            (50.0, 1.0),
            (250.0, 1.0),
            (300.0, 0.3),
        ])?),
    });
    gateway.overlays.push(OverlaySpec {
        id: "bridge".to_owned(),
        text: "The critical bridge between machine and mind".to_owned(),
        opacity: Curve::from_pairs(&[(50.0, 0.0), (100.0, 1.0), (250.0, 1.0), (300.0, 0.0)])?,
    });

    Ok(SceneConfig {
        id: "layers".to_owned(),
        fps: Fps::new(30, 1)?,
        elements,
        phases: vec![
            intro,
            phase(
                "silicon",
                150,
                450,
                FocusRule::Pan {
                    from: 0,
                    to: 6,
                    dwell: 40,
                },
            ),
            gateway,
            phase(
                "biology",
                750,
                1050,
                FocusRule::Pan {
                    from: 8,
                    to: 13,
                    dwell: 50,
                },
            ),
            phase("overview", 1050, 1200, FocusRule::None),
        ],
        stack: StackLayout {
            element_extent: 55.0,
            gap: 6.0,
            axis: Axis::Vertical,
        },
        reveal: RevealSpec {
            phase: Some("silicon".to_owned()),
            ..RevealSpec::default()
        },
        highlight: HighlightSpec::default(),
        camera_spring: SpringConfig::new(30.0, 50.0),
        focus_spring: SpringConfig::new(20.0, 100.0),
        script_scene: None,
    })
}

/// Compiled layer-stack scene.
pub fn layers_scene() -> SceneResult<Scene> {
    Scene::new(layers_config()?)
}
