use scene_timeline::{Scene, SceneConfig, ScriptTimeline};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let s = include_str!("../tests/data/layers_scene.json");
    let script = ScriptTimeline::from_json_str(include_str!("../tests/data/script.json"))?;
    let scene = Scene::new(SceneConfig::from_json_str(s)?)?.with_script(&script)?;

    for f in [0i64, 160, 500, 600, 800, 1100, 1500] {
        let st = scene.eval_frame(f)?;
        println!(
            "frame {f}: phase={} focus={} camera_y={:.1} caption={:?}",
            st.phase,
            st.focus.as_deref().unwrap_or("-"),
            st.camera_offset.y,
            st.caption.as_deref().unwrap_or("")
        );
    }

    Ok(())
}
