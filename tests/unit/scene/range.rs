use super::*;
use crate::presets;

fn threaded(threads: Option<usize>, chunk_size: usize) -> EvalThreading {
    EvalThreading {
        parallel: true,
        chunk_size,
        threads,
    }
}

#[test]
fn parallel_matches_sequential() {
    let scene = presets::layers_scene().unwrap();
    let range = FrameRange::new(FrameIndex(400), FrameIndex(520)).unwrap();
    let seq = eval_range(&scene, range, &EvalThreading::default()).unwrap();
    let par = eval_range(&scene, range, &threaded(Some(3), 7)).unwrap();
    assert_eq!(seq.len(), 120);
    assert_eq!(seq, par);
    assert_eq!(par[0].frame, FrameIndex(400));
    assert_eq!(par[119].frame, FrameIndex(519));
}

#[test]
fn zero_chunk_size_still_progresses() {
    let scene = presets::title_scene().unwrap();
    let range = FrameRange::new(FrameIndex(0), FrameIndex(5)).unwrap();
    assert_eq!(eval_range(&scene, range, &threaded(None, 0)).unwrap().len(), 5);
}

#[test]
fn empty_range_and_zero_threads_are_rejected() {
    let scene = presets::title_scene().unwrap();
    let empty = FrameRange::new(FrameIndex(3), FrameIndex(3)).unwrap();
    assert!(
        eval_range(&scene, empty, &EvalThreading::default())
            .unwrap_err()
            .is_range()
    );

    let range = FrameRange::new(FrameIndex(0), FrameIndex(3)).unwrap();
    assert!(
        eval_range(&scene, range, &threaded(Some(0), 8))
            .unwrap_err()
            .is_config()
    );
}

#[test]
fn unordered_frames_match_individual_calls() {
    let scene = presets::layers_scene().unwrap();
    let frames = [900i64, 3, 3, 1199, 450];
    let states = eval_frames(&scene, &frames).unwrap();
    for (f, st) in frames.iter().zip(&states) {
        assert_eq!(st, &scene.eval_frame(*f).unwrap());
    }
    assert!(eval_frames(&scene, &[1, -2]).unwrap_err().is_range());
}
