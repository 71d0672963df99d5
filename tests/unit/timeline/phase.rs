use super::*;

fn two_phases() -> PhaseTimeline {
    PhaseTimeline::new(vec![
        Phase::new("A", 0, 150).unwrap(),
        Phase::new("B", 150, 450).unwrap(),
    ])
    .unwrap()
}

#[test]
fn resolves_phase_and_local_frame() {
    let tl = two_phases();
    let a = tl.active_phase(300).unwrap();
    assert_eq!(a.phase.id, "B");
    assert_eq!(a.index, 1);
    assert_eq!(a.local_frame, 150);

    let a = tl.active_phase(0).unwrap();
    assert_eq!(a.phase.id, "A");
    assert_eq!(a.local_frame, 0);

    let a = tl.active_phase(149).unwrap();
    assert_eq!(a.phase.id, "A");
    let a = tl.active_phase(150).unwrap();
    assert_eq!((a.phase.id.as_str(), a.local_frame), ("B", 0));
}

#[test]
fn frames_past_the_end_hold_the_last_phase() {
    let tl = two_phases();
    let a = tl.active_phase(1000).unwrap();
    assert_eq!(a.phase.id, "B");
    assert_eq!(a.local_frame, 300);
    assert!(a.is_settled());
    assert_eq!(a.held_frame(), FrameIndex(450));

    let a = tl.active_phase(449).unwrap();
    assert!(!a.is_settled());
    assert_eq!(a.held_frame(), FrameIndex(449));
}

#[test]
fn negative_frames_are_range_errors() {
    assert!(two_phases().active_phase(-1).unwrap_err().is_range());
}

#[test]
fn every_frame_maps_to_exactly_one_phase() {
    let tl = PhaseTimeline::from_durations([("a", 7u64), ("b", 1), ("c", 30)]).unwrap();
    assert_eq!(tl.total_frames(), 38);
    for f in 0..tl.total_frames() {
        let hits = tl
            .phases()
            .iter()
            .filter(|p| p.range.contains(FrameIndex(f)))
            .count();
        assert_eq!(hits, 1, "frame {f}");
        let a = tl.active_at(FrameIndex(f));
        assert!(a.phase.range.contains(FrameIndex(f)));
    }
}

#[test]
fn gaps_overlaps_and_bad_starts_are_config_errors() {
    let gap = PhaseTimeline::new(vec![
        Phase::new("a", 0, 10).unwrap(),
        Phase::new("b", 11, 20).unwrap(),
    ]);
    assert!(gap.unwrap_err().to_string().contains("gap"));

    let overlap = PhaseTimeline::new(vec![
        Phase::new("a", 0, 10).unwrap(),
        Phase::new("b", 9, 20).unwrap(),
    ]);
    assert!(overlap.unwrap_err().to_string().contains("overlap"));

    let late = PhaseTimeline::new(vec![Phase::new("a", 5, 10).unwrap()]);
    assert!(late.unwrap_err().is_config());

    let empty = PhaseTimeline::new(vec![Phase::new("a", 0, 0).unwrap()]);
    assert!(empty.unwrap_err().is_config());

    assert!(PhaseTimeline::new(vec![]).unwrap_err().is_config());
}

#[test]
fn duplicate_ids_are_config_errors() {
    let dup = PhaseTimeline::from_durations([("a", 5u64), ("a", 5)]);
    assert!(dup.unwrap_err().to_string().contains("duplicate"));
}

#[test]
fn lookup_by_id() {
    let tl = two_phases();
    let (idx, p) = tl.phase("B").unwrap();
    assert_eq!(idx, 1);
    assert_eq!(p.duration(), 300);
    assert!(tl.phase("C").is_none());
}
