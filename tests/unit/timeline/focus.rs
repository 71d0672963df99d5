use super::*;

fn layer_phases() -> PhaseTimeline {
    PhaseTimeline::from_durations([
        ("intro", 150u64),
        ("silicon", 300),
        ("gateway", 300),
        ("biology", 300),
        ("overview", 150),
    ])
    .unwrap()
}

fn layer_rules() -> [FocusRule; 5] {
    [
        FocusRule::None,
        FocusRule::Pan {
            from: 0,
            to: 6,
            dwell: 40,
        },
        FocusRule::Fixed { index: 7 },
        FocusRule::Pan {
            from: 8,
            to: 13,
            dwell: 50,
        },
        FocusRule::None,
    ]
}

#[test]
fn pan_steps_at_dwell_and_holds_last_index() {
    let track = FocusTrack::new(&layer_phases(), &layer_rules(), 14).unwrap();
    assert_eq!(track.focal_index(FrameIndex(0)), None);
    assert_eq!(track.focal_index(FrameIndex(149)), None);
    assert_eq!(track.focal_index(FrameIndex(150)), Some(0));
    assert_eq!(track.focal_index(FrameIndex(189)), Some(0));
    assert_eq!(track.focal_index(FrameIndex(190)), Some(1));
    assert_eq!(track.focal_index(FrameIndex(390)), Some(6));
    assert_eq!(track.focal_index(FrameIndex(449)), Some(6));
    assert_eq!(track.focal_index(FrameIndex(450)), Some(7));
    assert_eq!(track.focal_index(FrameIndex(800)), Some(9));
    assert_eq!(track.focal_index(FrameIndex(1049)), Some(13));
    assert_eq!(track.focal_index(FrameIndex(1050)), None);
    assert_eq!(track.focal_index(FrameIndex(5000)), None);
}

#[test]
fn matches_floor_division_rule_for_every_frame() {
    let track = FocusTrack::new(&layer_phases(), &layer_rules(), 14).unwrap();
    for f in 0..1200u64 {
        let expected = match f {
            0..150 => None,
            150..450 => Some(((f - 150) / 40).min(6) as usize),
            450..750 => Some(7),
            750..1050 => Some((8 + (f - 750) / 50).min(13) as usize),
            _ => None,
        };
        assert_eq!(track.focal_index(FrameIndex(f)), expected, "frame {f}");
    }
}

#[test]
fn segments_are_contiguous_and_merged() {
    let tl = PhaseTimeline::from_durations([("a", 10u64), ("b", 10), ("c", 10)]).unwrap();
    let rules = [
        FocusRule::Fixed { index: 2 },
        FocusRule::Fixed { index: 2 },
        FocusRule::None,
    ];
    let track = FocusTrack::new(&tl, &rules, 3).unwrap();
    assert_eq!(track.segments().len(), 2);
    assert_eq!(track.segments()[0].range.end, FrameIndex(20));
    for w in track.segments().windows(2) {
        assert_eq!(w[0].range.end, w[1].range.start);
    }
}

#[test]
fn backwards_pan_and_short_phase() {
    let tl = PhaseTimeline::from_durations([("p", 25u64)]).unwrap();
    let rules = [FocusRule::Pan {
        from: 5,
        to: 0,
        dwell: 10,
    }];
    let track = FocusTrack::new(&tl, &rules, 6).unwrap();
    assert_eq!(track.focal_index(FrameIndex(0)), Some(5));
    assert_eq!(track.focal_index(FrameIndex(10)), Some(4));
    assert_eq!(track.focal_index(FrameIndex(24)), Some(3));
    assert_eq!(track.segments().last().unwrap().range.end, FrameIndex(25));
}

#[test]
fn invalid_rules_are_config_errors() {
    let tl = PhaseTimeline::from_durations([("p", 25u64)]).unwrap();
    let out_of_range = FocusTrack::new(&tl, &[FocusRule::Fixed { index: 3 }], 3);
    assert!(out_of_range.unwrap_err().is_config());

    let zero_dwell = FocusTrack::new(
        &tl,
        &[FocusRule::Pan {
            from: 0,
            to: 1,
            dwell: 0,
        }],
        3,
    );
    assert!(zero_dwell.unwrap_err().is_config());

    let arity = FocusTrack::new(&tl, &[], 3);
    assert!(arity.unwrap_err().is_config());
}

#[test]
fn rule_json_shape() {
    let r: FocusRule =
        serde_json::from_str(r#"{"kind": "pan", "from": 0, "to": 6, "dwell": 40}"#).unwrap();
    assert_eq!(
        r,
        FocusRule::Pan {
            from: 0,
            to: 6,
            dwell: 40
        }
    );
    let r: FocusRule = serde_json::from_str(r#"{"kind": "none"}"#).unwrap();
    assert_eq!(r, FocusRule::None);
}
