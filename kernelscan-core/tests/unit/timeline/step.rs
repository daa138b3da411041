use super::*;

fn step(position: usize, phase: Phase, duration: f64) -> AnimationStep {
    AnimationStep {
        position,
        phase,
        subjects: vec![Coord::new(0, position)],
        color: None,
        duration,
        speed_factor: 1.0,
    }
}

fn sample() -> Timeline {
    Timeline::new(vec![
        step(0, Phase::HighlightWindow, 0.5),
        step(0, Phase::RevealResult, 0.5),
        step(0, Phase::AdvanceWindow, 1.0),
        step(1, Phase::HighlightWindow, 0.25),
        step(1, Phase::RevealResult, 0.25),
        step(1, Phase::Complete, 0.5),
    ])
}

#[test]
fn start_times_accumulate_durations() {
    let tl = sample();
    assert_eq!(tl.total_duration(), 3.0);
    assert_eq!(tl.start_time(0), Some(0.0));
    assert_eq!(tl.start_time(3), Some(2.0));
    assert_eq!(tl.start_time(6), None);
}

#[test]
fn locate_finds_active_step_and_progress() {
    let tl = sample();
    assert_eq!(
        tl.locate(0.0),
        Some(StepCursor {
            index: 0,
            progress: 0.0
        })
    );
    assert_eq!(
        tl.locate(1.5),
        Some(StepCursor {
            index: 2,
            progress: 0.5
        })
    );
    assert_eq!(tl.locate(2.0).unwrap().index, 3);
    assert_eq!(tl.locate(3.0), None);
    assert_eq!(tl.locate(-0.1), None);
    assert_eq!(tl.locate(f64::NAN), None);
}

#[test]
fn steps_for_position_slices_contiguously() {
    let tl = sample();
    let phases: Vec<_> = tl.steps_for_position(1).iter().map(|s| s.phase).collect();
    assert_eq!(
        phases,
        vec![Phase::HighlightWindow, Phase::RevealResult, Phase::Complete]
    );
    assert!(tl.steps_for_position(2).is_empty());
}

#[test]
fn timeline_is_restartable() {
    let tl = sample();
    let first: Vec<_> = tl.iter().cloned().collect();
    let second: Vec<_> = (&tl).into_iter().cloned().collect();
    assert_eq!(first, second);
}

#[test]
fn fingerprint_tracks_content() {
    let a = sample();
    assert_eq!(a.fingerprint(), sample().fingerprint());

    let mut steps = a.steps().to_vec();
    steps[1].color = Some(DisplayColor::Gray(3));
    assert_ne!(a.fingerprint(), Timeline::new(steps).fingerprint());
}

#[test]
fn step_serializes_phase_in_snake_case_and_omits_missing_color() {
    let json = serde_json::to_value(step(0, Phase::AdvanceWindow, 1.0)).unwrap();
    assert_eq!(json["phase"], "advance_window");
    assert!(json.get("color").is_none());
}

#[test]
fn phase_names_match_serde() {
    for phase in Phase::ALL {
        assert_eq!(
            serde_json::to_value(phase).unwrap(),
            serde_json::Value::from(phase.as_str())
        );
    }
}
