use super::*;

#[test]
fn speed_factor_starts_at_one_and_decays() {
    assert_eq!(speed_factor(0, 100.0), 1.0);
    assert_eq!(speed_factor(100, 100.0), (-1.0f64).exp());
    let mut prev = speed_factor(0, 100.0);
    for p in 1..2000 {
        let f = speed_factor(p, 100.0);
        assert!(f < prev, "p={p}");
        assert!(f > 0.0 && f <= 1.0);
        prev = f;
    }
}

#[test]
fn infinite_decay_constant_disables_decay() {
    for p in [0, 1, 1_000, 1_000_000] {
        assert_eq!(speed_factor(p, f64::INFINITY), 1.0);
    }
}

#[test]
fn speed_factor_never_reaches_zero() {
    let f = speed_factor(1_000_000, 100.0);
    assert!(f > 0.0);
    assert!(speed_factor(1_000_001, 100.0) <= f);
}

#[test]
fn duration_scales_base_by_speed_factor() {
    let pacing = Pacing::default();
    assert_eq!(pacing.duration(Phase::AdvanceWindow, 0), 1.0);
    assert_eq!(pacing.duration(Phase::Complete, 0), 0.2);
    assert_eq!(
        pacing.duration(Phase::HighlightWindow, 50),
        0.1 * (-0.5f64).exp()
    );
}

#[test]
fn invalid_pacing_is_rejected() {
    for decay in [0.0, -1.0, f64::NAN] {
        assert!(matches!(
            Pacing::new(decay, PhaseDurations::default()),
            Err(KernelScanError::Validation(_))
        ));
    }
    let bad = PhaseDurations {
        reveal_result: 0.0,
        ..PhaseDurations::default()
    };
    assert!(matches!(
        Pacing::new(100.0, bad),
        Err(KernelScanError::Validation(_))
    ));
}

#[test]
fn durations_deserialize_with_defaults() {
    let d: PhaseDurations = serde_json::from_str(r#"{ "advance_window": 0.5 }"#).unwrap();
    assert_eq!(d.advance_window, 0.5);
    assert_eq!(d.highlight_window, 0.1);
}

#[test]
fn duration_stays_positive_for_tiny_bases_on_long_scans() {
    let tiny = PhaseDurations {
        highlight_window: 1e-20,
        reveal_result: 1e-20,
        advance_window: 1e-20,
        complete: 1e-20,
    };
    let pacing = Pacing::new(100.0, tiny).unwrap();
    for phase in Phase::ALL {
        let d = pacing.duration(phase, 1_000_000);
        assert!(d > 0.0, "{phase:?}");
        assert!(d <= pacing.duration(phase, 999_999));
    }
}
