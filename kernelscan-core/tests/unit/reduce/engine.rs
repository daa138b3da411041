use super::*;
use crate::{
    foundation::core::Coord,
    reduce::operator::{FnOperator, ReductionKind},
};

fn grid_3x3() -> Grid {
    Grid::from_rows(vec![
        vec![1.0, 2.0, 3.0],
        vec![4.0, 5.0, 6.0],
        vec![7.0, 8.0, 9.0],
    ])
    .unwrap()
}

fn ramp(rows: usize, cols: usize) -> Grid {
    let values = (0..rows * cols)
        .map(|i| ((i * 37) % 101) as f64 + 1.0)
        .collect();
    Grid::new(rows, cols, values).unwrap()
}

#[test]
fn median_filter_matches_replicate_padding() {
    let derived = ReductionEngine::default()
        .reduce_all(&grid_3x3(), 3, &ReductionKind::Median)
        .unwrap();
    assert_eq!(derived.get(Coord::new(1, 1)), Some(5.0));
    assert_eq!(derived.get(Coord::new(0, 0)), Some(1.0));
    assert_eq!(derived.get(Coord::new(2, 2)), Some(9.0));
    assert_eq!(derived.dims(), grid_3x3().dims());
}

#[test]
fn kernel_of_one_is_identity() {
    let g = ramp(4, 5);
    let derived = ReductionEngine::default()
        .reduce_all(&g, 1, &ReductionKind::Median)
        .unwrap();
    assert_eq!(derived.values(), g.values());
}

#[test]
fn parallel_matches_sequential() {
    let g = ramp(17, 23);
    let seq = ReductionEngine::default()
        .reduce_all(&g, 5, &ReductionKind::Median)
        .unwrap();
    let par = ReductionEngine::new(ReduceThreading {
        parallel: true,
        threads: Some(3),
    })
    .reduce_all(&g, 5, &ReductionKind::Median)
    .unwrap();
    assert_eq!(seq, par);
}

#[test]
fn missing_center_stays_missing_and_missing_neighbors_are_dropped() {
    let g = Grid::from_rows(vec![
        vec![1.0, f64::NAN, 3.0],
        vec![4.0, 5.0, 6.0],
        vec![7.0, 8.0, 9.0],
    ])
    .unwrap();
    let derived = ReductionEngine::default()
        .reduce_all(&g, 3, &ReductionKind::Median)
        .unwrap();
    assert!(derived.get(Coord::new(0, 1)).unwrap().is_nan());
    // Center window without the missing sample: [1,3,4,5,6,7,8,9] -> (5 + 6) / 2.
    assert_eq!(derived.get(Coord::new(1, 1)), Some(5.5));
}

#[test]
fn operator_failure_reports_lowest_failing_position() {
    let op = FnOperator::new("picky", |v: &[f64]| {
        if v.iter().any(|&x| x >= 8.0) {
            anyhow::bail!("value too large");
        }
        Ok(v[0])
    });
    for threading in [
        ReduceThreading::default(),
        ReduceThreading {
            parallel: true,
            threads: Some(4),
        },
    ] {
        let err = ReductionEngine::new(threading)
            .reduce_all(&grid_3x3(), 3, &op)
            .unwrap_err();
        match err {
            KernelScanError::OperatorComputation {
                coord,
                operator,
                message,
            } => {
                assert_eq!(coord, Coord::new(1, 0));
                assert_eq!(operator, "picky");
                assert!(message.contains("value too large"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn non_finite_operator_output_is_rejected() {
    let op = FnOperator::new("nan", |_: &[f64]| Ok(f64::NAN));
    let err = ReductionEngine::default()
        .reduce_all(&grid_3x3(), 1, &op)
        .unwrap_err();
    assert!(matches!(
        err,
        KernelScanError::OperatorComputation { coord, .. } if coord == Coord::new(0, 0)
    ));
}

#[test]
fn oversized_kernel_fails_before_reducing() {
    assert!(matches!(
        ReductionEngine::default().reduce_all(&grid_3x3(), 5, &ReductionKind::Median),
        Err(KernelScanError::InvalidKernelSize { .. })
    ));
}

#[test]
fn zero_threads_is_rejected() {
    let engine = ReductionEngine::new(ReduceThreading {
        parallel: true,
        threads: Some(0),
    });
    assert!(matches!(
        engine.reduce_all(&grid_3x3(), 3, &ReductionKind::Median),
        Err(KernelScanError::Validation(_))
    ));
}
