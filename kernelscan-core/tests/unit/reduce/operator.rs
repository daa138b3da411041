use super::*;

#[test]
fn median_of_odd_window_is_the_middle_value() {
    assert_eq!(median(&[1.0, 1.0, 2.0, 1.0, 1.0, 2.0, 4.0, 4.0, 5.0]), 1.0);
    assert_eq!(median(&[9.0, 1.0, 5.0]), 5.0);
}

#[test]
fn median_of_even_window_averages_middles() {
    assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
}

#[test]
fn builtins_reduce_as_named() {
    let v = [3.0, -1.0, 7.0, 1.0, 5.0];
    assert_eq!(ReductionKind::Median.reduce(&v).unwrap(), 3.0);
    assert_eq!(ReductionKind::Min.reduce(&v).unwrap(), -1.0);
    assert_eq!(ReductionKind::Max.reduce(&v).unwrap(), 7.0);
    assert_eq!(ReductionKind::Mean.reduce(&v).unwrap(), 3.0);
}

#[test]
fn empty_window_is_an_error() {
    assert!(ReductionKind::Median.reduce(&[]).is_err());
}

#[test]
fn identifiers_parse_case_insensitively() {
    assert_eq!("Median".parse::<ReductionKind>().unwrap(), ReductionKind::Median);
    assert_eq!(" MAX ".parse::<ReductionKind>().unwrap(), ReductionKind::Max);
    assert!(matches!(
        "mode".parse::<ReductionKind>(),
        Err(KernelScanError::Validation(_))
    ));
    assert_eq!(ReductionKind::default(), ReductionKind::Median);
}

#[test]
fn serde_uses_lowercase_identifiers() {
    let json = serde_json::to_string(&ReductionKind::Mean).unwrap();
    assert_eq!(json, "\"mean\"");
    let back: ReductionKind = serde_json::from_str("\"min\"").unwrap();
    assert_eq!(back, ReductionKind::Min);
}

#[test]
fn fn_operator_forwards_name_and_result() {
    let op = FnOperator::new("first", |v: &[f64]| Ok(v[0]));
    assert_eq!(op.name(), "first");
    assert_eq!(op.reduce(&[4.0, 2.0]).unwrap(), 4.0);
}
